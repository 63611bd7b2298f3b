//! CUDA runtime error codes (`cudaError_t`).

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A CUDA runtime error value. Constants match the vendor header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DriverStatus(pub i32);

impl DriverStatus {
    pub const SUCCESS: DriverStatus = DriverStatus(0);
    pub const INVALID_VALUE: DriverStatus = DriverStatus(1);
    pub const MEMORY_ALLOCATION: DriverStatus = DriverStatus(2);
    pub const INITIALIZATION_ERROR: DriverStatus = DriverStatus(3);
    pub const CUDART_UNLOADING: DriverStatus = DriverStatus(4);
    pub const INVALID_CONFIGURATION: DriverStatus = DriverStatus(9);
    pub const INSUFFICIENT_DRIVER: DriverStatus = DriverStatus(35);
    pub const INVALID_DEVICE_FUNCTION: DriverStatus = DriverStatus(98);
    pub const NO_DEVICE: DriverStatus = DriverStatus(100);
    pub const INVALID_DEVICE: DriverStatus = DriverStatus(101);
    pub const NO_KERNEL_IMAGE_FOR_DEVICE: DriverStatus = DriverStatus(209);
    pub const ILLEGAL_ADDRESS: DriverStatus = DriverStatus(700);
    pub const LAUNCH_OUT_OF_RESOURCES: DriverStatus = DriverStatus(701);
    pub const LAUNCH_TIMEOUT: DriverStatus = DriverStatus(702);
    pub const LAUNCH_FAILURE: DriverStatus = DriverStatus(719);
    pub const UNKNOWN: DriverStatus = DriverStatus(999);

    #[inline]
    pub fn is_success(self) -> bool {
        self == DriverStatus::SUCCESS
    }

    /// The runtime's own description of this code (what `cudaGetErrorString`
    /// reports).
    pub fn description(self) -> Cow<'static, str> {
        let text = match self {
            DriverStatus::SUCCESS => "no error",
            DriverStatus::INVALID_VALUE => "invalid argument",
            DriverStatus::MEMORY_ALLOCATION => "out of memory",
            DriverStatus::INITIALIZATION_ERROR => "initialization error",
            DriverStatus::CUDART_UNLOADING => "driver shutting down",
            DriverStatus::INVALID_CONFIGURATION => "invalid configuration argument",
            DriverStatus::INSUFFICIENT_DRIVER => {
                "CUDA driver version is insufficient for CUDA runtime version"
            }
            DriverStatus::INVALID_DEVICE_FUNCTION => "invalid device function",
            DriverStatus::NO_DEVICE => "no CUDA-capable device is detected",
            DriverStatus::INVALID_DEVICE => "invalid device ordinal",
            DriverStatus::NO_KERNEL_IMAGE_FOR_DEVICE => {
                "no kernel image is available for execution on the device"
            }
            DriverStatus::ILLEGAL_ADDRESS => "an illegal memory access was encountered",
            DriverStatus::LAUNCH_OUT_OF_RESOURCES => "too many resources requested for launch",
            DriverStatus::LAUNCH_TIMEOUT => "the launch timed out and was terminated",
            DriverStatus::LAUNCH_FAILURE => "unspecified launch failure",
            DriverStatus::UNKNOWN => "unknown error",
            DriverStatus(code) => return Cow::Owned(format!("unrecognized error code {}", code)),
        };
        Cow::Borrowed(text)
    }

    pub fn phrase(self) -> String {
        format!("CUDA: {}, ", self.description())
    }
}

impl From<i32> for DriverStatus {
    fn from(code: i32) -> Self {
        DriverStatus(code)
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cudaError({})", self.0)
    }
}
