//! cuRAND status codes (`curandStatus_t`).

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::driver::DriverStatus;

/// A cuRAND status value. Constants match the vendor header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct RandStatus(pub i32);

impl RandStatus {
    pub const SUCCESS: RandStatus = RandStatus(0);
    pub const VERSION_MISMATCH: RandStatus = RandStatus(100);
    pub const NOT_INITIALIZED: RandStatus = RandStatus(101);
    pub const ALLOCATION_FAILED: RandStatus = RandStatus(102);
    pub const TYPE_ERROR: RandStatus = RandStatus(103);
    pub const OUT_OF_RANGE: RandStatus = RandStatus(104);
    pub const LENGTH_NOT_MULTIPLE: RandStatus = RandStatus(105);
    pub const DOUBLE_PRECISION_REQUIRED: RandStatus = RandStatus(106);
    pub const LAUNCH_FAILURE: RandStatus = RandStatus(201);
    pub const PREEXISTING_FAILURE: RandStatus = RandStatus(202);
    pub const INITIALIZATION_FAILED: RandStatus = RandStatus(203);
    pub const ARCH_MISMATCH: RandStatus = RandStatus(204);
    pub const INTERNAL_ERROR: RandStatus = RandStatus(999);

    #[inline]
    pub fn is_success(self) -> bool {
        self == RandStatus::SUCCESS
    }

    pub fn description(self) -> Cow<'static, str> {
        let text = match self {
            RandStatus::SUCCESS => "no error",
            RandStatus::VERSION_MISMATCH => "header file and linked library version do not match",
            RandStatus::NOT_INITIALIZED => "generator not initialized",
            RandStatus::ALLOCATION_FAILED => "memory allocation failed",
            RandStatus::TYPE_ERROR => "generator is wrong type",
            RandStatus::OUT_OF_RANGE => "argument out of range",
            RandStatus::LENGTH_NOT_MULTIPLE => "length requested is not a multiple of dimension",
            RandStatus::DOUBLE_PRECISION_REQUIRED => "GPU does not have double precision required",
            RandStatus::LAUNCH_FAILURE => "kernel launch failure",
            RandStatus::PREEXISTING_FAILURE => "preexisting failure on library entry",
            RandStatus::INITIALIZATION_FAILED => "initialization of CUDA failed",
            RandStatus::ARCH_MISMATCH => "architecture mismatch, GPU does not support requested feature",
            RandStatus::INTERNAL_ERROR => "internal library error",
            RandStatus(code) => return Cow::Owned(format!("unrecognized status {}", code)),
        };
        Cow::Borrowed(text)
    }

    /// The diagnostic phrase for this status.
    ///
    /// With `legacy` set, every failure is reported as a CUDA launch failure
    /// regardless of the actual status, matching older diagnostics.
    pub fn phrase(self, legacy: bool) -> String {
        if legacy {
            return DriverStatus::LAUNCH_FAILURE.phrase();
        }
        format!("CURAND: {}, ", self.description())
    }
}

impl From<i32> for RandStatus {
    fn from(code: i32) -> Self {
        RandStatus(code)
    }
}

impl fmt::Display for RandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "curandStatus({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_the_actual_status() {
        assert_eq!(
            RandStatus::ALLOCATION_FAILED.phrase(false),
            "CURAND: memory allocation failed, "
        );
        assert_eq!(
            RandStatus::OUT_OF_RANGE.phrase(false),
            "CURAND: argument out of range, "
        );
    }

    #[test]
    fn legacy_mode_reports_launch_failure() {
        assert_eq!(
            RandStatus::ALLOCATION_FAILED.phrase(true),
            "CUDA: unspecified launch failure, "
        );
        assert_eq!(
            RandStatus::OUT_OF_RANGE.phrase(true),
            RandStatus::ALLOCATION_FAILED.phrase(true)
        );
    }
}
