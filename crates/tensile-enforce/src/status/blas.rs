//! cuBLAS status codes (`cublasStatus_t`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cuBLAS status value. Constants match the vendor header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlasStatus(pub i32);

impl BlasStatus {
    pub const SUCCESS: BlasStatus = BlasStatus(0);
    pub const NOT_INITIALIZED: BlasStatus = BlasStatus(1);
    pub const ALLOC_FAILED: BlasStatus = BlasStatus(3);
    pub const INVALID_VALUE: BlasStatus = BlasStatus(7);
    pub const ARCH_MISMATCH: BlasStatus = BlasStatus(8);
    pub const MAPPING_ERROR: BlasStatus = BlasStatus(11);
    pub const EXECUTION_FAILED: BlasStatus = BlasStatus(13);
    pub const INTERNAL_ERROR: BlasStatus = BlasStatus(14);
    pub const NOT_SUPPORTED: BlasStatus = BlasStatus(15);
    pub const LICENSE_ERROR: BlasStatus = BlasStatus(16);

    /// Every named failure code, in header order.
    pub const FAILURES: [BlasStatus; 9] = [
        BlasStatus::NOT_INITIALIZED,
        BlasStatus::ALLOC_FAILED,
        BlasStatus::INVALID_VALUE,
        BlasStatus::ARCH_MISMATCH,
        BlasStatus::MAPPING_ERROR,
        BlasStatus::EXECUTION_FAILED,
        BlasStatus::INTERNAL_ERROR,
        BlasStatus::NOT_SUPPORTED,
        BlasStatus::LICENSE_ERROR,
    ];

    #[inline]
    pub fn is_success(self) -> bool {
        self == BlasStatus::SUCCESS
    }

    /// The fixed diagnostic phrase for this code.
    ///
    /// Unrecognized codes (and `SUCCESS`) map to the empty phrase, so the
    /// failure message is then just the caller's text.
    pub fn phrase(self) -> &'static str {
        match self {
            BlasStatus::NOT_INITIALIZED => "CUBLAS: not initialized, ",
            BlasStatus::ALLOC_FAILED => "CUBLAS: alloc failed, ",
            BlasStatus::INVALID_VALUE => "CUBLAS: invalid value, ",
            BlasStatus::ARCH_MISMATCH => "CUBLAS: arch mismatch, ",
            BlasStatus::MAPPING_ERROR => "CUBLAS: mapping error, ",
            BlasStatus::EXECUTION_FAILED => "CUBLAS: execution failed, ",
            BlasStatus::INTERNAL_ERROR => "CUBLAS: internal error, ",
            BlasStatus::NOT_SUPPORTED => "CUBLAS: not supported, ",
            BlasStatus::LICENSE_ERROR => "CUBLAS: license error, ",
            _ => "",
        }
    }
}

impl From<i32> for BlasStatus {
    fn from(code: i32) -> Self {
        BlasStatus(code)
    }
}

impl fmt::Display for BlasStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cublasStatus({})", self.0)
    }
}
