//! cuDNN status codes (`cudnnStatus_t`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cuDNN status value. Constants match the vendor header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DnnStatus(pub i32);

impl DnnStatus {
    pub const SUCCESS: DnnStatus = DnnStatus(0);
    pub const NOT_INITIALIZED: DnnStatus = DnnStatus(1);
    pub const ALLOC_FAILED: DnnStatus = DnnStatus(2);
    pub const BAD_PARAM: DnnStatus = DnnStatus(3);
    pub const INTERNAL_ERROR: DnnStatus = DnnStatus(4);
    pub const INVALID_VALUE: DnnStatus = DnnStatus(5);
    pub const ARCH_MISMATCH: DnnStatus = DnnStatus(6);
    pub const MAPPING_ERROR: DnnStatus = DnnStatus(7);
    pub const EXECUTION_FAILED: DnnStatus = DnnStatus(8);
    pub const NOT_SUPPORTED: DnnStatus = DnnStatus(9);
    pub const LICENSE_ERROR: DnnStatus = DnnStatus(10);
    pub const RUNTIME_PREREQUISITE_MISSING: DnnStatus = DnnStatus(11);
    pub const RUNTIME_IN_PROGRESS: DnnStatus = DnnStatus(12);
    pub const RUNTIME_FP_OVERFLOW: DnnStatus = DnnStatus(13);

    #[inline]
    pub fn is_success(self) -> bool {
        self == DnnStatus::SUCCESS
    }

    /// The library's own name for this status (what `cudnnGetErrorString`
    /// reports).
    pub fn description(self) -> &'static str {
        match self {
            DnnStatus::SUCCESS => "CUDNN_STATUS_SUCCESS",
            DnnStatus::NOT_INITIALIZED => "CUDNN_STATUS_NOT_INITIALIZED",
            DnnStatus::ALLOC_FAILED => "CUDNN_STATUS_ALLOC_FAILED",
            DnnStatus::BAD_PARAM => "CUDNN_STATUS_BAD_PARAM",
            DnnStatus::INTERNAL_ERROR => "CUDNN_STATUS_INTERNAL_ERROR",
            DnnStatus::INVALID_VALUE => "CUDNN_STATUS_INVALID_VALUE",
            DnnStatus::ARCH_MISMATCH => "CUDNN_STATUS_ARCH_MISMATCH",
            DnnStatus::MAPPING_ERROR => "CUDNN_STATUS_MAPPING_ERROR",
            DnnStatus::EXECUTION_FAILED => "CUDNN_STATUS_EXECUTION_FAILED",
            DnnStatus::NOT_SUPPORTED => "CUDNN_STATUS_NOT_SUPPORTED",
            DnnStatus::LICENSE_ERROR => "CUDNN_STATUS_LICENSE_ERROR",
            DnnStatus::RUNTIME_PREREQUISITE_MISSING => "CUDNN_STATUS_RUNTIME_PREREQUISITE_MISSING",
            DnnStatus::RUNTIME_IN_PROGRESS => "CUDNN_STATUS_RUNTIME_IN_PROGRESS",
            DnnStatus::RUNTIME_FP_OVERFLOW => "CUDNN_STATUS_RUNTIME_FP_OVERFLOW",
            _ => "CUDNN_UNKNOWN_STATUS",
        }
    }

    pub fn phrase(self) -> String {
        format!("CUDNN: {}, ", self.description())
    }
}

impl From<i32> for DnnStatus {
    fn from(code: i32) -> Self {
        DnnStatus(code)
    }
}

impl fmt::Display for DnnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cudnnStatus({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_uses_library_name() {
        assert_eq!(DnnStatus::BAD_PARAM.phrase(), "CUDNN: CUDNN_STATUS_BAD_PARAM, ");
        assert_eq!(DnnStatus(77).description(), "CUDNN_UNKNOWN_STATUS");
    }
}
