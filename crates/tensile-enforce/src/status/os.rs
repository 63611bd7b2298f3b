//! Operating-system error numbers (`errno`-style).

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

/// A raw OS error number; zero means no error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct OsStatus(pub i32);

impl OsStatus {
    pub const SUCCESS: OsStatus = OsStatus(0);

    #[inline]
    pub fn is_success(self) -> bool {
        self == OsStatus::SUCCESS
    }

    /// The platform's description of this error number.
    pub fn description(self) -> String {
        io::Error::from_raw_os_error(self.0).to_string()
    }

    pub fn phrase(self) -> String {
        format!("OS: {}, ", self.description())
    }
}

impl From<i32> for OsStatus {
    fn from(code: i32) -> Self {
        OsStatus(code)
    }
}

impl From<&io::Error> for OsStatus {
    /// Errors without an OS error number map to `-1`, which still fails.
    fn from(err: &io::Error) -> Self {
        OsStatus(err.raw_os_error().unwrap_or(-1))
    }
}

impl fmt::Display for OsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "errno({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_embeds_platform_description() {
        let status = OsStatus(2);
        let expected = format!("OS: {}, ", io::Error::from_raw_os_error(2));
        assert_eq!(status.phrase(), expected);
        assert!(!status.is_success());
    }

    #[test]
    fn io_error_without_errno_still_fails() {
        let err = io::Error::new(io::ErrorKind::Other, "synthetic");
        assert!(!OsStatus::from(&err).is_success());
    }
}
