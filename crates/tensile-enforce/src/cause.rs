//! The inner failure carried by every [`EnforceError`](crate::EnforceError).
//!
//! A [`Cause`] is what the status normalizer produces: the failure family
//! ([`CauseKind`]), the raw status code when there was one, and the rendered
//! description (diagnostic phrase followed by the caller's text). Keeping the
//! kind and code as fields lets callers branch on failures without parsing
//! the message.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EnforceError;

/// Which family of failure signal triggered an enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CauseKind {
    /// A boolean or integral condition evaluated to false, including failed
    /// comparisons.
    Assertion,
    /// A non-zero operating-system error number.
    Platform,
    /// A CUDA runtime error.
    Driver,
    /// A cuRAND status other than success.
    RandomGenerator,
    /// A cuDNN status other than success.
    NeuralPrimitive,
    /// A cuBLAS status other than success.
    LinearAlgebra,
    /// Raised unconditionally by `throw_failure!`.
    Unconditional,
    /// Wrapped from an error type this crate does not know about.
    External,
}

impl CauseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CauseKind::Assertion => "assertion",
            CauseKind::Platform => "platform",
            CauseKind::Driver => "driver",
            CauseKind::RandomGenerator => "random_generator",
            CauseKind::NeuralPrimitive => "neural_primitive",
            CauseKind::LinearAlgebra => "linear_algebra",
            CauseKind::Unconditional => "unconditional",
            CauseKind::External => "external",
        }
    }
}

impl fmt::Display for CauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure description before location and call stack are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct Cause {
    kind: CauseKind,
    code: Option<i64>,
    message: String,
}

impl Cause {
    pub fn new(kind: CauseKind, code: Option<i64>, message: impl Into<String>) -> Self {
        Cause {
            kind,
            code,
            message: message.into(),
        }
    }

    /// A failed condition. The message is the caller's text, verbatim.
    pub fn assertion(message: impl Into<String>) -> Self {
        Cause::new(CauseKind::Assertion, None, message)
    }

    pub fn unconditional(message: impl Into<String>) -> Self {
        Cause::new(CauseKind::Unconditional, None, message)
    }

    pub fn external(message: impl Into<String>) -> Self {
        Cause::new(CauseKind::External, None, message)
    }

    /// Re-derives the description of an arbitrary error.
    ///
    /// A [`Cause`] is reused as is and an [`EnforceError`] contributes its own
    /// cause, so rewrapping never nests locations or stacks. Any other error
    /// becomes [`CauseKind::External`] with its `Display` text. This never
    /// fails.
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        if let Some(cause) = err.downcast_ref::<Cause>() {
            return cause.clone();
        }
        if let Some(enforce) = err.downcast_ref::<EnforceError>() {
            return enforce.cause().clone();
        }
        Cause::external(err.to_string())
    }

    /// Prefixes the message with caller context, keeping kind and code.
    pub fn with_context(mut self, context: impl fmt::Display) -> Self {
        self.message = format!("{}: {}", context, self.message);
        self
    }

    pub fn kind(&self) -> CauseKind {
        self.kind
    }

    /// The raw status code, when the failure came from a status enumeration.
    pub fn code(&self) -> Option<i64> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct DeviceLost;

    impl fmt::Display for DeviceLost {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("device lost")
        }
    }

    impl Error for DeviceLost {}

    #[test]
    fn display_is_the_message() {
        let cause = Cause::new(CauseKind::LinearAlgebra, Some(7), "CUBLAS: invalid value, ");
        assert_eq!(cause.to_string(), "CUBLAS: invalid value, ");
        assert_eq!(cause.code(), Some(7));
    }

    #[test]
    fn from_error_reuses_cause() {
        let cause = Cause::new(CauseKind::Driver, Some(2), "CUDA: out of memory, ");
        let derived = Cause::from_error(&cause);
        assert_eq!(derived, cause);
    }

    #[test]
    fn from_error_falls_back_to_display_text() {
        let derived = Cause::from_error(&DeviceLost);
        assert_eq!(derived.kind(), CauseKind::External);
        assert_eq!(derived.code(), None);
        assert_eq!(derived.message(), "device lost");
    }

    #[test]
    fn context_prefixes_message() {
        let cause = Cause::external("device lost").with_context("loading weights");
        assert_eq!(cause.message(), "loading weights: device lost");
        assert_eq!(cause.kind(), CauseKind::External);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&CauseKind::RandomGenerator).unwrap();
        assert_eq!(json, "\"random_generator\"");
        assert_eq!(CauseKind::RandomGenerator.to_string(), "random_generator");
    }
}
