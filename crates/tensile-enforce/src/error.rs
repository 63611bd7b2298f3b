//! The single error type surfaced by enforcement.
//!
//! [`EnforceError`] wraps a [`Cause`] with the source location of the
//! enforcement and the call stack captured when the error was built. The
//! full message is rendered once, eagerly, at construction:
//!
//! ```text
//! CUBLAS: invalid value, gemm at [src/kernels/gemm.rs:42]
//! Call Stacks:
//! tensile::kernels::gemm at ./src/kernels/gemm.rs:42:9
//! ...
//! ```

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cause::{Cause, CauseKind};
use crate::config;
use crate::stack::{self, StackCapturer};

/// A source position, as produced by `location!()` or `#[track_caller]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub const fn new(file: &'static str, line: u32, column: u32) -> Self {
        Location { file, line, column }
    }

    /// The location of the caller of the enclosing `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        let caller = std::panic::Location::caller();
        Location::new(caller.file(), caller.line(), caller.column())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A failed enforcement: cause, location and call stack.
#[derive(Debug, Clone)]
pub struct EnforceError {
    cause: Cause,
    location: Location,
    stack: Vec<String>,
    rendered: String,
}

impl EnforceError {
    /// Wraps `cause`, capturing the stack with the process-wide capturer.
    pub fn new(cause: Cause, location: Location) -> Self {
        Self::with_capturer(cause, location, stack::capturer())
    }

    /// Wraps `cause`, capturing the stack with `capturer`.
    ///
    /// The frame limit comes from the process-wide configuration and is
    /// enforced here even if the capturer returns more.
    pub fn with_capturer(cause: Cause, location: Location, capturer: &dyn StackCapturer) -> Self {
        let limit = config::global().effective_stack_limit();
        let mut stack = capturer.capture(limit);
        stack.truncate(limit);

        tracing::debug!(
            kind = %cause.kind(),
            code = ?cause.code(),
            file = location.file,
            line = location.line,
            frames = stack.len(),
            "enforcement failed"
        );

        let rendered = render(&cause, &location, &stack);
        EnforceError {
            cause,
            location,
            stack,
            rendered,
        }
    }

    /// Rewraps any error at `location`. See [`Cause::from_error`] for how the
    /// inner description is derived.
    pub fn from_error(err: &(dyn Error + 'static), location: Location) -> Self {
        Self::new(Cause::from_error(err), location)
    }

    /// The fully rendered message: description, location and call stack.
    pub fn message(&self) -> &str {
        &self.rendered
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    pub fn kind(&self) -> CauseKind {
        self.cause.kind()
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Captured frames, innermost first.
    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    pub fn report(&self) -> EnforceReport {
        EnforceReport {
            kind: self.cause.kind(),
            code: self.cause.code(),
            message: self.cause.message().to_string(),
            file: self.location.file.to_string(),
            line: self.location.line,
            column: self.location.column,
            stack: self.stack.clone(),
        }
    }
}

fn render(cause: &Cause, location: &Location, stack: &[String]) -> String {
    let mut out = format!("{} at [{}]\nCall Stacks:", cause.message(), location);
    for frame in stack {
        out.push('\n');
        out.push_str(frame);
    }
    out
}

impl fmt::Display for EnforceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl Error for EnforceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

/// A serializable view of an [`EnforceError`] for machine consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforceReport {
    pub kind: CauseKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    pub message: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub stack: Vec<String>,
}
