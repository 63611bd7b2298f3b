//! Runtime assertions and error reporting for the tensile backend.
//!
//! Every lower-level failure (false conditions, OS errors, CUDA runtime,
//! cuRAND, cuDNN and cuBLAS statuses, failed comparisons) is normalized into
//! one error type, [`EnforceError`], carrying a rendered description, the
//! source location of the check and the call stack at that point.
//!
//! # Modules
//!
//! - [`status`] -- the [`Status`] variant and the success/failure decision
//! - [`cause`] -- [`Cause`] and [`CauseKind`], the structured inner failure
//! - [`error`] -- [`EnforceError`], [`Location`] and [`EnforceReport`]
//! - [`compare`] -- [`CmpOp`] and the compatible-type comparison rule
//! - [`stack`] -- the [`StackCapturer`] capability
//! - [`config`] -- [`EnforceConfig`], read from the environment
//! - [`guard`] -- `#[track_caller]` function forms and [`ResultExt`]
//!
//! The macros ([`enforce!`], [`enforce_eq!`], [`enforce_ne!`],
//! [`enforce_gt!`], [`enforce_ge!`], [`enforce_lt!`], [`enforce_le!`],
//! [`throw_failure!`]) are the usual entry points.

#[macro_use]
mod macros;

pub mod cause;
pub mod compare;
pub mod config;
pub mod error;
pub mod guard;
pub mod stack;
pub mod status;

pub use cause::{Cause, CauseKind};
pub use compare::{CmpOp, CompareWith};
pub use config::{ConfigError, EnforceConfig};
pub use error::{EnforceError, EnforceReport, Location};
pub use guard::{enforce, failure, ResultExt};
pub use stack::{BacktraceCapturer, FixedCapturer, NoopCapturer, StackCapturer};
pub use status::{
    BlasStatus, DnnStatus, DriverStatus, IntoStatus, OsStatus, RandStatus, Status,
};
