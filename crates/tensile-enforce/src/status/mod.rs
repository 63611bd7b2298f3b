//! Status normalization.
//!
//! Every failure signal the backend produces is funneled through [`Status`],
//! a single tagged variant with one arm per code family:
//!
//! - [`Status::Condition`] -- a boolean or integral condition (non-zero holds)
//! - [`Status::Os`] -- an OS error number ([`OsStatus`])
//! - [`Status::Driver`] -- a CUDA runtime error ([`DriverStatus`])
//! - [`Status::Rand`] -- a cuRAND status ([`RandStatus`])
//! - [`Status::Dnn`] -- a cuDNN status ([`DnnStatus`])
//! - [`Status::Blas`] -- a cuBLAS status ([`BlasStatus`])
//!
//! The success test ([`Status::is_success`]) is a single comparison and is
//! inlined at the call site. Rendering the diagnostic phrase only happens on
//! the cold failure path ([`Status::into_cause`]).

mod blas;
mod dnn;
mod driver;
mod os;
mod rand;

pub use blas::BlasStatus;
pub use dnn::DnnStatus;
pub use driver::DriverStatus;
pub use os::OsStatus;
pub use rand::RandStatus;

use serde::{Deserialize, Serialize};

use crate::cause::{Cause, CauseKind};
use crate::config::{self, EnforceConfig};

/// A status value of one of the known code families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Condition(bool),
    Os(OsStatus),
    Driver(DriverStatus),
    Rand(RandStatus),
    Dnn(DnnStatus),
    Blas(BlasStatus),
}

impl Status {
    #[inline]
    pub fn is_success(&self) -> bool {
        match *self {
            Status::Condition(holds) => holds,
            Status::Os(status) => status.is_success(),
            Status::Driver(status) => status.is_success(),
            Status::Rand(status) => status.is_success(),
            Status::Dnn(status) => status.is_success(),
            Status::Blas(status) => status.is_success(),
        }
    }

    /// The failure kind this status reports as.
    pub fn kind(&self) -> CauseKind {
        match self {
            Status::Condition(_) => CauseKind::Assertion,
            Status::Os(_) => CauseKind::Platform,
            Status::Driver(_) => CauseKind::Driver,
            Status::Rand(_) => CauseKind::RandomGenerator,
            Status::Dnn(_) => CauseKind::NeuralPrimitive,
            Status::Blas(_) => CauseKind::LinearAlgebra,
        }
    }

    /// The raw code, for every family except conditions.
    pub fn code(&self) -> Option<i64> {
        match *self {
            Status::Condition(_) => None,
            Status::Os(OsStatus(code))
            | Status::Driver(DriverStatus(code))
            | Status::Rand(RandStatus(code))
            | Status::Dnn(DnnStatus(code))
            | Status::Blas(BlasStatus(code)) => Some(i64::from(code)),
        }
    }

    /// The family-specific diagnostic phrase that precedes the caller's text.
    ///
    /// Conditions have no phrase: their failure message is the caller's text
    /// verbatim.
    pub fn phrase(&self, config: &EnforceConfig) -> String {
        match *self {
            Status::Condition(_) => String::new(),
            Status::Os(status) => status.phrase(),
            Status::Driver(status) => status.phrase(),
            Status::Rand(status) => status.phrase(config.legacy_rand_phrase),
            Status::Dnn(status) => status.phrase(),
            Status::Blas(status) => status.phrase().to_string(),
        }
    }

    /// Builds the failure description using the process-wide configuration.
    #[cold]
    #[inline(never)]
    pub fn into_cause(self, extra: &str) -> Cause {
        self.into_cause_with(extra, config::global())
    }

    /// Builds the failure description: phrase followed by `extra`.
    pub fn into_cause_with(self, extra: &str, config: &EnforceConfig) -> Cause {
        let mut message = self.phrase(config);
        message.push_str(extra);
        Cause::new(self.kind(), self.code(), message)
    }
}

/// Conversion of a condition or status code into a [`Status`].
///
/// Implemented for `bool`, every primitive integer (non-zero holds), the
/// status newtypes and `Status` itself.
pub trait IntoStatus {
    fn into_status(self) -> Status;
}

impl IntoStatus for Status {
    #[inline]
    fn into_status(self) -> Status {
        self
    }
}

impl IntoStatus for bool {
    #[inline]
    fn into_status(self) -> Status {
        Status::Condition(self)
    }
}

macro_rules! integral_condition {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoStatus for $ty {
                #[inline]
                fn into_status(self) -> Status {
                    Status::Condition(self != 0)
                }
            }
        )*
    };
}

integral_condition!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! status_family {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl IntoStatus for $ty {
                #[inline]
                fn into_status(self) -> Status {
                    Status::$variant(self)
                }
            }

            impl From<$ty> for Status {
                fn from(status: $ty) -> Self {
                    Status::$variant(status)
                }
            }
        )*
    };
}

status_family!(
    OsStatus => Os,
    DriverStatus => Driver,
    RandStatus => Rand,
    DnnStatus => Dnn,
    BlasStatus => Blas,
);

/// Checks a status, returning its failure description when it does not hold.
///
/// `check(status, "")` is the single-argument form: the description is then
/// the phrase alone.
#[inline]
pub fn check<S: IntoStatus>(status: S, extra: &str) -> Result<(), Cause> {
    let status = status.into_status();
    if status.is_success() {
        Ok(())
    } else {
        Err(status.into_cause(extra))
    }
}
