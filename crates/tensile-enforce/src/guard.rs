//! Function forms of enforcement, for call sites that prefer `?` over macros.
//!
//! Locations come from `#[track_caller]`, so the reported file and line are
//! those of the caller.

use std::error::Error;

use crate::cause::Cause;
use crate::error::{EnforceError, Location};
use crate::status::{self, IntoStatus};

/// Fails unless `status` holds. `extra` is appended to the diagnostic phrase.
#[track_caller]
#[inline]
pub fn enforce<S: IntoStatus>(status: S, extra: &str) -> Result<(), EnforceError> {
    let location = Location::caller();
    status::check(status, extra).map_err(|cause| EnforceError::new(cause, location))
}

/// Builds an unconditional failure at the caller's location.
#[track_caller]
pub fn failure(message: impl Into<String>) -> EnforceError {
    EnforceError::new(Cause::unconditional(message), Location::caller())
}

/// Funnels foreign errors into [`EnforceError`] at the caller's location.
pub trait ResultExt<T> {
    fn or_enforce(self) -> Result<T, EnforceError>;

    /// Like [`or_enforce`](ResultExt::or_enforce), prefixing the description
    /// with `context`.
    fn or_enforce_with<C, F>(self, context: F) -> Result<T, EnforceError>
    where
        C: std::fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Error + 'static,
{
    #[track_caller]
    fn or_enforce(self) -> Result<T, EnforceError> {
        let location = Location::caller();
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(EnforceError::from_error(&err, location)),
        }
    }

    #[track_caller]
    fn or_enforce_with<C, F>(self, context: F) -> Result<T, EnforceError>
    where
        C: std::fmt::Display,
        F: FnOnce() -> C,
    {
        let location = Location::caller();
        match self {
            Ok(value) => Ok(value),
            Err(err) => {
                let cause = Cause::from_error(&err).with_context(context());
                Err(EnforceError::new(cause, location))
            }
        }
    }
}
