//! Call-site macros.
//!
//! Every macro returns early from the enclosing function with
//! `Err(From::from(EnforceError))` when the check fails, so they work in any
//! function whose error type implements `From<EnforceError>`. Extra messages
//! use `format!` syntax and are only formatted on failure.

/// The source location of the macro invocation.
#[macro_export]
macro_rules! location {
    () => {
        $crate::Location::new(::core::file!(), ::core::line!(), ::core::column!())
    };
}

/// Fails unless a condition holds or a status code denotes success.
///
/// ```
/// use tensile_enforce::{enforce, BlasStatus, EnforceError};
///
/// fn launch(rows: usize, status: BlasStatus) -> Result<(), EnforceError> {
///     enforce!(rows > 0, "empty matrix");
///     enforce!(status);
///     Ok(())
/// }
///
/// assert!(launch(4, BlasStatus::SUCCESS).is_ok());
/// let err = launch(4, BlasStatus::ALLOC_FAILED).unwrap_err();
/// assert!(err.message().starts_with("CUBLAS: alloc failed,"));
/// ```
#[macro_export]
macro_rules! enforce {
    (@with $status:expr, $extra:expr) => {{
        let status = $crate::IntoStatus::into_status($status);
        if !status.is_success() {
            let cause = status.into_cause(&$extra);
            return ::core::result::Result::Err(::core::convert::From::from(
                $crate::EnforceError::new(cause, $crate::location!()),
            ));
        }
    }};
    ($status:expr $(,)?) => {
        $crate::enforce!(@with $status, ::std::string::String::new())
    };
    ($status:expr, $($fmt:tt)+) => {
        $crate::enforce!(@with $status, ::std::format!($($fmt)+))
    };
}

/// Fails unconditionally with the given message.
#[macro_export]
macro_rules! throw_failure {
    ($($fmt:tt)+) => {
        return ::core::result::Result::Err(::core::convert::From::from(
            $crate::EnforceError::new(
                $crate::Cause::unconditional(::std::format!($($fmt)+)),
                $crate::location!(),
            ),
        ))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __enforce_compare {
    (@with $op:ident, $lhs:expr, $rhs:expr, $extra:expr) => {
        match (&$lhs, &$rhs) {
            (lhs, rhs) => {
                if let ::core::result::Result::Err(cause) = $crate::compare::check(
                    lhs,
                    rhs,
                    $crate::CmpOp::$op,
                    (::core::stringify!($lhs), ::core::stringify!($rhs)),
                    || $extra,
                ) {
                    return ::core::result::Result::Err(::core::convert::From::from(
                        $crate::EnforceError::new(cause, $crate::location!()),
                    ));
                }
            }
        }
    };
    ($op:ident, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__enforce_compare!(@with $op, $lhs, $rhs, ::std::string::String::new())
    };
    ($op:ident, $lhs:expr, $rhs:expr, $($fmt:tt)+) => {
        $crate::__enforce_compare!(@with $op, $lhs, $rhs, ::std::format!($($fmt)+))
    };
}

/// Fails unless `lhs == rhs`.
///
/// On failure the message reads `enforce <lhs> == <rhs> failed, <a> != <b>`
/// followed by a newline and the optional extra text.
#[macro_export]
macro_rules! enforce_eq {
    ($($args:tt)+) => {
        $crate::__enforce_compare!(Eq, $($args)+)
    };
}

/// Fails unless `lhs != rhs`.
#[macro_export]
macro_rules! enforce_ne {
    ($($args:tt)+) => {
        $crate::__enforce_compare!(Ne, $($args)+)
    };
}

/// Fails unless `lhs > rhs`.
#[macro_export]
macro_rules! enforce_gt {
    ($($args:tt)+) => {
        $crate::__enforce_compare!(Gt, $($args)+)
    };
}

/// Fails unless `lhs >= rhs`.
#[macro_export]
macro_rules! enforce_ge {
    ($($args:tt)+) => {
        $crate::__enforce_compare!(Ge, $($args)+)
    };
}

/// Fails unless `lhs < rhs`.
#[macro_export]
macro_rules! enforce_lt {
    ($($args:tt)+) => {
        $crate::__enforce_compare!(Lt, $($args)+)
    };
}

/// Fails unless `lhs <= rhs`.
#[macro_export]
macro_rules! enforce_le {
    ($($args:tt)+) => {
        $crate::__enforce_compare!(Le, $($args)+)
    };
}
