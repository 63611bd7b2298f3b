//! Binary comparison checks with a compatible-type rule.
//!
//! Operands of different numeric types are coerced to one common type before
//! comparing. The common type is fixed per type pair at compile time:
//!
//! - Same type: compared as is.
//! - One side converts losslessly into the other: the wider type.
//! - Mixed signedness with no lossless direction (`i32` vs `u32`, `i64` vs
//!   `u64`, `isize` vs `usize`, ...): the smallest signed type holding both,
//!   so `-1i32` never compares equal to or above `u32::MAX`.
//! - `f32` vs `f64`: `f64`. Integers up to 16 bits compare with `f32` as
//!   `f32`; up to 32 bits compare with either float as `f64`.
//! - `u128` vs a signed type: no common type exists, so the sign is checked
//!   first (a negative value is below every `u128`) and the rest compare as
//!   `u128`. This keeps `enforce_eq!(x_u128, 0)` working with an unsuffixed
//!   literal.
//! - 64-bit integers vs floats have no lossless common type and do not
//!   compile; cast at the call site.
//!
//! `String` and `&str` compare with each other as strings.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cause::Cause;
use crate::status::Status;

/// A binary comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
        }
    }

    /// The logical negation: the relation that holds when `self` does not.
    pub fn inverse(self) -> CmpOp {
        match self {
            CmpOp::Eq => CmpOp::Ne,
            CmpOp::Ne => CmpOp::Eq,
            CmpOp::Gt => CmpOp::Le,
            CmpOp::Ge => CmpOp::Lt,
            CmpOp::Lt => CmpOp::Ge,
            CmpOp::Le => CmpOp::Gt,
        }
    }

    #[inline]
    pub fn evaluate<T: PartialOrd + ?Sized>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Comparison of `Self` against `Rhs` in their common type.
pub trait CompareWith<Rhs: ?Sized = Self> {
    /// Whether `self <op> rhs` holds after coercion.
    fn holds(&self, op: CmpOp, rhs: &Rhs) -> bool;

    /// Both operands rendered after coercion.
    fn render_pair(&self, rhs: &Rhs) -> (String, String);
}

impl<T: PartialOrd + fmt::Display + ?Sized> CompareWith<T> for T {
    #[inline]
    fn holds(&self, op: CmpOp, rhs: &T) -> bool {
        op.evaluate(self, rhs)
    }

    fn render_pair(&self, rhs: &T) -> (String, String) {
        (self.to_string(), rhs.to_string())
    }
}

impl<'a> CompareWith<&'a str> for String {
    #[inline]
    fn holds(&self, op: CmpOp, rhs: &&'a str) -> bool {
        op.evaluate(self.as_str(), *rhs)
    }

    fn render_pair(&self, rhs: &&'a str) -> (String, String) {
        (self.clone(), rhs.to_string())
    }
}

impl<'a> CompareWith<String> for &'a str {
    #[inline]
    fn holds(&self, op: CmpOp, rhs: &String) -> bool {
        op.evaluate(*self, rhs.as_str())
    }

    fn render_pair(&self, rhs: &String) -> (String, String) {
        (self.to_string(), rhs.clone())
    }
}

/// Implements `CompareWith` in both directions for each `(a, b) => common`.
/// Every listed conversion into `common` is lossless.
macro_rules! compatible {
    ($(($a:ty, $b:ty) => $common:ty;)*) => {
        $(
            impl CompareWith<$b> for $a {
                #[inline]
                fn holds(&self, op: CmpOp, rhs: &$b) -> bool {
                    op.evaluate(&(*self as $common), &(*rhs as $common))
                }

                fn render_pair(&self, rhs: &$b) -> (String, String) {
                    ((*self as $common).to_string(), (*rhs as $common).to_string())
                }
            }

            impl CompareWith<$a> for $b {
                #[inline]
                fn holds(&self, op: CmpOp, rhs: &$a) -> bool {
                    op.evaluate(&(*self as $common), &(*rhs as $common))
                }

                fn render_pair(&self, rhs: &$a) -> (String, String) {
                    ((*self as $common).to_string(), (*rhs as $common).to_string())
                }
            }
        )*
    };
}

compatible! {
    // signed / signed
    (i8, i16) => i16;
    (i8, i32) => i32;
    (i8, i64) => i64;
    (i8, i128) => i128;
    (i8, isize) => isize;
    (i16, i32) => i32;
    (i16, i64) => i64;
    (i16, i128) => i128;
    (i16, isize) => isize;
    (i32, i64) => i64;
    (i32, i128) => i128;
    (i32, isize) => i64;
    (i64, i128) => i128;
    (i64, isize) => i64;
    (i128, isize) => i128;

    // unsigned / unsigned
    (u8, u16) => u16;
    (u8, u32) => u32;
    (u8, u64) => u64;
    (u8, u128) => u128;
    (u8, usize) => usize;
    (u16, u32) => u32;
    (u16, u64) => u64;
    (u16, u128) => u128;
    (u16, usize) => usize;
    (u32, u64) => u64;
    (u32, u128) => u128;
    (u32, usize) => u64;
    (u64, u128) => u128;
    (u64, usize) => u64;
    (u128, usize) => u128;

    // unsigned / signed
    (u8, i8) => i16;
    (u8, i16) => i16;
    (u8, i32) => i32;
    (u8, i64) => i64;
    (u8, i128) => i128;
    (u8, isize) => isize;
    (u16, i8) => i32;
    (u16, i16) => i32;
    (u16, i32) => i32;
    (u16, i64) => i64;
    (u16, i128) => i128;
    (u16, isize) => i64;
    (u32, i8) => i64;
    (u32, i16) => i64;
    (u32, i32) => i64;
    (u32, i64) => i64;
    (u32, i128) => i128;
    (u32, isize) => i64;
    (u64, i8) => i128;
    (u64, i16) => i128;
    (u64, i32) => i128;
    (u64, i64) => i128;
    (u64, i128) => i128;
    (u64, isize) => i128;
    (usize, i8) => i128;
    (usize, i16) => i128;
    (usize, i32) => i128;
    (usize, i64) => i128;
    (usize, i128) => i128;
    (usize, isize) => i128;

    // floats
    (f32, f64) => f64;
    (i8, f32) => f32;
    (i16, f32) => f32;
    (u8, f32) => f32;
    (u16, f32) => f32;
    (i32, f32) => f64;
    (u32, f32) => f64;
    (i8, f64) => f64;
    (i16, f64) => f64;
    (i32, f64) => f64;
    (u8, f64) => f64;
    (u16, f64) => f64;
    (u32, f64) => f64;
}

/// Implements `CompareWith` in both directions between `u128` and each signed
/// type. No integer type holds both, so a negative operand is ordered below
/// every `u128` and the rest compare as `u128`.
macro_rules! sign_checked {
    ($($signed:ty),* $(,)?) => {
        $(
            impl CompareWith<$signed> for u128 {
                #[inline]
                fn holds(&self, op: CmpOp, rhs: &$signed) -> bool {
                    op.evaluate(&order_against_signed(*self, *rhs as i128), &Ordering::Equal)
                }

                fn render_pair(&self, rhs: &$signed) -> (String, String) {
                    (self.to_string(), rhs.to_string())
                }
            }

            impl CompareWith<u128> for $signed {
                #[inline]
                fn holds(&self, op: CmpOp, rhs: &u128) -> bool {
                    op.evaluate(&order_against_signed(*rhs, *self as i128).reverse(), &Ordering::Equal)
                }

                fn render_pair(&self, rhs: &u128) -> (String, String) {
                    (self.to_string(), rhs.to_string())
                }
            }
        )*
    };
}

#[inline]
fn order_against_signed(unsigned: u128, signed: i128) -> Ordering {
    match u128::try_from(signed) {
        Ok(signed) => unsigned.cmp(&signed),
        Err(_) => Ordering::Greater,
    }
}

sign_checked!(i8, i16, i32, i64, i128, isize);

/// Builds the fixed-shape failure text:
/// `enforce <a> <op> <b> failed, <a-value> <inverse-op> <b-value>\n<extra>`.
pub fn failure_message(
    op: CmpOp,
    exprs: (&str, &str),
    values: (&str, &str),
    extra: &str,
) -> String {
    format!(
        "enforce {} {} {} failed, {} {} {}\n{}",
        exprs.0,
        op.symbol(),
        exprs.1,
        values.0,
        op.inverse().symbol(),
        values.1,
        extra
    )
}

/// Checks `lhs <op> rhs`, describing the failure when it does not hold.
///
/// `exprs` is the source text of both operands. `extra` is only called on
/// failure. The failure goes through the condition branch of the status
/// normalizer, so it reports as [`CauseKind::Assertion`](crate::CauseKind).
#[inline]
pub fn check<L, R, F>(lhs: &L, rhs: &R, op: CmpOp, exprs: (&str, &str), extra: F) -> Result<(), Cause>
where
    L: CompareWith<R> + ?Sized,
    R: ?Sized,
    F: FnOnce() -> String,
{
    if lhs.holds(op, rhs) {
        return Ok(());
    }
    Err(describe_failure(lhs, rhs, op, exprs, &extra()))
}

#[cold]
#[inline(never)]
fn describe_failure<L, R>(lhs: &L, rhs: &R, op: CmpOp, exprs: (&str, &str), extra: &str) -> Cause
where
    L: CompareWith<R> + ?Sized,
    R: ?Sized,
{
    let (lhs_value, rhs_value) = lhs.render_pair(rhs);
    let message = failure_message(op, exprs, (&lhs_value, &rhs_value), extra);
    Status::Condition(false).into_cause(&message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cause::CauseKind;
    use proptest::prelude::*;

    const ALL_OPS: [CmpOp; 6] = [CmpOp::Eq, CmpOp::Ne, CmpOp::Gt, CmpOp::Ge, CmpOp::Lt, CmpOp::Le];

    fn no_extra() -> String {
        String::new()
    }

    // -----------------------------------------------------------------------
    // CmpOp
    // -----------------------------------------------------------------------

    #[test]
    fn inverse_is_an_involution() {
        for op in ALL_OPS {
            assert_eq!(op.inverse().inverse(), op);
        }
    }

    #[test]
    fn inverse_is_the_negation() {
        for op in ALL_OPS {
            for (a, b) in [(1, 2), (2, 2), (3, 2)] {
                assert_ne!(op.evaluate(&a, &b), op.inverse().evaluate(&a, &b));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Messages
    // -----------------------------------------------------------------------

    #[test]
    fn equal_values_pass() {
        assert!(check(&2, &2, CmpOp::Eq, ("2", "2"), no_extra).is_ok());
    }

    #[test]
    fn unequal_values_state_the_holding_relation() {
        let cause = check(&2, &3, CmpOp::Eq, ("2", "3"), no_extra).unwrap_err();
        assert_eq!(cause.kind(), CauseKind::Assertion);
        assert_eq!(cause.message(), "enforce 2 == 3 failed, 2 != 3\n");
    }

    #[test]
    fn extra_text_follows_newline() {
        let cause = check(&5, &3, CmpOp::Lt, ("a", "b"), || format!("ctx {}", 1)).unwrap_err();
        assert_eq!(cause.message(), "enforce a < b failed, 5 >= 3\nctx 1");
    }

    #[test]
    fn extra_is_not_built_on_success() {
        let result = check(&1, &2, CmpOp::Lt, ("a", "b"), || panic!("extra evaluated"));
        assert!(result.is_ok());
    }

    // -----------------------------------------------------------------------
    // Compatible types
    // -----------------------------------------------------------------------

    #[test]
    fn narrow_widens_to_wide() {
        assert!(check(&200u8, &200u64, CmpOp::Eq, ("a", "b"), no_extra).is_ok());
        assert!(check(&-1i8, &-1i64, CmpOp::Eq, ("a", "b"), no_extra).is_ok());
        assert!(check(&1.5f32, &1.5f64, CmpOp::Eq, ("a", "b"), no_extra).is_ok());
    }

    #[test]
    fn negative_signed_is_below_large_unsigned() {
        assert!(check(&-1i32, &u32::MAX, CmpOp::Lt, ("a", "b"), no_extra).is_ok());
        assert!(check(&-1i64, &u64::MAX, CmpOp::Ne, ("a", "b"), no_extra).is_ok());
        let cause = check(&-1i32, &u32::MAX, CmpOp::Ge, ("a", "b"), no_extra).unwrap_err();
        assert_eq!(
            cause.message(),
            "enforce a >= b failed, -1 < 4294967295\n"
        );
    }

    #[test]
    fn values_render_after_coercion() {
        let cause = check(&0.5f32, &0.25f64, CmpOp::Lt, ("x", "y"), no_extra).unwrap_err();
        assert_eq!(cause.message(), "enforce x < y failed, 0.5 >= 0.25\n");
    }

    #[test]
    fn strings_compare_with_str() {
        let name = String::from("gemm");
        assert!(check(&name, &"gemm", CmpOp::Eq, ("name", "\"gemm\""), no_extra).is_ok());
        let cause = check(&"conv", &name, CmpOp::Eq, ("op", "name"), no_extra).unwrap_err();
        assert_eq!(cause.message(), "enforce op == name failed, conv != gemm\n");
    }

    #[test]
    fn u128_against_unsuffixed_literal() {
        let total: u128 = 0;
        assert!(check(&total, &0, CmpOp::Eq, ("total", "0"), no_extra).is_ok());
        let cause = check(&u128::MAX, &0, CmpOp::Eq, ("total", "0"), no_extra).unwrap_err();
        assert_eq!(
            cause.message(),
            format!("enforce total == 0 failed, {} != 0\n", u128::MAX)
        );
    }

    #[test]
    fn negative_signed_is_below_any_u128() {
        assert!(check(&-1i32, &0u128, CmpOp::Lt, ("a", "b"), no_extra).is_ok());
        assert!(check(&0u128, &i128::MIN, CmpOp::Gt, ("a", "b"), no_extra).is_ok());
        assert!(check(&u128::MAX, &i128::MAX, CmpOp::Gt, ("a", "b"), no_extra).is_ok());
        assert!(check(&5i64, &5u128, CmpOp::Eq, ("a", "b"), no_extra).is_ok());
    }

    proptest! {
        #[test]
        fn u128_matches_wide_comparison(a in any::<u64>(), b in any::<i64>()) {
            let wide = u128::from(a);
            for op in ALL_OPS {
                prop_assert_eq!(wide.holds(op, &b), op.evaluate(&i128::from(a), &i128::from(b)));
                prop_assert_eq!(b.holds(op, &wide), op.evaluate(&i128::from(b), &i128::from(a)));
            }
        }

        #[test]
        fn ordered_pairs_pass_lt_and_fail_ge(a in any::<i64>(), b in any::<i64>()) {
            prop_assume!(a < b);
            prop_assert!(check(&a, &b, CmpOp::Lt, ("a", "b"), no_extra).is_ok());
            let cause = check(&a, &b, CmpOp::Ge, ("a", "b"), no_extra).unwrap_err();
            let expected = format!("enforce a >= b failed, {} < {}\n", a, b);
            prop_assert_eq!(cause.message(), expected.as_str());
        }

        #[test]
        fn mixed_sign_matches_wide_comparison(a in any::<i32>(), b in any::<u32>()) {
            for op in ALL_OPS {
                let expected = op.evaluate(&i64::from(a), &i64::from(b));
                prop_assert_eq!(a.holds(op, &b), expected);
                prop_assert_eq!(b.holds(op, &a), op.evaluate(&i64::from(b), &i64::from(a)));
            }
        }

        #[test]
        fn usize_against_i64_never_truncates(a in any::<usize>(), b in any::<i64>()) {
            let expected = (a as i128) < i128::from(b);
            prop_assert_eq!(a.holds(CmpOp::Lt, &b), expected);
        }
    }
}
