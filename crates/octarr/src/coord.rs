//! Coordinate abstraction shared by fixed-width and arbitrary-precision trees.
//!
//! Any signed integer with checked add/sub/mul qualifies: `i32`, `i64`,
//! `i128`, and `num_bigint::BigInt` all go through the same octree code.
//!
//! Node sizes are powers of two kept as exponents, so a fixed-width tree can
//! cover `[MIN, MAX]` even though its root edge (`2^BITS`) has no
//! representation in the coordinate type itself.

use std::fmt::Debug;

use num_traits::{CheckedAdd, CheckedMul, CheckedSub, Signed, ToPrimitive};

/// Signed integer usable as an octree axis coordinate.
///
/// Blanket-implemented; never implement by hand.
pub trait Coordinate:
	Signed + Ord + Clone + Debug + CheckedAdd + CheckedSub + CheckedMul + ToPrimitive
{
	/// The constant 2.
	#[inline]
	fn two() -> Self {
		Self::one() + Self::one()
	}

	/// `2^exp`, or `None` if it does not fit.
	#[inline]
	fn checked_pow2(exp: u32) -> Option<Self> {
		let exp = usize::try_from(exp).ok()?;
		num_traits::checked_pow(Self::two(), exp)
	}

	/// `self + 2^exp`, or `None` if the sum does not fit.
	///
	/// Adds two halves so that `2^exp` itself never has to be representable.
	fn checked_add_pow2(&self, exp: u32) -> Option<Self> {
		if exp == 0 {
			return self.checked_add(&Self::one());
		}
		let half = Self::checked_pow2(exp - 1)?;
		self.checked_add(&half)?.checked_add(&half)
	}

	/// `self - 2^exp`, or `None` if the difference does not fit.
	fn checked_sub_pow2(&self, exp: u32) -> Option<Self> {
		if exp == 0 {
			return self.checked_sub(&Self::one());
		}
		let half = Self::checked_pow2(exp - 1)?;
		self.checked_sub(&half)?.checked_sub(&half)
	}

	/// Lossy conversion used for visualization only.
	///
	/// Values beyond `f64` range saturate to signed infinity rather than fail.
	#[inline]
	fn to_f64_lossy(&self) -> f64 {
		self.to_f64().unwrap_or(if self.is_negative() {
			f64::NEG_INFINITY
		} else {
			f64::INFINITY
		})
	}
}

impl<T> Coordinate for T where
	T: Signed + Ord + Clone + Debug + CheckedAdd + CheckedSub + CheckedMul + ToPrimitive
{
}

#[cfg(test)]
mod tests {
	use num_bigint::BigInt;

	use super::*;

	#[test]
	fn test_two_and_lossy() {
		assert_eq!(<i32 as Coordinate>::two(), 2);
		assert_eq!((-4i32).to_f64_lossy(), -4.0);
	}

	#[test]
	fn test_checked_pow2_limits() {
		assert_eq!(i32::checked_pow2(0), Some(1));
		assert_eq!(i32::checked_pow2(30), Some(1 << 30));
		assert_eq!(i32::checked_pow2(31), None);
		assert_eq!(i64::checked_pow2(62), Some(1 << 62));
		assert_eq!(i64::checked_pow2(63), None);
	}

	/// Sums past the type range fail, sums that land inside succeed even when
	/// the addend alone would not fit.
	#[test]
	fn test_add_sub_pow2_at_type_edges() {
		assert_eq!(i32::MIN.checked_add_pow2(31), Some(0));
		assert_eq!(0i32.checked_add_pow2(31), None);
		assert_eq!((-1i32).checked_add_pow2(31), Some(i32::MAX));
		assert_eq!(0i32.checked_sub_pow2(31), Some(i32::MIN));
		assert_eq!((-1i32).checked_sub_pow2(31), None);
		assert_eq!(i32::MIN.checked_add_pow2(32), None);
		assert_eq!(5i64.checked_add_pow2(0), Some(6));
		assert_eq!(5i64.checked_sub_pow2(2), Some(1));
	}

	#[test]
	fn test_bigint_is_coordinate() {
		let big: BigInt = BigInt::from(1u8) << 200;
		assert_eq!(BigInt::checked_pow2(200), Some(big.clone()));
		assert_eq!(big.checked_sub_pow2(200), Some(BigInt::from(0)));
		assert!(big.to_f64_lossy() > 1e60);

		let huge: BigInt = BigInt::from(1u8) << 2000;
		assert_eq!(huge.to_f64_lossy(), f64::INFINITY);
		assert_eq!((-huge).to_f64_lossy(), f64::NEG_INFINITY);
	}
}
