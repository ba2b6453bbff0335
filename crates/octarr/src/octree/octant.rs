//! OctantCode - 3-bit address of one child cube.
//!
//! Bit layout matches the packed index `x + 2y + 4z`:
//! - bit 0: X half (0 = lower, 1 = upper)
//! - bit 1: Y half
//! - bit 2: Z half

use crate::error::OctreeError;

/// One of the 8 octants of a cube.
///
/// A set bit means the point lies in the upper half of that axis relative to
/// the cube's center.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct OctantCode(u8);

impl OctantCode {
	/// All 8 octants in index order.
	pub const ALL: [OctantCode; 8] = [
		OctantCode(0),
		OctantCode(1),
		OctantCode(2),
		OctantCode(3),
		OctantCode(4),
		OctantCode(5),
		OctantCode(6),
		OctantCode(7),
	];

	/// Decompose a packed index into its 3 axis bits.
	///
	/// Fails with [`OctreeError::InvalidOctant`] outside 0..=7.
	pub fn from_index(index: u8) -> Result<Self, OctreeError> {
		if index > 7 {
			return Err(OctreeError::InvalidOctant(index));
		}
		Ok(Self(index))
	}

	/// Build from per-axis "upper half" flags.
	#[inline]
	pub fn from_axes(x: bool, y: bool, z: bool) -> Self {
		Self((x as u8) | ((y as u8) << 1) | ((z as u8) << 2))
	}

	/// Packed index, 0..=7.
	#[inline]
	pub fn index(self) -> u8 {
		self.0
	}

	/// Packed index as a child-array slot.
	#[inline]
	pub fn as_usize(self) -> usize {
		self.0 as usize
	}

	/// Point reflection through the cube's center: flips all three bits.
	#[inline]
	pub fn opposite(self) -> Self {
		Self(self.0 ^ 0b111)
	}

	#[inline]
	pub fn x(self) -> bool {
		self.0 & 1 != 0
	}

	#[inline]
	pub fn y(self) -> bool {
		self.0 & 2 != 0
	}

	#[inline]
	pub fn z(self) -> bool {
		self.0 & 4 != 0
	}

	/// Axis bits as `[x, y, z]`.
	#[inline]
	pub fn axes(self) -> [bool; 3] {
		[self.x(), self.y(), self.z()]
	}
}

impl TryFrom<u8> for OctantCode {
	type Error = OctreeError;

	fn try_from(index: u8) -> Result<Self, Self::Error> {
		Self::from_index(index)
	}
}

impl From<OctantCode> for u8 {
	fn from(octant: OctantCode) -> Self {
		octant.index()
	}
}

#[cfg(test)]
#[path = "octant_test.rs"]
mod octant_test;
