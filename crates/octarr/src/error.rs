//! Error type for octree construction and growth.

use thiserror::Error;

/// Errors reported by the octree.
///
/// A missing value is never an error; lookups return `None` for that.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OctreeError {
	/// Octant indices are 3-bit codes, so only 0..=7 is valid.
	#[error("invalid octant index {0}, expected 0..=7")]
	InvalidOctant(u8),
	/// Doubling the root would not fit in the coordinate type.
	#[error("growing the root would overflow the coordinate type")]
	CoordinateOverflow,
	/// Doubling the root would exceed `OctreeConfig::max_depth`.
	#[error("growing the root would exceed the depth limit of {limit}")]
	DepthLimitExceeded { limit: u32 },
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_messages() {
		assert_eq!(
			OctreeError::InvalidOctant(9).to_string(),
			"invalid octant index 9, expected 0..=7"
		);
		assert_eq!(
			OctreeError::DepthLimitExceeded { limit: 12 }.to_string(),
			"growing the root would exceed the depth limit of 12"
		);
	}
}
