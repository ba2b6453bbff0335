//! Cube bounds reported to visualization callbacks.
//!
//! The octree itself only hands out `(center_x, center_y, center_z, extent)`
//! scalars; these types are conveniences for hosts that draw boxes.

use glam::DVec3;

/// Double-precision axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DAabb3 {
	/// Minimum corner (inclusive).
	pub min: DVec3,
	/// Maximum corner (exclusive, like the integer cube it was built from).
	pub max: DVec3,
}

impl DAabb3 {
	/// Create a new AABB from center and half-extents.
	pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
		Self {
			min: center - half_extents,
			max: center + half_extents,
		}
	}
}

/// One visited octree cube: center point and full edge length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeBounds {
	pub center: DVec3,
	/// Full edge length (the node size).
	pub extent: f64,
}

impl CubeBounds {
	/// Build from the scalars passed to `for_each_bound` callbacks.
	#[inline]
	pub fn new(center_x: f64, center_y: f64, center_z: f64, extent: f64) -> Self {
		Self {
			center: DVec3::new(center_x, center_y, center_z),
			extent,
		}
	}

	#[inline]
	pub fn half_extent(&self) -> f64 {
		self.extent * 0.5
	}

	/// Box covering the cube.
	#[inline]
	pub fn to_aabb(&self) -> DAabb3 {
		DAabb3::from_center_half_extents(self.center, DVec3::splat(self.half_extent()))
	}
}
