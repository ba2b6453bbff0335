//! Node - one cube of the sparse octree.
//!
//! A node is either a dead end (no children, nothing stored anywhere inside)
//! or has exactly 8 children tiling its cube. Only unit-size nodes carry a
//! value. Structural operations that touch several nodes live on
//! [`NodeArena`](super::arena::NodeArena).
//!
//! The edge length is stored as `level = log2(size)`. Every cube the tree
//! builds lies inside the coordinate range, so its corner and center are
//! representable even when its edge length is not.

use super::OctantCode;
use crate::coord::Coordinate;

/// Arena slot of a node.
pub type NodeKey = usize;

/// Cube region of the octree.
#[derive(Clone, Debug)]
pub struct Node<C, V> {
	/// Minimum corner.
	pub position: [C; 3],
	/// log2 of the edge length; 0 for unit cubes.
	pub level: u32,
	/// Either no children or all 8, indexed by [`OctantCode::index`].
	pub children: Option<[NodeKey; 8]>,
	/// Stored value; only ever `Some` when `level == 0`.
	pub value: Option<V>,
}

impl<C: Coordinate, V> Node<C, V> {
	/// Create an empty dead-end node with edge length `2^level`.
	pub fn new(position: [C; 3], level: u32) -> Self {
		Self {
			position,
			level,
			children: None,
			value: None,
		}
	}

	/// No children: nothing is stored in this cube.
	#[inline]
	pub fn is_dead_end(&self) -> bool {
		self.children.is_none()
	}

	/// Unit cube, the only kind of node that can hold a value.
	#[inline]
	pub fn is_unit(&self) -> bool {
		self.level == 0
	}

	/// Edge length, or `None` when it exceeds the coordinate type.
	#[inline]
	pub fn size(&self) -> Option<C> {
		C::checked_pow2(self.level)
	}

	/// Child key at the given octant, if the node is subdivided.
	#[inline]
	pub fn child(&self, octant: OctantCode) -> Option<NodeKey> {
		self.children.map(|children| children[octant.as_usize()])
	}

	/// Check if the point lies in `[position, position + size)` on every axis.
	///
	/// An upper bound past the end of the coordinate type admits everything
	/// above the minimum corner.
	pub fn contains(&self, x: &C, y: &C, z: &C) -> bool {
		[x, y, z].into_iter().zip(&self.position).all(|(p, min)| {
			p >= min
				&& min
					.checked_add_pow2(self.level)
					.map_or(true, |end| *p < end)
		})
	}

	/// First coordinate of the upper half on one axis.
	///
	/// `None` for unit cubes, which have no halves.
	#[inline]
	fn midpoint(&self, axis: usize) -> Option<C> {
		let half = self.level.checked_sub(1)?;
		self.position[axis].checked_add_pow2(half)
	}

	/// Octant of the child cube containing the point.
	///
	/// The point must lie inside this node; outside points yield a meaningless
	/// (but valid) octant.
	pub fn child_octant_for(&self, x: &C, y: &C, z: &C) -> OctantCode {
		let upper = |axis: usize, p: &C| self.midpoint(axis).map_or(false, |mid| *p >= mid);
		OctantCode::from_axes(upper(0, x), upper(1, y), upper(2, z))
	}

	/// Minimum corner of the child cube at `octant`.
	///
	/// `None` for unit cubes.
	pub fn octant_position(&self, octant: OctantCode) -> Option<[C; 3]> {
		if self.is_unit() {
			return None;
		}
		let axes = octant.axes();
		let mut position = self.position.clone();
		for (axis, corner) in position.iter_mut().enumerate() {
			if axes[axis] {
				*corner = self.midpoint(axis)?;
			}
		}
		Some(position)
	}

	/// Center point and full extent, as reported to visualization callbacks.
	pub fn center_extent(&self) -> ([f64; 3], f64) {
		let extent = 2f64.powi(i32::try_from(self.level).unwrap_or(i32::MAX));
		let center = std::array::from_fn(|axis| self.position[axis].to_f64_lossy() + extent * 0.5);
		(center, extent)
	}
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
