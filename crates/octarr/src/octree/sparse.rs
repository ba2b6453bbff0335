//! SparseOctree - self-resizing sparse map from 3D integer points to values.
//!
//! The root is always centred on the origin and covers `[-size/2, size/2)`
//! on every axis. A fixed-width tree can grow until its root spans the whole
//! coordinate type, so every representable point is storable. Writes outside the root grow it (doubling, preserving the
//! absolute position of existing data); every write is followed by
//! [`SparseOctree::optimize`], which prunes empty subtrees and shrinks the
//! root back while all data fits in its inner half.
//!
//! # Grow
//!
//! ```text
//!  old root R (size S)          new root (size 2S)
//!  +---+---+                    +-------+-------+
//!  | 2 | 3 |                    |   .   |   .   |
//!  +---+---+       ==>          |   +---+---+   |
//!  | 0 | 1 |                    +---| 2 | 3 |---+
//!  +---+---+                    |   +---+---+   |
//!                               |   | 0 | 1 |   |
//!                               |   +---+---+   |
//!                               |   .   |   .   |
//!                               +-------+-------+
//! ```
//!
//! Child `o` of the old root becomes grandchild `o.opposite()` of the new
//! root's child `o`. Shrink is the exact inverse.

use tracing::{debug, trace, warn};

use super::arena::NodeArena;
use super::bounds::{CubeBounds, DAabb3};
use super::node::{Node, NodeKey};
use super::{MaintenanceStats, OctantCode, OctreeConfig};
use crate::coord::Coordinate;
use crate::error::OctreeError;

/// Sparse, dynamically resized octree keyed by integer coordinates.
///
/// `C` is the coordinate type (`i32`, `i64`, `BigInt`, ...), `V` the stored
/// value. Memory is proportional to the number of stored values times the
/// tree depth, independent of how far apart the coordinates are.
pub struct SparseOctree<C, V> {
	arena: NodeArena<C, V>,
	root: NodeKey,
	/// Number of stored values.
	len: usize,
	config: OctreeConfig,
	stats: MaintenanceStats,
}

impl<C: Coordinate, V> SparseOctree<C, V> {
	/// Create an empty tree with the minimal root (size 2 at `(-1, -1, -1)`).
	pub fn new() -> Self {
		Self::with_config(OctreeConfig::default())
	}

	/// Create an empty tree with the given limits.
	pub fn with_config(config: OctreeConfig) -> Self {
		let mut arena = NodeArena::with_capacity(config.node_capacity);
		let root = arena.insert(Self::minimal_root());
		Self {
			arena,
			root,
			len: 0,
			config,
			stats: MaintenanceStats::default(),
		}
	}

	fn minimal_root() -> Node<C, V> {
		let min = -C::one();
		Node::new([min.clone(), min.clone(), min], OctreeConfig::MIN_DEPTH)
	}

	#[inline]
	pub fn config(&self) -> &OctreeConfig {
		&self.config
	}

	#[inline]
	pub fn stats(&self) -> MaintenanceStats {
		self.stats
	}

	/// Number of stored values.
	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Edge length of the root cube, or `None` once the root spans the whole
	/// coordinate type (`2^BITS` has no representation in `C`).
	#[inline]
	pub fn root_size(&self) -> Option<C> {
		self.arena[self.root].size()
	}

	/// log2 of the root size; also the length of every root-to-unit path.
	#[inline]
	pub fn root_depth(&self) -> u32 {
		self.arena[self.root].level
	}

	/// Total number of nodes, including the root.
	pub fn count_nodes(&self) -> usize {
		let count = self.arena.count_nodes(self.root);
		debug_assert_eq!(count, self.arena.len(), "arena holds detached nodes");
		count
	}

	/// Check if the point lies inside the root cube.
	#[inline]
	pub fn in_bounds(&self, x: &C, y: &C, z: &C) -> bool {
		self.arena[self.root].contains(x, y, z)
	}

	/// Look up the value stored at a point.
	pub fn get(&self, x: C, y: C, z: C) -> Option<&V> {
		let key = self.find_unit(&x, &y, &z)?;
		self.arena[key].value.as_ref()
	}

	/// Mutable access to the value stored at a point.
	///
	/// Never changes the tree structure.
	pub fn get_mut(&mut self, x: C, y: C, z: C) -> Option<&mut V> {
		let key = self.find_unit(&x, &y, &z)?;
		self.arena[key].value.as_mut()
	}

	/// Check if a value is stored at a point.
	pub fn contains(&self, x: C, y: C, z: C) -> bool {
		self.get(x, y, z).is_some()
	}

	/// Unit node containing the point, without materializing anything.
	fn find_unit(&self, x: &C, y: &C, z: &C) -> Option<NodeKey> {
		if !self.in_bounds(x, y, z) {
			return None;
		}

		let mut key = self.root;
		loop {
			let node = &self.arena[key];
			if node.is_unit() {
				return Some(key);
			}
			// Dead end above unit size: nothing stored here.
			let children = node.children?;
			key = children[node.child_octant_for(x, y, z).as_usize()];
		}
	}

	/// Store (`Some`) or clear (`None`) the value at a point, returning the
	/// previous value.
	///
	/// Grows the root as needed, then runs [`optimize`](Self::optimize).
	/// Fails only when growth would exceed `OctreeConfig::max_depth`; the tree
	/// is left minimal and unchanged in content on failure.
	pub fn set(&mut self, x: C, y: C, z: C, value: Option<V>) -> Result<Option<V>, OctreeError> {
		match value {
			Some(value) => self.insert(x, y, z, value),
			None => Ok(self.remove(x, y, z)),
		}
	}

	/// Store a value at a point, returning the previous value.
	pub fn insert(&mut self, x: C, y: C, z: C, value: V) -> Result<Option<V>, OctreeError> {
		if let Err(err) = self.grow_to_contain(&x, &y, &z) {
			// Undo any growth that did succeed.
			self.optimize();
			return Err(err);
		}

		let key = self.materialize_path(&x, &y, &z);
		let previous = self.arena[key].value.replace(value);
		if previous.is_none() {
			self.len += 1;
		}

		self.optimize();
		Ok(previous)
	}

	/// Clear the value at a point, returning it.
	///
	/// Points outside the root or behind a dead end hold nothing, so the tree
	/// is left untouched for them.
	pub fn remove(&mut self, x: C, y: C, z: C) -> Option<V> {
		let key = self.find_unit(&x, &y, &z)?;
		let previous = self.arena[key].value.take()?;
		self.len -= 1;
		self.optimize();
		Some(previous)
	}

	/// Drop every value and return to the minimal root.
	pub fn clear(&mut self) {
		self.arena.clear();
		self.root = self.arena.insert(Self::minimal_root());
		self.len = 0;
		self.stats = MaintenanceStats::default();
	}

	/// Descend to the unit node at the point, subdividing dead ends on the way.
	fn materialize_path(&mut self, x: &C, y: &C, z: &C) -> NodeKey {
		let mut key = self.root;
		loop {
			let octant = self.arena[key].child_octant_for(x, y, z);
			let was_dead_end = self.arena[key].is_dead_end();
			match self.arena.ensure_children(key) {
				Some(children) => {
					if was_dead_end {
						self.stats.nodes_created += 8;
					}
					key = children[octant.as_usize()];
				}
				None => return key,
			}
		}
	}

	/// Prune empty subtrees, then shrink the root as far as the data allows.
	///
	/// Runs after every write; calling it again is a no-op.
	#[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "octree::optimize"))]
	pub fn optimize(&mut self) {
		let released = self.arena.prune_dead_ends(self.root, true);
		if released > 0 {
			self.stats.nodes_released += released;
			trace!(released, "pruned dead ends");
		}
		self.shrink(true);
	}

	#[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "octree::grow_to_contain"))]
	fn grow_to_contain(&mut self, x: &C, y: &C, z: &C) -> Result<(), OctreeError> {
		while !self.in_bounds(x, y, z) {
			self.grow()?;
		}
		Ok(())
	}

	/// Double the root, keeping every node at its absolute position.
	///
	/// A root spanning the whole coordinate type already contains every point,
	/// so `CoordinateOverflow` only surfaces if growth is forced past it.
	fn grow(&mut self) -> Result<(), OctreeError> {
		let old_root = self.root;
		let depth = self.arena[old_root].level;
		let next_depth = depth + 1;
		if !self.config.allows_depth(next_depth) {
			let limit = self.config.max_depth.unwrap_or(depth);
			warn!(depth, limit, "root growth rejected by depth limit");
			return Err(OctreeError::DepthLimitExceeded { limit });
		}

		// New corner is old corner minus half the old size; check before touching
		// the tree.
		let [x, y, z] = &self.arena[old_root].position;
		let checked = (
			x.checked_sub_pow2(depth - 1),
			y.checked_sub_pow2(depth - 1),
			z.checked_sub_pow2(depth - 1),
		);
		let (Some(x), Some(y), Some(z)) = checked else {
			warn!(depth, "root growth would overflow the coordinate type");
			return Err(OctreeError::CoordinateOverflow);
		};
		let position = [x, y, z];

		self.stats.nodes_created += self.arena.subdivide(old_root, 1);
		let old_children = self.arena.detach_children(old_root);
		self.arena.remove(old_root);
		self.stats.nodes_released += 1;

		let new_root = self.arena.insert(Node::new(position, next_depth));
		self.stats.nodes_created += 1 + self.arena.subdivide(new_root, 2);

		if let (Some(branches), Some(old_children)) = (self.arena[new_root].children, old_children) {
			for octant in OctantCode::ALL {
				let branch = branches[octant.as_usize()];
				let moved = old_children[octant.as_usize()];
				if let Some(placeholder) = self.arena.replace_child(branch, octant.opposite(), moved) {
					self.stats.nodes_released += self.arena.release_subtree(placeholder);
				}
			}
		}

		self.root = new_root;
		self.stats.grows += 1;
		debug!(depth = next_depth, position = ?self.arena[new_root].position[0], "grew root");
		Ok(())
	}

	/// Check if every outer grandchild of the root is empty.
	///
	/// For root child `o`, grandchild `o.opposite()` is inner; the other 7 are
	/// outer. Unit grandchildren (root size 4) can hold values without having
	/// children, so values count as well.
	fn can_shrink(&self) -> bool {
		let Some(branches) = self.arena[self.root].children else {
			return true;
		};

		OctantCode::ALL.iter().all(|&octant| {
			let Some(grandchildren) = self.arena[branches[octant.as_usize()]].children else {
				return true;
			};
			OctantCode::ALL
				.iter()
				.filter(|&&candidate| candidate != octant.opposite())
				.all(|&candidate| {
					let outer = &self.arena[grandchildren[candidate.as_usize()]];
					outer.is_dead_end() && outer.value.is_none()
				})
		})
	}

	/// Halve the root while all data fits in its inner half. With `recursive`,
	/// repeats until it no longer can.
	fn shrink(&mut self, recursive: bool) {
		while self.root_depth() > OctreeConfig::MIN_DEPTH && self.can_shrink() {
			let old_root = self.root;
			self.stats.nodes_created += self.arena.subdivide(old_root, 2);

			let Some(branches) = self.arena.detach_children(old_root) else {
				return;
			};

			let mut inner = [0; 8];
			for octant in OctantCode::ALL {
				let branch = branches[octant.as_usize()];
				if let Some(grandchildren) = self.arena.detach_children(branch) {
					for candidate in OctantCode::ALL {
						let grandchild = grandchildren[candidate.as_usize()];
						if candidate == octant.opposite() {
							inner[octant.as_usize()] = grandchild;
						} else {
							self.stats.nodes_released += self.arena.release_subtree(grandchild);
						}
					}
				}
				self.arena.remove(branch);
			}

			let old = self.arena.remove(old_root);
			self.stats.nodes_released += 9;

			// The inner half starts a quarter of the old size above the old
			// corner; it lies inside the old root, so the sum always fits.
			let level = old.level - 1;
			let position = old
				.position
				.map(|p| p.checked_add_pow2(level - 1).unwrap_or(p));
			let mut root = Node::new(position, level);
			root.children = Some(inner);
			self.root = self.arena.insert(root);
			self.stats.nodes_created += 1;

			// Scaffolding from the forced subdivision above.
			self.stats.nodes_released += self.arena.prune_dead_ends(self.root, false);
			self.stats.shrinks += 1;
			debug!(depth = level, position = ?self.arena[self.root].position[0], "shrank root");

			if !recursive {
				break;
			}
		}
	}

	/// Invoke `callback(center_x, center_y, center_z, extent)` for every node,
	/// depth-first from the root.
	pub fn for_each_bound<F>(&self, callback: F)
	where
		F: FnMut(f64, f64, f64, f64),
	{
		self.arena.for_each_bound(self.root, true, callback);
	}

	/// Bounds of every node, in [`for_each_bound`](Self::for_each_bound) order.
	pub fn collect_bounds(&self) -> Vec<CubeBounds> {
		let mut bounds = Vec::with_capacity(self.arena.len());
		self.for_each_bound(|x, y, z, extent| bounds.push(CubeBounds::new(x, y, z, extent)));
		bounds
	}

	/// Box covering the root cube.
	pub fn root_aabb(&self) -> DAabb3 {
		let ([x, y, z], extent) = self.arena[self.root].center_extent();
		CubeBounds::new(x, y, z, extent).to_aabb()
	}
}

impl<C: Coordinate, V> Default for SparseOctree<C, V> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
#[path = "sparse_test.rs"]
mod sparse_test;
