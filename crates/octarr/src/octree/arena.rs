//! NodeArena - slab-backed storage for every node of one octree.
//!
//! Nodes reference their children by [`NodeKey`]; each node has exactly one
//! owner (its parent, or the tree for the root). All traversals use explicit
//! work stacks, so arbitrarily deep trees never exhaust the call stack.

use std::ops::{Index, IndexMut};

use slab::Slab;
use smallvec::SmallVec;

use super::node::{Node, NodeKey};
use super::OctantCode;
use crate::coord::Coordinate;

/// Owner of all octree nodes, indexed by [`NodeKey`].
pub struct NodeArena<C, V> {
	nodes: Slab<Node<C, V>>,
}

impl<C: Coordinate, V> NodeArena<C, V> {
	pub fn new() -> Self {
		Self { nodes: Slab::new() }
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			nodes: Slab::with_capacity(capacity),
		}
	}

	/// Number of live nodes.
	#[inline]
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	#[inline]
	pub fn insert(&mut self, node: Node<C, V>) -> NodeKey {
		self.nodes.insert(node)
	}

	/// Remove a single node. Its children (if any) are left in place.
	#[inline]
	pub fn remove(&mut self, key: NodeKey) -> Node<C, V> {
		self.nodes.remove(key)
	}

	/// Drop every node.
	pub fn clear(&mut self) {
		self.nodes.clear();
	}

	/// Materialize the 8 children of a dead end. Returns false if the node
	/// already has children or is a unit cube.
	fn subdivide_once(&mut self, key: NodeKey) -> bool {
		let node = &self.nodes[key];
		if !node.is_dead_end() || node.is_unit() {
			return false;
		}
		debug_assert!(node.value.is_none(), "non-unit node holds a value");

		let level = node.level - 1;
		let children: SmallVec<[Node<C, V>; 8]> = OctantCode::ALL
			.iter()
			.filter_map(|&octant| node.octant_position(octant))
			.map(|position| Node::new(position, level))
			.collect();

		let mut keys = [0; 8];
		for (slot, child) in keys.iter_mut().zip(children) {
			*slot = self.nodes.insert(child);
		}
		self.nodes[key].children = Some(keys);
		true
	}

	/// Subdivide `key`, then every node below it, `depth` levels deep.
	///
	/// Nodes that already have children are descended into without change;
	/// unit cubes stop the descent. `depth == 0` does nothing. Returns the
	/// number of nodes created.
	pub fn subdivide(&mut self, key: NodeKey, depth: u32) -> usize {
		let mut created = 0;
		let mut stack = vec![(key, depth)];

		while let Some((key, depth)) = stack.pop() {
			if depth == 0 {
				continue;
			}
			if self.subdivide_once(key) {
				created += 8;
			}
			if depth > 1 {
				if let Some(children) = self.nodes[key].children {
					stack.extend(children.iter().map(|&child| (child, depth - 1)));
				}
			}
		}

		created
	}

	/// Children of `key`, subdividing it first if it is a dead end.
	///
	/// Returns `None` only for unit cubes.
	pub fn ensure_children(&mut self, key: NodeKey) -> Option<[NodeKey; 8]> {
		self.subdivide_once(key);
		self.nodes[key].children
	}

	/// Detach the children of `key`, leaving it a dead end. The children stay
	/// allocated and are now owned by the caller.
	pub fn detach_children(&mut self, key: NodeKey) -> Option<[NodeKey; 8]> {
		self.nodes[key].children.take()
	}

	/// Put `child` at `octant` of `parent`, returning the key it replaced.
	///
	/// Does nothing and returns `None` if `parent` is a dead end.
	pub fn replace_child(
		&mut self,
		parent: NodeKey,
		octant: OctantCode,
		child: NodeKey,
	) -> Option<NodeKey> {
		let children = self.nodes[parent].children.as_mut()?;
		Some(std::mem::replace(&mut children[octant.as_usize()], child))
	}

	/// Collapse `key` to a dead end if all 8 children are empty dead ends.
	/// Returns the number of nodes released.
	fn collapse_if_empty(&mut self, key: NodeKey) -> usize {
		let Some(children) = self.nodes[key].children else {
			return 0;
		};
		let empty = children.iter().all(|&child| {
			let child = &self.nodes[child];
			child.is_dead_end() && child.value.is_none()
		});
		if !empty {
			return 0;
		}

		self.nodes[key].children = None;
		for child in children {
			self.nodes.remove(child);
		}
		children.len()
	}

	/// Release empty subtrees below `key`.
	///
	/// Without `recursive`, only the immediate children are considered. With
	/// it, children are pruned before their parents so emptiness propagates
	/// upward. Values are never discarded. Returns the number of nodes released.
	pub fn prune_dead_ends(&mut self, key: NodeKey, recursive: bool) -> usize {
		if self.nodes[key].is_dead_end() {
			return 0;
		}
		if !recursive {
			return self.collapse_if_empty(key);
		}

		// Pre-order over subdivided nodes; reversed, every node follows its
		// descendants.
		let mut order = Vec::new();
		let mut stack = vec![key];
		while let Some(key) = stack.pop() {
			if let Some(children) = self.nodes[key].children {
				order.push(key);
				stack.extend(children);
			}
		}

		order
			.into_iter()
			.rev()
			.map(|key| self.collapse_if_empty(key))
			.sum()
	}

	/// Release `key` and everything below it. Returns the number of nodes freed.
	pub fn release_subtree(&mut self, key: NodeKey) -> usize {
		let mut released = 0;
		let mut stack = vec![key];
		while let Some(key) = stack.pop() {
			let node = self.nodes.remove(key);
			if let Some(children) = node.children {
				stack.extend(children);
			}
			released += 1;
		}
		released
	}

	/// Number of nodes in the subtree rooted at `key`, including `key`.
	pub fn count_nodes(&self, key: NodeKey) -> usize {
		let mut count = 0;
		let mut stack = vec![key];
		while let Some(key) = stack.pop() {
			count += 1;
			if let Some(children) = self.nodes[key].children {
				stack.extend(children);
			}
		}
		count
	}

	/// Invoke `callback(center_x, center_y, center_z, extent)` for `key` and,
	/// if `recursive`, every descendant in depth-first pre-order (octant 0
	/// first).
	pub fn for_each_bound<F>(&self, key: NodeKey, recursive: bool, mut callback: F)
	where
		F: FnMut(f64, f64, f64, f64),
	{
		let mut stack = vec![key];
		while let Some(key) = stack.pop() {
			let node = &self.nodes[key];
			let ([x, y, z], extent) = node.center_extent();
			callback(x, y, z, extent);

			if recursive {
				if let Some(children) = node.children {
					stack.extend(children.iter().rev());
				}
			}
		}
	}
}

impl<C: Coordinate, V> Default for NodeArena<C, V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<C, V> Index<NodeKey> for NodeArena<C, V> {
	type Output = Node<C, V>;

	#[inline]
	fn index(&self, key: NodeKey) -> &Self::Output {
		&self.nodes[key]
	}
}

impl<C, V> IndexMut<NodeKey> for NodeArena<C, V> {
	#[inline]
	fn index_mut(&mut self, key: NodeKey) -> &mut Self::Output {
		&mut self.nodes[key]
	}
}

#[cfg(test)]
#[path = "arena_test.rs"]
mod arena_test;
