use super::*;

// =========================================================================
// Batch 4: NodeArena Tests
// =========================================================================

fn arena_with_root(level: u32) -> (NodeArena<i64, u32>, NodeKey) {
	let mut arena = NodeArena::new();
	let half = 1i64 << (level - 1);
	let root = arena.insert(Node::new([-half, -half, -half], level));
	(arena, root)
}

/// Subdividing a dead end creates 8 children of half size at tiling positions.
#[test]
fn test_subdivide_creates_tiling_children() {
	let (mut arena, root) = arena_with_root(2);

	assert_eq!(arena.subdivide(root, 1), 8);

	let children = arena[root].children.expect("root should be subdivided");
	for octant in OctantCode::ALL {
		let child = &arena[children[octant.as_usize()]];
		assert_eq!(child.size(), Some(2));
		assert_eq!(Some(child.position), arena[root].octant_position(octant));
		assert!(child.is_dead_end());
	}
}

/// Subdividing twice yields 1 + 8 + 64 nodes.
#[test]
fn test_subdivide_depth_2() {
	let (mut arena, root) = arena_with_root(3);

	assert_eq!(arena.subdivide(root, 2), 72);
	assert_eq!(arena.count_nodes(root), 73);
	assert_eq!(arena.len(), 73);
}

/// Deep subdivision stops at unit cubes.
#[test]
fn test_subdivide_stops_at_unit_size() {
	let (mut arena, root) = arena_with_root(1);

	assert_eq!(arena.subdivide(root, 5), 8);
	assert_eq!(arena.count_nodes(root), 9);
}

/// Subdividing an already subdivided node only descends into its children.
#[test]
fn test_subdivide_existing_children_descends() {
	let (mut arena, root) = arena_with_root(2);
	arena.subdivide(root, 1);
	let before = arena[root].children;

	assert_eq!(arena.subdivide(root, 1), 0, "depth 1 on subdivided node is a no-op");
	assert_eq!(arena.subdivide(root, 2), 64);
	assert_eq!(arena[root].children, before, "existing children are kept");
}

/// Depth 0 does nothing.
#[test]
fn test_subdivide_depth_zero() {
	let (mut arena, root) = arena_with_root(2);
	assert_eq!(arena.subdivide(root, 0), 0);
	assert!(arena[root].is_dead_end());
}

/// ensure_children subdivides on demand and returns None for unit cubes.
#[test]
fn test_ensure_children() {
	let (mut arena, root) = arena_with_root(1);

	let children = arena.ensure_children(root).expect("size 2 can subdivide");
	assert_eq!(arena.ensure_children(root), Some(children));
	assert_eq!(arena.ensure_children(children[0]), None);
}

/// Pruning collapses a node whose 8 children are empty dead ends.
#[test]
fn test_prune_collapses_empty_children() {
	let (mut arena, root) = arena_with_root(3);
	arena.subdivide(root, 3);
	assert_eq!(arena.count_nodes(root), 1 + 8 + 64 + 512);

	let released = arena.prune_dead_ends(root, true);

	assert_eq!(released, 8 + 64 + 512);
	assert!(arena[root].is_dead_end());
	assert_eq!(arena.len(), 1);
}

/// Non-recursive pruning only looks at immediate children.
#[test]
fn test_prune_non_recursive() {
	let (mut arena, root) = arena_with_root(3);
	arena.subdivide(root, 2);

	assert_eq!(arena.prune_dead_ends(root, false), 0, "children are not dead ends");
	assert_eq!(arena.count_nodes(root), 73);
}

/// Pruning never discards a value.
#[test]
fn test_prune_keeps_values() {
	let (mut arena, root) = arena_with_root(2);
	arena.subdivide(root, 2);
	let child = arena[root].child(OctantCode::ALL[7]).unwrap();
	let unit = arena[child].child(OctantCode::ALL[0]).unwrap();
	arena[unit].value = Some(42);

	// 7 empty branches collapse, the one holding the value stays.
	assert_eq!(arena.prune_dead_ends(root, true), 56);
	assert_eq!(arena.count_nodes(root), 1 + 8 + 8);
	assert_eq!(arena[unit].value, Some(42));
}

/// Pruning a dead end is a no-op.
#[test]
fn test_prune_dead_end_noop() {
	let (mut arena, root) = arena_with_root(2);
	assert_eq!(arena.prune_dead_ends(root, true), 0);
	assert_eq!(arena.len(), 1);
}

/// replace_child swaps a single slot and returns the previous key.
#[test]
fn test_replace_child() {
	let (mut arena, root) = arena_with_root(2);
	let dead_end = arena.insert(Node::new([9, 9, 9], 0));
	assert_eq!(arena.replace_child(dead_end, OctantCode::ALL[0], root), None);

	let children = arena.ensure_children(root).unwrap();
	let replacement = arena.insert(Node::new([0, 0, 0], 1));
	let previous = arena.replace_child(root, OctantCode::ALL[7], replacement);

	assert_eq!(previous, Some(children[7]));
	assert_eq!(arena[root].child(OctantCode::ALL[7]), Some(replacement));
}

/// release_subtree frees every node below and including the key.
#[test]
fn test_release_subtree() {
	let (mut arena, root) = arena_with_root(3);
	arena.subdivide(root, 2);
	let child = arena.detach_children(root).unwrap()[3];

	assert_eq!(arena.release_subtree(child), 9);
	assert_eq!(arena.len(), 73 - 9);
}

/// for_each_bound visits the node, then descendants depth-first from octant 0.
#[test]
fn test_for_each_bound_order() {
	let (mut arena, root) = arena_with_root(1);
	arena.subdivide(root, 1);

	let mut visited = Vec::new();
	arena.for_each_bound(root, true, |x, y, z, extent| visited.push((x, y, z, extent)));

	assert_eq!(visited.len(), 9);
	assert_eq!(visited[0], (0.0, 0.0, 0.0, 2.0));
	assert_eq!(visited[1], (-0.5, -0.5, -0.5, 1.0));
	assert_eq!(visited[2], (0.5, -0.5, -0.5, 1.0));
	assert_eq!(visited[8], (0.5, 0.5, 0.5, 1.0));

	let mut shallow = 0;
	arena.for_each_bound(root, false, |_, _, _, _| shallow += 1);
	assert_eq!(shallow, 1);
}
