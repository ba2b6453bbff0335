//! Counters for structural maintenance performed by the octree.

/// Statistics accumulated since the tree was created or last cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaintenanceStats {
	/// Number of times the root doubled.
	pub grows: usize,
	/// Number of times the root halved.
	pub shrinks: usize,
	/// Nodes allocated: subdivisions, grow/shrink scaffolding and replacement roots.
	pub nodes_created: usize,
	/// Nodes released by pruning or discarded during grow/shrink.
	pub nodes_released: usize,
}

impl MaintenanceStats {
	/// Nodes currently alive according to the counters, including the root.
	#[inline]
	pub fn net_nodes(&self) -> usize {
		// The initial root is not counted as created.
		(1 + self.nodes_created).saturating_sub(self.nodes_released)
	}
}
