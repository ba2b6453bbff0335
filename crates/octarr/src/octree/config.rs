//! OctreeConfig - resource limits for a sparse octree.

/// Configuration for root growth and arena sizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OctreeConfig {
	/// Maximum root depth, where the root covers `2^depth` units per axis.
	/// `None` = unlimited (bounded only by the coordinate type).
	pub max_depth: Option<u32>,

	/// Number of node slots to reserve up front.
	pub node_capacity: usize,
}

impl OctreeConfig {
	/// No depth limit, no preallocation.
	pub const UNLIMITED: Self = Self {
		max_depth: None,
		node_capacity: 0,
	};

	/// Depth of the minimal root (size 2).
	pub const MIN_DEPTH: u32 = 1;

	/// Limit root growth to `max_depth` levels.
	pub fn with_max_depth(max_depth: u32) -> Self {
		Self {
			max_depth: Some(max_depth.max(Self::MIN_DEPTH)),
			..Self::UNLIMITED
		}
	}

	/// Check if the root may reach the given depth.
	#[inline]
	pub fn allows_depth(&self, depth: u32) -> bool {
		self.max_depth.map_or(true, |limit| depth <= limit)
	}
}

impl Default for OctreeConfig {
	fn default() -> Self {
		Self::UNLIMITED
	}
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
