//! octarr - sparse, self-resizing octree for 3D integer coordinates.
//!
//! Maps `(x, y, z)` points to arbitrary values over an unbounded coordinate
//! domain. Memory grows with the number of stored values, not with the
//! addressable range: the root doubles on demand when a write lands outside
//! it, and every write is followed by pruning of empty subtrees and shrinking
//! of the root.
//!
//! # Features
//!
//! - **Generic coordinates**: `i32`, `i64`, `i128` or (with the `bigint`
//!   feature) `num_bigint::BigInt`, through one implementation
//! - **Structural minimality**: clearing the last value collapses the tree
//!   back to a single size-2 root
//! - **Iterative traversal**: no recursion, so depth is bounded only by
//!   `OctreeConfig::max_depth` and the coordinate type
//! - **Visualization hook**: `for_each_bound` reports every cube's center and
//!   extent to a caller callback
//!
//! # Example
//!
//! ```
//! use octarr::SparseOctree;
//!
//! let mut tree = SparseOctree::<i32, &str>::new();
//! tree.insert(5, 5, 5, "A").unwrap();
//!
//! assert_eq!(tree.get(5, 5, 5), Some(&"A"));
//! assert_eq!(tree.get(0, 0, 0), None);
//!
//! tree.set(5, 5, 5, None).unwrap();
//! assert_eq!(tree.count_nodes(), 1);
//! ```

pub mod coord;
pub mod error;
pub mod octree;

// Re-export commonly used items
pub use coord::Coordinate;
pub use error::OctreeError;
pub use octree::{CubeBounds, DAabb3, MaintenanceStats, OctantCode, OctreeConfig, SparseOctree};

#[cfg(feature = "bigint")]
pub use num_bigint::BigInt;

/// Octree with arbitrary-precision coordinates.
#[cfg(feature = "bigint")]
pub type BigOctree<V> = SparseOctree<BigInt, V>;
