//! Sparse dynamic octree.
//!
//! Explicit tree of cubes stored in a slab arena. Only the paths leading to
//! stored values are materialized; everything else is a "dead end" node.
//!
//! # Octant Convention
//!
//! ```text
//! index = x + 2y + 4z      (bit set = upper half of that axis)
//! child position = parent position + bit * parent_size / 2
//! ```
//!
//! # Module Structure
//!
//! - [`octant`]: `OctantCode` - 3-bit child address
//! - [`node`]: `Node` - one cube, dead end or 8 children
//! - [`arena`]: `NodeArena` - node storage and structural operations
//! - [`sparse`]: `SparseOctree` - lookup, assignment, grow/shrink/prune
//! - [`config`]: `OctreeConfig` - depth limit and preallocation
//! - [`stats`]: `MaintenanceStats` - structural maintenance counters
//! - [`bounds`]: `CubeBounds`, `DAabb3` - visualization helpers

pub mod arena;
pub mod bounds;
pub mod config;
pub mod node;
pub mod octant;
pub mod sparse;
pub mod stats;

// Re-exports
pub use arena::NodeArena;
pub use bounds::{CubeBounds, DAabb3};
pub use config::OctreeConfig;
pub use node::{Node, NodeKey};
pub use octant::OctantCode;
pub use sparse::SparseOctree;
pub use stats::MaintenanceStats;
