//! Region crate - geometric predicates over the voxel world
//!
//! Regions answer two questions: does a point (or block) lie inside, and
//! which blocks lie inside. Rule matching uses the first on every gameplay
//! event; effects and area tools use the second.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       Region                             │
//! ├─────────────────────────────────────────────────────────┤
//! │  Primitives: Empty, Everywhere, Cuboid, Sphere, Cylinder │
//! │  Union      - N children, adaptive block iteration       │
//! │  Dynamic    - resolved from live match state             │
//! │  Static     - a dynamic shape frozen for iteration       │
//! ├─────────────────────────────────────────────────────────┤
//! │  Bounds                                                  │
//! │  ├── union / intersect / disjoint                        │
//! │  └── block volume and block iteration                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use region::{IterationStrategy, Region};
//! use glam::IVec3;
//!
//! let zones = Region::union_of(vec![
//!     Region::block(IVec3::ZERO),
//!     Region::block(IVec3::splat(5)),
//! ]);
//!
//! if let Region::Union(union) = &zones {
//!     assert_eq!(union.strategy(), IterationStrategy::ChildScan);
//! }
//! assert_eq!(zones.blocks().unwrap().count(), 2);
//! ```

mod bounds;
mod error;
mod region;
mod shape;
mod union;

pub use bounds::{Bounds, BoundsBlocks, CHUNK_SIZE, MAX_CHUNK_COLUMNS};
pub use error::{Error, Result};
pub use region::{block_center, BlockIter, DynamicShape, Region};
pub use shape::{Cuboid, Cylinder, Sphere};
pub use union::{IterationStrategy, Union, DENSITY_FACTOR, DISJOINT_CHECK_LIMIT};

// Re-export glam for convenience
pub use glam;
