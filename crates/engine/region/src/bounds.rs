//! Axis-aligned bounding boxes and block enumeration

use crate::{Error, Result};
use glam::{DVec3, I64Vec3, IVec2, IVec3};
use serde::{Deserialize, Serialize};

/// Side length of a chunk column, in blocks
pub const CHUNK_SIZE: i32 = 16;

/// Most chunk columns [`Bounds::chunk_positions`] will list
pub const MAX_CHUNK_COLUMNS: u64 = 1 << 16;

/// Lowest world coordinate a block can occupy
const BLOCK_COORD_MIN: f64 = i32::MIN as f64;

/// Far face of the highest block
const BLOCK_COORD_MAX: f64 = i32::MAX as f64 + 1.0;

/// Axis-aligned box in world space, possibly infinite along any axis.
///
/// Both faces are inclusive. A block position belongs to the box when its
/// centre (`block + 0.5`) does, so `(0,0,0)-(1,1,1)` holds exactly one block.
///
/// The empty box is represented with `min = +inf` and `max = -inf`, which makes
/// it the identity for [`Bounds::union`] and disjoint from every other box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    min: DVec3,
    max: DVec3,
}

impl Bounds {
    /// Create bounds spanning two corners (in any order)
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Bounds {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Bounds containing nothing
    pub fn empty() -> Self {
        Bounds {
            min: DVec3::INFINITY,
            max: DVec3::NEG_INFINITY,
        }
    }

    /// Bounds containing everything
    pub fn unbounded() -> Self {
        Bounds {
            min: DVec3::NEG_INFINITY,
            max: DVec3::INFINITY,
        }
    }

    /// Bounds covering the inclusive block range `min..=max`
    pub fn from_blocks(min: IVec3, max: IVec3) -> Self {
        let (lo, hi) = (min.min(max), min.max(max));
        Bounds {
            min: lo.as_dvec3(),
            max: hi.as_dvec3() + DVec3::ONE,
        }
    }

    pub fn min(&self) -> DVec3 {
        self.min
    }

    pub fn max(&self) -> DVec3 {
        self.max
    }

    /// Check if the bounds contain no points at all
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Check if the bounds are finite and within block coordinates on every
    /// axis, so blocks can be enumerated
    pub fn is_block_bounded(&self) -> bool {
        self.is_empty()
            || (self.min.cmpge(DVec3::splat(BLOCK_COORD_MIN)).all()
                && self.max.cmple(DVec3::splat(BLOCK_COORD_MAX)).all())
    }

    /// Check if a point lies inside the bounds (faces inclusive)
    pub fn contains(&self, point: DVec3) -> bool {
        self.min.cmple(point).all() && point.cmple(self.max).all()
    }

    /// Smallest bounds enclosing both inputs
    pub fn union(a: &Bounds, b: &Bounds) -> Bounds {
        if a.is_empty() {
            return *b;
        }
        if b.is_empty() {
            return *a;
        }
        Bounds {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    /// Overlap of both inputs, or [`Bounds::empty`] if they do not overlap
    pub fn intersect(a: &Bounds, b: &Bounds) -> Bounds {
        let result = Bounds {
            min: a.min.max(b.min),
            max: a.max.min(b.max),
        };
        if result.is_empty() {
            Bounds::empty()
        } else {
            result
        }
    }

    /// Two bounds are disjoint iff they fail to overlap on at least one axis.
    ///
    /// Touching faces count as overlapping.
    pub fn disjoint(a: &Bounds, b: &Bounds) -> bool {
        a.max.cmplt(b.min).any() || b.max.cmplt(a.min).any()
    }

    /// Inclusive range of block positions whose centres lie inside the bounds.
    ///
    /// Returns `Ok(None)` when no block centre is covered.
    pub fn block_range(&self) -> Result<Option<(IVec3, IVec3)>> {
        if !self.is_block_bounded() {
            return Err(Error::NotBlockBounded(*self));
        }
        if self.is_empty() {
            return Ok(None);
        }

        let min = (self.min - 0.5).ceil().as_ivec3();
        let max = (self.max - 0.5).floor().as_ivec3();
        if min.cmpgt(max).any() {
            return Ok(None);
        }
        Ok(Some((min, max)))
    }

    /// Number of blocks covered by the bounds
    pub fn block_volume(&self) -> Result<u64> {
        Ok(match self.block_range()? {
            Some((min, max)) => {
                let size = max.as_i64vec3() - min.as_i64vec3() + I64Vec3::ONE;
                (size.x as u64)
                    .saturating_mul(size.y as u64)
                    .saturating_mul(size.z as u64)
            }
            None => 0,
        })
    }

    /// Iterate every block position covered by the bounds
    pub fn blocks(&self) -> Result<BoundsBlocks> {
        Ok(match self.block_range()? {
            Some((min, max)) => BoundsBlocks {
                min,
                max,
                next: Some(min),
            },
            None => BoundsBlocks {
                min: IVec3::ZERO,
                max: IVec3::ZERO,
                next: None,
            },
        })
    }

    /// Chunk columns (x, z) touched by the covered blocks, in ascending order.
    ///
    /// Fails with [`Error::TooManyChunks`] above [`MAX_CHUNK_COLUMNS`] columns.
    pub fn chunk_positions(&self) -> Result<Vec<IVec2>> {
        let Some((min, max)) = self.block_range()? else {
            return Ok(Vec::new());
        };

        let lo = IVec2::new(min.x, min.z).div_euclid(IVec2::splat(CHUNK_SIZE));
        let hi = IVec2::new(max.x, max.z).div_euclid(IVec2::splat(CHUNK_SIZE));

        let count = (hi.x - lo.x + 1) as u64 * (hi.y - lo.y + 1) as u64;
        if count > MAX_CHUNK_COLUMNS {
            return Err(Error::TooManyChunks(count));
        }

        let mut chunks = Vec::with_capacity(count as usize);
        for x in lo.x..=hi.x {
            for z in lo.y..=hi.y {
                chunks.push(IVec2::new(x, z));
            }
        }
        Ok(chunks)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::empty()
    }
}

/// Iterator over the blocks of a [`Bounds`], x fastest, then y, then z
#[derive(Debug, Clone)]
pub struct BoundsBlocks {
    min: IVec3,
    max: IVec3,
    next: Option<IVec3>,
}

impl Iterator for BoundsBlocks {
    type Item = IVec3;

    fn next(&mut self) -> Option<IVec3> {
        let current = self.next?;

        // Compare before stepping so the last block at i32::MAX never overflows
        self.next = if current.x < self.max.x {
            Some(IVec3::new(current.x + 1, current.y, current.z))
        } else if current.y < self.max.y {
            Some(IVec3::new(self.min.x, current.y + 1, current.z))
        } else if current.z < self.max.z {
            Some(IVec3::new(self.min.x, self.min.y, current.z + 1))
        } else {
            None
        };

        Some(current)
    }
}
