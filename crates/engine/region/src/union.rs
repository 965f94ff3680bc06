//! Union of regions with an adaptive block iteration strategy

use crate::region::BlockIter;
use crate::{Bounds, Error, Region, Result};
use glam::{DVec3, IVec3};
use std::cell::OnceCell;
use std::collections::HashSet;

/// Above this many children the O(n²) disjointness check is skipped and
/// children are assumed to overlap.
pub const DISJOINT_CHECK_LIMIT: usize = 100;

/// A union whose bounds hold fewer than this many times the summed child
/// volume is dense enough to scan in full.
pub const DENSITY_FACTOR: u64 = 5;

/// Upper limit on the up-front allocation of the visited set
const MAX_VISITED_PREALLOC: u64 = 1 << 20;

/// How a [`Union`] enumerates its blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationStrategy {
    /// Scan the union's bounds and keep blocks it contains
    FullScan,

    /// Chain the children's own iterators; only valid for disjoint children
    ChildScan,

    /// Chain the children's iterators, dropping positions already yielded
    FilteredChildScan {
        /// Summed block volume of the children
        capacity: u64,
    },
}

/// Region containing every point contained by any of its children.
///
/// Unions are immutable once built. The iteration strategy is chosen on the
/// first call to [`Union::blocks`] and kept for the lifetime of the instance.
/// A union with dynamic children is frozen before each iteration, so one
/// iteration never mixes match states.
#[derive(Debug, Clone)]
pub struct Union {
    children: Vec<Region>,
    strategy: OnceCell<IterationStrategy>,
}

impl Union {
    pub fn new(children: Vec<Region>) -> Self {
        Union {
            children,
            strategy: OnceCell::new(),
        }
    }

    pub fn children(&self) -> &[Region] {
        &self.children
    }

    pub fn contains(&self, point: DVec3) -> bool {
        self.children.iter().any(|child| child.contains(point))
    }

    pub fn contains_block(&self, block: IVec3) -> bool {
        self.children.iter().any(|child| child.contains_block(block))
    }

    pub fn is_block_bounded(&self) -> bool {
        self.children.iter().all(Region::is_block_bounded)
    }

    pub fn is_static(&self) -> bool {
        self.children.iter().all(Region::is_static)
    }

    pub fn is_empty(&self) -> bool {
        self.children.iter().all(Region::is_empty)
    }

    pub fn bounds(&self) -> Bounds {
        self.children
            .iter()
            .fold(Bounds::empty(), |acc, child| Bounds::union(&acc, &child.bounds()))
    }

    /// Union of the children's static forms; returns a clone if already static
    pub fn to_static(&self) -> Region {
        if self.is_static() {
            return Region::Union(self.clone());
        }
        Region::Union(Union::new(
            self.children.iter().map(Region::to_static).collect(),
        ))
    }

    /// The iteration strategy for this union, selecting it on first use
    pub fn strategy(&self) -> IterationStrategy {
        *self.strategy.get_or_init(|| {
            let strategy = self.select_strategy();
            tracing::debug!(
                "Union of {} regions iterates by {:?}",
                self.children.len(),
                strategy
            );
            strategy
        })
    }

    /// Iterate every block inside the union, each exactly once
    pub fn blocks(&self) -> Result<BlockIter<'_>> {
        if !self.is_block_bounded() {
            return Err(Error::NotBlockBounded(self.bounds()));
        }

        if !self.is_static() {
            // One match state for the whole iteration
            let frozen = self.to_static();
            let blocks: Vec<IVec3> = frozen.scan_bounds()?.collect();
            return Ok(Box::new(blocks.into_iter()));
        }

        match self.strategy() {
            IterationStrategy::FullScan => {
                let blocks = self.bounds().blocks()?;
                Ok(Box::new(
                    blocks.filter(move |block| self.contains_block(*block)),
                ))
            }
            IterationStrategy::ChildScan => self.child_scan(),
            IterationStrategy::FilteredChildScan { capacity } => {
                let mut visited =
                    HashSet::with_capacity(capacity.min(MAX_VISITED_PREALLOC) as usize);
                Ok(Box::new(
                    self.child_scan()?.filter(move |block| visited.insert(*block)),
                ))
            }
        }
    }

    fn child_scan(&self) -> Result<BlockIter<'_>> {
        let iters = self
            .children
            .iter()
            .map(Region::blocks)
            .collect::<Result<Vec<_>>>()?;
        Ok(Box::new(iters.into_iter().flatten()))
    }

    fn select_strategy(&self) -> IterationStrategy {
        // Dynamic children cannot be analysed ahead of time
        if !self.is_static() {
            return IterationStrategy::FullScan;
        }

        let bounds: Vec<Bounds> = self.children.iter().map(Region::bounds).collect();

        let mut disjoint = bounds.len() < DISJOINT_CHECK_LIMIT;
        let mut child_volume: u64 = 0;
        for (i, a) in bounds.iter().enumerate() {
            child_volume = child_volume.saturating_add(a.block_volume().unwrap_or(u64::MAX));
            if disjoint {
                disjoint = bounds[i + 1..].iter().all(|b| Bounds::disjoint(a, b));
            }
        }

        if disjoint {
            return IterationStrategy::ChildScan;
        }

        let union_volume = self.bounds().block_volume().unwrap_or(u64::MAX);
        if union_volume < child_volume.saturating_mul(DENSITY_FACTOR) {
            return IterationStrategy::FullScan;
        }

        IterationStrategy::FilteredChildScan {
            capacity: child_volume,
        }
    }
}
