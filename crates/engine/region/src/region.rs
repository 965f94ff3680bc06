//! The region predicate and its variants

use crate::{Bounds, Cuboid, Cylinder, Error, Result, Sphere, Union};
use glam::{DVec3, IVec2, IVec3};
use std::fmt;
use std::rc::Rc;

/// Boxed iterator over block positions
pub type BlockIter<'a> = Box<dyn Iterator<Item = IVec3> + 'a>;

/// A shape whose geometry depends on mutable match state.
///
/// Implementors hold their own handle to whatever state they read. Every call
/// to [`DynamicShape::resolve`] reflects the state at that moment; use
/// [`Region::to_static`] to freeze it.
pub trait DynamicShape: fmt::Debug {
    /// Resolve the shape against the current match state
    fn resolve(&self) -> Region;
}

/// Geometric predicate over 3D points and blocks.
///
/// A block belongs to a region when the block centre does. For every
/// block-bounded region, [`Region::blocks`] yields exactly the blocks inside
/// [`Region::bounds`] that satisfy [`Region::contains_block`], each once.
#[derive(Debug, Clone)]
pub enum Region {
    /// Contains nothing
    Empty,

    /// Contains everything; not block-bounded
    Everywhere,

    Cuboid(Cuboid),

    Sphere(Sphere),

    Cylinder(Cylinder),

    /// Any point contained by at least one child
    Union(Union),

    /// A dynamic shape frozen against one match state
    Static(Rc<Region>),

    /// A shape resolved from live match state on every query
    Dynamic(Rc<dyn DynamicShape>),
}

impl Region {
    /// Cuboid covering the inclusive block range `min..=max`
    pub fn cuboid_blocks(min: IVec3, max: IVec3) -> Self {
        Region::Cuboid(Cuboid::from_blocks(min, max))
    }

    /// Cuboid covering exactly one block
    pub fn block(position: IVec3) -> Self {
        Region::Cuboid(Cuboid::block(position))
    }

    pub fn dynamic(shape: impl DynamicShape + 'static) -> Self {
        Region::Dynamic(Rc::new(shape))
    }

    /// Combine regions, collapsing the trivial cases.
    ///
    /// No children yields [`Region::Empty`] and a single child is returned as is.
    pub fn union_of(mut children: Vec<Region>) -> Self {
        match children.len() {
            0 => Region::Empty,
            1 => children.swap_remove(0),
            _ => Region::Union(Union::new(children)),
        }
    }

    /// Check if a point lies inside the region
    pub fn contains(&self, point: DVec3) -> bool {
        match self {
            Region::Empty => false,
            Region::Everywhere => true,
            Region::Cuboid(c) => c.contains(point),
            Region::Sphere(s) => s.contains(point),
            Region::Cylinder(c) => c.contains(point),
            Region::Union(u) => u.contains(point),
            Region::Static(inner) => inner.contains(point),
            Region::Dynamic(shape) => shape.resolve().contains(point),
        }
    }

    /// Check if the centre of a block lies inside the region
    pub fn contains_block(&self, block: IVec3) -> bool {
        self.contains(block_center(block))
    }

    /// Check if moving from `from` to `to` crosses into the region.
    ///
    /// An unknown origin counts as outside.
    pub fn enters(&self, from: Option<DVec3>, to: DVec3) -> bool {
        from.is_none_or(|from| !self.contains(from)) && self.contains(to)
    }

    /// Check if moving from `from` to `to` crosses out of the region.
    ///
    /// An unknown origin counts as inside.
    pub fn exits(&self, from: Option<DVec3>, to: DVec3) -> bool {
        from.is_none_or(|from| self.contains(from)) && !self.contains(to)
    }

    /// Check if the region is finite on every axis
    pub fn is_block_bounded(&self) -> bool {
        match self {
            Region::Empty => true,
            Region::Everywhere => false,
            Region::Union(u) => u.is_block_bounded(),
            Region::Static(inner) => inner.is_block_bounded(),
            Region::Dynamic(shape) => shape.resolve().is_block_bounded(),
            _ => self.bounds().is_block_bounded(),
        }
    }

    /// Check if the geometry is independent of match state
    pub fn is_static(&self) -> bool {
        match self {
            Region::Union(u) => u.is_static(),
            Region::Dynamic(_) => false,
            _ => true,
        }
    }

    /// Check if the region contains no points
    pub fn is_empty(&self) -> bool {
        match self {
            Region::Empty => true,
            Region::Everywhere => false,
            Region::Union(u) => u.is_empty(),
            Region::Static(inner) => inner.is_empty(),
            Region::Dynamic(shape) => shape.resolve().is_empty(),
            _ => self.bounds().is_empty(),
        }
    }

    /// Smallest axis-aligned box enclosing the region
    pub fn bounds(&self) -> Bounds {
        match self {
            Region::Empty => Bounds::empty(),
            Region::Everywhere => Bounds::unbounded(),
            Region::Cuboid(c) => c.bounds(),
            Region::Sphere(s) => s.bounds(),
            Region::Cylinder(c) => c.bounds(),
            Region::Union(u) => u.bounds(),
            Region::Static(inner) => inner.bounds(),
            Region::Dynamic(shape) => shape.resolve().bounds(),
        }
    }

    /// Resolve every dynamic part of the region against the current match state
    pub fn to_static(&self) -> Region {
        match self {
            Region::Dynamic(shape) => Region::Static(Rc::new(shape.resolve().to_static())),
            Region::Union(u) => u.to_static(),
            other => other.clone(),
        }
    }

    /// Iterate every block inside the region, each exactly once
    pub fn blocks(&self) -> Result<BlockIter<'_>> {
        if !self.is_block_bounded() {
            return Err(Error::NotBlockBounded(self.bounds()));
        }

        match self {
            Region::Empty => Ok(Box::new(std::iter::empty())),
            Region::Cuboid(c) => Ok(Box::new(c.bounds().blocks()?)),
            Region::Union(u) => u.blocks(),
            Region::Static(inner) => inner.blocks(),
            Region::Dynamic(shape) => {
                // The resolved shape is owned here, so freeze its blocks
                let resolved = shape.resolve().to_static();
                let blocks: Vec<IVec3> = resolved.blocks()?.collect();
                Ok(Box::new(blocks.into_iter()))
            }
            _ => self.scan_bounds(),
        }
    }

    /// Number of blocks covered by the region's bounds
    pub fn block_volume(&self) -> Result<u64> {
        self.bounds().block_volume()
    }

    /// Chunk columns touched by the region's bounds
    pub fn chunk_positions(&self) -> Result<Vec<IVec2>> {
        self.bounds().chunk_positions()
    }

    /// Iterate the blocks of the bounds, keeping those inside the region
    pub(crate) fn scan_bounds(&self) -> Result<BlockIter<'_>> {
        let blocks = self.bounds().blocks()?;
        Ok(Box::new(
            blocks.filter(move |block| self.contains_block(*block)),
        ))
    }
}

impl From<Cuboid> for Region {
    fn from(c: Cuboid) -> Self {
        Region::Cuboid(c)
    }
}

impl From<Sphere> for Region {
    fn from(s: Sphere) -> Self {
        Region::Sphere(s)
    }
}

impl From<Cylinder> for Region {
    fn from(c: Cylinder) -> Self {
        Region::Cylinder(c)
    }
}

impl From<Union> for Region {
    fn from(u: Union) -> Self {
        Region::Union(u)
    }
}

/// World-space centre of a block
pub fn block_center(block: IVec3) -> DVec3 {
    block.as_dvec3() + DVec3::splat(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Cuboid that follows a shared offset, like a region tracking a moving objective
    #[derive(Debug)]
    struct Shifting {
        offset: Rc<Cell<i32>>,
    }

    impl DynamicShape for Shifting {
        fn resolve(&self) -> Region {
            let x = self.offset.get();
            Region::cuboid_blocks(IVec3::new(x, 0, 0), IVec3::new(x + 1, 0, 0))
        }
    }

    #[test]
    fn test_union_of_collapses() {
        assert!(matches!(Region::union_of(vec![]), Region::Empty));
        assert!(matches!(
            Region::union_of(vec![Region::block(IVec3::ZERO)]),
            Region::Cuboid(_)
        ));
        assert!(matches!(
            Region::union_of(vec![Region::Empty, Region::Everywhere]),
            Region::Union(_)
        ));
    }

    #[test]
    fn test_enters_and_exits() {
        let region = Region::cuboid_blocks(IVec3::ZERO, IVec3::splat(3));
        let inside = DVec3::splat(1.5);
        let outside = DVec3::splat(10.5);

        assert!(region.enters(Some(outside), inside));
        assert!(!region.enters(Some(inside), inside));
        assert!(region.enters(None, inside));
        assert!(!region.enters(None, outside));

        assert!(region.exits(Some(inside), outside));
        assert!(!region.exits(Some(outside), outside));
        assert!(region.exits(None, outside));
        assert!(!region.exits(None, inside));
    }

    #[test]
    fn test_everywhere_is_not_block_bounded() {
        let everywhere = Region::Everywhere;
        assert!(everywhere.contains(DVec3::new(-1e6, 1e6, 0.0)));
        assert!(!everywhere.is_block_bounded());
        assert!(matches!(everywhere.blocks(), Err(Error::NotBlockBounded(_))));
    }

    #[test]
    fn test_sphere_blocks_match_contains() {
        let sphere = Region::from(Sphere::new(DVec3::splat(0.5), 2.0));
        let blocks: Vec<IVec3> = sphere.blocks().unwrap().collect();
        assert!(!blocks.is_empty());
        assert!(blocks.iter().all(|b| sphere.contains_block(*b)));

        let expected = sphere
            .bounds()
            .blocks()
            .unwrap()
            .filter(|b| sphere.contains_block(*b))
            .count();
        assert_eq!(blocks.len(), expected);
    }

    #[test]
    fn test_dynamic_follows_state_until_frozen() {
        let offset = Rc::new(Cell::new(0));
        let region = Region::dynamic(Shifting {
            offset: offset.clone(),
        });
        assert!(!region.is_static());

        let frozen = region.to_static();
        assert!(frozen.is_static());
        assert!(matches!(frozen, Region::Static(_)));

        offset.set(10);
        assert!(region.contains_block(IVec3::new(10, 0, 0)));
        assert!(!region.contains_block(IVec3::ZERO));

        assert!(frozen.contains_block(IVec3::ZERO));
        assert!(!frozen.contains_block(IVec3::new(10, 0, 0)));
        assert_eq!(frozen.blocks().unwrap().count(), 2);
    }

    #[test]
    fn test_block_at_coordinate_limit() {
        let edge = IVec3::new(i32::MAX, 0, i32::MIN);
        let region = Region::block(edge);
        assert!(region.contains_block(edge));
        assert!(region.is_block_bounded());
        assert_eq!(region.blocks().unwrap().collect::<Vec<_>>(), vec![edge]);
    }

    #[test]
    fn test_empty_region() {
        let empty = Region::Empty;
        assert!(empty.is_empty());
        assert!(empty.is_block_bounded());
        assert_eq!(empty.blocks().unwrap().count(), 0);
        assert!(empty.chunk_positions().unwrap().is_empty());
    }
}
