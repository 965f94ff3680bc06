//! Union block iteration validation tests
//!
//! Every strategy must yield the same block set as a brute-force scan of the
//! union's bounds, with no position repeated.

use glam::{DVec3, IVec3};
use region::{IterationStrategy, Region, Sphere, Union};
use std::collections::HashSet;

/// Deterministic LCG so fixtures are reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, range: i32) -> i32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) % range as u64) as i32
    }
}

/// Collect blocks, failing the test on any duplicate
fn collect_unique(union: &Union) -> HashSet<IVec3> {
    let mut seen = HashSet::new();
    for block in union.blocks().expect("union should be block-bounded") {
        assert!(seen.insert(block), "block {:?} yielded twice", block);
    }
    seen
}

/// Reference implementation: scan all of the bounds and filter by contains
fn brute_force(union: &Union) -> HashSet<IVec3> {
    union
        .bounds()
        .blocks()
        .unwrap()
        .filter(|b| union.contains_block(*b))
        .collect()
}

/// Union of the children's own block sets
fn child_blocks(children: &[Region]) -> HashSet<IVec3> {
    children
        .iter()
        .flat_map(|c| c.blocks().unwrap().collect::<Vec<_>>())
        .collect()
}

#[test]
fn test_two_disjoint_unit_cubes() {
    let union = Union::new(vec![
        Region::from(region::Cuboid::new(DVec3::ZERO, DVec3::ONE)),
        Region::from(region::Cuboid::new(DVec3::splat(5.0), DVec3::splat(6.0))),
    ]);

    assert_eq!(union.strategy(), IterationStrategy::ChildScan);
    let blocks = collect_unique(&union);
    assert_eq!(blocks.len(), 2);
    assert!(blocks.contains(&IVec3::ZERO));
    assert!(blocks.contains(&IVec3::splat(5)));
}

#[test]
fn test_fully_overlapping_cubes() {
    let cube = Region::cuboid_blocks(IVec3::ZERO, IVec3::splat(9));
    let union = Union::new(vec![cube.clone(), cube]);

    assert!(matches!(
        union.strategy(),
        IterationStrategy::FullScan | IterationStrategy::FilteredChildScan { .. }
    ));
    assert_eq!(collect_unique(&union).len(), 1000);
}

#[test]
fn test_few_disjoint_children_exact() {
    let children: Vec<Region> = (0..20)
        .map(|i| Region::cuboid_blocks(IVec3::new(i * 4, 0, 0), IVec3::new(i * 4 + 1, 1, 0)))
        .collect();
    let expected = child_blocks(&children);
    let union = Union::new(children);

    assert_eq!(union.strategy(), IterationStrategy::ChildScan);
    let blocks = collect_unique(&union);
    assert_eq!(blocks, expected);
    assert_eq!(blocks.len(), 20 * 4);
}

#[test]
fn test_many_disjoint_children_skip_check_but_stay_exact() {
    // Scattered far apart so the bounds are sparse
    let children: Vec<Region> = (0..150)
        .map(|i| Region::block(IVec3::new((i % 10) * 7, (i / 10) * 7, i * 3)))
        .collect();
    let expected = child_blocks(&children);
    let union = Union::new(children);

    // At or above the limit, disjointness is assumed false
    assert!(matches!(
        union.strategy(),
        IterationStrategy::FilteredChildScan { capacity: 150 }
    ));
    let blocks = collect_unique(&union);
    assert_eq!(blocks.len(), 150);
    assert_eq!(blocks, expected);
}

#[test]
fn test_many_dense_children_use_full_scan() {
    // A 10x10x1 slab of single blocks: bounds volume equals child volume
    let children: Vec<Region> = (0..100)
        .map(|i| Region::block(IVec3::new(i % 10, i / 10, 0)))
        .collect();
    let union = Union::new(children);

    assert_eq!(union.strategy(), IterationStrategy::FullScan);
    assert_eq!(collect_unique(&union).len(), 100);
}

#[test]
fn test_random_overlapping_cuboids_match_brute_force() {
    let mut rng = Lcg(0x5eed);
    for round in 0..20 {
        let count = 2 + rng.next(12);
        let spread = if round % 2 == 0 { 8 } else { 60 };
        let children: Vec<Region> = (0..count)
            .map(|_| {
                let min = IVec3::new(rng.next(spread), rng.next(spread), rng.next(spread));
                let size = IVec3::new(rng.next(5), rng.next(5), rng.next(5));
                Region::cuboid_blocks(min, min + size)
            })
            .collect();

        let union = Union::new(children);
        assert_eq!(collect_unique(&union), brute_force(&union), "round {}", round);
    }
}

#[test]
fn test_mixed_shapes_match_brute_force() {
    let union = Union::new(vec![
        Region::from(Sphere::new(DVec3::splat(4.0), 3.0)),
        Region::cuboid_blocks(IVec3::new(2, 2, 2), IVec3::new(9, 3, 3)),
        Region::from(region::Cylinder::new(DVec3::new(30.0, 0.0, 30.0), 2.0, 4.0)),
    ]);

    let blocks = collect_unique(&union);
    assert_eq!(blocks, brute_force(&union));
    assert!(blocks.iter().all(|b| union.contains_block(*b)));
}

#[test]
fn test_nested_unions() {
    let inner = Region::union_of(vec![
        Region::cuboid_blocks(IVec3::ZERO, IVec3::splat(2)),
        Region::cuboid_blocks(IVec3::ONE, IVec3::splat(3)),
    ]);
    let union = Union::new(vec![inner, Region::cuboid_blocks(IVec3::splat(2), IVec3::splat(4))]);

    assert_eq!(collect_unique(&union), brute_force(&union));
}
