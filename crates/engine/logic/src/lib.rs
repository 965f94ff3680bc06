//! Logic crate - region rules for voxel matches
//!
//! This crate decides which players, blocks and entities may act on which
//! regions of the world, and applies region-bound side effects (velocity,
//! kits) as players move.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Rule Dispatcher                       │
//! ├─────────────────────────────────────────────────────────┤
//! │  Events                                                  │
//! │  ├── Moves, flag pickups (enter / leave / effects)       │
//! │  ├── Block transform, physics, damage                    │
//! │  └── Use, hanging place / break, item frames             │
//! ├─────────────────────────────────────────────────────────┤
//! │  Rule Set                                                │
//! │  ├── Declaration order across all scopes                 │
//! │  └── Per-scope views                                     │
//! ├─────────────────────────────────────────────────────────┤
//! │  Region Rules                                            │
//! │  ├── Region + scope + filter                             │
//! │  └── Message, velocity, kit                              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use logic::{
//!     BlockPhysicsEvent, BlockState, Event, Material, Query, QueryResponse,
//!     RegionRule, RuleDispatcher, RuleSet, Scope,
//! };
//! use region::Region;
//! use glam::IVec3;
//!
//! // Freeze all block updates inside a small box
//! let rule = RegionRule::new(
//!     Scope::BlockPhysics,
//!     Region::cuboid_blocks(IVec3::ZERO, IVec3::splat(4)),
//! )
//! .with_filter(|_: &Query| QueryResponse::Deny);
//!
//! let dispatcher = RuleDispatcher::new(RuleSet::new(vec![rule]), true);
//!
//! let mut event = BlockPhysicsEvent::new(BlockState::new(IVec3::ONE, Material(12)));
//! dispatcher.check_block_physics(&mut event);
//! assert!(event.is_cancelled());
//! ```

mod config;
mod dispatcher;
mod error;
mod event;
mod player;
mod query;
mod rule;
mod rule_set;
mod scope;

pub use config::{DispatchConfig, ProtoVersion};
pub use dispatcher::RuleDispatcher;
pub use error::{Error, Result};
pub use event::{
    BlockDamageEvent, BlockPhysicsEvent, BlockTransformEvent, Cancellation, CoarseMoveEvent,
    EntityDamageEvent, Event, FlagPickupEvent, HangingBreakEvent, HangingEntity, HangingKind,
    HangingPlaceEvent, InteractAction, InteractEntityEvent, InteractEvent, TransformCause,
    UseResult,
};
pub use player::{KitId, MatchPlayer};
pub use query::{
    BlockState, EventKind, Filter, Material, PlayerId, PlayerState, Query, QueryResponse,
};
pub use rule::RegionRule;
pub use rule_set::RuleSet;
pub use scope::Scope;

// Re-export the geometry crate for convenience
pub use region;
