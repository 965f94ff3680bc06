//! Gameplay events delivered to the dispatcher
//!
//! Each event carries its own cancellation state. Rules mutate that state;
//! the adaptation layer reads it back after dispatch.

use crate::query::{BlockState, EventKind, Material, PlayerState};
use glam::DVec3;

/// A cancellable gameplay event
pub trait Event {
    fn kind(&self) -> EventKind;

    fn is_cancelled(&self) -> bool;

    fn set_cancelled(&mut self, cancelled: bool);

    /// Cancel the event, attaching a deny message where the event supports one
    fn deny(&mut self, _message: Option<&str>) {
        self.set_cancelled(true);
    }

    /// Access to the item/block use outcomes of a right-click
    fn as_interact_mut(&mut self) -> Option<&mut InteractEvent> {
        None
    }
}

/// Cancellation state shared by most events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cancellation {
    pub cancelled: bool,
    /// Deny message, only kept by events that report it to the player
    pub message: Option<String>,
}

macro_rules! cancellable_event {
    ($event:ty, $kind:expr) => {
        impl Event for $event {
            fn kind(&self) -> EventKind {
                $kind
            }

            fn is_cancelled(&self) -> bool {
                self.status.cancelled
            }

            fn set_cancelled(&mut self, cancelled: bool) {
                self.status.cancelled = cancelled;
            }
        }
    };
    ($event:ty, $kind:expr, with_message) => {
        impl Event for $event {
            fn kind(&self) -> EventKind {
                $kind
            }

            fn is_cancelled(&self) -> bool {
                self.status.cancelled
            }

            fn set_cancelled(&mut self, cancelled: bool) {
                self.status.cancelled = cancelled;
                if !cancelled {
                    self.status.message = None;
                }
            }

            fn deny(&mut self, message: Option<&str>) {
                self.status.cancelled = true;
                self.status.message = message.map(String::from);
            }
        }
    };
}

/// Player moved from one block to another
#[derive(Debug, Clone, PartialEq)]
pub struct CoarseMoveEvent {
    pub from: DVec3,
    pub to: DVec3,
    pub status: Cancellation,
}

impl CoarseMoveEvent {
    pub fn new(from: DVec3, to: DVec3) -> Self {
        CoarseMoveEvent {
            from,
            to,
            status: Cancellation::default(),
        }
    }
}

cancellable_event!(CoarseMoveEvent, EventKind::CoarseMove, with_message);

/// A player picked up a flag; handled as a move with no known origin
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagPickupEvent {
    pub status: Cancellation,
}

cancellable_event!(FlagPickupEvent, EventKind::FlagPickup);

/// What caused a block transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformCause {
    /// A player placed a block against another block
    Place { against: BlockState },

    /// A player emptied a bucket onto a block
    BucketEmpty { clicked: BlockState },

    Explosion,

    Other,
}

impl TransformCause {
    /// The block the new block was placed against, if any
    pub fn against(&self) -> Option<BlockState> {
        match *self {
            TransformCause::Place { against } => Some(against),
            TransformCause::BucketEmpty { clicked } => Some(clicked),
            TransformCause::Explosion | TransformCause::Other => None,
        }
    }
}

/// A block changes from one state to another
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTransformEvent {
    pub old_state: BlockState,
    pub new_state: BlockState,
    pub cause: TransformCause,
    /// Player responsible for the change, if attributed
    pub actor: Option<PlayerState>,
    pub status: Cancellation,
}

impl BlockTransformEvent {
    pub fn new(old_state: BlockState, new_state: BlockState, cause: TransformCause) -> Self {
        BlockTransformEvent {
            old_state,
            new_state,
            cause,
            actor: None,
            status: Cancellation::default(),
        }
    }

    pub fn with_actor(mut self, actor: PlayerState) -> Self {
        self.actor = Some(actor);
        self
    }

    /// A block existed before the change
    pub fn is_break(&self) -> bool {
        !self.old_state.material.is_air()
    }

    /// A block exists after the change
    pub fn is_place(&self) -> bool {
        !self.new_state.material.is_air()
    }
}

cancellable_event!(BlockTransformEvent, EventKind::BlockTransform, with_message);

#[derive(Debug, Clone, PartialEq)]
pub struct BlockPhysicsEvent {
    pub block: BlockState,
    pub status: Cancellation,
}

impl BlockPhysicsEvent {
    pub fn new(block: BlockState) -> Self {
        BlockPhysicsEvent {
            block,
            status: Cancellation::default(),
        }
    }
}

cancellable_event!(BlockPhysicsEvent, EventKind::BlockPhysics);

/// A player started damaging a block, before it breaks
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDamageEvent {
    pub block: BlockState,
    pub status: Cancellation,
}

impl BlockDamageEvent {
    pub fn new(block: BlockState) -> Self {
        BlockDamageEvent {
            block,
            status: Cancellation::default(),
        }
    }
}

cancellable_event!(BlockDamageEvent, EventKind::BlockDamage);

/// Outcome of one half of an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UseResult {
    Allow,
    #[default]
    Default,
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractAction {
    LeftClickAir,
    LeftClickBlock,
    RightClickAir,
    RightClickBlock,
    Physical,
}

/// A player clicked with or without a target block.
///
/// The event counts as cancelled while block use is denied, so item use can
/// go ahead on a cancelled event.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractEvent {
    pub action: InteractAction,
    pub clicked: Option<BlockState>,
    pub use_item: UseResult,
    pub use_block: UseResult,
}

impl InteractEvent {
    pub fn new(action: InteractAction, clicked: Option<BlockState>) -> Self {
        InteractEvent {
            action,
            clicked,
            use_item: UseResult::Default,
            use_block: UseResult::Default,
        }
    }
}

impl Event for InteractEvent {
    fn kind(&self) -> EventKind {
        EventKind::Interact
    }

    fn is_cancelled(&self) -> bool {
        self.use_block == UseResult::Deny
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        let lift = |result: UseResult| match result {
            UseResult::Deny => UseResult::Default,
            other => other,
        };
        if cancelled {
            self.use_item = UseResult::Deny;
            self.use_block = UseResult::Deny;
        } else {
            self.use_item = lift(self.use_item);
            self.use_block = lift(self.use_block);
        }
    }

    fn as_interact_mut(&mut self) -> Option<&mut InteractEvent> {
        Some(self)
    }
}

/// Kind of entity hanging on a block face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HangingKind {
    Painting,
    ItemFrame { item: Option<Material> },
    LeashKnot,
    /// Hanging entity with no item form
    Other,
}

/// A hanging entity and the block it occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HangingEntity {
    pub block: BlockState,
    pub kind: HangingKind,
}

impl HangingEntity {
    pub fn new(block: BlockState, kind: HangingKind) -> Self {
        HangingEntity { block, kind }
    }

    /// Material of the item this entity drops as
    pub fn item_material(&self) -> Option<Material> {
        match self.kind {
            HangingKind::Painting => Some(Material::PAINTING),
            HangingKind::ItemFrame { .. } => Some(Material::ITEM_FRAME),
            HangingKind::LeashKnot => Some(Material::LEAD),
            HangingKind::Other => None,
        }
    }

    /// Item displayed by an item frame, or `None` for anything else
    pub fn framed_item(&self) -> Option<Material> {
        match self.kind {
            HangingKind::ItemFrame { item } => item,
            _ => None,
        }
    }

    pub fn is_item_frame(&self) -> bool {
        matches!(self.kind, HangingKind::ItemFrame { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HangingPlaceEvent {
    pub entity: HangingEntity,
    pub status: Cancellation,
}

impl HangingPlaceEvent {
    pub fn new(entity: HangingEntity) -> Self {
        HangingPlaceEvent {
            entity,
            status: Cancellation::default(),
        }
    }
}

cancellable_event!(HangingPlaceEvent, EventKind::HangingPlace);

/// A hanging entity was broken by another entity
#[derive(Debug, Clone, PartialEq)]
pub struct HangingBreakEvent {
    pub entity: HangingEntity,
    /// Block at the remover's location
    pub remover_block: BlockState,
    pub status: Cancellation,
}

impl HangingBreakEvent {
    pub fn new(entity: HangingEntity, remover_block: BlockState) -> Self {
        HangingBreakEvent {
            entity,
            remover_block,
            status: Cancellation::default(),
        }
    }
}

cancellable_event!(HangingBreakEvent, EventKind::HangingBreak);

/// An entity was damaged by another entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDamageEvent {
    /// The damaged entity, when it is a hanging entity
    pub target: Option<HangingEntity>,
    /// Block at the damager's location
    pub damager_block: BlockState,
    pub status: Cancellation,
}

impl EntityDamageEvent {
    pub fn new(target: Option<HangingEntity>, damager_block: BlockState) -> Self {
        EntityDamageEvent {
            target,
            damager_block,
            status: Cancellation::default(),
        }
    }
}

cancellable_event!(EntityDamageEvent, EventKind::EntityDamage);

/// A player right-clicked an entity
#[derive(Debug, Clone, PartialEq)]
pub struct InteractEntityEvent {
    /// The clicked entity, when it is a hanging entity
    pub target: Option<HangingEntity>,
    pub status: Cancellation,
}

impl InteractEntityEvent {
    pub fn new(target: Option<HangingEntity>) -> Self {
        InteractEntityEvent {
            target,
            status: Cancellation::default(),
        }
    }
}

cancellable_event!(InteractEntityEvent, EventKind::InteractEntity);

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;

    #[test]
    fn test_deny_keeps_message_only_where_supported() {
        let mut moved = CoarseMoveEvent::new(DVec3::ZERO, DVec3::ONE);
        moved.deny(Some("No entry"));
        assert!(moved.is_cancelled());
        assert_eq!(moved.status.message.as_deref(), Some("No entry"));

        moved.set_cancelled(false);
        assert!(!moved.is_cancelled());
        assert_eq!(moved.status.message, None);

        let mut physics = BlockPhysicsEvent::new(BlockState::air(IVec3::ZERO));
        physics.deny(Some("ignored"));
        assert!(physics.is_cancelled());
        assert_eq!(physics.status.message, None);
    }

    #[test]
    fn test_interact_cancellation_follows_block_use() {
        let mut event = InteractEvent::new(InteractAction::RightClickBlock, None);
        assert!(!event.is_cancelled());

        event.set_cancelled(true);
        assert_eq!(event.use_item, UseResult::Deny);
        assert!(event.is_cancelled());

        event.set_cancelled(false);
        assert_eq!(event.use_item, UseResult::Default);
        assert_eq!(event.use_block, UseResult::Default);

        event.use_block = UseResult::Deny;
        event.use_item = UseResult::Allow;
        assert!(event.is_cancelled());
    }

    #[test]
    fn test_transform_break_and_place() {
        let pos = IVec3::new(1, 2, 3);
        let stone = BlockState::new(pos, Material(1));
        let broken = BlockTransformEvent::new(stone, BlockState::air(pos), TransformCause::Other);
        assert!(broken.is_break());
        assert!(!broken.is_place());

        let against = BlockState::new(pos - IVec3::Y, Material(2));
        let placed = BlockTransformEvent::new(
            BlockState::air(pos),
            stone,
            TransformCause::Place { against },
        );
        assert!(placed.is_place());
        assert_eq!(placed.cause.against(), Some(against));
    }

    #[test]
    fn test_hanging_materials() {
        let block = BlockState::air(IVec3::ZERO);
        let frame = HangingEntity::new(
            block,
            HangingKind::ItemFrame {
                item: Some(Material(7)),
            },
        );
        assert_eq!(frame.item_material(), Some(Material::ITEM_FRAME));
        assert_eq!(frame.framed_item(), Some(Material(7)));
        assert!(frame.is_item_frame());
        assert_eq!(
            HangingEntity::new(block, HangingKind::Other).item_material(),
            None
        );
    }
}
