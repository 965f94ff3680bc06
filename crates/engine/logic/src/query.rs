//! Query context handed to rule filters

use glam::{DVec3, IVec3};
use region::block_center;
use serde::{Deserialize, Serialize};

/// Block or item material identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Material(pub u16);

impl Material {
    pub const AIR: Material = Material(0);
    pub const PAINTING: Material = Material(321);
    pub const ITEM_FRAME: Material = Material(389);
    pub const LEAD: Material = Material(420);

    pub fn is_air(self) -> bool {
        self == Material::AIR
    }
}

/// Snapshot of a block: where it is and what it is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockState {
    pub position: IVec3,
    pub material: Material,
}

impl BlockState {
    pub fn new(position: IVec3, material: Material) -> Self {
        BlockState { position, material }
    }

    pub fn air(position: IVec3) -> Self {
        BlockState::new(position, Material::AIR)
    }

    /// World-space centre of the block
    pub fn center(&self) -> DVec3 {
        block_center(self.position)
    }
}

/// Identifier of a player in the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u64);

/// Snapshot of the acting player at the time of the event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub id: PlayerId,
    pub location: DVec3,
}

/// The kind of gameplay event a query was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CoarseMove,
    FlagPickup,
    BlockTransform,
    BlockPhysics,
    BlockDamage,
    Interact,
    HangingPlace,
    HangingBreak,
    EntityDamage,
    InteractEntity,
}

/// Tri-state answer of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryResponse {
    Allow,
    Deny,
    Abstain,
}

impl QueryResponse {
    /// Check if the response decides the event either way
    pub fn is_decisive(self) -> bool {
        !matches!(self, QueryResponse::Abstain)
    }
}

/// Per-event context carrying what a filter may inspect.
///
/// Built fresh for each dispatch and never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    event: EventKind,
    player: Option<PlayerState>,
    block: Option<BlockState>,
    material: Option<Material>,
}

impl Query {
    pub fn new(event: EventKind) -> Self {
        Query {
            event,
            player: None,
            block: None,
            material: None,
        }
    }

    /// Attach the acting player (builder pattern)
    pub fn with_player(mut self, player: Option<PlayerState>) -> Self {
        self.player = player;
        self
    }

    /// Attach the block the event concerns (builder pattern)
    pub fn with_block(mut self, block: BlockState) -> Self {
        self.block = Some(block);
        self
    }

    /// Override the material reported by the query (builder pattern)
    pub fn with_material(mut self, material: Option<Material>) -> Self {
        self.material = material;
        self
    }

    pub fn event(&self) -> EventKind {
        self.event
    }

    pub fn player(&self) -> Option<&PlayerState> {
        self.player.as_ref()
    }

    pub fn block(&self) -> Option<&BlockState> {
        self.block.as_ref()
    }

    /// The overridden material if any, otherwise the block's own material
    pub fn material(&self) -> Option<Material> {
        self.material.or(self.block.map(|b| b.material))
    }
}

/// Opaque predicate evaluated against a query.
///
/// What a filter computes is up to its implementor; the dispatcher only
/// decides when it is asked and how its answer is applied.
pub trait Filter {
    fn query(&self, query: &Query) -> QueryResponse;
}

impl<F> Filter for F
where
    F: Fn(&Query) -> QueryResponse,
{
    fn query(&self, query: &Query) -> QueryResponse {
        self(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_material_override() {
        let block = BlockState::new(IVec3::ONE, Material(1));
        let query = Query::new(EventKind::HangingPlace).with_block(block);
        assert_eq!(query.material(), Some(Material(1)));

        let query = query.with_material(Some(Material::ITEM_FRAME));
        assert_eq!(query.material(), Some(Material::ITEM_FRAME));
        assert_eq!(query.block().map(|b| b.position), Some(IVec3::ONE));
    }

    #[test]
    fn test_closure_filter() {
        let filter = |q: &Query| {
            if q.player().is_some() {
                QueryResponse::Allow
            } else {
                QueryResponse::Deny
            }
        };
        let query = Query::new(EventKind::BlockPhysics);
        assert_eq!(filter.query(&query), QueryResponse::Deny);
        assert!(QueryResponse::Deny.is_decisive());
        assert!(!QueryResponse::Abstain.is_decisive());
    }
}
