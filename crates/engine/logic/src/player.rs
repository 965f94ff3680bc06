//! Player handle consumed by the dispatcher

use crate::query::{Material, PlayerId, PlayerState};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Reference to a kit defined by the map; applying it is up to the player implementation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KitId(pub String);

impl KitId {
    pub fn new(id: impl Into<String>) -> Self {
        KitId(id.into())
    }
}

/// A player taking part in (or observing) the match.
///
/// Implemented by the event adaptation layer on top of the real player
/// object. The dispatcher only reads state and requests side effects.
pub trait MatchPlayer {
    fn id(&self) -> PlayerId;

    fn location(&self) -> DVec3;

    /// Whether the player may currently affect the world (false for observers)
    fn can_interact(&self) -> bool;

    /// Item held in the main hand, if any
    fn item_in_hand(&self) -> Option<Material>;

    fn set_velocity(&mut self, velocity: DVec3);

    fn apply_kit(&mut self, kit: &KitId, force: bool);

    /// Take back the items of a lent kit
    fn remove_kit(&mut self, kit: &KitId);

    fn send_warning(&mut self, message: &str);

    /// Snapshot used in queries
    fn state(&self) -> PlayerState {
        PlayerState {
            id: self.id(),
            location: self.location(),
        }
    }
}
