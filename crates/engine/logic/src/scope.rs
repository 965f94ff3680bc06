//! Rule scopes

use serde::{Deserialize, Serialize};

/// Category of gameplay event a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Player moves into the region
    PlayerEnter,

    /// Player moves out of the region
    PlayerLeave,

    /// Block inside the region is broken
    BlockBreak,

    /// Block is placed inside the region
    BlockPlace,

    /// Block is placed against a block inside the region
    BlockPlaceAgainst,

    /// Block inside the region receives a physics update
    BlockPhysics,

    /// Block inside the region is right-clicked
    Use,

    /// Velocity and kit side effects on entry/exit
    Effect,
}

impl Scope {
    pub const ALL: [Scope; 8] = [
        Scope::PlayerEnter,
        Scope::PlayerLeave,
        Scope::BlockBreak,
        Scope::BlockPlace,
        Scope::BlockPlaceAgainst,
        Scope::BlockPhysics,
        Scope::Use,
        Scope::Effect,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_serialization() {
        let json = serde_json::to_string(&Scope::BlockPlaceAgainst).unwrap();
        assert_eq!(json, "\"block_place_against\"");

        let scope: Scope = serde_json::from_str("\"player_enter\"").unwrap();
        assert_eq!(scope, Scope::PlayerEnter);
    }
}
