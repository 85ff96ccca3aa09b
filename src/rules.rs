use serde::{Deserialize, Serialize};

/// What happens when a placement targets an occupied square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlacementRule {
    /// The new monster battles the occupant immediately.
    Battle,
    /// Placements are only legal on empty squares.
    EmptyOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRules {
    pub placement: PlacementRule,
    /// Lost monsters at which a player is eliminated.
    pub elimination_threshold: u32,
    /// Maximum length of a diagonal move. Straight moves are unbounded.
    pub diagonal_range: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            placement: PlacementRule::Battle,
            elimination_threshold: 10,
            diagonal_range: 2,
        }
    }
}
