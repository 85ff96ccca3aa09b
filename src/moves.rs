use crate::board::{MonsterKind, Position};
use crate::player::PlayerNumber;

#[derive(Debug, Clone, PartialEq)]
pub enum Move {
    Place {
        player: PlayerNumber,
        kind: MonsterKind,
        position: Position,
    },
    Move {
        player: PlayerNumber,
        from: Position,
        to: Position,
    },
    EndTurn {
        player: PlayerNumber,
    },
}

impl Move {
    pub fn player(&self) -> PlayerNumber {
        match self {
            Move::Place { player, .. } | Move::Move { player, .. } | Move::EndTurn { player } => {
                *player
            }
        }
    }
}
