use super::board::Position;
use crate::player::PlayerNumber;
use thiserror::Error;

#[derive(Clone, Error, Debug, PartialEq)]
pub enum GamePlayError {
    #[error("Position {position} is outside the board dimensions")]
    OutSideBoardDimensions { position: Position },

    #[error("Player {number:?} does not exist")]
    NonExistentPlayer { number: PlayerNumber },
    #[error("The game already has a full roster of players")]
    RosterFull,
    #[error("The game has not started yet")]
    GameNotStarted,
    #[error("The game is already over")]
    GameOver,

    #[error("It is not player {number}'s turn")]
    NotYourTurn { number: PlayerNumber },
    #[error("Player {number} has been eliminated")]
    PlayerEliminated { number: PlayerNumber },

    #[error("A monster has already been placed this turn")]
    AlreadyPlaced,
    #[error("Player {number} can only place monsters on their own edge")]
    IllegalPlacement {
        number: PlayerNumber,
        position: Position,
    },
    #[error("Cannot place a monster on an occupied square")]
    OccupiedPlace,

    #[error("No monster to move at {position}")]
    UnoccupiedMove { position: Position },
    #[error("Player must own the monster they move")]
    UnownedMove,
    #[error("A monster cannot move in the round it was placed")]
    MonsterJustPlaced,
    #[error("That monster has already moved this turn")]
    MonsterAlreadyMoved,
    #[error("Can't move a monster to its own square")]
    SelfMove,
    #[error("Cannot battle your own monster at {position}")]
    SelfCapture { position: Position },
    #[error("A monster cannot move from {from} to {to}")]
    IllegalMove { from: Position, to: Position },
    #[error("The path from {from} to {to} is blocked by an enemy monster")]
    BlockedPath { from: Position, to: Position },
}
