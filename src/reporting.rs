use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    board::{Monster, Position, Square},
    judge::Outcome,
    player::PlayerNumber,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoardChangeAction {
    Added,
    Moved,
    Defeated,
}

impl fmt::Display for BoardChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardChangeAction::Added => write!(f, "Added"),
            BoardChangeAction::Moved => write!(f, "Moved"),
            BoardChangeAction::Defeated => write!(f, "Defeated"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardChangeDetail {
    pub square: Square,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardChange {
    pub detail: BoardChangeDetail,
    pub action: BoardChangeAction,
}

impl fmt::Display for BoardChange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "The square {} at {} was {}",
            self.detail.square, self.detail.position, self.action
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlayerChangeAction {
    Eliminated,
    Left,
    Won,
}

impl fmt::Display for PlayerChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerChangeAction::Eliminated => write!(f, "was eliminated"),
            PlayerChangeAction::Left => write!(f, "left the game"),
            PlayerChangeAction::Won => write!(f, "won the game"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerChange {
    pub number: PlayerNumber,
    pub action: PlayerChangeAction,
}

impl fmt::Display for PlayerChange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Player {} {}", self.number, self.action)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub attacker: Monster,
    pub defender: Monster,
    pub outcome: Outcome,
}

impl fmt::Display for BattleReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Player {}'s {} battled player {}'s {}: {}",
            self.attacker.player,
            self.attacker.kind,
            self.defender.player,
            self.defender.kind,
            self.outcome
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Change {
    Board(BoardChange),
    Player(PlayerChange),
    Battle(BattleReport),
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Change::Board(c) => write!(f, "{c}"),
            Change::Player(c) => write!(f, "{c}"),
            Change::Battle(c) => write!(f, "{c}"),
        }
    }
}
