use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    board::{Board, MonsterKind, Position},
    player::{Player, PlayerNumber},
    reporting::Change,
};

/// Actions a seated player can send in. Connecting at all is the join, so
/// there is no join message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlayerMessage {
    Place(MonsterKind, Position),
    Move(Position, Position),
    EndTurn,
    Disconnect,
}

impl fmt::Display for PlayerMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerMessage::Place(kind, position) => write!(f, "Place a {kind} at {position}"),
            PlayerMessage::Move(from, to) => write!(f, "Move the monster at {from} to {to}"),
            PlayerMessage::EndTurn => write!(f, "End the turn"),
            PlayerMessage::Disconnect => write!(f, "Leave the game"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobbyPlayerMessage {
    pub name: String,
    pub number: PlayerNumber,
    pub color: (u8, u8, u8),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamePlayerMessage {
    pub name: String,
    pub number: PlayerNumber,
    pub monsters: u32,
    pub lost_monsters: u32,
    pub wins: u32,
    pub losses: u32,
    pub eliminated: bool,
    pub color: (u8, u8, u8),
}

impl From<&Player> for GamePlayerMessage {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            number: player.number,
            monsters: player.monsters,
            lost_monsters: player.lost_monsters,
            wins: player.wins,
            losses: player.losses,
            eliminated: player.eliminated,
            color: player.color,
        }
    }
}

/// The full immutable snapshot broadcast after every successful operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateMessage {
    pub players: Vec<GamePlayerMessage>,
    pub board: Board,
    pub round: u32,
    pub turn_order: Vec<PlayerNumber>,
    pub turn_index: usize,
    pub turn_count: u32,
    pub changes: Vec<Change>,
}

impl fmt::Display for GameStateMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "• Round {}, turn order {:?}, next up player {:?}\n• Board:\n{}\n• Just changed:\n{}",
            self.round,
            self.turn_order,
            self.turn_order.get(self.turn_index),
            self.board,
            self.changes
                .iter()
                .map(|c| format!("• • {c}\n"))
                .collect::<String>()
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameMessage {
    PlayerAssigned(PlayerNumber),
    LobbyUpdate(Vec<LobbyPlayerMessage>),
    StartedGame(GameStateMessage),
    GameUpdate(GameStateMessage),
    GameEnd(GameStateMessage, Option<PlayerNumber>),
    PlayerLeft(PlayerNumber),
    GameError(PlayerNumber, String),
}

impl fmt::Display for GameMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameMessage::PlayerAssigned(number) => write!(f, "You are player {number}"),
            GameMessage::LobbyUpdate(players) => write!(
                f,
                "Waiting with players {}",
                players
                    .iter()
                    .map(|p| p.name.clone())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            GameMessage::StartedGame(state) => write!(f, "Started game:\n{state}"),
            GameMessage::GameUpdate(state) => write!(f, "Update to game:\n{state}"),
            GameMessage::GameEnd(state, Some(winner)) => {
                write!(f, "Conclusion of game, winner was {winner}:\n{state}")
            }
            GameMessage::GameEnd(state, None) => {
                write!(f, "Conclusion of game, nobody survived:\n{state}")
            }
            GameMessage::PlayerLeft(number) => write!(f, "Player {number} left the game"),
            GameMessage::GameError(_, msg) => write!(f, "Error in game: {msg}"),
        }
    }
}
