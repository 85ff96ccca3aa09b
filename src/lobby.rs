use crate::board::{MonsterKind, Position};
use crate::error::GamePlayError;
use crate::game::{Game, MAX_PLAYERS};
use crate::messages::{GameMessage, GameStateMessage, LobbyPlayerMessage, PlayerMessage};
use crate::moves::Move;
use crate::player::PlayerNumber;
use crate::reporting::Change;

/// Seats incoming connections, starts the game when the fourth player
/// arrives, and fans every operation's result out as addressed messages.
/// The transport owns the sockets and any locking; the lobby is the single
/// entry point to the session underneath it.
pub struct Lobby {
    pub game: Game,
    connected: Vec<PlayerNumber>,
}

impl Lobby {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            game: Game::new(seed),
            connected: vec![],
        }
    }

    fn roster(&self) -> Vec<LobbyPlayerMessage> {
        self.game
            .players
            .iter()
            .map(|p| LobbyPlayerMessage {
                name: p.name.clone(),
                number: p.number,
                color: p.color,
            })
            .collect()
    }

    fn state_message(&self, changes: Vec<Change>) -> GameStateMessage {
        GameStateMessage {
            players: self.game.players.iter().map(Into::into).collect(),
            board: self.game.board.clone(),
            round: self.game.round,
            turn_order: self.game.turn_order.clone(),
            turn_index: self.game.turn_index,
            turn_count: self.game.turn_count,
            changes,
        }
    }

    fn broadcast(&self, message: GameMessage) -> Vec<(PlayerNumber, GameMessage)> {
        self.connected
            .iter()
            .map(|&number| (number, message.clone()))
            .collect()
    }

    /// Seats a new connection. The fourth join starts the game.
    pub fn join(
        &mut self,
        name: String,
    ) -> Result<(PlayerNumber, Vec<(PlayerNumber, GameMessage)>), GamePlayError> {
        let number = self.game.add_player(name)?;
        self.connected.push(number);
        tracing::info!(player = number, "player joined the lobby");

        let mut messages = vec![(number, GameMessage::PlayerAssigned(number))];
        messages.extend(self.broadcast(GameMessage::LobbyUpdate(self.roster())));

        if self.game.players.len() == MAX_PLAYERS {
            self.game.start();
            messages.extend(self.broadcast(GameMessage::StartedGame(self.state_message(vec![]))));
        }
        Ok((number, messages))
    }

    /// Runs one move through the session. Success becomes a broadcast
    /// update (or the game-end report); failure becomes an error addressed
    /// to the offender, with the authoritative state untouched.
    pub fn play(&mut self, game_move: Move) -> Vec<(PlayerNumber, GameMessage)> {
        let player = game_move.player();
        match self.game.play_turn(game_move) {
            Ok(changes) => {
                let state = self.state_message(changes);
                if self.game.is_over() {
                    self.broadcast(GameMessage::GameEnd(state, self.game.winner))
                } else {
                    self.broadcast(GameMessage::GameUpdate(state))
                }
            }
            Err(err) => vec![(player, GameMessage::GameError(player, err.to_string()))],
        }
    }

    pub fn place_monster(
        &mut self,
        player: PlayerNumber,
        kind: MonsterKind,
        position: Position,
    ) -> Vec<(PlayerNumber, GameMessage)> {
        self.play(Move::Place {
            player,
            kind,
            position,
        })
    }

    pub fn move_monster(
        &mut self,
        player: PlayerNumber,
        from: Position,
        to: Position,
    ) -> Vec<(PlayerNumber, GameMessage)> {
        self.play(Move::Move { player, from, to })
    }

    pub fn end_turn(&mut self, player: PlayerNumber) -> Vec<(PlayerNumber, GameMessage)> {
        self.play(Move::EndTurn { player })
    }

    /// A leaver frees their seat before kickoff; afterwards they forfeit
    /// and the game may end on the spot.
    pub fn disconnect(&mut self, player: PlayerNumber) -> Vec<(PlayerNumber, GameMessage)> {
        self.connected.retain(|&number| number != player);

        if self.game.started_at.is_none() {
            self.game.players.retain(|p| p.number != player);
            tracing::info!(player, "player left the lobby");
            let mut messages = self.broadcast(GameMessage::PlayerLeft(player));
            messages.extend(self.broadcast(GameMessage::LobbyUpdate(self.roster())));
            return messages;
        }

        match self.game.forfeit(player) {
            Ok(changes) => {
                let mut messages = self.broadcast(GameMessage::PlayerLeft(player));
                let state = self.state_message(changes);
                if self.game.is_over() {
                    messages.extend(self.broadcast(GameMessage::GameEnd(state, self.game.winner)));
                } else {
                    messages.extend(self.broadcast(GameMessage::GameUpdate(state)));
                }
                messages
            }
            Err(_) => vec![],
        }
    }

    /// Routes a decoded wire message from a seated player.
    pub fn handle(
        &mut self,
        player: PlayerNumber,
        message: PlayerMessage,
    ) -> Vec<(PlayerNumber, GameMessage)> {
        match message {
            PlayerMessage::Place(kind, position) => self.place_monster(player, kind, position),
            PlayerMessage::Move(from, to) => self.move_monster(player, from, to),
            PlayerMessage::EndTurn => self.end_turn(player),
            PlayerMessage::Disconnect => self.disconnect(player),
        }
    }
}
