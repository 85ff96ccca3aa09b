use std::collections::HashSet;

use oorandom::Rand32;

use crate::board::{Board, Monster, MonsterId, MonsterKind, Position, Square};
use crate::error::GamePlayError;
use crate::judge::{Judge, Outcome};
use crate::moves::Move;
use crate::player::{Player, PlayerNumber};
use crate::reporting::{
    BattleReport, BoardChange, BoardChangeAction, Change, PlayerChange, PlayerChangeAction,
};
use crate::rules::{GameRules, PlacementRule};

pub const MAX_PLAYERS: usize = 4;

pub const GAME_COLORS: [(u8, u8, u8); 4] = [
    (80_u8, 167_u8, 232_u8),  // blue
    (230_u8, 63_u8, 56_u8),   // red
    (104_u8, 156_u8, 60_u8),  // green
    (246_u8, 174_u8, 45_u8),  // yellow
];

fn now() -> u64 {
    instant::SystemTime::now()
        .duration_since(instant::SystemTime::UNIX_EPOCH)
        .expect("Please don't play Monster Mayhem before 1970")
        .as_secs()
}

fn shuffle(rng: &mut Rand32, numbers: &mut [PlayerNumber]) {
    for i in (1..numbers.len()).rev() {
        let j = rng.rand_range(0..i as u32 + 1) as usize;
        numbers.swap(i, j);
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    pub rules: GameRules,
    pub players: Vec<Player>,
    pub board: Board,
    pub round: u32,
    pub turn_order: Vec<PlayerNumber>,
    pub turn_index: usize,
    /// Turns taken so far in the current round.
    pub turn_count: u32,
    pub monster_placed_this_turn: bool,
    pub moved_monsters: HashSet<MonsterId>,
    pub next_monster_id: MonsterId,
    pub recent_changes: Vec<Change>,
    pub started_at: Option<u64>,
    pub winner: Option<PlayerNumber>,
    rng: Rand32,
}

impl Game {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rules: GameRules::default(),
            players: Vec::with_capacity(MAX_PLAYERS),
            board: Board::new(),
            round: 0,
            turn_order: vec![],
            turn_index: 0,
            turn_count: 0,
            monster_placed_this_turn: false,
            moved_monsters: HashSet::new(),
            next_monster_id: 0,
            recent_changes: vec![],
            started_at: None,
            winner: None,
            rng: Rand32::new(seed.unwrap_or_else(now)),
        }
    }

    /// Seats a player at the lowest free number. The roster closes once the
    /// game starts.
    pub fn add_player(&mut self, name: String) -> Result<PlayerNumber, GamePlayError> {
        if self.started_at.is_some() || self.players.len() >= MAX_PLAYERS {
            return Err(GamePlayError::RosterFull);
        }
        let number = (1..=MAX_PLAYERS)
            .find(|n| self.players.iter().all(|p| p.number != *n))
            .ok_or(GamePlayError::RosterFull)?;
        let index = self
            .players
            .iter()
            .position(|p| p.number > number)
            .unwrap_or(self.players.len());
        self.players
            .insert(index, Player::new(name, number, GAME_COLORS[number - 1]));
        Ok(number)
    }

    pub fn player(&self, number: PlayerNumber) -> Result<&Player, GamePlayError> {
        self.players
            .iter()
            .find(|p| p.number == number)
            .ok_or(GamePlayError::NonExistentPlayer { number })
    }

    pub fn player_mut(&mut self, number: PlayerNumber) -> Result<&mut Player, GamePlayError> {
        self.players
            .iter_mut()
            .find(|p| p.number == number)
            .ok_or(GamePlayError::NonExistentPlayer { number })
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.eliminated)
    }

    /// The player whose action is currently accepted.
    pub fn current_player(&self) -> Option<PlayerNumber> {
        self.turn_order.get(self.turn_index).copied()
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
            || (self.started_at.is_some() && self.active_players().next().is_none())
    }

    pub fn start(&mut self) {
        self.started_at = Some(now());
        self.start_round();
    }

    pub fn start_round(&mut self) {
        self.round += 1;
        self.turn_count = 0;
        self.monster_placed_this_turn = false;
        self.moved_monsters.clear();
        self.turn_order = if self.round == 1 {
            // The opening round is a uniformly random permutation
            let mut order: Vec<PlayerNumber> = self.players.iter().map(|p| p.number).collect();
            shuffle(&mut self.rng, &mut order);
            order
        } else {
            self.determine_turn_order()
        };
        self.turn_index = 0;
        tracing::debug!(round = self.round, order = ?self.turn_order, "round started");
    }

    /// Active players ascending by live monster count; the subset tied for
    /// the minimum is shuffled, the rest keep their sorted order.
    fn determine_turn_order(&mut self) -> Vec<PlayerNumber> {
        let mut active: Vec<(PlayerNumber, u32)> = self
            .active_players()
            .map(|p| (p.number, p.monsters))
            .collect();
        active.sort_by_key(|(_, monsters)| *monsters);
        let Some(&(_, min)) = active.first() else {
            return vec![];
        };
        let tied = active
            .iter()
            .take_while(|(_, monsters)| *monsters == min)
            .count();
        let mut order: Vec<PlayerNumber> = active.into_iter().map(|(number, _)| number).collect();
        if tied > 1 {
            shuffle(&mut self.rng, &mut order[..tied]);
        }
        order
    }

    /// Validates that the game is live and the move comes from the turn
    /// holder, then applies it. Successful changes are kept on
    /// `recent_changes` for snapshotting.
    pub fn play_turn(&mut self, next_move: Move) -> Result<Vec<Change>, GamePlayError> {
        if self.started_at.is_none() {
            return Err(GamePlayError::GameNotStarted);
        }
        if self.is_over() {
            return Err(GamePlayError::GameOver);
        }
        let player = next_move.player();
        self.player(player)?;
        if self.current_player() != Some(player) {
            return Err(GamePlayError::NotYourTurn { number: player });
        }
        let changes = self.make_move(next_move)?;
        self.recent_changes = changes.clone();
        Ok(changes)
    }

    pub fn make_move(&mut self, game_move: Move) -> Result<Vec<Change>, GamePlayError> {
        match game_move {
            Move::Place {
                player,
                kind,
                position,
            } => self.place_monster(player, kind, position),
            Move::Move { player, from, to } => self.move_monster(player, from, to),
            Move::EndTurn { player } => self.end_turn(player),
        }
    }

    fn place_monster(
        &mut self,
        player: PlayerNumber,
        kind: MonsterKind,
        position: Position,
    ) -> Result<Vec<Change>, GamePlayError> {
        let home = {
            let record = self.player(player)?;
            if record.eliminated {
                return Err(GamePlayError::PlayerEliminated { number: player });
            }
            record.home
        };
        if self.monster_placed_this_turn {
            return Err(GamePlayError::AlreadyPlaced);
        }
        let square = self.board.get(position)?;
        if !home.on_edge(position) {
            return Err(GamePlayError::IllegalPlacement {
                number: player,
                position,
            });
        }

        let monster = Monster {
            id: self.next_monster_id,
            kind,
            player,
            round_placed: self.round,
        };
        let mut changes = vec![];
        match square {
            Square::Empty => {
                let detail = self.board.set(position, monster)?;
                changes.push(Change::Board(BoardChange {
                    detail,
                    action: BoardChangeAction::Added,
                }));
                self.player_mut(player)?.record_gain();
            }
            Square::Occupied(defender) => {
                if matches!(self.rules.placement, PlacementRule::EmptyOnly) {
                    return Err(GamePlayError::OccupiedPlace);
                }
                if defender.player == player {
                    return Err(GamePlayError::SelfCapture { position });
                }
                self.player_mut(player)?.record_gain();
                self.resolve_battle(monster, defender, None, position, &mut changes)?;
            }
        }
        self.next_monster_id += 1;
        self.monster_placed_this_turn = true;
        tracing::info!(player, %kind, %position, "placed a monster");
        Ok(changes)
    }

    fn move_monster(
        &mut self,
        player: PlayerNumber,
        from: Position,
        to: Position,
    ) -> Result<Vec<Change>, GamePlayError> {
        if self.player(player)?.eliminated {
            return Err(GamePlayError::PlayerEliminated { number: player });
        }
        let attacker = match self.board.get(from)? {
            Square::Occupied(monster) => monster,
            Square::Empty => return Err(GamePlayError::UnoccupiedMove { position: from }),
        };
        if attacker.player != player {
            return Err(GamePlayError::UnownedMove);
        }
        if attacker.round_placed >= self.round {
            return Err(GamePlayError::MonsterJustPlaced);
        }
        if self.moved_monsters.contains(&attacker.id) {
            return Err(GamePlayError::MonsterAlreadyMoved);
        }
        if from == to {
            return Err(GamePlayError::SelfMove);
        }
        let destination = self.board.get(to)?;

        let (row_diff, col_diff) = from.deltas(to);
        let diagonal = row_diff == col_diff && row_diff <= self.rules.diagonal_range;
        let straight = row_diff == 0 || col_diff == 0;
        if !(diagonal || straight) {
            return Err(GamePlayError::IllegalMove { from, to });
        }
        if !self.board.path_is_clear(from, to, player)? {
            return Err(GamePlayError::BlockedPath { from, to });
        }

        let mut changes = vec![];
        match destination {
            Square::Empty => {
                self.board.clear(from);
                let detail = self.board.set(to, attacker)?;
                changes.push(Change::Board(BoardChange {
                    detail,
                    action: BoardChangeAction::Moved,
                }));
            }
            Square::Occupied(defender) => {
                if defender.player == player {
                    return Err(GamePlayError::SelfCapture { position: to });
                }
                self.resolve_battle(attacker, defender, Some(from), to, &mut changes)?;
            }
        }
        self.moved_monsters.insert(attacker.id);
        tracing::info!(player, %from, %to, "moved a monster");
        Ok(changes)
    }

    /// Settles a conflict at `to`. `from` is the attacker's square for a
    /// move battle; a placement battle has no source square. Elimination is
    /// recorded per loss, but victory is only judged after the whole battle
    /// since both owners can fall at once.
    fn resolve_battle(
        &mut self,
        attacker: Monster,
        defender: Monster,
        from: Option<Position>,
        to: Position,
        changes: &mut Vec<Change>,
    ) -> Result<(), GamePlayError> {
        let outcome = Judge::battle(attacker.kind, defender.kind);
        tracing::info!(
            attacker = %attacker.kind,
            defender = %defender.kind,
            %outcome,
            "battle at {to}"
        );
        changes.push(Change::Battle(BattleReport {
            attacker,
            defender,
            outcome: outcome.clone(),
        }));

        match outcome {
            Outcome::AttackerWins => {
                if let Some(detail) = self.board.clear(to) {
                    changes.push(Change::Board(BoardChange {
                        detail,
                        action: BoardChangeAction::Defeated,
                    }));
                }
                if let Some(from) = from {
                    self.board.clear(from);
                }
                let detail = self.board.set(to, attacker)?;
                changes.push(Change::Board(BoardChange {
                    detail,
                    action: if from.is_some() {
                        BoardChangeAction::Moved
                    } else {
                        BoardChangeAction::Added
                    },
                }));
                self.record_loss(defender.player, changes)?;
            }
            Outcome::DefenderWins => {
                if let Some(from) = from {
                    if let Some(detail) = self.board.clear(from) {
                        changes.push(Change::Board(BoardChange {
                            detail,
                            action: BoardChangeAction::Defeated,
                        }));
                    }
                }
                self.record_loss(attacker.player, changes)?;
            }
            Outcome::MutualDefeat => {
                if let Some(detail) = self.board.clear(to) {
                    changes.push(Change::Board(BoardChange {
                        detail,
                        action: BoardChangeAction::Defeated,
                    }));
                }
                if let Some(from) = from {
                    if let Some(detail) = self.board.clear(from) {
                        changes.push(Change::Board(BoardChange {
                            detail,
                            action: BoardChangeAction::Defeated,
                        }));
                    }
                }
                self.record_loss(defender.player, changes)?;
                self.record_loss(attacker.player, changes)?;
            }
        }

        self.check_victory(changes);
        Ok(())
    }

    fn record_loss(
        &mut self,
        number: PlayerNumber,
        changes: &mut Vec<Change>,
    ) -> Result<(), GamePlayError> {
        let threshold = self.rules.elimination_threshold;
        let player = self.player_mut(number)?;
        player.record_loss();
        if !player.eliminated && player.lost_monsters >= threshold {
            player.eliminated = true;
            changes.push(Change::Player(PlayerChange {
                number,
                action: PlayerChangeAction::Eliminated,
            }));
            tracing::info!(player = number, "player eliminated");
        }
        Ok(())
    }

    fn check_victory(&mut self, changes: &mut Vec<Change>) {
        if self.winner.is_some() {
            return;
        }
        let Some(winner) = Judge::winner(&self.players) else {
            return;
        };
        self.winner = Some(winner);
        for player in &mut self.players {
            if player.number == winner {
                player.wins += 1;
            } else {
                player.losses += 1;
            }
        }
        changes.push(Change::Player(PlayerChange {
            number: winner,
            action: PlayerChangeAction::Won,
        }));
        tracing::info!(winner, "game over");
    }

    /// Ends the holder's turn. Eliminated players are skipped; running off
    /// the end of the order starts the next round.
    fn end_turn(&mut self, player: PlayerNumber) -> Result<Vec<Change>, GamePlayError> {
        self.player(player)?;
        self.turn_count += 1;
        self.monster_placed_this_turn = false;
        self.moved_monsters.clear();
        loop {
            self.turn_index += 1;
            if self.turn_index >= self.turn_order.len() {
                self.start_round();
                break;
            }
            let next = self.turn_order[self.turn_index];
            if !self.player(next)?.eliminated {
                break;
            }
        }
        tracing::debug!(
            round = self.round,
            turn_index = self.turn_index,
            "turn ended"
        );
        Ok(vec![])
    }

    /// A disconnecting player concedes: they are eliminated on the spot and,
    /// if it was their turn, the turn passes on.
    pub fn forfeit(&mut self, number: PlayerNumber) -> Result<Vec<Change>, GamePlayError> {
        let mut changes = vec![];
        let player = self.player_mut(number)?;
        if !player.eliminated {
            player.eliminated = true;
            changes.push(Change::Player(PlayerChange {
                number,
                action: PlayerChangeAction::Left,
            }));
            tracing::info!(player = number, "player forfeited");
        }
        self.check_victory(&mut changes);
        if !self.is_over() && self.current_player() == Some(number) {
            changes.extend(self.end_turn(number)?);
        }
        Ok(changes)
    }
}
