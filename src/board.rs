use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;

use crate::error::GamePlayError;
use crate::player::PlayerNumber;
use crate::reporting::BoardChangeDetail;

pub const BOARD_SIZE: usize = 10;

pub type MonsterId = u32;

/// The edge of the board a player sits at, and the only edge they may
/// place new monsters on.
#[derive(EnumIter, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn home_of(number: PlayerNumber) -> Self {
        match number {
            1 => Direction::West,
            2 => Direction::East,
            3 => Direction::North,
            4 => Direction::South,
            _ => unreachable!("Player numbers are always 1 through 4"),
        }
    }

    pub fn on_edge(self, position: Position) -> bool {
        match self {
            Direction::North => position.row == 0,
            Direction::East => position.col == BOARD_SIZE - 1,
            Direction::South => position.row == BOARD_SIZE - 1,
            Direction::West => position.col == 0,
        }
    }
}

#[derive(EnumIter, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Vampire,
    Werewolf,
    Ghost,
}

impl MonsterKind {
    /// The kind this kind dominates in the fixed cycle
    /// Vampire > Werewolf > Ghost > Vampire.
    pub fn beats(self) -> MonsterKind {
        match self {
            MonsterKind::Vampire => MonsterKind::Werewolf,
            MonsterKind::Werewolf => MonsterKind::Ghost,
            MonsterKind::Ghost => MonsterKind::Vampire,
        }
    }

    pub fn letter(self) -> char {
        match self {
            MonsterKind::Vampire => 'V',
            MonsterKind::Werewolf => 'W',
            MonsterKind::Ghost => 'G',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'V' => Some(MonsterKind::Vampire),
            'W' => Some(MonsterKind::Werewolf),
            'G' => Some(MonsterKind::Ghost),
            _ => None,
        }
    }
}

impl fmt::Display for MonsterKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MonsterKind::Vampire => write!(f, "Vampire"),
            MonsterKind::Werewolf => write!(f, "Werewolf"),
            MonsterKind::Ghost => write!(f, "Ghost"),
        }
    }
}

/// A monster on the board. The id is minted at placement time and is the
/// stable identity used by the per-turn moved set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub kind: MonsterKind,
    pub player: PlayerNumber,
    pub round_placed: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Square {
    Empty,
    Occupied(Monster),
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            Square::Empty => write!(f, "__"),
            Square::Occupied(monster) => {
                write!(f, "{}{}", monster.kind.letter(), monster.player)
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Absolute row and column distances to another position.
    pub fn deltas(self, other: Position) -> (usize, usize) {
        (
            self.row.abs_diff(other.row),
            self.col.abs_diff(other.col),
        )
    }

    /// The squares strictly between two positions along a straight or
    /// diagonal line. Empty when the positions do not share one.
    pub fn between(self, other: Position) -> Vec<Position> {
        let (row_diff, col_diff) = self.deltas(other);
        if row_diff != 0 && col_diff != 0 && row_diff != col_diff {
            return vec![];
        }

        let row_step = (other.row as isize - self.row as isize).signum();
        let col_step = (other.col as isize - self.col as isize).signum();
        (1..row_diff.max(col_diff) as isize)
            .map(|i| Position {
                row: (self.row as isize + i * row_step) as usize,
                col: (self.col as isize + i * col_step) as usize,
            })
            .collect()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Board {
    pub squares: Vec<Vec<Square>>,
}

impl Board {
    pub fn new() -> Self {
        Board {
            squares: vec![vec![Square::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn width(&self) -> usize {
        self.squares[0].len()
    }

    pub fn height(&self) -> usize {
        self.squares.len()
    }

    pub fn get(&self, position: Position) -> Result<Square, GamePlayError> {
        match self
            .squares
            .get(position.row)
            .and_then(|row| row.get(position.col))
        {
            Some(square) => Ok(*square),
            None => Err(GamePlayError::OutSideBoardDimensions { position }),
        }
    }

    pub fn get_mut(&mut self, position: Position) -> Result<&mut Square, GamePlayError> {
        match self
            .squares
            .get_mut(position.row)
            .and_then(|row| row.get_mut(position.col))
        {
            Some(square) => Ok(square),
            None => Err(GamePlayError::OutSideBoardDimensions { position }),
        }
    }

    pub fn set(
        &mut self,
        position: Position,
        monster: Monster,
    ) -> Result<BoardChangeDetail, GamePlayError> {
        let square = self.get_mut(position)?;
        *square = Square::Occupied(monster);
        Ok(BoardChangeDetail {
            square: *square,
            position,
        })
    }

    pub fn clear(&mut self, position: Position) -> Option<BoardChangeDetail> {
        if let Ok(square) = self.get_mut(position) {
            if matches!(square, Square::Occupied(_)) {
                let change = Some(BoardChangeDetail {
                    square: *square,
                    position,
                });
                *square = Square::Empty;
                return change;
            }
        }
        None
    }

    pub fn monsters(&self) -> impl Iterator<Item = (Position, Monster)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, squares)| {
            squares
                .iter()
                .enumerate()
                .filter_map(move |(col, square)| match square {
                    Square::Occupied(monster) => Some((Position { row, col }, *monster)),
                    Square::Empty => None,
                })
        })
    }

    /// Whether every square strictly between `from` and `to` is empty or
    /// held by the moving player. The destination itself is never checked;
    /// conflicts only happen there.
    pub fn path_is_clear(
        &self,
        from: Position,
        to: Position,
        player: PlayerNumber,
    ) -> Result<bool, GamePlayError> {
        for step in from.between(to) {
            if let Square::Occupied(blocker) = self.get(step)? {
                if blocker.player != player {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn from_string<S: AsRef<str>>(s: S) -> Board {
        let mut next_id: MonsterId = 0;
        let mut squares: Vec<Vec<Square>> = vec![];
        for line in s.as_ref().split('\n') {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            };
            squares.push(
                line.trim()
                    .split(' ')
                    .filter(|token| !token.is_empty())
                    .map(|token| {
                        let mut chars = token.chars();
                        match chars.next() {
                            Some('_') => Square::Empty,
                            Some(letter) => {
                                let kind = MonsterKind::from_letter(letter)
                                    .expect("Square needs a monster kind");
                                let player = chars
                                    .next()
                                    .expect("Square needs a player")
                                    .to_digit(10)
                                    .expect("Player should be a digit")
                                    as usize;
                                let id = next_id;
                                next_id += 1;
                                Square::Occupied(Monster {
                                    id,
                                    kind,
                                    player,
                                    round_placed: 0,
                                })
                            }
                            _ => panic!("Couldn't build board from string"),
                        }
                    })
                    .collect(),
            );
        }
        Board { squares }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            self.squares
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|sq| sq.to_string())
                        .collect::<Vec<String>>()
                        .join(" ")
                })
                .collect::<Vec<String>>()
                .join("\n")
        )
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn makes_default_board() {
        let row = ["__"; BOARD_SIZE].join(" ");
        let expected = vec![row; BOARD_SIZE].join("\n");
        assert_eq!(Board::new().to_string(), expected);
        assert_eq!(Board::new().height(), 10);
        assert_eq!(Board::new().width(), 10);
    }

    #[test]
    fn string_round_trip() {
        let b = Board::from_string(
            "__ __ __ __ __ __ __ __ __ __\n\
             __ V1 __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ W2 __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ G3 __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __",
        );
        assert_eq!(
            b.to_string(),
            "__ __ __ __ __ __ __ __ __ __\n\
             __ V1 __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ W2 __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ G3 __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __",
        );
        let monsters: Vec<_> = b.monsters().collect();
        assert_eq!(monsters.len(), 3);
        assert_eq!(monsters[0].0, Position::new(1, 1));
        assert_eq!(monsters[0].1.kind, MonsterKind::Vampire);
        assert_eq!(monsters[0].1.player, 1);
        // Ids are minted in reading order
        assert_eq!(
            monsters.iter().map(|(_, m)| m.id).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn get_and_set_fail_out_of_bounds() {
        let mut b = Board::new();
        let position = Position::new(10, 0);
        assert_eq!(
            b.get(position),
            Err(GamePlayError::OutSideBoardDimensions { position })
        );
        let position = Position::new(0, 10);
        let monster = Monster {
            id: 0,
            kind: MonsterKind::Ghost,
            player: 1,
            round_placed: 1,
        };
        assert_eq!(
            b.set(position, monster),
            Err(GamePlayError::OutSideBoardDimensions { position })
        );
        assert_eq!(b.clear(position), None);
    }

    #[test]
    fn set_then_clear() {
        let mut b = Board::new();
        let position = Position::new(4, 0);
        let monster = Monster {
            id: 7,
            kind: MonsterKind::Werewolf,
            player: 1,
            round_placed: 2,
        };
        b.set(position, monster).unwrap();
        assert_eq!(b.get(position), Ok(Square::Occupied(monster)));

        let detail = b.clear(position).expect("A monster was just set");
        assert_eq!(detail.square, Square::Occupied(monster));
        assert_eq!(detail.position, position);
        assert_eq!(b.get(position), Ok(Square::Empty));
        // Clearing an empty square reports nothing
        assert_eq!(b.clear(position), None);
    }

    #[test]
    fn between_straight_and_diagonal() {
        let from = Position::new(2, 2);
        assert_eq!(
            from.between(Position::new(2, 6)),
            vec![
                Position::new(2, 3),
                Position::new(2, 4),
                Position::new(2, 5)
            ]
        );
        assert_eq!(
            from.between(Position::new(5, 2)),
            vec![Position::new(3, 2), Position::new(4, 2)]
        );
        assert_eq!(from.between(Position::new(4, 4)), vec![Position::new(3, 3)]);
        assert_eq!(from.between(Position::new(0, 0)), vec![Position::new(1, 1)]);
        // Adjacent squares have nothing between them
        assert_eq!(from.between(Position::new(2, 3)), vec![]);
        // A knight-ish offset shares no line
        assert_eq!(from.between(Position::new(3, 4)), vec![]);
    }

    #[test]
    fn path_clearance_ignores_own_monsters() {
        let b = Board::from_string(
            "__ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ V1 __ W2 __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __\n\
             __ __ __ __ __ __ __ __ __ __",
        );
        // Own monster mid-path does not block
        assert_eq!(
            b.path_is_clear(Position::new(2, 0), Position::new(2, 4), 1),
            Ok(true)
        );
        // An enemy monster mid-path blocks
        assert_eq!(
            b.path_is_clear(Position::new(2, 0), Position::new(2, 4), 2),
            Ok(false)
        );
        // The destination square itself is never part of the path
        assert_eq!(
            b.path_is_clear(Position::new(2, 0), Position::new(2, 3), 2),
            Ok(true)
        );
    }
}
