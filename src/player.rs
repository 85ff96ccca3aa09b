use serde::{Deserialize, Serialize};

use crate::board::Direction;

pub type PlayerNumber = usize;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    pub number: PlayerNumber,
    pub home: Direction,
    /// Monsters currently alive on the board.
    pub monsters: u32,
    pub lost_monsters: u32,
    pub wins: u32,
    pub losses: u32,
    pub eliminated: bool,
    pub color: (u8, u8, u8),
}

impl Player {
    pub fn new(name: String, number: PlayerNumber, color: (u8, u8, u8)) -> Self {
        Self {
            name,
            number,
            home: Direction::home_of(number),
            monsters: 0,
            lost_monsters: 0,
            wins: 0,
            losses: 0,
            eliminated: false,
            color,
        }
    }

    pub fn record_gain(&mut self) {
        self.monsters += 1;
    }

    pub fn record_loss(&mut self) {
        self.monsters = self.monsters.saturating_sub(1);
        self.lost_monsters += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Direction, Position};

    #[test]
    fn homes_match_player_numbers() {
        assert_eq!(Player::new("A".into(), 1, (0, 0, 0)).home, Direction::West);
        assert_eq!(Player::new("B".into(), 2, (0, 0, 0)).home, Direction::East);
        assert_eq!(Player::new("C".into(), 3, (0, 0, 0)).home, Direction::North);
        assert_eq!(Player::new("D".into(), 4, (0, 0, 0)).home, Direction::South);

        assert!(Direction::West.on_edge(Position::new(5, 0)));
        assert!(!Direction::West.on_edge(Position::new(5, 5)));
        assert!(Direction::East.on_edge(Position::new(0, 9)));
        assert!(Direction::North.on_edge(Position::new(0, 3)));
        assert!(Direction::South.on_edge(Position::new(9, 9)));
    }

    #[test]
    fn bookkeeping() {
        let mut player = Player::new("A".into(), 1, (0, 0, 0));
        player.record_gain();
        player.record_gain();
        assert_eq!(player.monsters, 2);
        player.record_loss();
        assert_eq!((player.monsters, player.lost_monsters), (1, 1));
        // Losses never drive the live count negative
        player.record_loss();
        player.record_loss();
        assert_eq!((player.monsters, player.lost_monsters), (0, 3));
    }
}
