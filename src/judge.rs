use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::MonsterKind;
use crate::player::{Player, PlayerNumber};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    AttackerWins,
    DefenderWins,
    /// Same kinds collide and both are removed.
    MutualDefeat,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::AttackerWins => write!(f, "Attacker wins"),
            Outcome::DefenderWins => write!(f, "Defender wins"),
            Outcome::MutualDefeat => write!(f, "Both monsters fall"),
        }
    }
}

/// Stateless arbiter of monster battles. Kinds dominate in the fixed cycle
/// Vampire > Werewolf > Ghost > Vampire; there are no draws outside the
/// same-kind case.
#[derive(Debug, Default, Clone)]
pub struct Judge;

impl Judge {
    pub fn battle(attacker: MonsterKind, defender: MonsterKind) -> Outcome {
        if attacker == defender {
            Outcome::MutualDefeat
        } else if attacker.beats() == defender {
            Outcome::AttackerWins
        } else {
            Outcome::DefenderWins
        }
    }

    /// The winner, if exactly one active player remains.
    pub fn winner(players: &[Player]) -> Option<PlayerNumber> {
        let mut active = players.iter().filter(|p| !p.eliminated);
        match (active.next(), active.next()) {
            (Some(last), None) => Some(last.number),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::player::Player;

    #[test]
    fn dominance_is_total_and_cyclic() {
        for attacker in MonsterKind::iter() {
            for defender in MonsterKind::iter() {
                let outcome = Judge::battle(attacker, defender);
                if attacker == defender {
                    assert_eq!(outcome, Outcome::MutualDefeat);
                } else if attacker.beats() == defender {
                    assert_eq!(outcome, Outcome::AttackerWins);
                } else {
                    // The cycle has no third option between distinct kinds
                    assert_eq!(defender.beats(), attacker);
                    assert_eq!(outcome, Outcome::DefenderWins);
                }
            }
        }
    }

    #[test]
    fn the_expected_pairs_win() {
        use MonsterKind::*;
        assert_eq!(Judge::battle(Vampire, Werewolf), Outcome::AttackerWins);
        assert_eq!(Judge::battle(Werewolf, Ghost), Outcome::AttackerWins);
        assert_eq!(Judge::battle(Ghost, Vampire), Outcome::AttackerWins);
        assert_eq!(Judge::battle(Werewolf, Vampire), Outcome::DefenderWins);
        assert_eq!(Judge::battle(Ghost, Werewolf), Outcome::DefenderWins);
        assert_eq!(Judge::battle(Vampire, Ghost), Outcome::DefenderWins);
        assert_eq!(Judge::battle(Ghost, Ghost), Outcome::MutualDefeat);
    }

    #[test]
    fn winner_needs_a_sole_survivor() {
        let mut players: Vec<Player> = (1..=4)
            .map(|number| Player::new(format!("Player {number}"), number, (0, 0, 0)))
            .collect();
        assert_eq!(Judge::winner(&players), None);

        players[0].eliminated = true;
        players[2].eliminated = true;
        assert_eq!(Judge::winner(&players), None);

        players[3].eliminated = true;
        assert_eq!(Judge::winner(&players), Some(2));

        // Nobody left standing is not a win
        players[1].eliminated = true;
        assert_eq!(Judge::winner(&players), None);
    }
}
