use crate::{Card, CardId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TeamColor {
    Blue,
    Green,
    Red,
}

impl TeamColor {
    pub const ALL: [TeamColor; 3] = [TeamColor::Blue, TeamColor::Green, TeamColor::Red];

    pub fn symbol(self) -> char {
        match self {
            TeamColor::Blue => 'B',
            TeamColor::Green => 'G',
            TeamColor::Red => 'R',
        }
    }
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TeamColor::Blue => "blue",
            TeamColor::Green => "green",
            TeamColor::Red => "red",
        };
        f.write_str(name)
    }
}

/// Teams compare by color only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Team {
    pub color: TeamColor,
    pub player_count: usize,
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
    }
}

impl Eq for Team {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Control {
    Human,
    Automated(Difficulty),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub team: TeamColor,
    pub hand: Vec<Card>,
    pub control: Control,
}

impl Player {
    pub fn human(name: impl Into<String>, team: TeamColor) -> Self {
        Self {
            name: name.into(),
            team,
            hand: Vec::new(),
            control: Control::Human,
        }
    }

    pub fn automated(name: impl Into<String>, team: TeamColor, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            team,
            hand: Vec::new(),
            control: Control::Automated(difficulty),
        }
    }

    pub fn is_automated(&self) -> bool {
        matches!(self.control, Control::Automated(_))
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        match self.control {
            Control::Human => None,
            Control::Automated(difficulty) => Some(difficulty),
        }
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|card| card.id == id)
    }

    pub(crate) fn take_card(&mut self, id: CardId) -> Option<Card> {
        let index = self.hand.iter().position(|card| card.id == id)?;
        Some(self.hand.remove(index))
    }
}

/// Distinct teams in seating order with their declared sizes.
pub fn teams_of(players: &[Player]) -> Vec<Team> {
    let mut teams: Vec<Team> = Vec::new();
    for player in players {
        match teams.iter_mut().find(|team| team.color == player.team) {
            Some(team) => team.player_count += 1,
            None => teams.push(Team {
                color: player.team,
                player_count: 1,
            }),
        }
    }
    teams
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teams_group_by_color() {
        let players = vec![
            Player::human("a", TeamColor::Blue),
            Player::human("b", TeamColor::Green),
            Player::human("c", TeamColor::Blue),
        ];
        let teams = teams_of(&players);
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].color, TeamColor::Blue);
        assert_eq!(teams[0].player_count, 2);
        assert_eq!(
            teams[1],
            Team {
                color: TeamColor::Green,
                player_count: 7
            }
        );
    }
}
