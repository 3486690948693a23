use crate::{BOARD_SIZE, DEFAULT_RUN_LENGTH};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSizeRule {
    pub players: usize,
    pub cards: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RulesConfig {
    #[serde(default = "default_board_size")]
    pub board_size: usize,
    #[serde(default = "default_run_length")]
    pub run_length: usize,
    #[serde(default = "default_hand_sizes")]
    pub hand_sizes: Vec<HandSizeRule>,
    /// Sequences a team needs when exactly two players sit at the table.
    #[serde(default = "default_two_player_target")]
    pub sequences_to_win_two_players: usize,
    #[serde(default = "default_target")]
    pub sequences_to_win: usize,
}

fn default_board_size() -> usize {
    BOARD_SIZE
}

fn default_run_length() -> usize {
    DEFAULT_RUN_LENGTH
}

fn default_two_player_target() -> usize {
    2
}

fn default_target() -> usize {
    1
}

fn default_hand_sizes() -> Vec<HandSizeRule> {
    [(2, 7), (3, 6), (4, 6), (6, 5), (8, 4), (9, 4), (10, 3), (12, 3)]
        .into_iter()
        .map(|(players, cards)| HandSizeRule { players, cards })
        .collect()
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            run_length: default_run_length(),
            hand_sizes: default_hand_sizes(),
            sequences_to_win_two_players: default_two_player_target(),
            sequences_to_win: default_target(),
        }
    }
}

impl RulesConfig {
    /// Cards dealt per player; 0 for unsupported table sizes.
    pub fn hand_size_for(&self, players: usize) -> usize {
        self.hand_sizes
            .iter()
            .find(|rule| rule.players == players)
            .map(|rule| rule.cards)
            .unwrap_or(0)
    }

    pub fn win_threshold(&self, players: usize) -> usize {
        if players == 2 {
            self.sequences_to_win_two_players
        } else {
            self.sequences_to_win
        }
    }
}
