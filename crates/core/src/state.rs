use crate::{
    Board, CardId, CardSupply, Player, Position, RulesConfig, Sequence, SequenceDetector,
    TeamColor,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Coarse turn progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Phase {
    TurnStart,
    CardSelected,
    WildJackSelected,
    RemovalJackSelected,
    DeadCard,
    GameOver,
}

impl Phase {
    pub fn has_selection(self) -> bool {
        match self {
            Phase::CardSelected
            | Phase::WildJackSelected
            | Phase::RemovalJackSelected
            | Phase::DeadCard => true,
            Phase::TurnStart | Phase::GameOver => false,
        }
    }
}

/// Everything needed to resume a game. The encoding is left to the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineSnapshot {
    pub config: RulesConfig,
    pub rng_seed: u64,
    /// Tables dealt so far; the next restart deals table number `tables_dealt`.
    #[serde(default)]
    pub tables_dealt: u64,
    pub players: Vec<Player>,
    pub current: usize,
    pub phase: Phase,
    pub board: Board,
    pub selected: Option<CardId>,
    pub detector: SequenceDetector,
    pub sequences: Vec<Sequence>,
    pub protected: BTreeSet<Position>,
    pub winner: Option<TeamColor>,
    pub supply: CardSupply,
}
