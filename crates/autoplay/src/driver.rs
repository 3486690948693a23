use crate::{AutoplayConfig, AutoplayError, TurnController, TurnReport};
use rusequence_core::{EngineError, EventBus, GameEngine, PlayAction, TeamColor};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    Won(TeamColor),
    TurnLimit,
    /// A full round went by with every seat passing.
    Stalled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamTally {
    pub team: TeamColor,
    pub sequences: usize,
    pub markers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryStats {
    pub turns: u32,
    pub placements: u32,
    pub removals: u32,
    pub dead_cards: u32,
    pub passes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutoplayResult {
    pub status: RunStatus,
    pub stats: SummaryStats,
    pub teams: Vec<TeamTally>,
    pub supply_remaining: usize,
}

impl AutoplayResult {
    pub fn to_json_pretty(&self) -> Result<String, AutoplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One controller per seat, seeded from the run seed.
pub fn controllers_for(
    engine: &GameEngine,
    config: &AutoplayConfig,
) -> Result<Vec<TurnController>, AutoplayError> {
    engine
        .players()
        .iter()
        .enumerate()
        .map(|(index, player)| {
            let difficulty = player
                .difficulty()
                .ok_or(AutoplayError::NotAutomated(index))?;
            let seed = config.seed.wrapping_add(index as u64).wrapping_mul(0x9E3779B97F4A7C15);
            Ok(TurnController::new(difficulty, config.thinking, seed))
        })
        .collect()
}

/// Plays automated turns until a team wins, the turn cap is hit, or every
/// seat passes for a whole round.
pub fn run_autoplay(
    engine: &mut GameEngine,
    config: &AutoplayConfig,
    events: &mut EventBus,
) -> Result<AutoplayResult, AutoplayError> {
    let mut controllers = controllers_for(engine, config)?;
    let mut stats = SummaryStats {
        turns: 0,
        placements: 0,
        removals: 0,
        dead_cards: 0,
        passes: 0,
    };
    let mut consecutive_passes = 0usize;
    let mut status = RunStatus::TurnLimit;

    while stats.turns < config.max_turns {
        if let Some(team) = engine.winner() {
            status = RunStatus::Won(team);
            break;
        }
        let seat = engine.current_index();
        let Some(controller) = controllers.get_mut(seat) else {
            return Err(EngineError::NoPlayers.into());
        };
        let report = controller.play_turn(engine, events)?;
        stats.turns += 1;
        match report {
            TurnReport::Played(outcome) => {
                consecutive_passes = 0;
                match outcome.action {
                    PlayAction::Placed => stats.placements += 1,
                    PlayAction::Removed => stats.removals += 1,
                }
            }
            TurnReport::DeadCardReplaced { .. } => {
                consecutive_passes = 0;
                stats.dead_cards += 1;
            }
            TurnReport::Passed => {
                stats.passes += 1;
                consecutive_passes += 1;
                if consecutive_passes >= engine.players().len() {
                    status = RunStatus::Stalled;
                    break;
                }
            }
        }
    }
    if let Some(team) = engine.winner() {
        status = RunStatus::Won(team);
    }
    match &status {
        RunStatus::Won(team) => info!(%team, turns = stats.turns, "autoplay finished"),
        RunStatus::TurnLimit | RunStatus::Stalled => {
            warn!(?status, turns = stats.turns, "autoplay ended without a winner")
        }
    }

    let teams = engine
        .teams()
        .into_iter()
        .map(|team| TeamTally {
            team: team.color,
            sequences: engine.team_sequence_count(team.color),
            markers: engine
                .board()
                .tiles()
                .iter()
                .filter(|tile| tile.marker_team() == Some(team.color))
                .count(),
        })
        .collect();
    Ok(AutoplayResult {
        status,
        stats,
        teams,
        supply_remaining: engine.supply_remaining(),
    })
}
