//! Board geometry shared by every difficulty tier. All helpers work on
//! hypothetical positions: the tile under evaluation is never inspected.

use rusequence_core::{
    Axis, Board, Card, CardRule, GameEngine, Position, SequenceDetector, TeamColor,
};

/// The acting team and its rivals for one decision.
#[derive(Debug, Clone)]
pub struct DecisionContext {
    pub team: TeamColor,
    pub opponents: Vec<TeamColor>,
}

impl DecisionContext {
    pub fn for_current(engine: &GameEngine) -> Option<Self> {
        let team = engine.current_player()?.team;
        let opponents = engine
            .teams()
            .into_iter()
            .map(|team| team.color)
            .filter(|color| *color != team)
            .collect();
        Some(Self { team, opponents })
    }

    pub fn is_opponent(&self, team: TeamColor) -> bool {
        self.opponents.contains(&team)
    }
}

/// Own markers and wildcard corners in the 8-neighborhood.
pub fn adjacent_count(board: &Board, pos: Position, team: TeamColor) -> usize {
    board
        .neighbors(pos)
        .filter(|next| board.counts_for(*next, team))
        .count()
}

/// Markers of `team` only, corners excluded.
pub fn marker_neighbors(board: &Board, pos: Position, team: TeamColor) -> usize {
    board
        .neighbors(pos)
        .filter(|next| board.marker_team(*next) == Some(team))
        .count()
}

/// Markers belonging to any team other than `team`.
pub fn opponent_adjacent_count(board: &Board, pos: Position, team: TeamColor) -> usize {
    board
        .neighbors(pos)
        .filter(|next| board.marker_team(*next).is_some_and(|other| other != team))
        .count()
}

pub fn run_length(board: &Board, pos: Position, team: TeamColor, axis: Axis) -> usize {
    SequenceDetector::run_length_through(board, pos, team, axis)
}

pub fn longest_run(board: &Board, pos: Position, team: TeamColor) -> usize {
    Axis::ALL
        .iter()
        .map(|axis| run_length(board, pos, team, *axis))
        .max()
        .unwrap_or(1)
}

pub fn distance_to_center(board: &Board, pos: Position) -> f64 {
    let (row, col) = board.center();
    let d_row = pos.row as f64 - row;
    let d_col = pos.col as f64 - col;
    (d_row * d_row + d_col * d_col).sqrt()
}

/// Whether a `team` marker at `pos` would register a new sequence.
pub fn completes_run(engine: &GameEngine, pos: Position, team: TeamColor) -> bool {
    let detector = engine.detector();
    if longest_run(engine.board(), pos, team) < detector.run_length {
        return false;
    }
    let mut board = engine.board().clone();
    if !board.place_marker(pos, team) {
        return false;
    }
    !detector
        .new_runs(&board, pos, team, engine.sequences())
        .is_empty()
}

/// Axes on which `pos` would join at least two own markers.
pub fn fork_axes(board: &Board, pos: Position, team: TeamColor) -> usize {
    Axis::ALL
        .iter()
        .filter(|axis| run_length(board, pos, team, **axis) >= 3)
        .count()
}

pub fn is_fork(board: &Board, pos: Position, team: TeamColor) -> bool {
    fork_axes(board, pos, team) >= 2
}

/// A marker whose owner has at least two markers next to it.
pub fn is_forming_line(board: &Board, pos: Position) -> bool {
    board
        .marker_team(pos)
        .is_some_and(|owner| marker_neighbors(board, pos, owner) >= 2)
}

/// A marker one tile short of a sequence for its owner.
pub fn is_near_complete(engine: &GameEngine, pos: Position) -> bool {
    let board = engine.board();
    let Some(owner) = board.marker_team(pos) else {
        return false;
    };
    longest_run(board, pos, owner) + 1 >= engine.detector().run_length
}

/// Legal targets worth using. Removal Jacks only count opponent markers.
pub fn useful_positions(
    engine: &GameEngine,
    ctx: &DecisionContext,
    card: &Card,
) -> Vec<Position> {
    let legal = engine.legal_positions(card);
    match card.rule() {
        CardRule::RemoveChip => legal
            .into_iter()
            .filter(|pos| {
                engine
                    .board()
                    .marker_team(*pos)
                    .is_some_and(|team| ctx.is_opponent(team))
            })
            .collect(),
        CardRule::PlaceAnywhere | CardRule::Match => legal,
    }
}

/// First position with the highest score, ignoring scores below `floor`.
pub fn best_by<F>(positions: &[Position], floor: usize, mut score: F) -> Option<Position>
where
    F: FnMut(Position) -> usize,
{
    let mut best: Option<(Position, usize)> = None;
    for pos in positions {
        let value = score(*pos);
        if value < floor {
            continue;
        }
        if best.map_or(true, |(_, top)| value > top) {
            best = Some((*pos, value));
        }
    }
    best.map(|(pos, _)| pos)
}

pub fn nearest_center(board: &Board, positions: &[Position]) -> Option<Position> {
    positions.iter().copied().min_by(|a, b| {
        distance_to_center(board, *a).total_cmp(&distance_to_center(board, *b))
    })
}

/// Opponent marker to take off the board: near-complete runs first, then
/// the longest run, then the most friendly neighbors.
pub fn removal_target(engine: &GameEngine, targets: &[Position]) -> Option<Position> {
    let board = engine.board();
    let score = |pos: Position| {
        let Some(owner) = board.marker_team(pos) else {
            return 0;
        };
        let urgent = usize::from(is_near_complete(engine, pos));
        urgent * 100 + longest_run(board, pos, owner) * 10 + marker_neighbors(board, pos, owner)
    };
    best_by(targets, 0, score)
}
