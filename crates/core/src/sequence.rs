use crate::{Axis, Board, Position, TeamColor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_RUN_LENGTH: usize = 5;

/// A registered run. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sequence {
    pub tiles: Vec<Position>,
    pub team: TeamColor,
    pub axis: Axis,
    pub anchor: Position,
}

impl Sequence {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.tiles.contains(&pos)
    }

    fn claims(&self, team: TeamColor, axis: Axis, pos: Position) -> bool {
        self.team == team && self.axis == axis && self.contains(pos)
    }
}

/// Tiles of every sequence; a removal Jack cannot target them.
pub fn protected_tiles(sequences: &[Sequence]) -> BTreeSet<Position> {
    sequences
        .iter()
        .flat_map(|sequence| sequence.tiles.iter().copied())
        .collect()
}

pub fn team_sequence_count(sequences: &[Sequence], team: TeamColor) -> usize {
    sequences
        .iter()
        .filter(|sequence| sequence.team == team)
        .count()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SequenceDetector {
    pub run_length: usize,
}

impl Default for SequenceDetector {
    fn default() -> Self {
        Self::new(DEFAULT_RUN_LENGTH)
    }
}

impl SequenceDetector {
    pub fn new(run_length: usize) -> Self {
        Self { run_length }
    }

    /// Contiguous tiles counting for `team` on each side of `center` along
    /// `axis`, nearest first. `center` itself is not inspected, so this
    /// works for hypothetical placements.
    pub fn walk(
        board: &Board,
        center: Position,
        team: TeamColor,
        axis: Axis,
    ) -> (Vec<Position>, Vec<Position>) {
        let (d_row, d_col) = axis.delta();
        let walk_dir = |sign: isize| {
            let mut tiles = Vec::new();
            let mut cursor = center;
            while let Some(next) = cursor.offset(d_row * sign, d_col * sign, board.size()) {
                if !board.counts_for(next, team) {
                    break;
                }
                tiles.push(next);
                cursor = next;
            }
            tiles
        };
        (walk_dir(-1), walk_dir(1))
    }

    /// Length of the run through `center` along `axis`, counting `center`.
    pub fn run_length_through(
        board: &Board,
        center: Position,
        team: TeamColor,
        axis: Axis,
    ) -> usize {
        let (negative, positive) = Self::walk(board, center, team, axis);
        1 + negative.len() + positive.len()
    }

    /// Every qualifying run through `center`, one per axis at most.
    pub fn scan(&self, board: &Board, center: Position, team: TeamColor) -> Vec<Sequence> {
        let mut found = Vec::new();
        for axis in Axis::ALL {
            let (negative, positive) = Self::walk(board, center, team, axis);
            if 1 + negative.len() + positive.len() < self.run_length {
                continue;
            }
            let anchor = negative.last().copied().unwrap_or(center);
            let mut tiles: Vec<Position> = negative.into_iter().rev().collect();
            tiles.push(center);
            tiles.extend(positive);
            found.push(Sequence {
                tiles,
                team,
                axis,
                anchor,
            });
        }
        found
    }

    /// Runs found at `center` that are not yet registered. Two sequences of
    /// one team on one axis share at most one tile, so a line only yields a
    /// second sequence once it holds `run_length` tiles beyond the first
    /// one's end.
    pub fn new_runs(
        &self,
        board: &Board,
        center: Position,
        team: TeamColor,
        registered: &[Sequence],
    ) -> Vec<Sequence> {
        self.scan(board, center, team)
            .into_iter()
            .flat_map(|run| self.unclaimed(run, registered))
            .collect()
    }

    /// Splits `run` around tiles held by registered sequences of the same
    /// team and axis. Each stretch of free tiles may borrow the claimed tile
    /// at either end.
    fn unclaimed(&self, run: Sequence, registered: &[Sequence]) -> Vec<Sequence> {
        let claimed: Vec<bool> = run
            .tiles
            .iter()
            .map(|pos| registered.iter().any(|seq| seq.claims(run.team, run.axis, *pos)))
            .collect();
        if !claimed.contains(&true) {
            return vec![run];
        }
        let len = run.tiles.len();
        let mut found = Vec::new();
        let mut start = 0;
        while start < len {
            if claimed[start] {
                start += 1;
                continue;
            }
            let mut end = start;
            while end < len && !claimed[end] {
                end += 1;
            }
            let from = start.saturating_sub(1);
            let to = (end + 1).min(len);
            if to - from >= self.run_length {
                let tiles = run.tiles[from..to].to_vec();
                if let Some(anchor) = tiles.first().copied() {
                    found.push(Sequence {
                        tiles,
                        team: run.team,
                        axis: run.axis,
                        anchor,
                    });
                }
            }
            start = end;
        }
        found
    }

    /// Appends new runs through `center` to `sequences` and returns them.
    /// Repeating a call on an unchanged board registers nothing.
    pub fn register(
        &self,
        board: &Board,
        center: Position,
        team: TeamColor,
        sequences: &mut Vec<Sequence>,
    ) -> Vec<Sequence> {
        let added = self.new_runs(board, center, team, sequences);
        sequences.extend(added.iter().cloned());
        added
    }

    /// Registers new runs and reports whether any axis through `center`
    /// holds a qualifying run.
    pub fn detect(
        &self,
        board: &Board,
        center: Position,
        team: TeamColor,
        sequences: &mut Vec<Sequence>,
    ) -> bool {
        let qualified = !self.scan(board, center, team).is_empty();
        self.register(board, center, team, sequences);
        qualified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_all(board: &mut Board, team: TeamColor, cells: &[(usize, usize)]) {
        for (row, col) in cells {
            assert!(board.place_marker(Position::new(*row, *col), team));
        }
    }

    #[test]
    fn ordered_tiles_run_negative_to_positive() {
        let mut board = Board::default();
        place_all(&mut board, TeamColor::Blue, &[(3, 2), (3, 3), (3, 4), (3, 5), (3, 6)]);
        let runs = SequenceDetector::default().scan(&board, Position::new(3, 4), TeamColor::Blue);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].anchor, Position::new(3, 2));
        assert_eq!(
            runs[0].tiles,
            (2..=6).map(|col| Position::new(3, col)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn one_placement_can_complete_two_axes() {
        let mut board = Board::default();
        place_all(
            &mut board,
            TeamColor::Red,
            &[(5, 1), (5, 2), (5, 3), (5, 4), (1, 5), (2, 5), (3, 5), (4, 5), (5, 5)],
        );
        let mut sequences = Vec::new();
        let detector = SequenceDetector::default();
        assert!(detector.detect(&board, Position::new(5, 5), TeamColor::Red, &mut sequences));
        assert_eq!(sequences.len(), 2);
        let axes: Vec<Axis> = sequences.iter().map(|s| s.axis).collect();
        assert!(axes.contains(&Axis::Horizontal));
        assert!(axes.contains(&Axis::Vertical));
    }

    #[test]
    fn extending_a_registered_run_is_not_new() {
        let mut board = Board::default();
        place_all(&mut board, TeamColor::Green, &[(7, 1), (7, 2), (7, 3), (7, 4), (7, 5)]);
        let detector = SequenceDetector::default();
        let mut sequences = Vec::new();
        detector.register(&board, Position::new(7, 5), TeamColor::Green, &mut sequences);
        place_all(&mut board, TeamColor::Green, &[(7, 6)]);
        let added = detector.register(&board, Position::new(7, 6), TeamColor::Green, &mut sequences);
        assert!(added.is_empty());
        assert_eq!(sequences.len(), 1);
    }

    #[test]
    fn long_line_yields_a_second_sequence_sharing_one_tile() {
        let mut board = Board::default();
        let detector = SequenceDetector::default();
        let mut sequences = Vec::new();
        place_all(&mut board, TeamColor::Blue, &[(2, 1), (2, 2), (2, 3), (2, 4), (2, 5)]);
        detector.register(&board, Position::new(2, 5), TeamColor::Blue, &mut sequences);
        for col in 6..=8 {
            place_all(&mut board, TeamColor::Blue, &[(2, col)]);
            let added = detector.register(&board, Position::new(2, col), TeamColor::Blue, &mut sequences);
            assert!(added.is_empty());
        }
        place_all(&mut board, TeamColor::Blue, &[(2, 9)]);
        let added = detector.register(&board, Position::new(2, 9), TeamColor::Blue, &mut sequences);
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].anchor, Position::new(2, 5));
        assert_eq!(
            added[0].tiles,
            (5..=9).map(|col| Position::new(2, col)).collect::<Vec<_>>()
        );
        assert_eq!(protected_tiles(&sequences).len(), 9);
        assert_eq!(team_sequence_count(&sequences, TeamColor::Blue), 2);
        assert!(detector
            .register(&board, Position::new(2, 9), TeamColor::Blue, &mut sequences)
            .is_empty());
    }

    #[test]
    fn corner_serves_both_teams() {
        let mut board = Board::default();
        place_all(&mut board, TeamColor::Red, &[(9, 1), (9, 2), (9, 3), (9, 4)]);
        place_all(&mut board, TeamColor::Blue, &[(5, 0), (6, 0), (7, 0), (8, 0)]);
        let detector = SequenceDetector::default();
        let mut sequences = Vec::new();
        detector.register(&board, Position::new(9, 4), TeamColor::Red, &mut sequences);
        let blue = detector.new_runs(&board, Position::new(8, 0), TeamColor::Blue, &sequences);
        assert_eq!(blue.len(), 1);
        assert!(blue[0].contains(Position::new(9, 0)));
        assert_eq!(blue[0].len(), 5);
    }
}
