use crate::{Card, CardSupply, Rank, TeamColor};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_SIZE: usize = 10;

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The position `steps` away along `(d_row, d_col)`, if it stays inside
    /// a `size`×`size` board.
    pub fn offset(self, d_row: isize, d_col: isize, size: usize) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let pos = Position::new(row, col);
        pos.in_bounds(size).then_some(pos)
    }

    pub fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    pub fn is_corner(self, size: usize) -> bool {
        let last = size.saturating_sub(1);
        (self.row == 0 || self.row == last) && (self.col == 0 || self.col == last)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    Horizontal,
    Vertical,
    Diagonal,
    AntiDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// Step in the positive direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Marker {
    pub team: TeamColor,
    pub placed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tile {
    pub position: Position,
    pub card: Option<Card>,
    pub is_corner: bool,
    pub marker: Option<Marker>,
}

impl Tile {
    pub fn has_marker(&self) -> bool {
        self.marker.is_some()
    }

    pub fn marker_team(&self) -> Option<TeamColor> {
        self.marker.map(|marker| marker.team)
    }

    /// Whether this tile contributes to a run of `team`: its own marker or
    /// a wildcard corner.
    pub fn counts_for(&self, team: TeamColor) -> bool {
        self.is_corner || self.marker_team() == Some(team)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    size: usize,
    tiles: Vec<Tile>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_SIZE)
    }
}

impl Board {
    /// An unseeded board: no cards, no markers, corners flagged.
    pub fn new(size: usize) -> Self {
        let mut tiles = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let position = Position::new(row, col);
                tiles.push(Tile {
                    position,
                    card: None,
                    is_corner: position.is_corner(size),
                    marker: None,
                });
            }
        }
        Self { size, tiles }
    }

    /// A board whose non-corner tiles draw non-Jack cards from `supply`.
    /// Tiles stay empty once the supply runs dry.
    pub fn seeded(size: usize, supply: &mut CardSupply) -> Self {
        let mut board = Self::new(size);
        board.seed(supply);
        board
    }

    pub fn seed(&mut self, supply: &mut CardSupply) {
        for tile in &mut self.tiles {
            tile.marker = None;
            tile.card = if tile.is_corner {
                None
            } else {
                supply.draw_excluding_rank(Rank::Jack)
            };
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.in_bounds(self.size)
    }

    pub fn is_corner(&self, pos: Position) -> bool {
        pos.in_bounds(self.size) && pos.is_corner(self.size)
    }

    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.tiles.get(pos.row * self.size + pos.col)
    }

    pub(crate) fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.tiles.get_mut(pos.row * self.size + pos.col)
    }

    pub fn marker_team(&self, pos: Position) -> Option<TeamColor> {
        self.tile(pos).and_then(Tile::marker_team)
    }

    pub fn counts_for(&self, pos: Position, team: TeamColor) -> bool {
        self.tile(pos).is_some_and(|tile| tile.counts_for(team))
    }

    /// Places a marker on an open, non-corner tile. Returns false when the
    /// tile is a corner, occupied, or out of bounds.
    pub fn place_marker(&mut self, pos: Position, team: TeamColor) -> bool {
        match self.tile_mut(pos) {
            Some(tile) if !tile.is_corner && tile.marker.is_none() => {
                tile.marker = Some(Marker { team, placed: true });
                true
            }
            _ => false,
        }
    }

    pub fn clear_marker(&mut self, pos: Position) -> Option<Marker> {
        self.tile_mut(pos).and_then(|tile| tile.marker.take())
    }

    /// In-bounds positions of the 8-neighborhood.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |(d_row, d_col)| pos.offset(d_row, d_col, self.size))
    }

    pub fn center(&self) -> (f64, f64) {
        let mid = (self.size as f64 - 1.0) / 2.0;
        (mid, mid)
    }

    pub fn marker_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.has_marker()).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let Some(tile) = self.tile(Position::new(row, col)) else {
                    continue;
                };
                let cell = if tile.is_corner {
                    "**".to_string()
                } else if let Some(team) = tile.marker_team() {
                    format!("[{}]", team.symbol())
                } else if let Some(card) = tile.card {
                    card.to_string()
                } else {
                    "..".to_string()
                };
                write!(f, "{cell:>4}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RngState;

    #[test]
    fn seeded_board_has_no_jacks_and_empty_corners() {
        let mut rng = RngState::from_seed(3);
        let mut supply = CardSupply::shuffled(&mut rng);
        let board = Board::seeded(BOARD_SIZE, &mut supply);
        for tile in board.tiles() {
            if tile.is_corner {
                assert!(tile.card.is_none());
            } else {
                let card = tile.card.expect("seeded");
                assert_ne!(card.rank, Rank::Jack);
            }
        }
        assert_eq!(board.tiles().iter().filter(|t| t.is_corner).count(), 4);
    }

    #[test]
    fn corners_reject_markers() {
        let mut board = Board::default();
        assert!(!board.place_marker(Position::new(0, 0), TeamColor::Blue));
        assert!(board.place_marker(Position::new(0, 1), TeamColor::Blue));
        assert!(!board.place_marker(Position::new(0, 1), TeamColor::Red));
    }

    #[test]
    fn offset_respects_bounds() {
        let pos = Position::new(0, 9);
        assert_eq!(pos.offset(0, 1, 10), None);
        assert_eq!(pos.offset(-1, 0, 10), None);
        assert_eq!(pos.offset(1, -1, 10), Some(Position::new(1, 8)));
    }

    #[test]
    fn edge_tiles_have_fewer_neighbors() {
        let board = Board::default();
        assert_eq!(board.neighbors(Position::new(0, 0)).count(), 3);
        assert_eq!(board.neighbors(Position::new(0, 5)).count(), 5);
        assert_eq!(board.neighbors(Position::new(5, 5)).count(), 8);
    }
}
