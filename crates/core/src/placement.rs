use crate::{Board, Card, CardRule, Position};
use std::collections::BTreeSet;

/// Legal targets for `card`, in row-major order.
pub fn legal_positions(board: &Board, protected: &BTreeSet<Position>, card: &Card) -> Vec<Position> {
    let rule = card.rule();
    board
        .tiles()
        .iter()
        .filter(|tile| !tile.is_corner)
        .filter(|tile| match rule {
            CardRule::PlaceAnywhere => !tile.has_marker(),
            CardRule::RemoveChip => tile.has_marker() && !protected.contains(&tile.position),
            CardRule::Match => {
                !tile.has_marker()
                    && tile
                        .card
                        .is_some_and(|seeded| seeded.same_face(card))
            }
        })
        .map(|tile| tile.position)
        .collect()
}

pub fn can_place(
    board: &Board,
    protected: &BTreeSet<Position>,
    position: Position,
    card: &Card,
) -> bool {
    legal_positions(board, protected, card).contains(&position)
}

pub fn is_dead_card(board: &Board, protected: &BTreeSet<Position>, card: &Card) -> bool {
    legal_positions(board, protected, card).is_empty()
}
