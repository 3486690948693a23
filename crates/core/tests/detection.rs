use rusequence_core::{Axis, Board, Position, Sequence, SequenceDetector, TeamColor};

fn mark(board: &mut Board, team: TeamColor, cells: &[(usize, usize)]) {
    for (row, col) in cells {
        assert!(board.place_marker(Position::new(*row, *col), team));
    }
}

fn detect(board: &Board, at: (usize, usize), team: TeamColor) -> Vec<Sequence> {
    let mut sequences = Vec::new();
    SequenceDetector::default().detect(board, Position::new(at.0, at.1), team, &mut sequences);
    sequences
}

#[test]
fn horizontal_five_is_one_sequence() {
    let mut board = Board::default();
    mark(&mut board, TeamColor::Blue, &[(1, 1), (1, 2), (1, 3), (1, 4), (1, 5)]);
    let sequences = detect(&board, (1, 5), TeamColor::Blue);
    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0].axis, Axis::Horizontal);
    assert_eq!(sequences[0].team, TeamColor::Blue);
    assert_eq!(sequences[0].len(), 5);
}

#[test]
fn four_in_a_row_is_not_a_sequence() {
    let mut board = Board::default();
    mark(&mut board, TeamColor::Blue, &[(4, 2), (4, 3), (4, 4), (4, 5)]);
    assert!(detect(&board, (4, 5), TeamColor::Blue).is_empty());
}

#[test]
fn opponent_marker_breaks_the_run() {
    let mut board = Board::default();
    mark(&mut board, TeamColor::Blue, &[(4, 1), (4, 2), (4, 4), (4, 5), (4, 6)]);
    mark(&mut board, TeamColor::Red, &[(4, 3)]);
    assert!(detect(&board, (4, 4), TeamColor::Blue).is_empty());
}

#[test]
fn vertical_and_diagonal_runs() {
    let mut board = Board::default();
    mark(&mut board, TeamColor::Green, &[(2, 7), (3, 7), (4, 7), (5, 7), (6, 7)]);
    let vertical = detect(&board, (4, 7), TeamColor::Green);
    assert_eq!(vertical.len(), 1);
    assert_eq!(vertical[0].axis, Axis::Vertical);

    let mut board = Board::default();
    mark(&mut board, TeamColor::Green, &[(2, 2), (3, 3), (4, 4), (5, 5), (6, 6)]);
    let diagonal = detect(&board, (6, 6), TeamColor::Green);
    assert_eq!(diagonal.len(), 1);
    assert_eq!(diagonal[0].axis, Axis::Diagonal);
    assert_eq!(diagonal[0].anchor, Position::new(2, 2));

    let mut board = Board::default();
    mark(&mut board, TeamColor::Green, &[(2, 6), (3, 5), (4, 4), (5, 3), (6, 2)]);
    let anti = detect(&board, (4, 4), TeamColor::Green);
    assert_eq!(anti.len(), 1);
    assert_eq!(anti[0].axis, Axis::AntiDiagonal);
}

#[test]
fn corner_completes_a_top_row_run() {
    let mut board = Board::default();
    mark(&mut board, TeamColor::Red, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
    let sequences = detect(&board, (0, 1), TeamColor::Red);
    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0].anchor, Position::new(0, 0));
    assert_eq!(sequences[0].tiles[0], Position::new(0, 0));
}

#[test]
fn corner_counts_for_any_team() {
    let mut board = Board::default();
    mark(&mut board, TeamColor::Blue, &[(9, 5), (9, 6), (9, 7), (9, 8)]);
    assert_eq!(detect(&board, (9, 8), TeamColor::Blue).len(), 1);
    let mut board = Board::default();
    mark(&mut board, TeamColor::Green, &[(5, 9), (6, 9), (7, 9), (8, 9)]);
    assert_eq!(detect(&board, (5, 9), TeamColor::Green).len(), 1);
}

#[test]
fn detecting_twice_registers_once() {
    let mut board = Board::default();
    mark(&mut board, TeamColor::Blue, &[(1, 1), (1, 2), (1, 3), (1, 4), (1, 5)]);
    let detector = SequenceDetector::default();
    let mut sequences = Vec::new();
    assert!(detector.detect(&board, Position::new(1, 5), TeamColor::Blue, &mut sequences));
    assert_eq!(sequences.len(), 1);
    assert!(detector.detect(&board, Position::new(1, 5), TeamColor::Blue, &mut sequences));
    assert_eq!(sequences.len(), 1);
    assert!(detector
        .new_runs(&board, Position::new(1, 3), TeamColor::Blue, &sequences)
        .is_empty());
}

#[test]
fn run_length_through_counts_hypothetical_center() {
    let mut board = Board::default();
    mark(&mut board, TeamColor::Red, &[(6, 1), (6, 2), (6, 4)]);
    let length =
        SequenceDetector::run_length_through(&board, Position::new(6, 3), TeamColor::Red, Axis::Horizontal);
    assert_eq!(length, 4);
}

#[test]
fn smaller_board_uses_its_own_corners() {
    let mut board = Board::new(6);
    mark(&mut board, TeamColor::Blue, &[(5, 1), (5, 2), (5, 3), (5, 4)]);
    let sequences = detect(&board, (5, 4), TeamColor::Blue);
    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0].len(), 6);
}
