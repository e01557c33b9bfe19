//! Board tests - settled-cell grid and row removal

use tui_arcade::core::Board;
use tui_arcade::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, Some(kind));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.filled_count(), 0);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert!(!board.is_occupied(5, 10));

    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(PieceKind::T)));
    assert!(!board.is_occupied(-1, 0));
}

#[test]
fn test_row_full_detection() {
    let mut board = Board::new();
    for x in 0..BOARD_WIDTH as i8 - 1 {
        board.set(x, 19, Some(PieceKind::L));
    }
    assert!(!board.is_row_full(19));

    board.set(BOARD_WIDTH as i8 - 1, 19, Some(PieceKind::L));
    assert!(board.is_row_full(19));
    assert_eq!(board.full_row_count(), 1);
    assert!(!board.is_row_full(BOARD_HEIGHT as usize));
}

#[test]
fn test_remove_row_shifts_rows_above() {
    let mut board = Board::new();
    fill_row(&mut board, 19, PieceKind::I);
    board.set(2, 18, Some(PieceKind::S));
    board.set(7, 0, Some(PieceKind::Z));

    board.remove_row(19);

    assert_eq!(board.get(2, 19), Some(Some(PieceKind::S)));
    assert_eq!(board.get(7, 1), Some(Some(PieceKind::Z)));
    assert!(board.row(0).unwrap().iter().all(|c| c.is_none()));
    assert_eq!(board.filled_count(), 2);
    assert_eq!(board.cells().len(), BOARD_WIDTH as usize * BOARD_HEIGHT as usize);
}

#[test]
fn test_remove_top_row() {
    let mut board = Board::new();
    fill_row(&mut board, 0, PieceKind::O);
    board.remove_row(0);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_to_rows_layout() {
    let mut board = Board::new();
    board.set(3, 4, Some(PieceKind::J));
    let rows = board.to_rows();
    assert_eq!(rows.len(), BOARD_HEIGHT as usize);
    assert!(rows.iter().all(|r| r.len() == BOARD_WIDTH as usize));
    assert_eq!(rows[4][3], Some(PieceKind::J));

    board.clear();
    assert_eq!(board.filled_count(), 0);
}
