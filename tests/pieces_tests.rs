//! Pieces tests - templates, clockwise rotation, spawn placement

use tui_arcade::core::pieces::occupied;
use tui_arcade::core::{rotate_cw, template, ActivePiece};
use tui_arcade::types::{PieceKind, SPAWN_X, SPAWN_Y};

fn cells_of(kind: PieceKind, turns: usize) -> Vec<(i8, i8)> {
    let mut shape = *template(kind);
    for _ in 0..turns {
        shape = rotate_cw(&shape);
    }
    occupied(&shape).collect()
}

#[test]
fn test_i_piece_rotations() {
    assert_eq!(cells_of(PieceKind::I, 0), [(0, 1), (1, 1), (2, 1), (3, 1)]);
    assert_eq!(cells_of(PieceKind::I, 1), [(2, 0), (2, 1), (2, 2), (2, 3)]);
    assert_eq!(cells_of(PieceKind::I, 2), [(0, 2), (1, 2), (2, 2), (3, 2)]);
    assert_eq!(cells_of(PieceKind::I, 3), [(1, 0), (1, 1), (1, 2), (1, 3)]);
}

#[test]
fn test_o_piece_is_rotation_invariant() {
    let north = cells_of(PieceKind::O, 0);
    assert_eq!(north, [(1, 1), (2, 1), (1, 2), (2, 2)]);
    for turns in 1..4 {
        assert_eq!(cells_of(PieceKind::O, turns), north);
    }
}

#[test]
fn test_t_piece_rotations() {
    assert_eq!(cells_of(PieceKind::T, 0), [(1, 1), (0, 2), (1, 2), (2, 2)]);
    // Clockwise: the nub now points right.
    assert_eq!(cells_of(PieceKind::T, 1), [(1, 0), (1, 1), (2, 1), (1, 2)]);
}

#[test]
fn test_templates_are_distinct() {
    for a in PieceKind::ALL {
        for b in PieceKind::ALL {
            if a != b {
                assert_ne!(template(a), template(b), "{:?} vs {:?}", a, b);
            }
        }
    }
}

#[test]
fn test_spawn_anchor() {
    for kind in PieceKind::ALL {
        let piece = ActivePiece::spawn(kind);
        assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(piece.kind, kind);
        assert!(piece.cells().all(|(x, y)| (3..7).contains(&x) && (0..4).contains(&y)));
    }
}

#[test]
fn test_rotated_keeps_anchor() {
    let piece = ActivePiece {
        x: 5,
        y: 7,
        ..ActivePiece::spawn(PieceKind::S)
    };
    let turned = piece.rotated();
    assert_eq!((turned.x, turned.y), (5, 7));
    assert_eq!(turned.kind, PieceKind::S);
    assert_ne!(turned.shape, piece.shape);
    assert_eq!(turned.rotated().rotated().rotated(), piece);
}
