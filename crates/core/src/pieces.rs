//! Pieces module - 4x4 piece templates and matrix rotation
//!
//! Every piece is a 4x4 occupancy matrix indexed `[row][col]`, anchored on the board
//! by its top-left corner. Rotation is a plain clockwise matrix rotation; wall kicks
//! are handled by the engine, not here.

use serde::{Deserialize, Serialize};

use crate::types::{PieceKind, SPAWN_X, SPAWN_Y};

/// Occupancy matrix, `[row][col]`
pub type ShapeMatrix = [[bool; 4]; 4];

const X: bool = true;
const O: bool = false;

const I_SHAPE: ShapeMatrix = [[O, O, O, O], [X, X, X, X], [O, O, O, O], [O, O, O, O]];
const O_SHAPE: ShapeMatrix = [[O, O, O, O], [O, X, X, O], [O, X, X, O], [O, O, O, O]];
const T_SHAPE: ShapeMatrix = [[O, O, O, O], [O, X, O, O], [X, X, X, O], [O, O, O, O]];
const S_SHAPE: ShapeMatrix = [[O, O, O, O], [O, X, X, O], [X, X, O, O], [O, O, O, O]];
const Z_SHAPE: ShapeMatrix = [[O, O, O, O], [X, X, O, O], [O, X, X, O], [O, O, O, O]];
const J_SHAPE: ShapeMatrix = [[O, O, O, O], [X, O, O, O], [X, X, X, O], [O, O, O, O]];
const L_SHAPE: ShapeMatrix = [[O, O, O, O], [O, O, X, O], [X, X, X, O], [O, O, O, O]];

/// Spawn template for a piece kind
pub fn template(kind: PieceKind) -> &'static ShapeMatrix {
    match kind {
        PieceKind::I => &I_SHAPE,
        PieceKind::O => &O_SHAPE,
        PieceKind::T => &T_SHAPE,
        PieceKind::S => &S_SHAPE,
        PieceKind::Z => &Z_SHAPE,
        PieceKind::J => &J_SHAPE,
        PieceKind::L => &L_SHAPE,
    }
}

/// Rotate a matrix 90° clockwise (transpose, then reverse each row).
pub fn rotate_cw(shape: &ShapeMatrix) -> ShapeMatrix {
    let mut out = [[false; 4]; 4];
    for (row, out_row) in out.iter_mut().enumerate() {
        for (col, cell) in out_row.iter_mut().enumerate() {
            *cell = shape[3 - col][row];
        }
    }
    out
}

/// Offsets `(col, row)` of every occupied cell in a matrix
pub fn occupied(shape: &ShapeMatrix) -> impl Iterator<Item = (i8, i8)> + '_ {
    shape.iter().enumerate().flat_map(|(row, cols)| {
        cols.iter()
            .enumerate()
            .filter(|&(_, &filled)| filled)
            .map(move |(col, _)| (col as i8, row as i8))
    })
}

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Instantiate a kind at the spawn anchor
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: *template(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        occupied(&self.shape).map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Same piece with its shape rotated clockwise, anchor untouched
    pub fn rotated(&self) -> Self {
        Self {
            shape: rotate_cw(&self.shape),
            ..*self
        }
    }
}
