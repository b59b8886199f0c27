//! Shape catalog - static per-shape geometry
//!
//! Every lookup is a pure function over the closed [`Shape`] enum. Offset tables
//! follow the sprite artwork: the anchor is the top-left corner of the sprite's
//! bounding box, so every table has a cell in column 0 and a cell in row 0.
//!
//! Long, ZLeft and ZRight only define states 0 and 3; Square only defines state 0.
//! Undefined states reuse state 0 so that every state always has four cells.

use crate::types::{Axis, Rotation, Shape};

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// The four cell offsets of a shape in one rotation state
pub type OffsetTable = [CellOffset; 4];

/// Sprite footprint `(width, height)` in pixels.
///
/// One entry per shape; rotated sprites swap width and height through the
/// offset tables, not through this entry.
pub fn footprint(shape: Shape) -> (u16, u16) {
    match shape {
        Shape::Long => (120, 30),
        Shape::T => (90, 60),
        Shape::Square => (60, 60),
        Shape::ZLeft | Shape::ZRight | Shape::LLeft | Shape::LRight => (90, 60),
    }
}

/// Cells between the anchor and the far edge the anchor must stay clear of.
///
/// `Axis::Horizontal` is measured from the right wall, `Axis::Vertical` from the
/// floor. The left clearance is always zero because every offset table has a cell
/// in column 0.
pub fn boundary_clearance(shape: Shape, axis: Axis, rotation: Rotation) -> i8 {
    let table: [i8; 4] = match (axis, shape) {
        (Axis::Horizontal, Shape::Long) => [4, 1, 4, 1],
        (Axis::Horizontal, Shape::Square) => [2, 2, 2, 2],
        (Axis::Horizontal, _) => [3, 2, 3, 2],
        (Axis::Vertical, Shape::Long) => [1, 4, 1, 4],
        (Axis::Vertical, Shape::Square) => [2, 2, 2, 2],
        (Axis::Vertical, _) => [2, 3, 2, 3],
    };
    table[rotation.index()]
}

/// Occupied cell offsets for a shape and rotation state
pub fn occupied_offsets(shape: Shape, rotation: Rotation) -> OffsetTable {
    match shape {
        Shape::Long => long_offsets(rotation),
        Shape::T => t_offsets(rotation),
        Shape::Square => SQUARE,
        Shape::ZLeft => z_left_offsets(rotation),
        Shape::ZRight => z_right_offsets(rotation),
        Shape::LLeft => l_left_offsets(rotation),
        Shape::LRight => l_right_offsets(rotation),
    }
}

/// Vertical extent (rows spanned) of a shape in a rotation state
pub fn height_in_cells(shape: Shape, rotation: Rotation) -> i8 {
    span(&occupied_offsets(shape, rotation), |&(_, dy)| dy)
}

/// Horizontal extent (columns spanned) of a shape in a rotation state
pub fn width_in_cells(shape: Shape, rotation: Rotation) -> i8 {
    span(&occupied_offsets(shape, rotation), |&(dx, _)| dx)
}

fn span(offsets: &[CellOffset], axis: impl Fn(&CellOffset) -> i8) -> i8 {
    offsets.iter().map(axis).max().unwrap_or(0) + 1
}

const SQUARE: OffsetTable = [(0, 0), (1, 0), (0, 1), (1, 1)];

fn long_offsets(rotation: Rotation) -> OffsetTable {
    match rotation {
        Rotation::West => [(0, 0), (0, 1), (0, 2), (0, 3)],
        _ => [(0, 0), (1, 0), (2, 0), (3, 0)],
    }
}

fn t_offsets(rotation: Rotation) -> OffsetTable {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (2, 0), (1, 1)],
        Rotation::East => [(1, 0), (0, 1), (1, 1), (1, 2)],
        Rotation::South => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (0, 2)],
    }
}

fn z_left_offsets(rotation: Rotation) -> OffsetTable {
    match rotation {
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
        _ => [(1, 0), (2, 0), (0, 1), (1, 1)],
    }
}

fn z_right_offsets(rotation: Rotation) -> OffsetTable {
    match rotation {
        Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
        _ => [(0, 0), (1, 0), (1, 1), (2, 1)],
    }
}

fn l_left_offsets(rotation: Rotation) -> OffsetTable {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (2, 0), (0, 1)],
        Rotation::East => [(0, 0), (0, 1), (0, 2), (1, 2)],
        Rotation::South => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn l_right_offsets(rotation: Rotation) -> OffsetTable {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (2, 0), (2, 1)],
        Rotation::East => [(0, 0), (1, 0), (0, 1), (0, 2)],
        Rotation::South => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::West => [(1, 0), (1, 1), (1, 2), (0, 2)],
    }
}
