//! Piece module - the falling piece
//!
//! A piece is a shape, a rotation state and a top-left anchor in field cells.
//! Occupied cells are derived on demand from the catalog; the boundary
//! clearances for the current rotation are cached and refreshed on rotation.

use crate::catalog::{boundary_clearance, occupied_offsets};
use crate::field::LockedField;
use crate::types::{Axis, Coord, Direction, Rotation, Shape, FIELD_COLUMNS, FLOOR_ROW, SPAWN_POSITION};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    shape: Shape,
    rotation: Rotation,
    x: i8,
    y: i8,
    right_clearance: i8,
    bottom_clearance: i8,
}

impl Piece {
    /// Create a new piece in rotation state 0 at the spawn position
    pub fn new(shape: Shape) -> Self {
        Self::at(shape, Rotation::North, SPAWN_POSITION.0, SPAWN_POSITION.1)
    }

    /// Create a piece with an explicit rotation and anchor
    pub fn at(shape: Shape, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            shape,
            rotation,
            x,
            y,
            right_clearance: boundary_clearance(shape, Axis::Horizontal, rotation),
            bottom_clearance: boundary_clearance(shape, Axis::Vertical, rotation),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Anchor `(column, row)`
    pub fn position(&self) -> Coord {
        (self.x, self.y)
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    /// Right-wall clearance for the current rotation
    pub fn right_clearance(&self) -> i8 {
        self.right_clearance
    }

    /// Floor clearance for the current rotation
    pub fn bottom_clearance(&self) -> i8 {
        self.bottom_clearance
    }

    /// Absolute cells covered by the piece
    pub fn occupied_cells(&self) -> [Coord; 4] {
        self.cells_shifted(0, 0)
    }

    fn cells_shifted(&self, dx: i8, dy: i8) -> [Coord; 4] {
        occupied_offsets(self.shape, self.rotation).map(|(ox, oy)| (self.x + ox + dx, self.y + oy + dy))
    }

    /// Move one cell in `direction`.
    ///
    /// Left and right are checked against the walls (adjusted by the right
    /// clearance) and against `field`; a blocked move leaves the piece untouched.
    /// Down and up always apply; resting is decided by the controller.
    ///
    /// Returns whether the anchor changed.
    pub fn move_in(&mut self, direction: Direction, field: &LockedField) -> bool {
        let (dx, dy) = direction.delta();
        let allowed = match direction {
            Direction::Left => self.x > 0 && !field.collides_cells(&self.cells_shifted(dx, 0)),
            Direction::Right => {
                self.x < FIELD_COLUMNS as i8 - self.right_clearance
                    && !field.collides_cells(&self.cells_shifted(dx, 0))
            }
            Direction::Down | Direction::Up => true,
        };

        if allowed {
            self.x += dx;
            self.y += dy;
        }
        allowed
    }

    /// Advance the rotation state.
    ///
    /// Square never rotates. Long, ZLeft and ZRight jump from state 0 straight to
    /// state 2 and walk 2 → 3 → 0 from there; every other shape cycles
    /// 0 → 1 → 2 → 3 → 0. The new position is not validated.
    ///
    /// Returns whether the rotation state changed.
    pub fn rotate(&mut self) -> bool {
        let next = match (self.shape, self.rotation) {
            (Shape::Square, _) => return false,
            (Shape::Long | Shape::ZLeft | Shape::ZRight, Rotation::North) => Rotation::South,
            (_, current) => current.next(),
        };
        self.set_rotation(next);
        true
    }

    /// Put the piece back into `rotation`, refreshing clearances.
    pub(crate) fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        self.right_clearance = boundary_clearance(self.shape, Axis::Horizontal, rotation);
        self.bottom_clearance = boundary_clearance(self.shape, Axis::Vertical, rotation);
    }

    /// True once the anchor has reached the floor minus the bottom clearance
    pub fn touching_bottom(&self) -> bool {
        self.y >= FLOOR_ROW - self.bottom_clearance
    }

    /// True when every cell lies inside the 9x20 field
    pub fn within_field(&self) -> bool {
        self.occupied_cells().iter().all(|&(x, y)| {
            x >= 0 && x < FIELD_COLUMNS as i8 && y >= 0 && y <= FLOOR_ROW
        })
    }
}
