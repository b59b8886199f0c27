//! Locked field - settled pieces and row clearing
//!
//! The field keeps every settled piece as a [`Fragment`] so a row clear can remove
//! and drop whole pieces. For collision purposes it behaves like a flat set of
//! occupied cells.
//!
//! Coordinates: (x, y) where x ranges 0..8 (left to right), y ranges 0..19 (top to bottom).
//! Row 19's top edge is the floor: a fragment dropped to the floor has its lowest
//! cell in row 18.

use arrayvec::ArrayVec;

use crate::catalog::CellOffset;
use crate::piece::Piece;
use crate::types::{
    Cell, CollisionRule, Coord, Shape, FIELD_COLUMNS, FIELD_ROWS, FLOOR_ROW, FULL_ROW_THRESHOLD,
    LINE_CLEAR_SCORE, LOSS_ROW,
};

/// A settled piece (or a single inserted cell)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    shape: Shape,
    x: i8,
    y: i8,
    offsets: ArrayVec<CellOffset, 4>,
}

impl Fragment {
    fn from_piece(piece: &Piece) -> Self {
        let (x, y) = piece.position();
        let offsets = crate::catalog::occupied_offsets(piece.shape(), piece.rotation());
        Self {
            shape: piece.shape(),
            x,
            y,
            offsets: ArrayVec::from(offsets),
        }
    }

    fn single(shape: Shape, x: i8, y: i8) -> Self {
        let mut offsets = ArrayVec::new();
        offsets.push((0, 0));
        Self { shape, x, y, offsets }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Top row of the fragment
    pub fn top(&self) -> i8 {
        self.y
    }

    /// Row just below the fragment's lowest cell
    pub fn bottom_edge(&self) -> i8 {
        self.y + self.offsets.iter().map(|&(_, dy)| dy).max().unwrap_or(0) + 1
    }

    /// Whether `row` lies in the fragment's vertical span, bottom edge included.
    ///
    /// A fragment resting directly on `row` therefore spans it.
    pub fn spans_row(&self, row: i8) -> bool {
        self.top() <= row && row <= self.bottom_edge()
    }

    /// Absolute cells of the fragment
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.offsets
            .iter()
            .map(move |&(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Move down one row at a time until the bottom edge rests on the floor
    fn drop_to_floor(&mut self) {
        while self.bottom_edge() < FLOOR_ROW {
            self.y += 1;
        }
    }
}

/// Result of [`LockedField::detect_and_clear_lines`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClearOutcome {
    /// Number of full rows that were cleared
    pub lines_cleared: u32,
    /// The stack reached the spawn area; no rows were cleared
    pub lost: bool,
    /// Cleared row indices, top to bottom
    pub rows: ArrayVec<i8, { FIELD_ROWS as usize }>,
}

impl LineClearOutcome {
    /// Points earned by this clear
    pub fn score(&self) -> u32 {
        self.lines_cleared * LINE_CLEAR_SCORE
    }
}

/// The settled pieces of a round
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockedField {
    fragments: Vec<Fragment>,
    rule: CollisionRule,
}

impl LockedField {
    /// Create an empty field with the default (axis-decoupled) collision rule
    pub fn new() -> Self {
        Self::with_rule(CollisionRule::default())
    }

    /// Create an empty field with an explicit collision rule
    pub fn with_rule(rule: CollisionRule) -> Self {
        Self {
            fragments: Vec::new(),
            rule,
        }
    }

    pub fn rule(&self) -> CollisionRule {
        self.rule
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Every locked cell
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.fragments.iter().flat_map(Fragment::cells)
    }

    pub fn cell_count(&self) -> usize {
        self.fragments.iter().map(Fragment::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Exact cell lookup, independent of the collision rule
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.cells().any(|c| c == (x, y))
    }

    /// Append all cells of a resting piece
    pub fn add_piece(&mut self, piece: &Piece) {
        self.fragments.push(Fragment::from_piece(piece));
    }

    /// Append a single locked cell as its own fragment
    pub fn insert_cell(&mut self, shape: Shape, x: i8, y: i8) {
        self.fragments.push(Fragment::single(shape, x, y));
    }

    /// Remove every fragment
    pub fn clear(&mut self) {
        self.fragments.clear();
    }

    /// Whether any cell of `piece` collides with the field
    pub fn collides(&self, piece: &Piece) -> bool {
        self.collides_cells(&piece.occupied_cells())
    }

    /// Whether any of `cells` collides under the field's collision rule
    pub fn collides_cells(&self, cells: &[Coord]) -> bool {
        match self.rule {
            CollisionRule::AxisDecoupled => {
                let (columns, rows) = self.axis_masks();
                cells
                    .iter()
                    .any(|&(x, y)| bit(columns, x) && bit(rows, y))
            }
            CollisionRule::ExactCell => cells.iter().any(|&(x, y)| self.is_occupied(x, y)),
        }
    }

    /// Bit sets of the columns and rows that hold at least one locked cell
    fn axis_masks(&self) -> (u32, u32) {
        self.cells().fold((0u32, 0u32), |(columns, rows), (x, y)| {
            (columns | mask(x), rows | mask(y))
        })
    }

    /// Locked cells per row (cells outside the field are not counted)
    pub fn row_counts(&self) -> [u8; FIELD_ROWS as usize] {
        let mut counts = [0u8; FIELD_ROWS as usize];
        for (_, y) in self.cells() {
            if y >= 0 && y < FIELD_ROWS as i8 {
                counts[y as usize] = counts[y as usize].saturating_add(1);
            }
        }
        counts
    }

    /// Check for a loss, then clear every full row.
    ///
    /// A locked cell at or above [`LOSS_ROW`] reports `lost` before any clearing.
    /// Otherwise every row holding at least [`FULL_ROW_THRESHOLD`] cells is cleared
    /// from the top down: fragments whose span includes the row (or that rest on it)
    /// are removed whole, and fragments starting above it drop until they rest on
    /// the floor.
    pub fn detect_and_clear_lines(&mut self) -> LineClearOutcome {
        let mut outcome = LineClearOutcome::default();

        if self.cells().any(|(_, y)| y <= LOSS_ROW) {
            outcome.lost = true;
            return outcome;
        }

        let counts = self.row_counts();
        for (row, &count) in counts.iter().enumerate() {
            if count >= FULL_ROW_THRESHOLD {
                outcome.rows.push(row as i8);
            }
        }

        for &row in &outcome.rows {
            self.clear_row(row);
        }
        outcome.lines_cleared = outcome.rows.len() as u32;
        outcome
    }

    fn clear_row(&mut self, row: i8) {
        self.fragments.retain(|fragment| !fragment.spans_row(row));
        for fragment in &mut self.fragments {
            if fragment.top() < row {
                fragment.drop_to_floor();
            }
        }
    }

    /// Write the field into a row-major grid (cells outside the grid are skipped)
    pub fn write_grid(&self, out: &mut [[Cell; FIELD_COLUMNS as usize]; FIELD_ROWS as usize]) {
        for row in out.iter_mut() {
            *row = [None; FIELD_COLUMNS as usize];
        }
        for fragment in &self.fragments {
            for (x, y) in fragment.cells() {
                if x >= 0 && x < FIELD_COLUMNS as i8 && y >= 0 && y < FIELD_ROWS as i8 {
                    out[y as usize][x as usize] = Some(fragment.shape());
                }
            }
        }
    }
}

#[inline(always)]
fn mask(v: i8) -> u32 {
    if (0..32).contains(&v) {
        1 << v
    } else {
        0
    }
}

#[inline(always)]
fn bit(set: u32, v: i8) -> bool {
    set & mask(v) != 0
}
