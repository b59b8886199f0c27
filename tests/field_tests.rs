//! LockedField tests - collision rules, loss detection and row clearing

use pixel_tetris::core::{LockedField, Piece};
use pixel_tetris::types::{CollisionRule, Rotation, Shape, FIELD_COLUMNS, LINE_CLEAR_SCORE};

fn fill_row(field: &mut LockedField, row: i8, columns: std::ops::Range<i8>) {
    for x in columns {
        field.insert_cell(Shape::Square, x, row);
    }
}

#[test]
fn test_new_field_is_empty() {
    let field = LockedField::new();
    assert!(field.is_empty());
    assert_eq!(field.cell_count(), 0);
    assert_eq!(field.rule(), CollisionRule::AxisDecoupled);
    assert!(!field.collides(&Piece::new(Shape::T)));
}

#[test]
fn test_add_piece_adds_four_cells() {
    let mut field = LockedField::new();
    field.add_piece(&Piece::at(Shape::LRight, Rotation::East, 3, 12));
    assert_eq!(field.cell_count(), 4);
    assert!(field.is_occupied(3, 12));
    assert!(field.is_occupied(4, 12));
    assert!(field.is_occupied(3, 13));
    assert!(field.is_occupied(3, 14));
}

#[test]
fn test_full_bottom_row_clears_and_scores() {
    let mut field = LockedField::new();
    fill_row(&mut field, 19, 0..FIELD_COLUMNS as i8);
    field.insert_cell(Shape::T, 4, 17);

    let outcome = field.detect_and_clear_lines();
    assert!(!outcome.lost);
    assert_eq!(outcome.lines_cleared, 1);
    assert_eq!(outcome.score(), LINE_CLEAR_SCORE);
    assert_eq!(outcome.rows.as_slice(), &[19]);
    assert_eq!(field.cell_count(), 1);
    assert_eq!(field.row_counts()[19], 0);
    assert!(field.is_occupied(4, 18));
}

#[test]
fn test_eight_cells_do_not_clear() {
    let mut field = LockedField::new();
    fill_row(&mut field, 15, 0..8);

    let outcome = field.detect_and_clear_lines();
    assert_eq!(outcome.lines_cleared, 0);
    assert_eq!(field.cell_count(), 8);
}

#[test]
fn test_loss_reported_before_clearing() {
    let mut field = LockedField::new();
    fill_row(&mut field, 16, 0..FIELD_COLUMNS as i8);
    field.insert_cell(Shape::Long, 2, 1);

    let outcome = field.detect_and_clear_lines();
    assert!(outcome.lost);
    assert_eq!(outcome.lines_cleared, 0);
    assert_eq!(outcome.score(), 0);
    assert_eq!(field.cell_count(), 10);
}

#[test]
fn test_row_two_is_not_a_loss() {
    let mut field = LockedField::new();
    field.insert_cell(Shape::Long, 2, 2);
    assert!(!field.detect_and_clear_lines().lost);
}

#[test]
fn test_clear_removes_spanning_fragments_whole() {
    let mut field = LockedField::new();
    // Vertical bar in column 0 covering rows 10-13.
    field.add_piece(&Piece::at(Shape::Long, Rotation::West, 0, 10));
    fill_row(&mut field, 12, 1..FIELD_COLUMNS as i8);

    let outcome = field.detect_and_clear_lines();
    assert_eq!(outcome.lines_cleared, 1);
    // All four bar cells go, including the ones outside row 12.
    assert!(field.is_empty());
}

#[test]
fn test_clear_removes_fragment_resting_on_row() {
    let mut field = LockedField::new();
    // Horizontal bar in row 11, lying directly on row 12.
    field.add_piece(&Piece::at(Shape::Long, Rotation::North, 0, 11));
    fill_row(&mut field, 12, 0..FIELD_COLUMNS as i8);
    // One row higher: not touching, so it drops instead.
    field.insert_cell(Shape::T, 6, 10);

    let outcome = field.detect_and_clear_lines();
    assert_eq!(outcome.lines_cleared, 1);
    assert_eq!(field.cell_count(), 1);
    assert!(field.is_occupied(6, 18));
}

#[test]
fn test_fragments_above_cleared_row_drop_to_floor() {
    let mut field = LockedField::new();
    field.add_piece(&Piece::at(Shape::T, Rotation::North, 4, 3));
    field.insert_cell(Shape::ZLeft, 7, 16);
    fill_row(&mut field, 12, 0..FIELD_COLUMNS as i8);

    field.detect_and_clear_lines();

    // The T rests with its stem in row 18.
    assert!(field.is_occupied(4, 17));
    assert!(field.is_occupied(6, 17));
    assert!(field.is_occupied(5, 18));
    // Below the cleared row: untouched.
    assert!(field.is_occupied(7, 16));
    assert_eq!(field.cell_count(), 5);
}

#[test]
fn test_multiple_rows_clear_top_down() {
    let mut field = LockedField::new();
    fill_row(&mut field, 17, 0..FIELD_COLUMNS as i8);
    fill_row(&mut field, 18, 0..FIELD_COLUMNS as i8);

    let outcome = field.detect_and_clear_lines();
    assert_eq!(outcome.rows.as_slice(), &[17, 18]);
    assert_eq!(outcome.score(), 2 * LINE_CLEAR_SCORE);
    assert!(field.is_empty());
}

#[test]
fn test_collision_rules_differ_on_disjoint_axes() {
    let cells = [(1, 6), (6, 2)];
    let probe = Piece::at(Shape::Square, Rotation::North, 0, 1);

    let mut decoupled = LockedField::with_rule(CollisionRule::AxisDecoupled);
    let mut exact = LockedField::with_rule(CollisionRule::ExactCell);
    for (x, y) in cells {
        decoupled.insert_cell(Shape::T, x, y);
        exact.insert_cell(Shape::T, x, y);
    }

    // The square covers (1, 2): column 1 and row 2 are both locked, the cell is not.
    assert!(decoupled.collides(&probe));
    assert!(!exact.collides(&probe));
}

#[test]
fn test_clear_empties_field() {
    let mut field = LockedField::new();
    fill_row(&mut field, 5, 0..4);
    field.clear();
    assert!(field.is_empty());
}
