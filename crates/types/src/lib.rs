//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, event logging).
//!
//! # Field Dimensions
//!
//! The play field is laid out on a 30-unit pixel grid whose top-left corner sits at
//! pixel (30, 30) and whose far corner sits at pixel (300, 600):
//!
//! - **Width**: 9 columns (indexed 0-8)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Floor**: row 19's top edge; settled pieces rest with their bottom edge on it
//! - **Spawn position**: (0, 0), the top-left cell
//!
//! All engine coordinates are field-relative grid cells. Use
//! [`to_pixels`] when a renderer needs the pixel layout.
//!
//! # Timing And Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Front-end frame interval (~60 FPS) |
//! | `FALL_INTERVAL_MS` | 250 | Gravity: one forced row every 250ms |
//! | `DROP_SCORE` | 1 | Points per downward move (forced or manual) |
//! | `LINE_CLEAR_SCORE` | 50 | Points per cleared row |
//! | `FULL_ROW_THRESHOLD` | 9 | Locked cells a row needs to count as full |
//! | `LOSS_ROW` | 1 | Any locked cell at or above this row ends the round |
//!
//! # Examples
//!
//! ```
//! use pixel_tetris_types::{CollisionRule, Rotation, Shape, FIELD_COLUMNS, FIELD_ROWS};
//!
//! // Sprite-style shape names
//! assert_eq!(Shape::LLeft.as_str(), "left_l");
//!
//! // Rotation states map to the indices 0..=3
//! assert_eq!(Rotation::from_index(2), Rotation::South);
//! assert_eq!(Rotation::South.index(), 2);
//!
//! // Parse a collision rule
//! assert_eq!(CollisionRule::from_str("exact"), Some(CollisionRule::ExactCell));
//!
//! // Field dimensions
//! assert_eq!(FIELD_COLUMNS, 9);
//! assert_eq!(FIELD_ROWS, 20);
//! ```

/// Field width in cells (9 columns)
pub const FIELD_COLUMNS: u8 = 9;

/// Field height in cells (20 rows)
pub const FIELD_ROWS: u8 = 20;

/// Row whose top edge is the floor of the field.
///
/// A piece is touching the bottom once its anchor row reaches
/// `FLOOR_ROW - bottom clearance`.
pub const FLOOR_ROW: i8 = 19;

/// Pixels per grid cell
pub const CELL_PX: i16 = 30;

/// Pixel position of the field's top-left corner
pub const FIELD_ORIGIN_PX: (i16, i16) = (30, 30);

/// Pixel position of the field's bottom-right corner
pub const FIELD_FAR_EDGE_PX: (i16, i16) = (300, 600);

/// Anchor of a freshly spawned piece
pub const SPAWN_POSITION: Coord = (0, 0);

/// Front-end frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval: a forced downward move fires once the accumulator exceeds this
pub const FALL_INTERVAL_MS: u32 = 250;

/// Points for each downward move
pub const DROP_SCORE: u32 = 1;

/// Points for each cleared row
pub const LINE_CLEAR_SCORE: u32 = 50;

/// Number of locked cells that makes a row full
pub const FULL_ROW_THRESHOLD: u8 = 9;

/// A locked cell at or above this row means the stack reached the spawn area
pub const LOSS_ROW: i8 = 1;

/// A grid coordinate `(column, row)`, field-relative.
pub type Coord = (i8, i8);

/// Convert a field cell into the top-left pixel of that cell.
///
/// ```
/// use pixel_tetris_types::to_pixels;
///
/// assert_eq!(to_pixels((0, 0)), (30, 30));
/// assert_eq!(to_pixels((8, 19)), (270, 600));
/// ```
pub fn to_pixels(cell: Coord) -> (i16, i16) {
    (
        FIELD_ORIGIN_PX.0 + cell.0 as i16 * CELL_PX,
        FIELD_ORIGIN_PX.1 + cell.1 as i16 * CELL_PX,
    )
}

/// The seven falling shapes
///
/// Each shape keeps its sprite name in [`Shape::as_str`]:
/// - **Long**: 4x1 bar
/// - **T**: T-shaped
/// - **Square**: 2x2 block
/// - **ZLeft** / **ZRight**: skew pieces
/// - **LLeft** / **LRight**: L pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Long,
    T,
    Square,
    ZLeft,
    ZRight,
    LLeft,
    LRight,
}

impl Shape {
    /// All shapes in catalog order
    pub const ALL: [Shape; 7] = [
        Shape::Long,
        Shape::T,
        Shape::Square,
        Shape::ZLeft,
        Shape::ZRight,
        Shape::LLeft,
        Shape::LRight,
    ];

    /// Position in [`Shape::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Shape::Long => 0,
            Shape::T => 1,
            Shape::Square => 2,
            Shape::ZLeft => 3,
            Shape::ZRight => 4,
            Shape::LLeft => 5,
            Shape::LRight => 6,
        }
    }

    /// Sprite-style name
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Long => "long",
            Shape::T => "t",
            Shape::Square => "square",
            Shape::ZLeft => "left_z",
            Shape::ZRight => "right_z",
            Shape::LLeft => "left_l",
            Shape::LRight => "right_l",
        }
    }
}

/// Rotation states 0..=3
///
/// - **North**: state 0, spawn orientation
/// - **East**: state 1
/// - **South**: state 2
/// - **West**: state 3
///
/// The plain cycle goes North → East → South → West → North. Some shapes skip
/// states; the per-shape walk lives in the engine's piece module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation state index (0..=3)
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from a state index, wrapping modulo 4
    pub fn from_index(i: usize) -> Self {
        match i % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Next state in the plain 0→1→2→3→0 cycle
    pub fn next(&self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// Direction of a single-cell piece move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    /// Gravity / soft drop, never blocked at the piece level
    Down,
    /// Only used to undo a downward move into locked cells
    Up,
}

impl Direction {
    /// Grid delta `(dx, dy)` of one step
    pub fn delta(&self) -> Coord {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
        }
    }
}

/// Boundary axis for clearance lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Clearance from the right edge
    Horizontal,
    /// Clearance from the floor
    Vertical,
}

/// How a piece cell is tested against the locked field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionRule {
    /// A cell collides when its column appears anywhere in the locked column set
    /// and its row appears anywhere in the locked row set.
    #[default]
    AxisDecoupled,
    /// A cell collides only when the exact `(column, row)` pair is locked.
    ExactCell,
}

impl CollisionRule {
    /// Parse from string: "axis" | "decoupled" or "exact" | "cell"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "axis" | "decoupled" | "axis-decoupled" => Some(CollisionRule::AxisDecoupled),
            "exact" | "cell" | "exact-cell" => Some(CollisionRule::ExactCell),
            _ => None,
        }
    }

    /// Short name, as accepted by `from_str` and written to the event log
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionRule::AxisDecoupled => "axis",
            CollisionRule::ExactCell => "exact",
        }
    }
}

/// Commands accepted by the round controller
///
/// These come from the input collaborator; the controller decides per phase
/// which ones apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down (scores a point)
    MoveDown,
    /// Advance the rotation state
    Rotate,
    /// Suspend gameplay
    Pause,
    /// Leave the paused phase
    Resume,
    /// Leave the program (checked between ticks)
    Quit,
    /// Leave the menu and begin the first round
    Start,
    /// Begin a fresh round after a loss
    Restart,
}

impl Command {
    /// camelCase name, as written to the event log
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::MoveDown => "moveDown",
            Command::Rotate => "rotate",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Quit => "quit",
            Command::Start => "start",
            Command::Restart => "restart",
        }
    }
}

/// Controller phase
///
/// `Menu → Running → (Lost | Running)`, `Lost → Running` on restart,
/// `Running ⇄ Paused`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Menu,
    Running,
    Paused,
    Lost,
}

/// A cell of the rendered field grid
///
/// - `None`: Empty cell
/// - `Some(Shape)`: Cell locked by a fragment of the given shape
pub type Cell = Option<Shape>;
