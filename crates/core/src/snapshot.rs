use crate::piece::Piece;
use crate::types::{Cell, Coord, Phase, Rotation, Shape, FIELD_COLUMNS, FIELD_ROWS};

pub type Grid = [[Cell; FIELD_COLUMNS as usize]; FIELD_ROWS as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub cells: [Coord; 4],
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            shape: value.shape(),
            rotation: value.rotation(),
            x: value.x(),
            y: value.y(),
            cells: value.occupied_cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub grid: Grid,
    pub locked_cells: u32,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<Shape>,
    pub score: u32,
    pub lost: bool,
    pub rounds_started: u32,
    pub fall_timer_ms: u32,
}

impl GameSnapshot {
    /// Reset the per-round fields, keeping phase and counters
    pub fn clear_round(&mut self) {
        self.grid = [[None; FIELD_COLUMNS as usize]; FIELD_ROWS as usize];
        self.locked_cells = 0;
        self.active = None;
        self.next = None;
        self.score = 0;
        self.lost = false;
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Menu,
            grid: [[None; FIELD_COLUMNS as usize]; FIELD_ROWS as usize],
            locked_cells: 0,
            active: None,
            next: None,
            score: 0,
            lost: false,
            rounds_started: 0,
            fall_timer_ms: 0,
        }
    }
}
