//! Game state module - the round controller
//!
//! This module ties together the catalog, the falling piece, the locked field and the
//! shape queue. It owns the phase machine (menu, running, paused, lost), the fall
//! timer, scoring and lock handling. Renderers read it through [`GameSnapshot`].
//!
//! [`GameSnapshot`]: crate::snapshot::GameSnapshot

use crate::field::LockedField;
use crate::piece::Piece;
use crate::rng::ShapeQueue;
use crate::types::*;

/// Tunable rules of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Gravity interval; a forced drop fires once the timer exceeds it
    pub fall_interval_ms: u32,
    /// Collision test used by lateral moves and rest detection
    pub collision: CollisionRule,
    /// Revert rotations that leave the field or overlap locked cells
    pub rotation_guard: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            fall_interval_ms: FALL_INTERVAL_MS,
            collision: CollisionRule::AxisDecoupled,
            rotation_guard: false,
        }
    }
}

/// Emitted every time a piece locks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub shape: Shape,
    pub rotation: Rotation,
    pub position: Coord,
    pub lines_cleared: u32,
    /// Score after the lock and its line clears
    pub score: u32,
    pub lost: bool,
}

/// State of one round, from start to loss
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    score: u32,
    active: Piece,
    next: Shape,
    field: LockedField,
    lost: bool,
}

impl RoundState {
    /// Fresh round: empty field, active and look-ahead shapes drawn over all seven
    pub fn new(queue: &mut ShapeQueue, rule: CollisionRule) -> Self {
        let active = queue.draw_any();
        let next = queue.draw_any();
        Self::with_pieces(active, next, LockedField::with_rule(rule))
    }

    /// Round with explicit shapes and field (the active piece spawns at the origin)
    pub fn with_pieces(active: Shape, next: Shape, field: LockedField) -> Self {
        Self {
            score: 0,
            active: Piece::new(active),
            next,
            field,
            lost: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    /// Look-ahead shape
    pub fn next(&self) -> Shape {
        self.next
    }

    pub fn field(&self) -> &LockedField {
        &self.field
    }

    /// Direct field access for setting up positions
    pub fn field_mut(&mut self) -> &mut LockedField {
        &mut self.field
    }

    /// Replace the active piece (used to set up positions)
    pub fn set_active(&mut self, piece: Piece) {
        self.active = piece;
    }

    pub fn lost(&self) -> bool {
        self.lost
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    phase: Phase,
    round: Option<RoundState>,
    queue: ShapeQueue,
    rules: Rules,
    fall_timer_ms: u32,
    /// Number of rounds begun (start and every restart)
    rounds_started: u32,
    quit_requested: bool,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a game in the menu phase with default rules
    pub fn new(seed: u32) -> Self {
        Self::with_rules(seed, Rules::default())
    }

    pub fn with_rules(seed: u32, rules: Rules) -> Self {
        Self {
            phase: Phase::Menu,
            round: None,
            queue: ShapeQueue::new(seed),
            rules,
            fall_timer_ms: 0,
            rounds_started: 0,
            quit_requested: false,
            last_event: None,
        }
    }

    /// Leave the menu and begin the first round
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Menu {
            return false;
        }
        self.begin_round();
        true
    }

    fn begin_round(&mut self) {
        self.round = Some(RoundState::new(&mut self.queue, self.rules.collision));
        self.phase = Phase::Running;
        self.fall_timer_ms = 0;
        self.rounds_started = self.rounds_started.wrapping_add(1);
        self.last_event = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn seed(&self) -> u32 {
        self.queue.seed()
    }

    /// Current (or last finished) round; `None` while in the menu
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// Mutable round access for setting up positions
    pub fn round_mut(&mut self) -> Option<&mut RoundState> {
        self.round.as_mut()
    }

    pub fn score(&self) -> u32 {
        self.round.as_ref().map_or(0, RoundState::score)
    }

    pub fn active(&self) -> Option<Piece> {
        self.round.as_ref().map(|r| r.active)
    }

    pub fn next_shape(&self) -> Option<Shape> {
        self.round.as_ref().map(|r| r.next)
    }

    pub fn field(&self) -> Option<&LockedField> {
        self.round.as_ref().map(|r| &r.field)
    }

    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }

    /// Quit was requested; the front end should stop before the next tick
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut crate::snapshot::GameSnapshot) {
        use crate::snapshot::ActiveSnapshot;

        out.phase = self.phase;
        out.rounds_started = self.rounds_started;
        out.fall_timer_ms = self.fall_timer_ms;
        match &self.round {
            Some(round) => {
                round.field.write_grid(&mut out.grid);
                out.locked_cells = round.field.cell_count() as u32;
                out.active = Some(ActiveSnapshot::from(round.active));
                out.next = Some(round.next);
                out.score = round.score;
                out.lost = round.lost;
            }
            None => out.clear_round(),
        }
    }

    pub fn snapshot(&self) -> crate::snapshot::GameSnapshot {
        let mut s = crate::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a command from the input source.
    ///
    /// Quit is honoured in every phase. Everything else is phase-dependent;
    /// commands that do not apply are ignored and return `false`.
    pub fn apply_command(&mut self, command: Command) -> bool {
        match (self.phase, command) {
            (_, Command::Quit) => {
                self.quit_requested = true;
                true
            }
            (Phase::Menu, Command::Start) => self.start(),
            (Phase::Running, Command::MoveLeft) => self.move_active(Direction::Left),
            (Phase::Running, Command::MoveRight) => self.move_active(Direction::Right),
            (Phase::Running, Command::MoveDown) => self.move_active(Direction::Down),
            (Phase::Running, Command::Rotate) => self.rotate_active(),
            (Phase::Running, Command::Pause) => {
                self.phase = Phase::Paused;
                true
            }
            (Phase::Paused, Command::Resume) => {
                self.phase = Phase::Running;
                true
            }
            (Phase::Lost, Command::Restart) => {
                self.begin_round();
                true
            }
            _ => false,
        }
    }

    /// Advance the fall timer by `elapsed_ms`.
    ///
    /// Once the accumulated time exceeds the fall interval the timer resets and the
    /// active piece is forced down one row. Returns whether a forced drop happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms <= self.rules.fall_interval_ms {
            return false;
        }

        self.fall_timer_ms = 0;
        self.move_active(Direction::Down);
        true
    }

    /// Move the active piece, score downward moves and check for rest
    pub(crate) fn move_active(&mut self, direction: Direction) -> bool {
        let Some(round) = self.round.as_mut() else {
            return false;
        };

        let moved = round.active.move_in(direction, &round.field);
        if direction == Direction::Down {
            round.score = round.score.saturating_add(DROP_SCORE);
        }

        self.settle(direction == Direction::Down);
        moved
    }

    /// Rotate the active piece and check for rest
    pub(crate) fn rotate_active(&mut self) -> bool {
        let guard = self.rules.rotation_guard;
        let Some(round) = self.round.as_mut() else {
            return false;
        };

        let before = round.active.rotation();
        if !round.active.rotate() {
            return false;
        }

        if guard && (!round.active.within_field() || round.field.collides(&round.active)) {
            round.active.set_rotation(before);
            return false;
        }

        self.settle(false);
        true
    }

    /// Lock the active piece if it collides or touches the bottom.
    ///
    /// A piece that moved down into locked cells is first moved back up.
    /// Returns whether a lock happened.
    fn settle(&mut self, after_down: bool) -> bool {
        let Some(round) = self.round.as_mut() else {
            return false;
        };

        let collided = round.field.collides(&round.active);
        if !collided && !round.active.touching_bottom() {
            return false;
        }

        if collided && after_down {
            round.active.move_in(Direction::Up, &round.field);
        }

        self.lock_active();
        true
    }

    /// Move the active piece into the field, promote the look-ahead and clear rows
    pub fn lock_active(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };

        let locked = round.active;
        round.field.add_piece(&locked);

        let promoted = round.next;
        round.active = Piece::new(promoted);
        round.next = self.queue.draw_excluding(promoted);

        let outcome = round.field.detect_and_clear_lines();
        round.score = round.score.saturating_add(outcome.score());

        if outcome.lost {
            round.lost = true;
            self.phase = Phase::Lost;
        }

        self.last_event = Some(LockEvent {
            shape: locked.shape(),
            rotation: locked.rotation(),
            position: locked.position(),
            lines_cleared: outcome.lines_cleared,
            score: round.score,
            lost: outcome.lost,
        });
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(seed: u32) -> GameState {
        let mut state = GameState::new(seed);
        assert!(state.start());
        state
    }

    fn set_active(state: &mut GameState, piece: Piece) {
        state.round_mut().unwrap().set_active(piece);
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase(), Phase::Menu);
        assert!(state.round().is_none());
        assert_eq!(state.score(), 0);
        assert_eq!(state.rounds_started(), 0);
        assert!(!state.quit_requested());
    }

    #[test]
    fn test_game_start() {
        let mut state = GameState::new(12345);
        assert!(state.start());
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.active().unwrap().position(), SPAWN_POSITION);
        assert!(state.field().unwrap().is_empty());
        assert_eq!(state.rounds_started(), 1);

        // A second start is ignored.
        assert!(!state.start());
        assert_eq!(state.rounds_started(), 1);
    }

    #[test]
    fn test_menu_ignores_gameplay_commands() {
        let mut state = GameState::new(1);
        assert!(!state.apply_command(Command::MoveLeft));
        assert!(!state.apply_command(Command::Restart));
        assert_eq!(state.phase(), Phase::Menu);
        assert!(!state.tick(1000));
    }

    #[test]
    fn test_move_down_scores_a_point() {
        let mut state = running(1);
        set_active(&mut state, Piece::new(Shape::Long));

        assert!(state.apply_command(Command::MoveDown));
        assert_eq!(state.score(), 1);
        assert_eq!(state.active().unwrap().y(), 1);
    }

    #[test]
    fn test_lateral_moves_do_not_score() {
        let mut state = running(1);
        set_active(&mut state, Piece::new(Shape::T));

        assert!(state.apply_command(Command::MoveRight));
        assert!(state.apply_command(Command::MoveLeft));
        assert!(!state.apply_command(Command::MoveLeft));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_tick_fires_after_interval() {
        let mut state = running(1);
        set_active(&mut state, Piece::new(Shape::Square));

        assert!(!state.tick(200));
        assert!(!state.tick(50));
        assert_eq!(state.fall_timer_ms(), 250);

        assert!(state.tick(16));
        assert_eq!(state.fall_timer_ms(), 0);
        assert_eq!(state.active().unwrap().y(), 1);
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_custom_fall_interval() {
        let rules = Rules {
            fall_interval_ms: 100,
            ..Rules::default()
        };
        let mut state = GameState::with_rules(3, rules);
        state.start();
        assert!(!state.tick(100));
        assert!(state.tick(1));
    }

    #[test]
    fn test_touching_bottom_locks_and_promotes_next() {
        let mut state = running(7);
        set_active(&mut state, Piece::new(Shape::Long));
        let next = state.next_shape().unwrap();

        for _ in 0..18 {
            state.apply_command(Command::MoveDown);
        }

        let field = state.field().unwrap();
        assert_eq!(field.cell_count(), 4);
        assert!(field.is_occupied(0, 18));
        assert!(field.is_occupied(3, 18));

        let active = state.active().unwrap();
        assert_eq!(active.shape(), next);
        assert_eq!(active.position(), SPAWN_POSITION);
        assert_ne!(state.next_shape().unwrap(), next);

        let event = state.take_last_event().unwrap();
        assert_eq!(event.shape, Shape::Long);
        assert_eq!(event.position, (0, 18));
        assert_eq!(event.score, 18);
        assert!(!event.lost);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_downward_collision_is_undone_before_lock() {
        let rules = Rules {
            collision: CollisionRule::ExactCell,
            ..Rules::default()
        };
        let mut state = GameState::with_rules(5, rules);
        state.start();
        set_active(&mut state, Piece::at(Shape::Square, Rotation::North, 4, 10));
        state
            .round_mut()
            .unwrap()
            .field_mut()
            .insert_cell(Shape::T, 4, 12);

        // Moving into (4, 12) collides; the piece goes back to row 10 and locks there.
        state.apply_command(Command::MoveDown);
        let field = state.field().unwrap();
        assert_eq!(field.cell_count(), 5);
        assert!(field.is_occupied(4, 11));
        assert!(field.is_occupied(5, 10));
    }

    #[test]
    fn test_pause_suspends_everything_but_resume() {
        let mut state = running(1);
        let before = state.active().unwrap();

        assert!(state.apply_command(Command::Pause));
        assert_eq!(state.phase(), Phase::Paused);
        assert!(!state.apply_command(Command::MoveDown));
        assert!(!state.apply_command(Command::Pause));
        assert!(!state.tick(10_000));
        assert_eq!(state.active().unwrap(), before);

        assert!(state.apply_command(Command::Resume));
        assert_eq!(state.phase(), Phase::Running);
    }

    #[test]
    fn test_quit_accepted_in_every_phase() {
        let mut state = GameState::new(1);
        assert!(state.apply_command(Command::Quit));
        assert!(state.quit_requested());

        let mut state = running(1);
        state.apply_command(Command::Pause);
        assert!(state.apply_command(Command::Quit));
        assert!(state.quit_requested());
    }

    #[test]
    fn test_loss_and_restart() {
        let mut state = running(11);
        set_active(&mut state, Piece::new(Shape::T));
        state
            .round_mut()
            .unwrap()
            .field_mut()
            .insert_cell(Shape::Square, 8, 1);

        // Any lock now reports a loss.
        state.lock_active();
        assert_eq!(state.phase(), Phase::Lost);
        assert!(state.round().unwrap().lost());
        assert!(state.take_last_event().unwrap().lost);

        // Gameplay commands are ignored after a loss.
        assert!(!state.apply_command(Command::MoveDown));
        assert!(!state.apply_command(Command::Start));

        assert!(state.apply_command(Command::Restart));
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.score(), 0);
        assert!(state.field().unwrap().is_empty());
        assert!(!state.round().unwrap().lost());
        assert_eq!(state.rounds_started(), 2);
    }

    #[test]
    fn test_rotation_guard_reverts_out_of_field_rotation() {
        let rules = Rules {
            rotation_guard: true,
            ..Rules::default()
        };
        let mut state = GameState::with_rules(1, rules);
        state.start();
        // Vertical bar against the right wall: rotating back to horizontal would poke out.
        set_active(&mut state, Piece::at(Shape::Long, Rotation::West, 8, 5));

        assert!(!state.apply_command(Command::Rotate));
        assert_eq!(state.active().unwrap().rotation(), Rotation::West);
    }

    #[test]
    fn test_rotation_guard_reverts_colliding_rotation() {
        let rules = Rules {
            collision: CollisionRule::ExactCell,
            rotation_guard: true,
            ..Rules::default()
        };
        let mut state = GameState::with_rules(1, rules);
        state.start();
        // Vertical bar in column 3; the horizontal state would cover (5, 5).
        set_active(&mut state, Piece::at(Shape::Long, Rotation::West, 3, 5));
        state
            .round_mut()
            .unwrap()
            .field_mut()
            .insert_cell(Shape::T, 5, 5);

        assert!(!state.apply_command(Command::Rotate));
        let active = state.active().unwrap();
        assert_eq!(active.rotation(), Rotation::West);
        assert_eq!(active.position(), (3, 5));
        // Nothing locked.
        assert_eq!(state.field().unwrap().cell_count(), 1);
    }

    #[test]
    fn test_rotation_without_guard_is_unconditional() {
        let mut state = running(1);
        set_active(&mut state, Piece::at(Shape::Long, Rotation::West, 8, 5));

        assert!(state.apply_command(Command::Rotate));
        assert_eq!(state.active().unwrap().rotation(), Rotation::North);
        assert!(!state.active().unwrap().within_field());
    }

    #[test]
    fn test_square_rotation_is_ignored() {
        let mut state = running(1);
        set_active(&mut state, Piece::new(Shape::Square));
        assert!(!state.apply_command(Command::Rotate));
    }

    #[test]
    fn test_snapshot_reflects_round() {
        let mut state = running(1);
        set_active(&mut state, Piece::new(Shape::Long));
        for _ in 0..18 {
            state.apply_command(Command::MoveDown);
        }

        let snap = state.snapshot();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.score, 18);
        assert_eq!(snap.locked_cells, 4);
        assert_eq!(snap.grid[18][0], Some(Shape::Long));
        assert_eq!(snap.next, state.next_shape());
        assert_eq!(snap.active.unwrap().cells, state.active().unwrap().occupied_cells());
    }

    #[test]
    fn test_menu_snapshot_has_no_round() {
        let snap = GameState::new(1).snapshot();
        assert_eq!(snap.phase, Phase::Menu);
        assert!(snap.active.is_none());
        assert!(snap.next.is_none());
        assert_eq!(snap.score, 0);
    }
}
