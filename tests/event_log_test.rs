//! Event log tests - records produced by a scripted game

use pixel_tetris::core::GameState;
use pixel_tetris::event_log::{EventLog, LogRecord};
use pixel_tetris::types::Command;

fn apply(game: &mut GameState, log: &mut EventLog<Vec<u8>>, command: Command) {
    let before = game.phase();
    game.apply_command(command);
    log.observe(before, game);
}

fn records(log: EventLog<Vec<u8>>) -> Vec<LogRecord> {
    let bytes = log.into_inner().unwrap();
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn logs_round_start_pause_resume_and_lock() {
    let mut game = GameState::new(99);
    let mut log = EventLog::new(Vec::new());

    apply(&mut game, &mut log, Command::Start);
    apply(&mut game, &mut log, Command::Pause);
    apply(&mut game, &mut log, Command::MoveDown); // ignored while paused
    apply(&mut game, &mut log, Command::Resume);
    while game.field().unwrap().is_empty() {
        apply(&mut game, &mut log, Command::MoveDown);
    }

    let records = records(log);
    assert_eq!(records.len(), 4);

    match &records[0] {
        LogRecord::RoundStart {
            round,
            seed,
            trigger,
            collision,
            ..
        } => {
            assert_eq!(*round, 1);
            assert_eq!(*seed, 99);
            assert_eq!(trigger, "start");
            assert_eq!(collision, "axis");
        }
        other => panic!("unexpected first record: {:?}", other),
    }
    assert!(matches!(records[1], LogRecord::Pause { score: 0, .. }));
    assert!(matches!(records[2], LogRecord::Resume { round: 1, .. }));
    match &records[3] {
        LogRecord::Lock { y, lines_cleared, score, .. } => {
            assert!(*y > 1);
            assert_eq!(*lines_cleared, 0);
            assert_eq!(*score, game.score());
        }
        other => panic!("unexpected lock record: {:?}", other),
    }
}

#[test]
fn logs_loss_and_restart() {
    let mut game = GameState::new(5);
    let mut log = EventLog::new(Vec::new());

    apply(&mut game, &mut log, Command::Start);
    game.round_mut()
        .unwrap()
        .field_mut()
        .insert_cell(pixel_tetris::types::Shape::T, 4, 0);
    let before = game.phase();
    game.lock_active();
    log.observe(before, &mut game);
    apply(&mut game, &mut log, Command::Restart);

    let records = records(log);
    let kinds: Vec<&str> = records
        .iter()
        .map(|r| match r {
            LogRecord::RoundStart { .. } => "round_start",
            LogRecord::Lock { .. } => "lock",
            LogRecord::Pause { .. } => "pause",
            LogRecord::Resume { .. } => "resume",
            LogRecord::Loss { .. } => "loss",
        })
        .collect();
    assert_eq!(kinds, vec!["round_start", "lock", "loss", "round_start"]);

    match &records[3] {
        LogRecord::RoundStart { round, trigger, .. } => {
            assert_eq!(*round, 2);
            assert_eq!(trigger, "restart");
        }
        other => panic!("unexpected record: {:?}", other),
    }
}
