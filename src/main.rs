//! Terminal runner (default binary).
//!
//! A single-threaded loop: draw the current snapshot, wait for a key until the next
//! frame is due, apply at most one command, then advance the fall timer. Quit is
//! checked between frames.

use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use pixel_tetris::config::{parse_args, GameConfig, USAGE};
use pixel_tetris::core::{GameSnapshot, GameState};
use pixel_tetris::event_log::EventLog;
use pixel_tetris::input::handle_key_event;
use pixel_tetris::term::{GameView, TerminalRenderer};
use pixel_tetris::types::FRAME_MS;

type FileLog = EventLog<BufWriter<File>>;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(config) = parse_args(GameConfig::from_env(), &args)? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let mut log = match config.log_path.as_deref() {
        Some(path) => match EventLog::open(path) {
            Ok(log) => Some(log),
            Err(e) => {
                eprintln!("[pixel-tetris] {:#}; continuing without event log", e);
                None
            }
        },
        None => None,
    };

    let mut term = TerminalRenderer::new(GameView::default());
    term.enter()?;

    let result = run(&mut term, &config, log.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(e) = log.as_mut().and_then(EventLog::take_error) {
        eprintln!("[pixel-tetris] {:#}", e);
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &GameConfig, mut log: Option<&mut FileLog>) -> Result<()> {
    let mut game = GameState::with_rules(config.resolve_seed(), config.rules());
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_tick = Instant::now();

    while !game.quit_requested() {
        game.snapshot_into(&mut snap);
        term.draw(&snap)?;

        // Input with timeout until the next frame.
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(command) = handle_key_event(key, game.phase()) {
                        let before = game.phase();
                        game.apply_command(command);
                        if let Some(log) = log.as_deref_mut() {
                            log.observe(before, &mut game);
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            let before = game.phase();
            game.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
            if let Some(log) = log.as_deref_mut() {
                log.observe(before, &mut game);
            }
        }
    }

    Ok(())
}
