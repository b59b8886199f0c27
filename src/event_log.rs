//! JSON-lines event log.
//!
//! One JSON object per line, tagged by `type`:
//!
//! ```text
//! {"type":"round_start","ts":1700000000000,"round":1,"seed":42,"trigger":"start","collision":"axis"}
//! {"type":"lock","ts":...,"round":1,"shape":"long","rotation":0,"x":0,"y":18,"lines_cleared":0,"score":18}
//! {"type":"pause","ts":...,"round":1,"score":18}
//! {"type":"resume","ts":...,"round":1}
//! {"type":"loss","ts":...,"round":1,"score":312}
//! ```
//!
//! A write failure disables the log; the error is kept for the caller to report
//! once the terminal is restored.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::core::{GameState, LockEvent};
use crate::types::{Command, Phase};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord {
    RoundStart {
        ts: u64,
        round: u32,
        seed: u32,
        /// `start` or `restart`
        trigger: String,
        /// `axis` or `exact`
        collision: String,
    },
    Lock {
        ts: u64,
        round: u32,
        shape: String,
        rotation: u8,
        x: i8,
        y: i8,
        lines_cleared: u32,
        score: u32,
    },
    Pause {
        ts: u64,
        round: u32,
        score: u32,
    },
    Resume {
        ts: u64,
        round: u32,
    },
    Loss {
        ts: u64,
        round: u32,
        score: u32,
    },
}

impl LogRecord {
    pub fn lock(ts: u64, round: u32, event: &LockEvent) -> Self {
        LogRecord::Lock {
            ts,
            round,
            shape: event.shape.as_str().to_string(),
            rotation: event.rotation.index() as u8,
            x: event.position.0,
            y: event.position.1,
            lines_cleared: event.lines_cleared,
            score: event.score,
        }
    }
}

/// Milliseconds since the Unix epoch
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

pub struct EventLog<W: Write> {
    sink: Option<W>,
    buf: Vec<u8>,
    error: Option<anyhow::Error>,
}

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending.
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| anyhow!("event log: open {} failed: {}", path, e))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Some(sink),
            buf: Vec::with_capacity(256),
            error: None,
        }
    }

    /// Still writing (no failure so far)
    pub fn is_active(&self) -> bool {
        self.sink.is_some()
    }

    /// Append one record as a JSON line.
    pub fn record(&mut self, record: &LogRecord) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };

        self.buf.clear();
        let result = serde_json::to_writer(&mut self.buf, record)
            .map_err(anyhow::Error::from)
            .and_then(|_| {
                self.buf.push(b'\n');
                sink.write_all(&self.buf)?;
                sink.flush()?;
                Ok(())
            });

        if let Err(e) = result {
            self.error = Some(e.context("event log: write failed"));
            self.sink = None;
        }
    }

    /// Record what changed since `before`: a lock, a loss, or a phase change.
    ///
    /// Consumes the game's pending lock event.
    pub fn observe(&mut self, before: Phase, game: &mut GameState) {
        let round = game.rounds_started();
        let ts = now_ms();

        if let Some(event) = game.take_last_event() {
            self.record(&LogRecord::lock(ts, round, &event));
            if event.lost {
                self.record(&LogRecord::Loss {
                    ts,
                    round,
                    score: event.score,
                });
            }
        }

        let after = game.phase();
        if before == after {
            return;
        }
        match (before, after) {
            (Phase::Menu | Phase::Lost, Phase::Running) => {
                let trigger = if before == Phase::Menu {
                    Command::Start
                } else {
                    Command::Restart
                };
                self.record(&LogRecord::RoundStart {
                    ts,
                    round,
                    seed: game.seed(),
                    trigger: trigger.as_str().to_string(),
                    collision: game.rules().collision.as_str().to_string(),
                });
            }
            (Phase::Running, Phase::Paused) => self.record(&LogRecord::Pause {
                ts,
                round,
                score: game.score(),
            }),
            (Phase::Paused, Phase::Running) => self.record(&LogRecord::Resume { ts, round }),
            _ => {}
        }
    }

    /// The write error that disabled the log, if any.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    /// Flush and return the underlying writer (`None` after a failure).
    pub fn into_inner(mut self) -> Option<W> {
        if let Some(sink) = self.sink.as_mut() {
            let _ = sink.flush();
        }
        self.sink
    }
}
