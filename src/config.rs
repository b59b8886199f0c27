//! Runtime configuration for the terminal game.
//!
//! Values come from the environment first and are then overridden by
//! command-line flags:
//!
//! | Variable | Flag | Default |
//! |----------|------|---------|
//! | `PIXEL_TETRIS_SEED` | `--seed <u32>` | clock-derived |
//! | `PIXEL_TETRIS_FALL_MS` | `--fall-ms <u32>` | 250 |
//! | `PIXEL_TETRIS_COLLISION` | `--collision axis\|exact` | `axis` |
//! | `PIXEL_TETRIS_ROTATION_GUARD` | `--rotation-guard` | off |
//! | `PIXEL_TETRIS_LOG_PATH` | `--log <path>` | none |

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::core::Rules;
use crate::types::{CollisionRule, FALL_INTERVAL_MS};

pub const USAGE: &str = "\
usage: pixel-tetris [--seed N] [--fall-ms MS] [--collision axis|exact] [--rotation-guard] [--log PATH]

keys: arrows or WASD move and rotate, Space starts, Esc pauses, q quits";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Fixed shape seed; `None` derives one from the clock
    pub seed: Option<u32>,
    pub fall_interval_ms: u32,
    pub collision: CollisionRule,
    pub rotation_guard: bool,
    /// JSON-lines event log destination
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            fall_interval_ms: FALL_INTERVAL_MS,
            collision: CollisionRule::AxisDecoupled,
            rotation_guard: false,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup; unparsable values fall back to the defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("PIXEL_TETRIS_SEED").and_then(|s| s.trim().parse().ok());
        let fall_interval_ms = lookup("PIXEL_TETRIS_FALL_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(defaults.fall_interval_ms);
        let collision = lookup("PIXEL_TETRIS_COLLISION")
            .and_then(|s| CollisionRule::from_str(s.trim()))
            .unwrap_or(defaults.collision);
        let rotation_guard = lookup("PIXEL_TETRIS_ROTATION_GUARD")
            .map(|v| is_truthy(&v))
            .unwrap_or(defaults.rotation_guard);
        let log_path = lookup("PIXEL_TETRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            seed,
            fall_interval_ms,
            collision,
            rotation_guard,
            log_path,
        }
    }

    pub fn rules(&self) -> Rules {
        Rules {
            fall_interval_ms: self.fall_interval_ms,
            collision: self.collision,
            rotation_guard: self.rotation_guard,
        }
    }

    /// The configured seed, or one derived from the current time
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

fn is_truthy(v: &str) -> bool {
    let v = v.trim();
    v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
}

/// Apply command-line flags on top of `base`.
///
/// Returns `Ok(None)` when help was requested.
pub fn parse_args(mut base: GameConfig, args: &[String]) -> Result<Option<GameConfig>> {
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(None),
            "--seed" => {
                let v = flag_value(args, &mut i, "--seed")?;
                base.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--fall-ms" => {
                let v = flag_value(args, &mut i, "--fall-ms")?;
                base.fall_interval_ms = v
                    .parse::<u32>()
                    .ok()
                    .filter(|&ms| ms > 0)
                    .ok_or_else(|| anyhow!("invalid --fall-ms value: {}", v))?;
            }
            "--collision" => {
                let v = flag_value(args, &mut i, "--collision")?;
                base.collision = CollisionRule::from_str(v)
                    .ok_or_else(|| anyhow!("invalid --collision value: {} (expected axis or exact)", v))?;
            }
            "--rotation-guard" => base.rotation_guard = true,
            "--log" => {
                let v = flag_value(args, &mut i, "--log")?;
                base.log_path = Some(v.to_string());
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(Some(base))
}

fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}
