//! yz-logging: NDJSON game events + tracing setup.
//!
//! Game logs are append-only, one JSON object per line, so a crashed session
//! still leaves every completed line readable.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::Serialize;

use yz_core::{EngineEvent, Mode, Outcome, RULESET_ID};

pub mod subscriber;

pub use subscriber::{init_tracing, LogTarget, TracingInitError};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bumped whenever an event shape changes.
pub const LOG_SCHEMA_VERSION: u32 = 1;

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

/// Versioning fields carried by every event.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfoV1 {
    pub schema_version: u32,
    pub ruleset_id: &'static str,
    pub app_version: &'static str,
}

impl VersionInfoV1 {
    pub fn current() -> Self {
        Self {
            schema_version: LOG_SCHEMA_VERSION,
            ruleset_id: RULESET_ID,
            app_version: yz_core::VERSION,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,
    pub game_id: u64,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub player: usize,
    pub dice: [u8; 5],
    pub rolls_used: u8,

    pub category: &'static str,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameOverEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub totals: Vec<u32>,
    /// `None` on a tie.
    pub winner: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdviceEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    /// "requested" | "received" | "discarded"
    pub status: &'static str,
    pub text: Option<String>,
}

fn mode_name(m: Mode) -> &'static str {
    match m {
        Mode::ModeSelection => "mode_selection",
        Mode::NameInput => "name_input",
        Mode::HowToPlay => "how_to_play",
        Mode::Playing => "playing",
        Mode::GameOver => "game_over",
    }
}

#[derive(Debug)]
pub enum NdjsonError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for NdjsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "log io error: {e}"),
            Self::Json(e) => write!(f, "log encode error: {e}"),
        }
    }
}

impl std::error::Error for NdjsonError {}

impl From<io::Error> for NdjsonError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for NdjsonError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

/// Turns engine events into log lines.
pub struct GameLogger {
    w: NdjsonWriter,
}

impl GameLogger {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Ok(Self {
            w: NdjsonWriter::open_append_with_flush(path, 1)?,
        })
    }

    /// Write one line per event worth keeping. Rolls and plain mode changes
    /// other than restarts are skipped; the committed turn records the final dice.
    pub fn log_events(
        &mut self,
        game_id: u64,
        events: &[EngineEvent],
    ) -> Result<(), NdjsonError> {
        for ev in events {
            let ts_ms = now_ms();
            let v = VersionInfoV1::current();
            match ev {
                EngineEvent::GameStarted { names } => self.w.write_event(&SessionEventV1 {
                    event: "game_started",
                    ts_ms,
                    v,
                    game_id,
                    detail: names.join(", "),
                })?,
                EngineEvent::ModeChanged {
                    from,
                    to: Mode::ModeSelection,
                } if *from != Mode::HowToPlay => self.w.write_event(&SessionEventV1 {
                    event: "restart",
                    ts_ms,
                    v,
                    game_id,
                    detail: format!("from {}", mode_name(*from)),
                })?,
                EngineEvent::ScoreCommitted {
                    player,
                    category,
                    score,
                    hand,
                    rolls_used,
                } => self.w.write_event(&TurnEventV1 {
                    event: "turn",
                    ts_ms,
                    v,
                    game_id,
                    player: *player,
                    dice: *hand,
                    rolls_used: *rolls_used,
                    category: category.name(),
                    score: *score,
                })?,
                EngineEvent::GameOver { outcome, totals } => {
                    self.w.write_event(&GameOverEventV1 {
                        event: "game_over",
                        ts_ms,
                        v,
                        game_id,
                        totals: totals.clone(),
                        winner: match outcome {
                            Outcome::Winner(i) => Some(*i),
                            Outcome::Tie => None,
                        },
                    })?
                }
                EngineEvent::AdviceRequested { .. } => self.w.write_event(&AdviceEventV1 {
                    event: "advice",
                    ts_ms,
                    v,
                    game_id,
                    status: "requested",
                    text: None,
                })?,
                EngineEvent::AdviceReceived { text } => self.w.write_event(&AdviceEventV1 {
                    event: "advice",
                    ts_ms,
                    v,
                    game_id,
                    status: "received",
                    text: Some(text.clone()),
                })?,
                EngineEvent::AdviceDiscarded { text } => self.w.write_event(&AdviceEventV1 {
                    event: "advice",
                    ts_ms,
                    v,
                    game_id,
                    status: "discarded",
                    text: Some(text.clone()),
                })?,
                EngineEvent::ModeChanged { .. } | EngineEvent::Rolled { .. } => {}
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()
    }
}

/// Write pretty JSON via a temp file + rename, so readers never see a half-written file.
pub fn write_json_atomic<T: Serialize>(
    path: impl AsRef<Path>,
    value: &T,
) -> Result<(), NdjsonError> {
    let path = path.as_ref();
    let tmp = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(value)?;
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, NdjsonError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice::<T>(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use serde_json::Value;
    use yz_core::Category;

    fn read_ndjson_lenient(path: &Path) -> Vec<Value> {
        let s = fs::read_to_string(path).expect("read");
        s.lines()
            .filter(|l| !l.trim().is_empty())
            .filter_map(|l| serde_json::from_str::<Value>(l).ok())
            .collect()
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn writes_one_valid_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append(&path).unwrap();

        #[derive(Serialize)]
        struct E {
            event: &'static str,
            x: u32,
        }

        w.write_event(&E { event: "e", x: 1 }).unwrap();
        w.write_event(&E { event: "e", x: 2 }).unwrap();
        w.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 2);
        assert_eq!(vals[1]["x"], 2);
    }

    #[test]
    fn lenient_reader_tolerates_trailing_partial_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        {
            let mut log = GameLogger::open(&path).unwrap();
            log.log_events(0, &[EngineEvent::AdviceRequested { player: 0 }])
                .unwrap();
        }

        // Crash mid-line.
        let mut f = OpenOptions::new().append(true).open(&path).unwrap();
        f.write_all(br#"{"event":"turn","score":"#).unwrap();
        f.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 1);
        assert_eq!(vals[0]["status"], "requested");
    }

    #[test]
    fn game_logger_keeps_turns_and_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.ndjson");
        let mut log = GameLogger::open(&path).unwrap();
        log.log_events(
            3,
            &[
                EngineEvent::ModeChanged {
                    from: Mode::NameInput,
                    to: Mode::Playing,
                },
                EngineEvent::Rolled {
                    player: 0,
                    hand: [1, 2, 3, 4, 5],
                    rolls_remaining: 2,
                },
                EngineEvent::ScoreCommitted {
                    player: 0,
                    category: Category::LargeStraight,
                    score: 40,
                    hand: [1, 2, 3, 4, 5],
                    rolls_used: 1,
                },
                EngineEvent::GameOver {
                    outcome: Outcome::Tie,
                    totals: vec![200, 200],
                },
                EngineEvent::ModeChanged {
                    from: Mode::GameOver,
                    to: Mode::ModeSelection,
                },
            ],
        )
        .unwrap();
        log.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        let kinds: Vec<&str> = vals.iter().map(|v| v["event"].as_str().unwrap()).collect();
        assert_eq!(kinds, ["turn", "game_over", "restart"]);
        assert_eq!(vals[0]["game_id"], 3);
        assert_eq!(vals[0]["score"], 40);
        assert_eq!(vals[0]["v"]["ruleset_id"], RULESET_ID);
        assert!(vals[1]["winner"].is_null());
    }

    #[test]
    fn json_write_is_atomic_wrt_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");
        write_json_atomic(&out, &vec![1u32, 2, 3]).unwrap();

        // A stale tmp file from a crashed write must not affect the real one.
        fs::write(out.with_extension("json.tmp"), b"{not valid json").unwrap();
        let got: Vec<u32> = read_json(&out).unwrap();
        assert_eq!(got, [1, 2, 3]);

        write_json_atomic(&out, &vec![7u32]).unwrap();
        let got: Vec<u32> = read_json(&out).unwrap();
        assert_eq!(got, [7]);
    }
}
