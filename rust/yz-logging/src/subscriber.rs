//! Process-wide `tracing` subscriber.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Level;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Used while the terminal UI owns stdout/stderr.
    File(PathBuf),
}

#[derive(Debug)]
pub enum TracingInitError {
    BadLevel(String),
    Io(io::Error),
    AlreadySet,
}

impl std::fmt::Display for TracingInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadLevel(s) => write!(
                f,
                "invalid log level {s:?} (expected error|warn|info|debug|trace)"
            ),
            Self::Io(e) => write!(f, "cannot open log file: {e}"),
            Self::AlreadySet => write!(f, "tracing subscriber already installed"),
        }
    }
}

impl std::error::Error for TracingInitError {}

impl From<io::Error> for TracingInitError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

pub fn parse_level(s: &str) -> Result<Level, TracingInitError> {
    s.trim()
        .parse::<Level>()
        .map_err(|_| TracingInitError::BadLevel(s.to_string()))
}

/// Install the global fmt subscriber at `level`.
pub fn init_tracing(level: &str, target: LogTarget) -> Result<(), TracingInitError> {
    let level = parse_level(level)?;
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);
    let res = match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            let f = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(f)).try_init()
        }
    };
    res.map_err(|_| TracingInitError::AlreadySet)
}
