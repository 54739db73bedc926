//! yz-advice: fetches one-line advice over HTTP for the in-game tip box.

pub mod client;
pub mod protocol;

pub use client::HttpAdviceSource;
pub use protocol::{parse_advice, AdviceSlip, AdviceSlipResponse};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
