//! yz-bench: benchmark-only crate. See `benches/`.
