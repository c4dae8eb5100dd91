//! Code generation outputs.
//!
//! - [`ImportCollector`] - Import tracking and deduplication

mod imports;

pub use imports::{Import, ImportCollector};
