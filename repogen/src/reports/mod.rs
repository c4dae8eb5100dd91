//! Report data structures for commands.
//!
//! Commands collect what happened into a report, then render it to an
//! output target.

mod describe;
mod generate;
mod output;

pub use describe::DescribeReport;
pub use generate::{GenerateReport, GenerationResult};
pub use output::{Report, TerminalOutput};
