//! Screenshot analysis operations.
//!
//! [`VisualAnalyzer`] is the entry point callers use. It wires the processing
//! stages in [`crate::processors`] to file-system inputs and outputs.

mod analyzer;
pub mod description;

pub use analyzer::VisualAnalyzer;
pub use description::{CaptureInfo, describe_screenshot};
