//! Domain-level structures shared across the engine.
//!
//! This module groups the result types handed back to callers: classified UI
//! elements, comparison and analysis results, interaction points and heatmaps.

pub mod comparison;
pub mod element;
pub mod interaction;

pub use comparison::{ComparisonJob, DiffResult, ScreenshotAnalysis};
pub use element::{ElementType, UIElement};
pub use interaction::{HeatmapResult, InteractionPoint};
