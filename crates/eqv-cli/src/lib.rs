//! CLI library components for the equipment data visualizer.

pub mod failure;
pub mod logging;
pub mod pipeline;
pub mod settings;
