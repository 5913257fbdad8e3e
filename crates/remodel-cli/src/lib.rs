//! CLI library components for the remodel tool.

pub mod demo;
pub mod logging;
pub mod records;
