//! CLI library components for tabinfer.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
