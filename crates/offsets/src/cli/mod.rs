//! CLI support for the `offsets` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod logging;
pub mod output;
