//! CLI subcommand implementations.

pub mod evaluate;
pub mod layouts;
pub mod train;
