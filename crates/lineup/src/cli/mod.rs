//! Command implementations for the Lineup CLI.

pub mod config;
pub mod tag;
