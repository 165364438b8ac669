//! Subcommand handlers.

pub mod check;
pub mod list;
pub mod run;
