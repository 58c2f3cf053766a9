//! Command-line interface.

mod commands;
mod explore;

pub use commands::{is_verbose, run};
