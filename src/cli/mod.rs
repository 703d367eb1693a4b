//! Command-line interface.

mod commands;
mod icons;
mod render;

pub use commands::{is_verbose, run};
