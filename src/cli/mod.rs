pub mod args;
pub mod commands;

pub use args::{Cli, Commands, Selection};
pub use commands::{run, setup_logging};
