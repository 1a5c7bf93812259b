pub mod args;
pub mod commands;

pub use args::{Cli, Commands, LayerArg, OutputFormat};
pub use commands::run;
