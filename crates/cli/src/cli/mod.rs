pub mod commands;
pub mod output;

pub use commands::{CliArgs, Commands, ConfigArgs, MavenArgs, ModulesArgs};
pub use output::{OutputFormat, OutputFormatter};
