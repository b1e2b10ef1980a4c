pub mod commands;
pub mod render;

use clap::ValueEnum;

#[derive(ValueEnum, Clone, Debug, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
