use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Replay file system commands against an in-memory tree")]
pub struct Cli {
    /// Command script to replay, or `-` to read it from stdin
    pub script: PathBuf,

    /// YAML manifest describing the initial tree
    #[clap(long, short)]
    pub seed: Option<PathBuf>,

    /// Report failing commands and continue instead of stopping
    #[clap(long, short)]
    pub keep_going: bool,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}
