use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub script: PathBuf,
    pub seed: Option<PathBuf>,
    pub keep_going: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            script: cli.script,
            seed: cli.seed,
            keep_going: cli.keep_going,
        }
    }
}
