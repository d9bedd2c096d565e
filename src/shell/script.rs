use std::path::Path;

use snafu::prelude::*;
use tracing::debug;

use crate::ext::{AsyncTryFrom, ReadTextError, read_text};

use super::command::{Command, CommandParseError};

const STDIN_SCRIPT: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number in the source script.
    pub number: usize,
    pub command: Command,
}

/// Parsed command script. Blank lines and `#` comments are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    lines: Vec<ScriptLine>,
}

impl Script {
    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }
}

impl AsyncTryFrom<&Path> for Script {
    type Error = ScriptError;

    /// Loads a script from the host file system, or from stdin for `-`.
    async fn async_try_from(path: &Path) -> Result<Self, Self::Error> {
        let contents = if path.as_os_str() == STDIN_SCRIPT {
            debug!("Reading script from stdin");
            std::io::read_to_string(std::io::stdin()).context(StdinSnafu)?
        } else {
            read_text(path).await.context(ReadSnafu)?
        };
        contents.as_str().try_into()
    }
}

impl TryFrom<&str> for Script {
    type Error = ScriptError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let lines = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| {
                let trimmed = line.trim();
                !trimmed.is_empty() && !trimmed.starts_with('#')
            })
            .map(|(index, line)| {
                let number = index + 1;
                let command = line.parse::<Command>().context(LineSnafu { line: number })?;
                Ok(ScriptLine { number, command })
            })
            .collect::<Result<Vec<_>, ScriptError>>()?;
        Ok(Script { lines })
    }
}

#[derive(Debug, Snafu)]
pub enum ScriptError {
    #[snafu(display("Failed to load the script"))]
    ReadError { source: ReadTextError },
    #[snafu(display("Failed to read the script from stdin"))]
    StdinError { source: std::io::Error },
    #[snafu(display("Invalid command on line {}", line))]
    LineError {
        line: usize,
        source: CommandParseError,
    },
}
