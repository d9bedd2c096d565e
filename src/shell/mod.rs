//! Line-oriented command scripts replayed against a [`FileSystem`].
//!
//! [`FileSystem`]: crate::filesystem::FileSystem

mod command;
mod output;
mod script;

pub use command::{Command, CommandParseError};
pub use output::{ListingEntry, Output};
pub use script::{Script, ScriptError, ScriptLine};
