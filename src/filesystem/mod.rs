//! In-memory filesystem tree.
//!
//! Directories and files are addressed by slash-separated paths and live in
//! a single tree owned by [`FileSystem`]. Mutating operations create missing
//! parent directories on the way; read-only operations fail on the first
//! missing segment.

mod error;
mod file_system;
mod node;
pub mod path;

pub use error::FsError;
pub use file_system::FileSystem;
pub use node::{Metadata, NodeType, ParsePermissionsError, Permissions};
