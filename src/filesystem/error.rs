use snafu::Snafu;

use super::NodeType;

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(visibility(pub(super)))]
pub enum FsError {
    #[snafu(display("Path '{}' does not exist", path))]
    PathNotFound { path: String },
    #[snafu(display("'{}' is not a directory", path))]
    NotADirectory { path: String },
    #[snafu(display("'{}' is not a file", path))]
    NotAFile { path: String },
    #[snafu(display("'{}' already exists as a {}", path, existing))]
    PathConflict { path: String, existing: NodeType },
}
