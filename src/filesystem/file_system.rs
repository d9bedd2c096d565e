use snafu::OptionExt;
use tracing::debug;

use super::error::{
    FsError, NotADirectorySnafu, NotAFileSnafu, PathConflictSnafu, PathNotFoundSnafu,
};
use super::node::{Metadata, Node, NodeId, NodeKind, NodeType, Permissions};
use super::path;

const ROOT: NodeId = NodeId(0);

/// An in-memory tree of directories and files rooted at `/`.
///
/// Nodes live in an append-only arena; directories map child names to arena
/// indices and every node points back to its parent by index. Nothing is ever
/// removed, so indices stay valid for the lifetime of the file system.
#[derive(Debug, Clone)]
pub struct FileSystem {
    nodes: Vec<Node>,
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("", None, NodeKind::empty_directory())],
        }
    }

    /// Ensures every directory on `path` exists, creating missing ones.
    ///
    /// Succeeds without changes when the chain already exists. Fails with
    /// `PathConflict` if a file sits anywhere on the chain.
    pub fn mkdir(&mut self, path: &str) -> Result<(), FsError> {
        let segments = path::segments(path);
        self.ensure_directories(&segments)?;
        Ok(())
    }

    /// Appends `content` to the file at `path`, creating the file and any
    /// missing parent directories first.
    ///
    /// Repeated calls keep appending to the same file.
    pub fn add_content_to_file(&mut self, path: &str, content: &str) -> Result<(), FsError> {
        let segments = path::segments(path);
        let Some((file_name, parents)) = segments.split_last() else {
            return PathConflictSnafu {
                path: "/",
                existing: NodeType::Directory,
            }
            .fail();
        };

        let dir = self.ensure_directories(parents)?;
        let file = match self.child(dir, file_name) {
            Some(id) => id,
            None => self.attach(dir, file_name, NodeKind::empty_file()),
        };

        let node = self.node_mut(file);
        match &mut node.kind {
            NodeKind::File { content: buffer } => buffer.push_str(content),
            NodeKind::Directory { .. } => {
                return PathConflictSnafu {
                    path: path::display(&segments),
                    existing: NodeType::Directory,
                }
                .fail();
            }
        }
        node.touch();
        Ok(())
    }

    pub fn read_content_from_file(&self, path: &str) -> Result<&str, FsError> {
        let id = self.resolve(path)?;
        match &self.node(id).kind {
            NodeKind::File { content } => Ok(content.as_str()),
            NodeKind::Directory { .. } => NotAFileSnafu {
                path: self.absolute_path(id),
            }
            .fail(),
        }
    }

    /// Names of the immediate children of the directory at `path`, sorted.
    pub fn ls(&self, path: &str) -> Result<Vec<String>, FsError> {
        let id = self.resolve(path)?;
        let NodeKind::Directory { children } = &self.node(id).kind else {
            return NotADirectorySnafu {
                path: self.absolute_path(id),
            }
            .fail();
        };
        let mut names: Vec<String> = children.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }

    pub fn get_metadata(&self, path: &str) -> Result<Metadata, FsError> {
        let id = self.resolve(path)?;
        Ok(self.node(id).metadata())
    }

    /// Replaces the permission flags of the node at `path`. The flags are
    /// advisory and do not affect any other operation.
    pub fn set_permissions(&mut self, path: &str, permissions: Permissions) -> Result<(), FsError> {
        let id = self.resolve(path)?;
        self.node_mut(id).permissions = permissions;
        Ok(())
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        match &self.node(dir).kind {
            NodeKind::Directory { children } => children.get(name).copied(),
            NodeKind::File { .. } => None,
        }
    }

    fn resolve(&self, path: &str) -> Result<NodeId, FsError> {
        let segments = path::segments(path);
        let mut current = ROOT;
        for (depth, segment) in segments.iter().enumerate() {
            let NodeKind::Directory { children } = &self.node(current).kind else {
                return NotADirectorySnafu {
                    path: path::display(&segments[..depth]),
                }
                .fail();
            };
            current = *children.get(*segment).context(PathNotFoundSnafu {
                path: path::display(&segments[..=depth]),
            })?;
        }
        Ok(current)
    }

    /// Walks `segments` from the root, creating missing directories.
    /// Returns the directory the walk ends on.
    fn ensure_directories(&mut self, segments: &[&str]) -> Result<NodeId, FsError> {
        let mut current = ROOT;
        for (depth, segment) in segments.iter().enumerate() {
            current = match self.child(current, segment) {
                Some(id) => match self.node(id).kind.node_type() {
                    NodeType::Directory => id,
                    existing @ NodeType::File => {
                        return PathConflictSnafu {
                            path: path::display(&segments[..=depth]),
                            existing,
                        }
                        .fail();
                    }
                },
                None => self.attach(current, segment, NodeKind::empty_directory()),
            };
        }
        Ok(current)
    }

    /// Creates a node under `parent`, which must be a directory, and bumps
    /// the parent's modification time.
    fn attach(&mut self, parent: NodeId, name: &str, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let node_type = kind.node_type();
        self.nodes.push(Node::new(name, Some(parent), kind));

        let parent_node = self.node_mut(parent);
        if let NodeKind::Directory { children } = &mut parent_node.kind {
            children.insert(name.to_string(), id);
        }
        parent_node.touch();

        debug!("Created {} '{}'", node_type, self.absolute_path(id));
        id
    }

    /// Rebuilds the canonical path of a node from its parent links.
    fn absolute_path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            if node.parent.is_some() {
                names.push(node.name.as_str());
            }
            current = node.parent;
        }
        names.reverse();
        path::display(&names)
    }
}
