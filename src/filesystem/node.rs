use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use derive_more::Display;
use snafu::Snafu;

/// Index of a node inside the owning file system's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(super) usize);

/// Advisory permission flags. Stored and reported, never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    pub read: bool,
    pub write: bool,
    pub execute: bool,
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            read: true,
            write: true,
            execute: false,
        }
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "{}{}{}",
            flag(self.read, 'r'),
            flag(self.write, 'w'),
            flag(self.execute, 'x')
        )
    }
}

impl FromStr for Permissions {
    type Err = ParsePermissionsError;

    /// Parses the three-character `rwx` form, e.g. `rw-` or `r-x`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParsePermissionsError {
            value: value.to_string(),
        };
        let chars: Vec<char> = value.chars().collect();
        let [r, w, x] = chars.as_slice() else {
            return Err(invalid());
        };
        let flag = |c: char, expected: char| match c {
            c if c == expected => Some(true),
            '-' => Some(false),
            _ => None,
        };
        Ok(Permissions {
            read: flag(*r, 'r').ok_or_else(invalid)?,
            write: flag(*w, 'w').ok_or_else(invalid)?,
            execute: flag(*x, 'x').ok_or_else(invalid)?,
        })
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(display("Invalid permissions '{}', expected a form like 'rw-'", value))]
pub struct ParsePermissionsError {
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeType {
    #[display("File")]
    File,
    #[display("Directory")]
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Directory { children: HashMap<String, NodeId> },
    File { content: String },
}

impl NodeKind {
    pub fn empty_directory() -> Self {
        NodeKind::Directory {
            children: HashMap::new(),
        }
    }

    pub fn empty_file() -> Self {
        NodeKind::File {
            content: String::new(),
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Directory { .. } => NodeType::Directory,
            NodeKind::File { .. } => NodeType::File,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub created: SystemTime,
    pub modified: SystemTime,
    pub permissions: Permissions,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(name: impl Into<String>, parent: Option<NodeId>, kind: NodeKind) -> Self {
        let now = SystemTime::now();
        Self {
            name: name.into(),
            parent,
            created: now,
            modified: now,
            permissions: Permissions::default(),
            kind,
        }
    }

    pub fn touch(&mut self) {
        self.modified = SystemTime::now();
    }

    /// Size in bytes: content length for files, zero for directories.
    pub fn size(&self) -> usize {
        match &self.kind {
            NodeKind::File { content } => content.len(),
            NodeKind::Directory { .. } => 0,
        }
    }

    pub fn metadata(&self) -> Metadata {
        Metadata {
            name: self.name.clone(),
            creation_time: self.created,
            modification_time: self.modified,
            size: self.size(),
            permissions: self.permissions,
            node_type: self.kind.node_type(),
        }
    }
}

/// Snapshot of a node's attributes as reported by `stat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub creation_time: SystemTime,
    pub modification_time: SystemTime,
    pub size: usize,
    pub permissions: Permissions,
    pub node_type: NodeType,
}
