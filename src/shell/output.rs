use colored::Colorize;

use crate::ext::SystemTimeExt;
use crate::filesystem::{Metadata, NodeType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub node_type: NodeType,
}

/// Result of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Done,
    Content(String),
    Listing(Vec<ListingEntry>),
    Metadata(Metadata),
}

impl Output {
    /// Text to print for this result, if any. Directories in listings carry a
    /// trailing `/` and are coloured when colour output is enabled.
    pub fn render(&self) -> Option<String> {
        match self {
            Output::Done => None,
            Output::Content(content) => Some(content.clone()),
            Output::Listing(entries) => Some(
                entries
                    .iter()
                    .map(|entry| match entry.node_type {
                        NodeType::Directory => format!("{}/", entry.name).blue().bold().to_string(),
                        NodeType::File => entry.name.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Output::Metadata(metadata) => Some(render_metadata(metadata)),
        }
    }
}

fn render_metadata(metadata: &Metadata) -> String {
    let name = if metadata.name.is_empty() {
        "/"
    } else {
        metadata.name.as_str()
    };
    [
        format!("name: {name}"),
        format!("type: {}", metadata.node_type),
        format!("size: {}", metadata.size),
        format!("permissions: {}", metadata.permissions),
        format!("created: {:.6}", metadata.creation_time.unix_seconds()),
        format!("modified: {:.6}", metadata.modification_time.unix_seconds()),
    ]
    .join("\n")
}
