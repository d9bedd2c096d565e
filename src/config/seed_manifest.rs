use std::{borrow::Cow, path::Path};

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, warn};

use crate::{
    ext::{AsyncTryFrom, ReadTextError, read_text},
    filesystem::{FileSystem, FsError, ParsePermissionsError, Permissions},
};

/// Initial tree contents described by a YAML document:
///
/// ```yaml
/// directories:
///   - /a/b/c
/// files:
///   /a/b/c/d.txt: "Hello, World!"
/// permissions:
///   /a/b/c/d.txt: r--
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedManifest {
    directories: Vec<String>,
    files: Vec<(String, String)>,
    permissions: Vec<(String, Permissions)>,
}

impl SeedManifest {
    /// Builds the described tree: directories first, then file contents in
    /// document order, then permission flags.
    pub fn apply(&self, fs: &mut FileSystem) -> Result<(), FsError> {
        for directory in &self.directories {
            fs.mkdir(directory)?;
        }
        for (path, content) in &self.files {
            fs.add_content_to_file(path, content)?;
        }
        for (path, permissions) in &self.permissions {
            fs.set_permissions(path, *permissions)?;
        }
        debug!(
            "Applied seed manifest: {} directories, {} files, {} permission entries",
            self.directories.len(),
            self.files.len(),
            self.permissions.len()
        );
        Ok(())
    }

    fn section<'a, 'input>(
        top_level: &'a LinkedHashMap<Yaml<'input>, Yaml<'input>>,
        name: &'static str,
    ) -> Option<&'a Yaml<'input>> {
        top_level
            .get(&Yaml::Value(Scalar::String(Cow::Borrowed(name))))
            .filter(|section| !matches!(section, Yaml::Value(Scalar::Null)))
    }

    fn parse_directories(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Vec<String>, ManifestError> {
        let Some(section) = Self::section(top_level, "directories") else {
            return Ok(Vec::new());
        };
        let directories = section
            .as_sequence()
            .ok_or(ManifestError::DirectoriesNotSequence)?
            .iter()
            .filter_map(|entry| match entry.as_str() {
                Some(path) => Some(path.to_string()),
                None => {
                    warn!("Skipping invalid directory entry: {:?}", entry);
                    None
                }
            })
            .collect();
        Ok(directories)
    }

    fn parse_files(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Vec<(String, String)>, ManifestError> {
        let Some(section) = Self::section(top_level, "files") else {
            return Ok(Vec::new());
        };
        let files = section
            .as_mapping()
            .ok_or(ManifestError::FilesNotMap)?
            .iter()
            .filter_map(|(key, value)| {
                let Yaml::Value(Scalar::String(path)) = key else {
                    warn!("Skipping file entry with invalid path: {:?}", key);
                    return None;
                };
                match value {
                    Yaml::Value(Scalar::String(content)) => {
                        Some((path.to_string(), content.to_string()))
                    }
                    Yaml::Value(Scalar::Null) => Some((path.to_string(), String::new())),
                    _ => {
                        warn!("Skipping file '{}' with non-string content", path);
                        None
                    }
                }
            })
            .collect();
        Ok(files)
    }

    fn parse_permissions(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Vec<(String, Permissions)>, ManifestError> {
        let Some(section) = Self::section(top_level, "permissions") else {
            return Ok(Vec::new());
        };
        let mut permissions = Vec::new();
        for (key, value) in section
            .as_mapping()
            .ok_or(ManifestError::PermissionsNotMap)?
        {
            let (Some(path), Some(flags)) = (key.as_str(), value.as_str()) else {
                warn!("Skipping invalid permissions entry: {:?}", key);
                continue;
            };
            let parsed = flags
                .parse::<Permissions>()
                .context(InvalidPermissionsSnafu { path })?;
            permissions.push((path.to_string(), parsed));
        }
        Ok(permissions)
    }
}

impl AsyncTryFrom<&Path> for SeedManifest {
    type Error = ManifestError;

    async fn async_try_from(path: &Path) -> Result<Self, Self::Error> {
        let contents = read_text(path).await.context(ReadSnafu)?;
        contents.as_str().try_into()
    }
}

impl TryFrom<&str> for SeedManifest {
    type Error = ManifestError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let contents_vec = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let contents = contents_vec
            .first()
            .ok_or(ManifestError::MalformedManifest)?;

        let top_level = contents
            .as_mapping()
            .ok_or(ManifestError::TopLevelNotMap)?;

        Ok(SeedManifest {
            directories: Self::parse_directories(top_level)?,
            files: Self::parse_files(top_level)?,
            permissions: Self::parse_permissions(top_level)?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ManifestError {
    #[snafu(display("Failed to load the seed manifest"))]
    ReadError { source: ReadTextError },
    #[snafu(display("Failed to parse the seed manifest"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted seed manifest"))]
    MalformedManifest,
    #[snafu(display("Top level of the seed manifest should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Directories section should be a list"))]
    DirectoriesNotSequence,
    #[snafu(display("Files section should be a map"))]
    FilesNotMap,
    #[snafu(display("Permissions section should be a map"))]
    PermissionsNotMap,
    #[snafu(display("Invalid permissions for '{}'", path))]
    InvalidPermissions {
        path: String,
        source: ParsePermissionsError,
    },
}
