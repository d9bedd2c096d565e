use std::path::{Path, PathBuf};

use compio::fs;
use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::ext::BestEffortPathExt;

/// Reads a host file and decodes it as UTF-8.
pub async fn read_text(path: &Path) -> Result<String, ReadTextError> {
    debug!("Reading {}", path.best_effort_path_display());
    let bytes = fs::read(path).await.context(IoSnafu {
        path: path.to_path_buf(),
    })?;
    debug!("Read {} bytes", bytes.len());
    String::from_utf8(bytes).context(EncodingSnafu {
        path: path.to_path_buf(),
    })
}

#[derive(Debug, Snafu)]
pub enum ReadTextError {
    #[snafu(display("Failed to read {}", path.best_effort_path_display()))]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("{} is not valid UTF-8", path.best_effort_path_display()))]
    EncodingError {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[compio::test]
    async fn test_read_text_from_file() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(temp_file, "mkdir /a").expect("Failed to write to temp file");

        let text = read_text(temp_file.path()).await.unwrap();
        assert_eq!(text, "mkdir /a");
    }

    #[compio::test]
    async fn test_read_text_nonexistent_file() {
        let missing = Path::new("/this/path/does/not/exist.txt");
        match read_text(missing).await {
            Err(ReadTextError::IoError { path, .. }) => assert_eq!(path, missing),
            other => panic!("Expected IoError, got {:?}", other),
        }
    }

    #[compio::test]
    async fn test_read_text_invalid_utf8() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(&[0x66, 0x6f, 0xff, 0xfe])
            .expect("Failed to write to temp file");

        let result = read_text(temp_file.path()).await;
        assert!(matches!(result, Err(ReadTextError::EncodingError { .. })));
    }
}
