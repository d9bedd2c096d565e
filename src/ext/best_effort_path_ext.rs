use std::path::{Path, PathBuf};

/// Displays a host path canonicalized when it exists, absolute otherwise.
pub fn best_effort_path_display(path: &Path) -> String {
    if let Ok(canonical_path) = path.canonicalize() {
        return canonical_path.display().to_string();
    }
    if path.is_absolute() {
        return path.display().to_string();
    }
    std::env::current_dir()
        .map(|current_dir| current_dir.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}

impl BestEffortPathExt for PathBuf {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absolute_missing_path_is_kept() {
        let path = PathBuf::from("/this/path/does/not/exist.yaml");
        assert_eq!(
            path.best_effort_path_display(),
            "/this/path/does/not/exist.yaml"
        );
    }

    #[test]
    fn test_relative_missing_path_is_made_absolute() {
        let display = Path::new("missing-seed.yaml").best_effort_path_display();
        assert!(Path::new(&display).is_absolute());
        assert!(display.ends_with("missing-seed.yaml"));
    }

    #[test]
    fn test_existing_path_is_canonicalized() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dotted = temp_dir.path().join(".");
        let expected = temp_dir.path().canonicalize().unwrap();
        assert_eq!(
            dotted.best_effort_path_display(),
            expected.display().to_string()
        );
    }
}
