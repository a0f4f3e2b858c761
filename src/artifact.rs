use crate::error::{DiffError, DiffResult};
use crate::token::CallToken;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the system temp dir used when no root is given.
pub const DEFAULT_NAMESPACE: &str = "snapdiff";

/// Persists encoded visualizations to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactWriter {
    root: PathBuf,
}

impl Default for ArtifactWriter {
    fn default() -> Self {
        ArtifactWriter::new(std::env::temp_dir().join(DEFAULT_NAMESPACE))
    }
}

impl ArtifactWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ArtifactWriter { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where `write` puts an artifact for `token` when no path is given.
    pub fn default_path(&self, token: CallToken) -> PathBuf {
        self.root.join(format!("visual-diff-{}.png", token))
    }

    /// Writes `bytes` to `path`, or to [`default_path`](Self::default_path)
    /// when `path` is `None`. Missing parent directories are created.
    pub fn write(&self, bytes: &[u8], path: Option<&Path>, token: CallToken) -> DiffResult<PathBuf> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => self.default_path(token),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DiffError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, bytes).map_err(|source| DiffError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), size_bytes = bytes.len(), token = %token, "wrote artifact");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_uses_token() {
        let writer = ArtifactWriter::new("/tmp/x");
        assert_eq!(
            writer.default_path(CallToken::new(26)),
            PathBuf::from("/tmp/x/visual-diff-0000001a.png")
        );
    }

    #[test]
    fn test_default_root_is_namespaced() {
        let writer = ArtifactWriter::default();
        assert!(writer.root().ends_with(DEFAULT_NAMESPACE));
    }

    #[test]
    fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path().join("nested/deeper"));
        let path = writer.write(b"png", None, CallToken::new(1)).unwrap();

        assert!(path.starts_with(dir.path()));
        assert_eq!(fs::read(&path).unwrap(), b"png");
    }

    #[test]
    fn test_write_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out/custom.png");
        let writer = ArtifactWriter::new(dir.path().join("unused"));
        let path = writer.write(b"abc", Some(&target), CallToken::next()).unwrap();

        assert_eq!(path, target);
        assert_eq!(fs::read(&target).unwrap(), b"abc");
        assert!(!dir.path().join("unused").exists());
    }

    #[test]
    fn test_write_into_file_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let err = ArtifactWriter::new(&blocker)
            .write(b"x", None, CallToken::new(2))
            .unwrap_err();
        assert!(matches!(err, DiffError::Io { .. }));
    }
}
