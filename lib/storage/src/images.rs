use bytes::Bytes;
use pawmatch_core::{ImageAccessError, ImageStore};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Reads report images from a directory on disk
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a report's relative image path under the root
    ///
    /// Absolute paths and `..` components are refused.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, ImageAccessError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || path.is_empty() {
            return Err(ImageAccessError::NotFound(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl ImageStore for FsImageStore {
    fn read(&self, path: &str) -> Result<Bytes, ImageAccessError> {
        let full = self.resolve(path)?;
        match std::fs::read(&full) {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ImageAccessError::NotFound(path.to_string()))
            }
            Err(e) => Err(ImageAccessError::Unreadable {
                path: path.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("lost")).unwrap();
        std::fs::write(dir.path().join("lost/1.png"), b"png-bytes").unwrap();
        let store = FsImageStore::new(dir.path());

        assert_eq!(store.read("lost/1.png").unwrap(), Bytes::from_static(b"png-bytes"));
        assert_eq!(
            store.read("lost/2.png"),
            Err(ImageAccessError::NotFound("lost/2.png".to_string()))
        );
    }

    #[test]
    fn test_refuses_escaping_paths() {
        let store = FsImageStore::new("/srv/images");
        assert!(store.resolve("../etc/passwd").is_err());
        assert!(store.resolve("/etc/passwd").is_err());
        assert!(store.resolve("").is_err());
        assert_eq!(
            store.resolve("./found/3.jpg").unwrap(),
            PathBuf::from("/srv/images/./found/3.jpg")
        );
    }
}
