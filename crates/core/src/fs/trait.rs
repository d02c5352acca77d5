//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The file operations project discovery needs, behind a trait for testability.
///
/// Implementations must be shareable across threads: child manifests are read
/// concurrently on the blocking pool.
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Canonicalize a path
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Path of the manifest file inside `dir`
    fn manifest_path(&self, dir: &Path, file_name: &str) -> PathBuf {
        dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullFs;

    impl FileSystem for NullFs {
        fn exists(&self, _path: &Path) -> bool {
            false
        }
        fn is_dir(&self, _path: &Path) -> bool {
            false
        }
        fn is_file(&self, _path: &Path) -> bool {
            false
        }
        fn read_to_string(&self, path: &Path) -> Result<String> {
            Err(anyhow::anyhow!("not found: {:?}", path))
        }
        fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
            Ok(path.to_path_buf())
        }
    }

    #[test]
    fn test_manifest_path_joins_file_name() {
        let fs = NullFs;
        assert_eq!(
            fs.manifest_path(Path::new("/repo/ui.apps"), "pom.xml"),
            PathBuf::from("/repo/ui.apps/pom.xml")
        );
    }

    #[test]
    fn test_trait_is_object_safe() {
        let fs: Box<dyn FileSystem> = Box::new(NullFs);
        assert!(fs.read_to_string(Path::new("/x")).is_err());
    }
}
