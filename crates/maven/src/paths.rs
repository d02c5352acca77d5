use std::env;
use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` segments without touching the file system.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` above the root stays at the root.
                let ends_in_parent = matches!(
                    normalized.components().next_back(),
                    Some(Component::ParentDir)
                );
                if ends_in_parent || (!normalized.pop() && !path.has_root()) {
                    normalized.push("..");
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Anchor a relative path at the process working directory.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize(path);
    }
    match env::current_dir() {
        Ok(cwd) => normalize(&cwd.join(path)),
        Err(_) => normalize(path),
    }
}

/// Component-wise containment: `/a/ui.apps` contains `/a/ui.apps/x` but not
/// `/a/ui.apps-extra`.
pub fn is_within(ancestor: &Path, path: &Path) -> bool {
    path.starts_with(ancestor)
}
