use crate::manifest::ManifestTree;
use crate::paths;
use crate::profile::{ProfileId, ProfileRules};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One directory of a multi-module project together with the profiles it
/// deploys with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    pub absolute_path: PathBuf,
    /// Directory name for the root, the `<module>` entry for children.
    pub name: String,
    /// Declared `artifactId`, or `name` when the manifest has none.
    pub identifier: String,
    pub is_root: bool,
    pub profiles: Vec<ProfileId>,
}

impl Module {
    pub(crate) fn root(
        dir: &Path,
        manifest: &ManifestTree,
        parent: &ManifestTree,
        rules: &ProfileRules,
    ) -> Self {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| dir.display().to_string());

        Self::build(dir.to_path_buf(), name, manifest, parent, true, rules)
    }

    pub(crate) fn child(
        root_dir: &Path,
        entry: &str,
        manifest: &ManifestTree,
        root_manifest: &ManifestTree,
        rules: &ProfileRules,
    ) -> Self {
        let absolute_path = paths::normalize(&root_dir.join(entry));
        Self::build(
            absolute_path,
            entry.to_string(),
            manifest,
            root_manifest,
            false,
            rules,
        )
    }

    fn build(
        absolute_path: PathBuf,
        name: String,
        manifest: &ManifestTree,
        parent: &ManifestTree,
        is_root: bool,
        rules: &ProfileRules,
    ) -> Self {
        let identifier = manifest
            .artifact_id()
            .map(str::to_string)
            .unwrap_or_else(|| name.clone());
        let profiles = rules.resolve(manifest, Some(parent), is_root);

        Self {
            absolute_path,
            name,
            identifier,
            is_root,
            profiles,
        }
    }

    /// Profile used when the caller does not force the plain goal.
    pub fn primary_profile(&self) -> Option<ProfileId> {
        self.profiles.first().copied()
    }

    /// Whether `path` is this module's directory or lies below it.
    pub fn contains(&self, path: &Path) -> bool {
        paths::is_within(&self.absolute_path, path)
    }
}
