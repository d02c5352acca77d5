//! Project discovery
//!
//! Walks upward from a start directory to the nearest `pom.xml` that declares
//! `<modules>`, then loads that root and every declared child. Only direct
//! children of the root are modelled.

use crate::manifest::{ManifestReader, ManifestTree, PomReader};
use crate::module::Module;
use crate::paths;
use crate::profile::ProfileRules;
use aemkit_core::error::ResolveError;
use aemkit_core::fs::FileSystem;
use futures_util::future::join_all;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A root module and its declared children, in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    root: Module,
    children: Vec<Module>,
}

impl Project {
    pub fn new(root: Module, children: Vec<Module>) -> Self {
        Self { root, children }
    }

    pub fn root(&self) -> &Module {
        &self.root
    }

    pub fn children(&self) -> &[Module] {
        &self.children
    }

    /// Root first, then children in declaration order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        std::iter::once(&self.root).chain(self.children.iter())
    }

    /// Look a module up by identifier, falling back to its directory entry.
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules()
            .find(|m| m.identifier == id)
            .or_else(|| self.modules().find(|m| m.name == id))
    }

    pub fn len(&self) -> usize {
        1 + self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

pub struct ProjectDiscovery {
    fs: Arc<dyn FileSystem>,
    reader: Arc<dyn ManifestReader>,
    rules: ProfileRules,
}

impl ProjectDiscovery {
    /// Discovery over `pom.xml` files read through `fs`.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        let reader = Arc::new(PomReader::new(Arc::clone(&fs)));
        Self::with_reader(fs, reader)
    }

    pub fn with_reader(fs: Arc<dyn FileSystem>, reader: Arc<dyn ManifestReader>) -> Self {
        Self {
            fs,
            reader,
            rules: ProfileRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: ProfileRules) -> Self {
        self.rules = rules;
        self
    }

    pub async fn discover(&self, start: &Path) -> Result<Project, ResolveError> {
        let start_dir = self.anchor(start);
        debug!("Looking for Maven project above {}", start_dir.display());

        let (root_dir, root_manifest) = self
            .find_root(&start_dir)
            .ok_or_else(|| ResolveError::ProjectNotFound {
                start: start_dir.clone(),
            })?;
        debug!("Project root is {}", root_dir.display());

        let parent_manifest = root_dir
            .parent()
            .map(|parent| self.reader.read(parent))
            .unwrap_or_default();
        let root = Module::root(&root_dir, &root_manifest, &parent_manifest, &self.rules);

        let entries: Vec<String> = root_manifest
            .module_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let children = self
            .load_children(&root_dir, Arc::new(root_manifest), entries)
            .await;

        info!(
            "Discovered Maven project '{}' at {} with {} module(s)",
            root.identifier,
            root_dir.display(),
            children.len()
        );

        Ok(Project::new(root, children))
    }

    /// Canonical form of `path` as discovery sees it, so module paths and
    /// working directories compare like for like.
    pub fn anchor(&self, path: &Path) -> PathBuf {
        match self.fs.canonicalize(path) {
            Ok(path) => path,
            Err(e) => {
                debug!("Using lexical path for {}: {:#}", path.display(), e);
                paths::absolutize(path)
            }
        }
    }

    /// Nearest directory at or above `start` whose manifest declares modules.
    fn find_root(&self, start: &Path) -> Option<(PathBuf, ManifestTree)> {
        let mut current = Some(start);
        while let Some(dir) = current {
            let manifest = self.reader.read(dir);
            if manifest.declares_modules() {
                return Some((dir.to_path_buf(), manifest));
            }
            if !manifest.is_empty() {
                debug!("{} has a manifest without modules, continuing", dir.display());
            }
            current = dir.parent();
        }
        None
    }

    async fn load_children(
        &self,
        root_dir: &Path,
        root_manifest: Arc<ManifestTree>,
        entries: Vec<String>,
    ) -> Vec<Module> {
        let tasks = entries.iter().map(|entry| {
            let reader = Arc::clone(&self.reader);
            let root_manifest = Arc::clone(&root_manifest);
            let rules = self.rules;
            let root_dir = root_dir.to_path_buf();
            let entry = entry.clone();

            tokio::task::spawn_blocking(move || {
                let manifest = reader.read(&paths::normalize(&root_dir.join(&entry)));
                Module::child(&root_dir, &entry, &manifest, &root_manifest, &rules)
            })
        });

        let results = join_all(tasks).await;

        let mut seen = HashSet::new();
        seen.insert(paths::normalize(root_dir));

        let mut children = Vec::with_capacity(results.len());
        for (entry, result) in entries.iter().zip(results) {
            let module = match result {
                Ok(module) => module,
                Err(e) => {
                    warn!("Loading module '{}' failed: {}", entry, e);
                    Module::child(
                        root_dir,
                        entry,
                        &ManifestTree::empty(),
                        &root_manifest,
                        &self.rules,
                    )
                }
            };

            if !seen.insert(module.absolute_path.clone()) {
                warn!(
                    "Skipping module '{}': {} is already part of the project",
                    entry,
                    module.absolute_path.display()
                );
                continue;
            }

            debug!(
                "Module '{}' at {} -> profiles {:?}",
                module.identifier,
                module.absolute_path.display(),
                module.profiles
            );
            children.push(module);
        }
        children
    }
}
