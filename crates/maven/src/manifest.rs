//! Maven manifest (`pom.xml`) reading
//!
//! A manifest is kept as an owned element tree addressed by slash-separated
//! key paths such as `project/build/plugins/plugin/artifactId`. Namespaces are
//! ignored; only local element names count. Reading never fails: a missing or
//! malformed file is an empty tree.

use aemkit_core::fs::FileSystem;
use anyhow::Result;
use roxmltree::{Document, Node, ParsingOptions};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

pub const MANIFEST_FILE: &str = "pom.xml";

/// One element of a parsed manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestNode {
    pub name: String,
    /// Trimmed text of a leaf element; `None` for elements with child elements.
    pub text: Option<String>,
    pub children: Vec<ManifestNode>,
}

impl ManifestNode {
    fn from_xml(node: Node<'_, '_>) -> Self {
        let children: Vec<ManifestNode> = node
            .children()
            .filter(|c| c.is_element())
            .map(Self::from_xml)
            .collect();

        let text = if children.is_empty() {
            node.text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        } else {
            None
        };

        Self {
            name: node.tag_name().name().to_string(),
            text,
            children,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestTree {
    root: Option<ManifestNode>,
}

impl ManifestTree {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parse(content: &str) -> Result<Self> {
        // Some poms carry a `<!DOCTYPE ...>` line.
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(content, options)?;
        Ok(Self {
            root: Some(ManifestNode::from_xml(doc.root_element())),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Every node at `path`, in document order. The first segment names the
    /// root element.
    pub fn all(&self, path: &str) -> Vec<&ManifestNode> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());

        let root = match (&self.root, segments.next()) {
            (Some(root), Some(first)) if root.name == first => root,
            _ => return Vec::new(),
        };

        let mut current = vec![root];
        for segment in segments {
            current = current
                .into_iter()
                .flat_map(|node| node.children.iter().filter(move |c| c.name == segment))
                .collect();
            if current.is_empty() {
                break;
            }
        }
        current
    }

    /// First text value at `path`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.all(path).into_iter().find_map(|n| n.text.as_deref())
    }

    fn texts(&self, path: &str) -> Vec<&str> {
        self.all(path)
            .into_iter()
            .filter_map(|n| n.text.as_deref())
            .collect()
    }

    pub fn artifact_id(&self) -> Option<&str> {
        self.get("project/artifactId")
    }

    pub fn packaging(&self) -> Option<&str> {
        self.get("project/packaging")
    }

    pub fn plugin_artifact_ids(&self) -> Vec<&str> {
        self.texts("project/build/plugins/plugin/artifactId")
    }

    pub fn profile_ids(&self) -> Vec<&str> {
        self.texts("project/profiles/profile/id")
    }

    pub fn module_names(&self) -> Vec<&str> {
        self.texts("project/modules/module")
    }

    pub fn declares_profile(&self, id: &str) -> bool {
        self.profile_ids().contains(&id)
    }

    pub fn has_plugin(&self, artifact_id: &str) -> bool {
        self.plugin_artifact_ids().contains(&artifact_id)
    }

    pub fn declares_modules(&self) -> bool {
        !self.module_names().is_empty()
    }
}

/// Turns a directory into its manifest tree.
pub trait ManifestReader: Send + Sync {
    fn read(&self, dir: &Path) -> ManifestTree;
}

/// Reads `pom.xml` files through a [`FileSystem`].
pub struct PomReader {
    fs: Arc<dyn FileSystem>,
}

impl PomReader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl ManifestReader for PomReader {
    fn read(&self, dir: &Path) -> ManifestTree {
        let path = self.fs.manifest_path(dir, MANIFEST_FILE);
        if !self.fs.is_file(&path) {
            debug!("No manifest at {}", path.display());
            return ManifestTree::empty();
        }

        let content = match self.fs.read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {:#}", path.display(), e);
                return ManifestTree::empty();
            }
        };

        match ManifestTree::parse(&content) {
            Ok(tree) => tree,
            Err(e) => {
                warn!("Ignoring malformed manifest {}: {}", path.display(), e);
                ManifestTree::empty()
            }
        }
    }
}
