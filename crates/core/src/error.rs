use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Failures surfaced by project discovery, target selection and command
/// composition. Manifest read problems never show up here; they degrade to
/// empty manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveError {
    /// No ancestor manifest declaring `<modules>` between the start directory
    /// and the filesystem root.
    ProjectNotFound { start: PathBuf },
    /// An explicitly named module is not part of the discovered project.
    ModuleNotFound(String),
    /// The target module has no applicable profile and the plain goal was not
    /// forced.
    NoProfileAvailable(String),
}

impl ResolveError {
    pub fn is_project_not_found(&self) -> bool {
        matches!(self, ResolveError::ProjectNotFound { .. })
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::ProjectNotFound { start } => {
                write!(
                    f,
                    "Could not find a Maven project (no pom.xml with <modules> above {})",
                    start.display()
                )
            }
            ResolveError::ModuleNotFound(name) => {
                write!(f, "Module '{}' is not part of this Maven project", name)
            }
            ResolveError::NoProfileAvailable(name) => {
                write!(
                    f,
                    "No Maven profile found for module '{}'. Please check its pom.xml or use --build",
                    name
                )
            }
        }
    }
}

impl std::error::Error for ResolveError {}
