//! Maven module and profile resolution for multi-module AEM projects.
//!
//! Data flows strictly downward: a [`ManifestReader`] feeds
//! [`resolve_profiles`], [`ProjectDiscovery`] assembles a [`Project`],
//! [`resolve_target`] picks one [`Module`] and [`compose`] renders the Maven
//! command for it.

pub mod command;
pub mod manifest;
pub mod module;
pub mod paths;
pub mod profile;
pub mod project;
pub mod target;

pub use command::{compose, ComposeOptions, ComposedCommand};
pub use manifest::{ManifestReader, ManifestTree, PomReader, MANIFEST_FILE};
pub use module::Module;
pub use profile::{resolve_profiles, BundleRule, ProfileId, ProfileRules};
pub use project::{Project, ProjectDiscovery};
pub use target::{resolve_target, ALL_MODULES};

use aemkit_core::error::ResolveError;
use std::path::Path;

/// Discover the project around `current_dir`, pick the target module and
/// compose its command in one go.
pub async fn resolve_command(
    discovery: &ProjectDiscovery,
    explicit: Option<&str>,
    current_dir: &Path,
    options: &ComposeOptions,
) -> Result<(Module, ComposedCommand), ResolveError> {
    let current_dir = discovery.anchor(current_dir);
    let project = discovery.discover(&current_dir).await?;
    let target = resolve_target(&project, explicit, &current_dir)?;
    let command = compose(target, options)?;
    Ok((target.clone(), command))
}
