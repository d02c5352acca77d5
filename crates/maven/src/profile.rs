//! Deployment profile resolution
//!
//! Picks the AEM auto-install profiles a module should be built with, from its
//! own manifest, its parent's manifest and whether it is the project root. The
//! first profile in the result is the one used for a default deployment.

use crate::manifest::ManifestTree;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

pub const CONTENT_PACKAGE_PACKAGING: &str = "content-package";
pub const CONTENT_PACKAGE_PLUGINS: [&str; 2] = [
    "content-package-maven-plugin",
    "filevault-package-maven-plugin",
];
pub const BUNDLE_INSTALL_PLUGIN: &str = "sling-maven-plugin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileId {
    #[serde(rename = "autoInstallSinglePackage")]
    AutoInstallSinglePackage,
    #[serde(rename = "autoInstallPackage")]
    AutoInstallPackage,
    #[serde(rename = "autoInstallBundle")]
    AutoInstallBundle,
}

impl ProfileId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileId::AutoInstallSinglePackage => "autoInstallSinglePackage",
            ProfileId::AutoInstallPackage => "autoInstallPackage",
            ProfileId::AutoInstallBundle => "autoInstallBundle",
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How `autoInstallBundle` is inferred from the parent's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BundleRule {
    /// Parent declares the profile, the module is not a content package and
    /// the module itself carries the bundle install plugin.
    #[default]
    RequirePlugin,
    /// Parent declares the profile and the module is not a content package.
    ParentProfileOnly,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileRules {
    pub bundle: BundleRule,
}

impl ProfileRules {
    pub fn new(bundle: BundleRule) -> Self {
        Self { bundle }
    }

    pub fn resolve(
        &self,
        manifest: &ManifestTree,
        parent: Option<&ManifestTree>,
        is_root: bool,
    ) -> Vec<ProfileId> {
        let mut profiles = Vec::new();
        let mut push = |id: ProfileId| {
            if !profiles.contains(&id) {
                profiles.push(id);
            }
        };

        if manifest.declares_profile(ProfileId::AutoInstallSinglePackage.as_str()) {
            push(ProfileId::AutoInstallSinglePackage);
        }

        // The aggregator is always deployed as one combined package.
        if is_root {
            push(ProfileId::AutoInstallSinglePackage);
        }

        if manifest.declares_profile(ProfileId::AutoInstallPackage.as_str()) {
            push(ProfileId::AutoInstallPackage);
        }

        let is_content_package = manifest.packaging() == Some(CONTENT_PACKAGE_PACKAGING);
        if is_content_package
            && CONTENT_PACKAGE_PLUGINS
                .iter()
                .any(|plugin| manifest.has_plugin(plugin))
        {
            push(ProfileId::AutoInstallPackage);
        }

        let parent_offers_bundle = parent
            .map(|p| p.declares_profile(ProfileId::AutoInstallBundle.as_str()))
            .unwrap_or(false);
        let bundle_plugin_ok = match self.bundle {
            BundleRule::RequirePlugin => manifest.has_plugin(BUNDLE_INSTALL_PLUGIN),
            BundleRule::ParentProfileOnly => true,
        };
        if parent_offers_bundle && !is_content_package && bundle_plugin_ok {
            push(ProfileId::AutoInstallBundle);
        }

        trace!(?profiles, is_root, "resolved profiles");
        profiles
    }
}

/// Resolve profiles with the default (strict) rules.
pub fn resolve_profiles(
    manifest: &ManifestTree,
    parent: Option<&ManifestTree>,
    is_root: bool,
) -> Vec<ProfileId> {
    ProfileRules::default().resolve(manifest, parent, is_root)
}
