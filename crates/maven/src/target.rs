use crate::module::Module;
use crate::paths;
use crate::project::Project;
use aemkit_core::error::ResolveError;
use std::path::Path;
use tracing::debug;

/// Module name that always selects the project root.
pub const ALL_MODULES: &str = "all";

/// Pick the module a request refers to.
///
/// An explicit identifier wins; `all` means the root. Without one, the deepest
/// module containing `current_dir` is chosen, and the root when none does.
pub fn resolve_target<'a>(
    project: &'a Project,
    explicit: Option<&str>,
    current_dir: &Path,
) -> Result<&'a Module, ResolveError> {
    match explicit {
        Some(ALL_MODULES) => Ok(project.root()),
        Some(id) => project
            .module(id)
            .ok_or_else(|| ResolveError::ModuleNotFound(id.to_string())),
        None => {
            let current = paths::absolutize(current_dir);
            let module = deepest_containing(project, &current).unwrap_or_else(|| {
                debug!(
                    "{} is outside every module, using the root",
                    current.display()
                );
                project.root()
            });
            Ok(module)
        }
    }
}

fn deepest_containing<'a>(project: &'a Project, path: &Path) -> Option<&'a Module> {
    let mut best: Option<&Module> = None;
    for module in project.modules().filter(|m| m.contains(path)) {
        let depth = module.absolute_path.components().count();
        // Strictly deeper only, so the first of equal depth is kept.
        if best.map_or(true, |b| depth > b.absolute_path.components().count()) {
            best = Some(module);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestTree;
    use crate::profile::ProfileRules;

    fn project(children: &[&str]) -> Project {
        let rules = ProfileRules::default();
        let empty = ManifestTree::empty();
        let root = Module::root(Path::new("/repo"), &empty, &empty, &rules);
        let children = children
            .iter()
            .map(|entry| Module::child(Path::new("/repo"), entry, &empty, &empty, &rules))
            .collect();
        Project::new(root, children)
    }

    #[test]
    fn test_all_keyword_returns_root() {
        let project = project(&["ui.apps", "all"]);
        let target = resolve_target(&project, Some("all"), Path::new("/repo/ui.apps")).unwrap();
        assert!(target.is_root);
    }

    #[test]
    fn test_explicit_identifier() {
        let project = project(&["ui.apps", "core"]);
        let target = resolve_target(&project, Some("core"), Path::new("/repo/ui.apps")).unwrap();
        assert_eq!(target.name, "core");
    }

    #[test]
    fn test_explicit_unknown_module() {
        let project = project(&["ui.apps"]);
        let err = resolve_target(&project, Some("dispatcher"), Path::new("/repo")).unwrap_err();
        assert_eq!(err, ResolveError::ModuleNotFound("dispatcher".to_string()));
    }

    #[test]
    fn test_longest_path_wins() {
        let project = project(&["ui.apps", "core"]);
        let target =
            resolve_target(&project, None, Path::new("/repo/ui.apps/deep/nested")).unwrap();
        assert_eq!(target.absolute_path, Path::new("/repo/ui.apps"));
    }

    #[test]
    fn test_sibling_with_shared_prefix_not_matched() {
        let project = project(&["ui.apps"]);
        let target = resolve_target(&project, None, Path::new("/repo/ui.apps-extra/src")).unwrap();
        assert!(target.is_root);
    }

    #[test]
    fn test_outside_project_falls_back_to_root() {
        let project = project(&["ui.apps"]);
        let target = resolve_target(&project, None, Path::new("/elsewhere")).unwrap();
        assert!(target.is_root);
    }

    #[test]
    fn test_dot_segments_are_resolved() {
        let project = project(&["ui.apps", "core"]);
        let target =
            resolve_target(&project, None, Path::new("/repo/ui.apps/../core/./src")).unwrap();
        assert_eq!(target.name, "core");
    }

    #[test]
    fn test_equal_depth_keeps_first() {
        let project = project(&["core", "./core"]);
        let target = resolve_target(&project, None, Path::new("/repo/core")).unwrap();
        assert_eq!(target.name, "core");
    }
}
