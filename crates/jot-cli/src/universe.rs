use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jot_classpath::{ClasspathEntry, ClasspathIndex};
use jot_config::HookConfig;
use jot_scope::{HookRegistry, Navigator, Session, SuffixDictionary};

/// Index `archive` plus `classpath` and set up navigation over the archive's
/// types.
pub(crate) fn open_session(
    archive: &Path,
    classpath: &[PathBuf],
    tap: Option<&str>,
    package: Option<&str>,
    hooks: &[HookConfig],
) -> Result<Session> {
    if !archive.exists() {
        anyhow::bail!("archive {} does not exist", archive.display());
    }

    let entries: Vec<ClasspathEntry> = std::iter::once(archive)
        .chain(classpath.iter().map(PathBuf::as_path))
        .map(ClasspathEntry::from_path)
        .collect();
    let index = ClasspathIndex::build(&entries)
        .with_context(|| format!("failed to index {}", archive.display()))?;

    let universe = index.class_names_from_entry(0);
    tracing::info!(
        target: "jot.cli",
        archive = %archive.display(),
        classes = universe.len(),
        resolvable = index.len(),
        "indexed archive"
    );
    if let Some(package) = package {
        if index.class_names_in_package(package).is_empty() {
            tracing::warn!(target: "jot.cli", package, "package has no classes on the classpath");
        }
    }

    let navigator = Navigator::with_universe(Box::new(index), universe, tap, package)
        .context("failed to locate tap type")?;
    let registry = hook_registry(hooks, navigator.universe());
    Ok(Session::new(navigator, Box::new(registry)))
}

/// Configured hooks whose type names resolve; the rest are skipped with a
/// warning.
fn hook_registry(hooks: &[HookConfig], universe: &SuffixDictionary) -> HookRegistry {
    let mut registry = HookRegistry::new();
    for hook in hooks {
        match universe.get(&hook.type_name) {
            Ok(ty) => registry.register(&ty, hook.operations.iter().cloned()),
            Err(err) => {
                tracing::warn!(target: "jot.cli", hook = %hook.type_name, "skipping hook: {err}");
            }
        }
    }
    registry
}
