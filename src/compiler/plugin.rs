//! Locates `babel-plugin-react-compiler` and caches the lookup process-wide.
//!
//! The cache holds either the resolved plugin or the fact that it could not
//! be found, so a missing plugin is reported once instead of per file.
//! [`reset`] clears it; tests call it between cases.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{error, info, warn};

pub const PLUGIN_PACKAGE: &str = "babel-plugin-react-compiler";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    /// Package directory, passed to `require` by the bridge.
    pub dir: PathBuf,
    pub version: String,
}

#[derive(Debug, Clone)]
enum CacheState {
    Loaded(Plugin),
    Missing,
}

static CACHE: Mutex<Option<CacheState>> = Mutex::new(None);

#[derive(Deserialize)]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
}

/// Returns the cached plugin, resolving it on first use.
///
/// `explicit` overrides the search; relative paths are taken from `workspace`.
#[must_use]
pub fn load(workspace: &Path, explicit: Option<&Path>) -> Option<Plugin> {
    let mut guard = CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(state) = guard.as_ref() {
        return match state {
            CacheState::Loaded(plugin) => Some(plugin.clone()),
            CacheState::Missing => None,
        };
    }

    let resolved = resolve(workspace, explicit);
    match &resolved {
        Some(plugin) => info!(
            "Using {PLUGIN_PACKAGE}@{} from {}",
            plugin.version,
            plugin.dir.display()
        ),
        None => error!(
            "{PLUGIN_PACKAGE} not found. Searched from: {}. Install it in your project: npm install {PLUGIN_PACKAGE}",
            workspace.display()
        ),
    }
    *guard = Some(match &resolved {
        Some(plugin) => CacheState::Loaded(plugin.clone()),
        None => CacheState::Missing,
    });
    resolved
}

/// Forgets any cached lookup.
pub fn reset() {
    *CACHE.lock().unwrap_or_else(PoisonError::into_inner) = None;
}

/// Resolves the plugin without touching the cache.
#[must_use]
pub fn resolve(workspace: &Path, explicit: Option<&Path>) -> Option<Plugin> {
    if let Some(path) = explicit {
        let dir = workspace.join(path);
        if let Some(plugin) = inspect(&dir) {
            return Some(plugin);
        }
        warn!(
            "Could not load {PLUGIN_PACKAGE} from {}, falling back to node_modules",
            dir.display()
        );
    }

    workspace
        .ancestors()
        .map(|dir| dir.join("node_modules").join(PLUGIN_PACKAGE))
        .find_map(|dir| inspect(&dir))
}

fn inspect(dir: &Path) -> Option<Plugin> {
    let manifest = fs::read_to_string(dir.join("package.json")).ok()?;
    let version = match serde_json::from_str::<PackageJson>(&manifest) {
        Ok(pkg) if pkg.name.as_deref().map_or(true, |n| n == PLUGIN_PACKAGE) => {
            pkg.version.unwrap_or_else(|| "unknown".into())
        }
        Ok(_) => return None,
        Err(_) => "unknown".into(),
    };
    Some(Plugin {
        dir: dir.to_path_buf(),
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn install(root: &Path, version: &str) -> PathBuf {
        let dir = root.join("node_modules").join(PLUGIN_PACKAGE);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("package.json"),
            format!(r#"{{"name":"{PLUGIN_PACKAGE}","version":"{version}"}}"#),
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_resolves_from_ancestor() {
        let d = tempfile::tempdir().unwrap();
        let dir = install(d.path(), "19.1.0");
        let nested = d.path().join("apps").join("web");
        fs::create_dir_all(&nested).unwrap();

        let plugin = resolve(&nested, None).unwrap();
        assert_eq!(plugin.dir, dir);
        assert_eq!(plugin.version, "19.1.0");
    }

    #[test]
    fn test_explicit_path_wins() {
        let d = tempfile::tempdir().unwrap();
        install(d.path(), "1.0.0");
        let custom = d.path().join("vendor").join("compiler");
        fs::create_dir_all(&custom).unwrap();
        fs::write(custom.join("package.json"), r#"{"version":"2.0.0"}"#).unwrap();

        let plugin = resolve(d.path(), Some(Path::new("vendor/compiler"))).unwrap();
        assert_eq!(plugin.version, "2.0.0");
    }

    #[test]
    fn test_wrong_package_name_ignored() {
        let d = tempfile::tempdir().unwrap();
        let dir = d.path().join("node_modules").join(PLUGIN_PACKAGE);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.json"), r#"{"name":"other"}"#).unwrap();
        assert!(inspect(&dir).is_none());
    }
}
