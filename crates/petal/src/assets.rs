use derive_more::{AsRef, Deref, Display, From, Into};
use fs_err as fs;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Name of a petal image, resolved against the host's icon directories.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconAsset(String);

sepal::impl_string_newtype!(IconAsset);

static INDEX: OnceLock<RwLock<HashMap<String, PathBuf>>> = OnceLock::new();

/// Re-scans the icon directories, replacing the cached index.
pub fn refresh_cache() {
    let index = scan_icon_dirs();
    let lock = INDEX.get_or_init(|| RwLock::new(HashMap::new()));
    *lock.write() = index;
}

/// Resolves an icon name to a file on disk. Absolute paths pass through
/// unchanged; bare names are looked up by file stem in the icon directories.
/// Returns `None` when nothing matches — a missing image is not an error.
pub fn find_icon_path(name: &IconAsset) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    let path = Path::new(name.as_ref());
    if path.is_absolute() && path.exists() {
        return Some(path.to_path_buf());
    }

    let lock = INDEX.get_or_init(|| RwLock::new(scan_icon_dirs()));
    lock.read().get(name.as_ref()).cloned()
}

fn icon_directories() -> Vec<PathBuf> {
    let xdg = xdg::BaseDirectories::new();
    let mut dirs = Vec::new();

    if let Some(home) = xdg.get_data_home() {
        dirs.push(home.join("petal/icons"));
    }

    dirs.extend(
        xdg.get_data_dirs()
            .into_iter()
            .map(|p| p.join("petal/icons")),
    );
    dirs
}

fn scan_icon_dirs() -> HashMap<String, PathBuf> {
    let mut index = HashMap::new();

    // Earlier directories win, so scan the list back to front.
    for dir in icon_directories().iter().rev() {
        if let Ok(read_dir) = fs::read_dir(dir) {
            for entry in read_dir.flatten() {
                let path = entry.path();
                if path.is_file()
                    && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                {
                    index.insert(stem.to_string(), path);
                }
            }
        }
    }
    index
}
