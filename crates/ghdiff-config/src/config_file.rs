use std::path::{Path, PathBuf};

use crate::paths;

/// Load config file content from the first candidate location that exists
///
/// Searches, in order:
/// 1. `.ghdiff.toml` in the current working directory
/// 2. `ghdiff/config.toml` in the platform config directory
/// 3. `.ghdiff.toml` in the home directory
///
/// Returns the path and file content if found, None otherwise.
pub fn load_config_file() -> Option<(PathBuf, String)> {
    load_first_existing(&paths::candidate_paths())
}

/// Read the first of `candidates` that can be read.
pub(crate) fn load_first_existing(candidates: &[PathBuf]) -> Option<(PathBuf, String)> {
    candidates.iter().find_map(|path| read_config(path))
}

fn read_config(path: &Path) -> Option<(PathBuf, String)> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Some((path.to_path_buf(), content))
        }
        Err(e) => {
            log::trace!("No config at {}: {}", path.display(), e);
            None
        }
    }
}
