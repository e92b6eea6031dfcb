//! Configuration file paths
//!
//! Uses XDG directories via `dirs` crate with fallbacks.
//!
//! Locations, in lookup order:
//! - `$CWD/.ghdiff.toml`
//! - Linux: `~/.config/ghdiff/config.toml`, macOS: `~/Library/Application Support/ghdiff/config.toml`
//! - `~/.ghdiff.toml`

use std::path::PathBuf;

const APP_NAME: &str = "ghdiff";
const LOCAL_CONFIG_FILE: &str = ".ghdiff.toml";

/// Path to the project-local config file (relative to CWD)
pub fn local_config_path() -> PathBuf {
    PathBuf::from(LOCAL_CONFIG_FILE)
}

/// Path to the config file in the platform config directory
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
}

/// Path to the dotfile in the home directory
pub fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LOCAL_CONFIG_FILE))
}

/// All candidate config paths in lookup order
pub fn candidate_paths() -> Vec<PathBuf> {
    std::iter::once(local_config_path())
        .chain(global_config_path())
        .chain(home_config_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_path_comes_first() {
        let paths = candidate_paths();
        assert_eq!(paths[0], PathBuf::from(LOCAL_CONFIG_FILE));
    }

    #[test]
    fn test_global_path_layout() {
        if let Some(path) = global_config_path() {
            assert!(path.ends_with("ghdiff/config.toml"));
        }
    }
}
