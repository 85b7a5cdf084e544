pub mod types;

pub use types::Config;

use crate::error::KirError;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".kir.toml";

/// Get the global config file path (~/.kir.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (./.kir.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Parse a config file.
pub fn read_config(path: &Path) -> Result<Config, KirError> {
    let content = fs::read_to_string(path).map_err(|e| KirError::io(path, e))?;
    toml::from_str(&content)
        .map_err(|e| KirError::Config(format!("{}: {}", path.display(), e)))
}

/// Load configuration from file or use defaults.
///
/// An explicit path must load. Otherwise the local config is tried first,
/// then the global one; files that fail to parse are skipped with a warning.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, KirError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let candidates = std::env::current_dir()
        .ok()
        .map(|dir| local_config_path(&dir))
        .into_iter()
        .chain(global_config_path());

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match read_config(&path) {
            Ok(config) => {
                log::debug!("loaded config from {}", path.display());
                return Ok(config);
            }
            Err(e) => log::warn!("ignoring config: {}", e),
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "tolerant = true\nextensions = [\"yaml\", \".yml\"]\n").unwrap();

        let config = read_config(&path).unwrap();
        assert!(config.tolerant);
        assert!(!config.follow_links);
        assert!(config.accepts_extension(Some("yml")));
        assert!(config.accepts_extension(Some("YAML")));
        assert!(!config.accepts_extension(Some("json")));
        assert!(!config.accepts_extension(None));
    }

    #[test]
    fn test_explicit_config_must_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "tolerant = \"maybe\"\n").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(KirError::Config(_))));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(load_config(Some(&missing)), Err(KirError::Io { .. })));
    }

    #[test]
    fn test_default_accepts_everything() {
        let config = Config::default();
        assert!(config.accepts_extension(None));
        assert!(config.accepts_extension(Some("txt")));
    }
}
