use serde::{Deserialize, Serialize};

/// Settings read from `.kir.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Skip failing documents instead of failing the whole file.
    pub tolerant: bool,

    /// File extensions accepted while walking directories. Empty accepts all.
    pub extensions: Vec<String>,

    /// Follow symbolic links while walking directories.
    pub follow_links: bool,
}

impl Config {
    /// Check a file extension against the configured filter.
    pub fn accepts_extension(&self, ext: Option<&str>) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        ext.is_some_and(|ext| {
            self.extensions
                .iter()
                .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
    }
}
