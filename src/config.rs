use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Browser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// List entries whose name starts with a dot
    #[serde(default = "default_show_hidden")]
    pub show_hidden: bool,

    /// Entry names that are never listed
    #[serde(default)]
    pub hidden_names: Vec<String>,

    /// Deadline for producing a response, in seconds (0 disables)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_show_hidden() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_hidden: default_show_hidden(),
            hidden_names: Vec::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check if an entry should be left out of listings
    pub fn is_hidden(&self, name: &str) -> bool {
        if !self.show_hidden && name.starts_with('.') {
            return true;
        }
        self.hidden_names.iter().any(|n| n == name)
    }

    /// Request deadline, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_list_everything() {
        let config = Config::default();
        assert!(!config.is_hidden(".env"));
        assert!(!config.is_hidden("movie.mkv"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            show_hidden = false
            hidden_names = ["Thumbs.db"]
            "#,
        )
        .unwrap();

        assert!(config.is_hidden(".DS_Store"));
        assert!(config.is_hidden("Thumbs.db"));
        assert!(!config.is_hidden("thumbs.db"));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let config: Config = toml::from_str("request_timeout_secs = 0").unwrap();
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../media-browser.example.toml")).unwrap();
        assert!(config.is_hidden("Thumbs.db"));
        assert!(!config.is_hidden(".profile"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("browser.toml");
        std::fs::write(&path, "show_hidden = false\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(!config.show_hidden);
    }
}
