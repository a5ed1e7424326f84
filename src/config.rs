use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::Level;

/// Placeholder project id that means "not configured"
pub const PLACEHOLDER_PROJECT: &str = "your-project-id";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Model provider: auto, gemini, vertex, ollama, mock
    pub provider: String,
    pub model: String,
    pub max_output_tokens: u32,
    pub request_timeout_secs: u64,

    // Google
    #[serde(skip_serializing)]
    pub google_api_key: String,
    pub gcp_project: String,
    pub gcp_location: String,
    #[serde(skip_serializing)]
    pub gcp_access_token: String,

    // Local
    pub ollama_url: String,
    pub ollama_model: String,

    // API service
    pub host: String,
    pub port: u16,

    // Clipboard agent
    pub log_file: String,
    pub paste_delay_ms: u64,
    pub paste_keys: String,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: "auto".to_string(),
            model: "gemini-1.5-flash".to_string(),
            max_output_tokens: 1024,
            request_timeout_secs: 30,
            google_api_key: String::new(),
            gcp_project: PLACEHOLDER_PROJECT.to_string(),
            gcp_location: "us-central1".to_string(),
            gcp_access_token: String::new(),
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: "llama3".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_file: "fluenter_log.log".to_string(),
            paste_delay_ms: 150,
            paste_keys: "ctrl+v".to_string(),
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from file (if any), then overlay the process environment
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file(&config_path())?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a JSON config file, falling back to defaults when absent or corrupt
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("⚠️ Config file invalid, using defaults: {}", e);
                Ok(Self::default())
            }
        }
    }

    /// Overlay values from an environment lookup. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("FLUENTER_PROVIDER") {
            self.provider = v.to_lowercase();
        }
        if let Some(v) = get("FLUENTER_MODEL") {
            self.model = v;
        }
        if let Some(v) = get("GOOGLE_API_KEY") {
            self.google_api_key = v;
        }
        if let Some(v) = get("GOOGLE_CLOUD_PROJECT") {
            self.gcp_project = v;
        }
        if let Some(v) = get("GOOGLE_CLOUD_LOCATION") {
            self.gcp_location = v;
        }
        if let Some(v) = get("GOOGLE_ACCESS_TOKEN") {
            self.gcp_access_token = v;
        }
        if let Some(v) = get("OLLAMA_URL") {
            self.ollama_url = v;
        }
        if let Some(v) = get("OLLAMA_MODEL") {
            self.ollama_model = v;
        }
        if let Some(v) = get("FLUENTER_HOST") {
            self.host = v;
        }
        if let Some(port) = get("FLUENTER_PORT").and_then(|v| v.parse().ok()) {
            self.port = port;
        }
        if let Some(v) = get("FLUENTER_LOG_FILE") {
            self.log_file = v;
        }
    }

    /// Console log level: `--verbose` forces DEBUG, otherwise `log_level`
    /// (INFO when unparseable)
    pub fn tracing_level(&self, verbose: bool) -> Level {
        if verbose {
            Level::DEBUG
        } else {
            self.log_level.parse().unwrap_or(Level::INFO)
        }
    }

    /// Rewrite the config file from its own contents and defaults only.
    /// Environment overrides are never persisted.
    pub fn write_file_settings(path: &Path) -> Result<Self> {
        let config = Self::load_file(path)?;
        config.save(path)?;
        Ok(config)
    }

    /// True when Vertex AI has a real project and a bearer token
    pub fn has_vertex_credentials(&self) -> bool {
        !self.gcp_project.is_empty()
            && self.gcp_project != PLACEHOLDER_PROJECT
            && !self.gcp_access_token.is_empty()
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fluenter")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider, "auto");
        assert_eq!(config.port, 8000);
        assert_eq!(config.gcp_location, "us-central1");
        assert_eq!(config.paste_delay_ms, 150);
        assert!(!config.has_vertex_credentials());
    }

    #[test]
    fn test_env_overlay() {
        let vars = env(&[
            ("GOOGLE_CLOUD_PROJECT", "acme-prod"),
            ("GOOGLE_ACCESS_TOKEN", "ya29.token"),
            ("FLUENTER_PORT", "9100"),
            ("FLUENTER_PROVIDER", "Vertex"),
        ]);
        let mut config = Config::default();
        config.apply_env(|k| vars.get(k).cloned());

        assert_eq!(config.provider, "vertex");
        assert_eq!(config.port, 9100);
        assert!(config.has_vertex_credentials());
    }

    #[test]
    fn test_env_overlay_ignores_blank_and_bad_values() {
        let vars = env(&[("GOOGLE_API_KEY", "   "), ("FLUENTER_PORT", "not-a-port")]);
        let mut config = Config::default();
        config.apply_env(|k| vars.get(k).cloned());

        assert!(config.google_api_key.is_empty());
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not valid json").unwrap();

        let config = Config::load_file(&path).unwrap();
        assert_eq!(config.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_save_omits_secrets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");
        let mut config = Config::default();
        config.google_api_key = "secret-key".to_string();
        config.port = 8123;
        config.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("secret-key"));

        let restored = Config::load_file(&path).unwrap();
        assert_eq!(restored.port, 8123);
        assert!(restored.google_api_key.is_empty());
    }

    #[test]
    fn test_tracing_level_resolution() {
        let mut config = Config::default();
        assert_eq!(config.tracing_level(false), Level::INFO);
        assert_eq!(config.tracing_level(true), Level::DEBUG);

        config.log_level = "warn".to_string();
        assert_eq!(config.tracing_level(false), Level::WARN);
        assert_eq!(config.tracing_level(true), Level::DEBUG);

        config.log_level = "chatty".to_string();
        assert_eq!(config.tracing_level(false), Level::INFO);
    }

    #[test]
    fn test_write_file_settings_ignores_environment_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"port": 8123, "log_level": "DEBUG"}"#).unwrap();

        // What the running process sees after the overlay
        let mut effective = Config::load_file(&path).unwrap();
        effective.apply_env(|k| match k {
            "FLUENTER_PROVIDER" => Some("vertex".to_string()),
            "GOOGLE_CLOUD_PROJECT" => Some("acme-prod".to_string()),
            _ => None,
        });
        assert_eq!(effective.provider, "vertex");

        let written = Config::write_file_settings(&path).unwrap();
        assert_eq!(written.port, 8123);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("vertex"));
        assert!(!content.contains("acme-prod"));
        let restored = Config::load_file(&path).unwrap();
        assert_eq!(restored.provider, "auto");
        assert_eq!(restored.port, 8123);
        assert_eq!(restored.log_level, "DEBUG");
    }

    #[test]
    fn test_write_file_settings_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fluenter/config.json");

        let written = Config::write_file_settings(&path).unwrap();
        assert_eq!(written.port, 8000);
        assert!(path.exists());
    }
}
