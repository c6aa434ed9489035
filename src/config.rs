use crate::error::{DsgenError, Result};
use crate::error_ext::ResultExt;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
/// Upper bound on retained history entries.
pub const MAX_HISTORY_LIMIT: usize = 50;

const LOCAL_CONFIG_FILE: &str = ".dsgen/config.toml";
const GLOBAL_CONFIG_FILE: &str = ".dsgen/config.toml";

/// Central configuration for dsgen
#[derive(Debug, Clone)]
pub struct DsgenConfig {
    /// Base URL of the generator backend; `/api/generate` is appended.
    pub endpoint: String,
    pub history_limit: usize,
    /// Where exported files are written.
    pub output_dir: PathBuf,
    pub request_timeout: Option<Duration>,
    /// Form field names, in display order.
    pub fields: Vec<String>,
}

impl Default for DsgenConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            output_dir: PathBuf::from("."),
            request_timeout: None,
            fields: vec![
                "role".to_string(),
                "gender".to_string(),
                "maritalStatus".to_string(),
            ],
        }
    }
}

/// On-disk shape of `config.toml`. Every key is optional so a local file
/// only needs to carry the keys it overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub history_limit: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
    pub fields: Option<Vec<String>>,
}

impl DsgenConfig {
    /// Load `~/.dsgen/config.toml`, then `<workspace>/.dsgen/config.toml` on top.
    /// Call `validate` once command-line overrides are applied.
    pub fn load(workspace: &Path) -> Result<Self> {
        let mut config = Self::default();

        if let Some(home) = std::env::var_os("HOME") {
            let global_path = PathBuf::from(home).join(GLOBAL_CONFIG_FILE);
            config.apply(load_config_file(&global_path)?);
        }

        config.apply(load_config_file(&workspace.join(LOCAL_CONFIG_FILE))?);

        Ok(config)
    }

    /// Overlay the keys present in `file`.
    pub fn apply(&mut self, file: ConfigFile) {
        if let Some(endpoint) = file.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(limit) = file.history_limit {
            self.history_limit = limit;
        }
        if let Some(dir) = file.output_dir {
            self.output_dir = dir;
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(fields) = file.fields {
            self.fields = fields;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_limit == 0 || self.history_limit > MAX_HISTORY_LIMIT {
            return Err(DsgenError::Config(format!(
                "history_limit must be between 1 and {}, got {}",
                MAX_HISTORY_LIMIT, self.history_limit
            )));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(DsgenError::Config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        Ok(())
    }

    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint.trim_end_matches('/'))
    }
}

fn load_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;
    toml::from_str(&content)
        .map_err(|e| DsgenError::Config(format!("Invalid config in {:?}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = DsgenConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(config.request_timeout.is_none());
        assert_eq!(config.fields, vec!["role", "gender", "maritalStatus"]);
    }

    #[test]
    fn test_parse_partial_file() {
        let toml_content = r#"
endpoint = "https://generator.internal"
request_timeout_secs = 15
"#;

        let file: ConfigFile = toml::from_str(toml_content).unwrap();
        let mut config = DsgenConfig::default();
        config.apply(file);

        assert_eq!(config.endpoint, "https://generator.internal");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.history_limit, 50);
    }

    #[test]
    fn test_local_file_is_loaded() {
        let workspace = TempDir::new().unwrap();
        let config_dir = workspace.path().join(".dsgen");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "history_limit = 5\nfields = [\"amount\", \"role\"]\n",
        )
        .unwrap();

        let config = DsgenConfig::load(workspace.path()).unwrap();
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.fields, vec!["amount", "role"]);
    }

    #[test]
    fn test_validation() {
        let mut config = DsgenConfig::default();
        assert!(config.validate().is_ok());

        config.history_limit = 0;
        assert!(matches!(config.validate(), Err(DsgenError::Config(_))));

        let mut config = DsgenConfig::default();
        config.endpoint = "localhost:5000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_history_limit_above_fifty_is_rejected() {
        let workspace = TempDir::new().unwrap();
        let config_dir = workspace.path().join(".dsgen");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("config.toml"), "history_limit = 500\n").unwrap();

        let config = DsgenConfig::load(workspace.path()).unwrap();
        assert_eq!(config.history_limit, 500);
        assert!(matches!(config.validate(), Err(DsgenError::Config(_))));

        let mut config = DsgenConfig::default();
        config.history_limit = MAX_HISTORY_LIMIT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generate_url_trims_trailing_slash() {
        let mut config = DsgenConfig::default();
        config.endpoint = "http://localhost:5000/".to_string();
        assert_eq!(config.generate_url(), "http://localhost:5000/api/generate");
    }
}
