//! Server configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use confivue_core::engine::DEFAULT_SEM_STOP_THRESHOLD;
use confivue_core::selector::DEFAULT_MAX_ITEMS;
use confivue_core::EngineConfig;

/// Top-level confivue configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Item catalog JSON file.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
    /// Items presented per assessment.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Assessments stop once sem drops to this value.
    #[serde(default = "default_sem_stop_threshold")]
    pub sem_stop_threshold: f64,
    /// Fixed seed for item selection. Unset means entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/items_seed.json")
}
fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}
fn default_sem_stop_threshold() -> f64 {
    DEFAULT_SEM_STOP_THRESHOLD
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: default_catalog_path(),
            max_items: default_max_items(),
            sem_stop_threshold: default_sem_stop_threshold(),
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Socket address string, e.g. `0.0.0.0:8000`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_items: self.max_items,
            sem_stop_threshold: self.sem_stop_threshold,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `confivue.toml` in the current directory
/// 2. `~/.config/confivue/config.toml`
///
/// Environment variable overrides: `CONFIVUE_HOST`, `CONFIVUE_PORT`,
/// `CONFIVUE_CATALOG`, `CONFIVUE_SEED`.
pub fn load_config_from(path: Option<&Path>) -> Result<ServerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("confivue.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ServerConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parse a TOML config string and resolve `${VAR}` references.
pub fn parse_config_str(content: &str) -> Result<ServerConfig> {
    let mut config: ServerConfig = toml::from_str(content)?;
    config.host = resolve_env_vars(&config.host);
    config.catalog_path = PathBuf::from(resolve_env_vars(&config.catalog_path.to_string_lossy()));
    Ok(config)
}

fn apply_env_overrides(config: &mut ServerConfig) -> Result<()> {
    if let Ok(host) = std::env::var("CONFIVUE_HOST") {
        config.host = host;
    }
    if let Ok(port) = std::env::var("CONFIVUE_PORT") {
        config.port = port
            .parse()
            .with_context(|| format!("invalid CONFIVUE_PORT: {port}"))?;
    }
    if let Ok(catalog) = std::env::var("CONFIVUE_CATALOG") {
        config.catalog_path = PathBuf::from(catalog);
    }
    if let Ok(seed) = std::env::var("CONFIVUE_SEED") {
        config.seed = Some(
            seed.parse()
                .with_context(|| format!("invalid CONFIVUE_SEED: {seed}"))?,
        );
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("confivue"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_CONFIVUE_TEST_VAR", "seed-data");
        assert_eq!(resolve_env_vars("${_CONFIVUE_TEST_VAR}"), "seed-data");
        assert_eq!(
            resolve_env_vars("/srv/${_CONFIVUE_TEST_VAR}/items.json"),
            "/srv/seed-data/items.json"
        );
        assert_eq!(resolve_env_vars("no vars ${unclosed"), "no vars ${unclosed");
        std::env::remove_var("_CONFIVUE_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_items, 8);
        assert_eq!(config.sem_stop_threshold, 0.35);
        assert_eq!(config.addr(), "0.0.0.0:8000");
        assert!(config.seed.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
host = "127.0.0.1"
port = 9100
catalog_path = "/srv/items.json"
seed = 42
"#;
        let config = parse_config_str(toml_str).unwrap();
        assert_eq!(config.addr(), "127.0.0.1:9100");
        assert_eq!(config.catalog_path, PathBuf::from("/srv/items.json"));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_items, 8);
        assert_eq!(config.engine_config().max_items, 8);
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/confivue.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("confivue.toml");
        std::fs::write(&path, "max_items = 5\nsem_stop_threshold = 0.5\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.max_items, 5);
        assert_eq!(config.engine_config().sem_stop_threshold, 0.5);
    }
}
