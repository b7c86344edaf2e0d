use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{env, fs, path};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "redis_addr_default")]
    pub redis_addr: String,
    #[serde(default = "log_level_default")]
    pub log_level: String,
    #[serde(default = "cache_ttl_default")]
    pub cache_ttl_secs: u64,
    #[serde(default = "store_timeout_default")]
    pub store_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_addr: redis_addr_default(),
            log_level: log_level_default(),
            cache_ttl_secs: cache_ttl_default(),
            store_timeout_secs: store_timeout_default(),
        }
    }
}

impl Config {
    fn get_config_dir() -> anyhow::Result<path::PathBuf> {
        let config_dir = if let Ok(xdg_path) = env::var("XDG_CONFIG_HOME") {
            path::PathBuf::from(&xdg_path)
        } else {
            path::Path::new(&env::var("HOME")?).join(".config")
        };

        let dir = config_dir.join("webcache");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        Ok(dir)
    }

    /// Load from `$WEBCACHE_CFG_PATH`, falling back to
    /// `$XDG_CONFIG_HOME/webcache/config.toml`. Every field has a default,
    /// so a missing file just yields the default configuration.
    pub fn from_path() -> anyhow::Result<Self> {
        let file_path = if let Ok(cfg_path) = env::var("WEBCACHE_CFG_PATH") {
            path::PathBuf::from(cfg_path)
        } else {
            Self::get_config_dir()
                .with_context(|| "fail to open config directory")?
                .join("config.toml")
        };

        if !file_path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(file_path).with_context(|| "fail to read config file")?;

        toml::from_str(&content).with_context(|| "fail to parse config from toml")
    }
}

fn redis_addr_default() -> String {
    "redis://localhost:6379".to_string()
}

fn log_level_default() -> String {
    "INFO".to_string()
}

fn cache_ttl_default() -> u64 {
    10
}

fn store_timeout_default() -> u64 {
    5
}

#[test]
fn validate_file_correctness() {
    std::env::set_var("XDG_CONFIG_HOME", env::temp_dir().join("webcache-test-dir"));
    let config = r#"
        redis_addr = "redis://localhost"
        log_level = "DEBUG"
        cache_ttl_secs = 30
    "#;
    let path = env::temp_dir().join("webcache-test-dir").join("webcache");
    fs::create_dir_all(&path).unwrap();
    fs::write(path.join("config.toml"), config).unwrap();

    let config = Config::from_path().unwrap();
    assert_eq!(config.redis_addr, "redis://localhost");
    assert_eq!(config.log_level, "DEBUG");
    assert_eq!(config.cache_ttl_secs, 30);
    // unset fields fall back to defaults
    assert_eq!(config.store_timeout_secs, 5);

    fs::remove_dir_all(env::temp_dir().join("webcache-test-dir")).unwrap();
}
