use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::path::PathBuf;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

/// Runtime settings, read from `LITESIZER_*` variables (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_file_size: usize,
    pub data_dir: Option<PathBuf>,
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_file_size: default_max_file_size(),
            data_dir: None,
            parallel: default_parallel(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `LITESIZER_*` variables supplied by `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(addr) = lookup("LITESIZER_BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("Invalid LITESIZER_BIND_ADDR: {}", addr))?;
        }
        if let Some(size) = lookup("LITESIZER_MAX_FILE_SIZE") {
            config.max_file_size = size
                .parse()
                .with_context(|| format!("Invalid LITESIZER_MAX_FILE_SIZE: {}", size))?;
        }
        if let Some(dir) = lookup("LITESIZER_DATA_DIR").filter(|d| !d.is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(flag) = lookup("LITESIZER_PARALLEL") {
            config.parallel = flag
                .parse()
                .with_context(|| format!("Invalid LITESIZER_PARALLEL: {}", flag))?;
        }

        Ok(config)
    }
}

pub fn load_config() -> Result<Config> {
    Config::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_data_dir_is_ignored() {
        let config = Config::from_lookup(lookup(&[("LITESIZER_DATA_DIR", "")])).unwrap();
        assert_eq!(config.data_dir, Config::default().data_dir);
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.bind_addr, default_bind_addr());
        assert_eq!(config.max_file_size, 10 * 1024 * 1024);
        assert_eq!(config.data_dir, None);
        assert!(config.parallel);
    }

    #[test]
    fn variables_override_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("LITESIZER_BIND_ADDR", "0.0.0.0:8080"),
            ("LITESIZER_MAX_FILE_SIZE", "2048"),
            ("LITESIZER_DATA_DIR", "/srv/litesizer"),
            ("LITESIZER_PARALLEL", "false"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.max_file_size, 2048);
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/litesizer")));
        assert!(!config.parallel);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = Config::from_lookup(lookup(&[("LITESIZER_PARALLEL", "sometimes")])).unwrap_err();
        assert!(err.to_string().contains("LITESIZER_PARALLEL"));
    }
}
