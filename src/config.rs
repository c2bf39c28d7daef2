// src/config.rs

use std::{env, path::PathBuf, str::FromStr};

use dotenvy::dotenv;

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_dir: PathBuf,
    pub static_dir: PathBuf,
    /// Optional JSON catalog replacing the built-in quiz parts.
    pub catalog_path: Option<PathBuf>,
    pub allowed_origins: Vec<String>,
    /// Fixed seed for reproducible tie-breaks.
    pub tiebreak_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            log_dir: PathBuf::from("logs"),
            static_dir: PathBuf::from("static"),
            catalog_path: None,
            allowed_origins: vec![
                format!("http://localhost:{DEFAULT_PORT}"),
                format!("http://127.0.0.1:{DEFAULT_PORT}"),
            ],
            tiebreak_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);

        let port = parse_var("PORT").unwrap_or(defaults.port);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or(defaults.rust_log);

        let log_dir = env::var("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_dir);

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let catalog_path = env::var("CATALOG_PATH").ok().map(PathBuf::from);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| split_origins(&v))
            .unwrap_or(defaults.allowed_origins);

        let tiebreak_seed = parse_var("TIEBREAK_SEED");

        Self {
            host,
            port,
            rust_log,
            log_dir,
            static_dir,
            catalog_path,
            allowed_origins,
            tiebreak_seed,
        }
    }
}

/// Reads and parses a variable. Unparseable values are ignored with a warning.
fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            // Logging is not up yet when config loads.
            eprintln!("warning: ignoring invalid {name}={raw}");
            None
        }
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_origins_trims_and_drops_blanks() {
        assert_eq!(
            split_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.rust_log, "info");
        assert!(config.catalog_path.is_none());
        assert!(config.tiebreak_seed.is_none());
    }
}
