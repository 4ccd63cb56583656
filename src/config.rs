// src/config.rs

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

/// Which `SurveyStore` implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// `data.json` / `answers.json` on disk.
    File,
    /// Process-local; everything is lost on shutdown.
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub answers_file: PathBuf,
    pub static_dir: PathBuf,
    pub storage: StorageBackend,
    pub log_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults
    /// for anything missing or unparsable.
    ///
    /// Runs before tracing is initialized, so problems go to stderr.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                eprintln!("Warning: invalid PORT value {:?}, using 8000", raw);
                8000
            }),
            None => 8000,
        };

        let storage = match lookup("STORAGE").map(|s| s.to_lowercase()) {
            None => StorageBackend::File,
            Some(s) if s == "file" => StorageBackend::File,
            Some(s) if s == "memory" => StorageBackend::Memory,
            Some(other) => {
                eprintln!("Warning: unknown STORAGE value {:?}, using file storage", other);
                StorageBackend::File
            }
        };

        Self {
            host,
            port,
            data_file: lookup("DATA_FILE")
                .unwrap_or_else(|| "data.json".to_string())
                .into(),
            answers_file: lookup("ANSWERS_FILE")
                .unwrap_or_else(|| "answers.json".to_string())
                .into(),
            static_dir: lookup("STATIC_DIR")
                .unwrap_or_else(|| "static".to_string())
                .into(),
            storage,
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()).into(),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// `(host, port)` for `TcpListener::bind`, which also resolves host names.
    pub fn bind_target(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.data_file, PathBuf::from("data.json"));
        assert_eq!(config.answers_file, PathBuf::from("answers.json"));
        assert_eq!(config.storage, StorageBackend::File);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.bind_target(), ("0.0.0.0", 8000));
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9100"),
            ("DATA_FILE", "/tmp/p.json"),
            ("STORAGE", "Memory"),
        ]);
        assert_eq!(config.bind_target(), ("127.0.0.1", 9100));
        assert_eq!(config.data_file, PathBuf::from("/tmp/p.json"));
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[tokio::test]
    async fn test_binds_by_host_name() {
        let config = config_with(&[("HOST", "localhost"), ("PORT", "0")]);

        let listener = tokio::net::TcpListener::bind(config.bind_target())
            .await
            .expect("localhost should resolve and bind");
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_with(&[("PORT", "eighty"), ("STORAGE", "sled")]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.storage, StorageBackend::File);
    }
}
