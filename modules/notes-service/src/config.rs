//! Environment-driven service configuration.

use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATA_PATH: &str = "./data/notes.json";
const DEFAULT_INDEX_PATH: &str = "./static/index.html";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub index_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("NOTES_PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("NOTES_PORT={:?} is not a valid port, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            host: lookup("NOTES_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            data_path: lookup("NOTES_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            index_path: lookup("NOTES_INDEX_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_PATH)),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.data_path, PathBuf::from("./data/notes.json"));
        assert_eq!(config.index_path, PathBuf::from("./static/index.html"));
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("NOTES_HOST", "127.0.0.1"),
            ("NOTES_PORT", "9103"),
            ("NOTES_DATA_PATH", "/tmp/notes.json"),
            ("NOTES_INDEX_PATH", "/srv/index.html"),
        ]);
        assert_eq!(config.bind_addr(), "127.0.0.1:9103");
        assert_eq!(config.data_path, PathBuf::from("/tmp/notes.json"));
        assert_eq!(config.index_path, PathBuf::from("/srv/index.html"));
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = config_with(&[("NOTES_PORT", "not-a-port")]);
        assert_eq!(config.port, 5000);
    }
}
