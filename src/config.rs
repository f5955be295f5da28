use std::io;
use serde::{Serialize, Deserialize};

use crate::error::RoiError;
use crate::reports::export::DEFAULT_EXPORT_PATH;

pub const DEFAULT_CONFIG_PATH: &str = "roi.yaml";

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub(crate) export_path: String,
    pub(crate) log_filter: String,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            export_path: DEFAULT_EXPORT_PATH.to_string(),
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Reads the config file; a missing file yields the defaults.
    pub fn new(config_path: &str) -> Result<Config, RoiError> {
        let file = match std::fs::File::open(config_path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(err) => return Err(err.into()),
        };
        let config: Config = ::serde_yaml::from_reader(file)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roi.yaml");
        let config = Config::new(path.to_str().unwrap()).unwrap();
        assert_eq!(config.export_path, "roi_history.csv");
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roi.yaml");
        fs::write(&path, "export_path: out/history.csv\n").unwrap();

        let config = Config::new(path.to_str().unwrap()).unwrap();
        assert_eq!(config.export_path, "out/history.csv");
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roi.yaml");
        fs::write(&path, "export_path: [unclosed\n").unwrap();

        match Config::new(path.to_str().unwrap()) {
            Err(RoiError::Config(_)) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }
}
