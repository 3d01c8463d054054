use crate::db::{get_data_dir, get_db_path};
use crate::error::ConfigError;
use crate::models::TimerPolicy;
use crate::source::DEFAULT_COLLECTION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "quiz_debug.log";

/// Everything the quiz shell needs, built once at startup and passed down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub db_path: PathBuf,
    pub collection: String,
    pub timer: TimerPolicy,
    pub shuffle: bool,
    pub log_path: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            db_path: get_db_path(),
            collection: DEFAULT_COLLECTION.to_string(),
            timer: TimerPolicy::Elapsed,
            shuffle: false,
            log_path: Some(get_data_dir().join(LOG_FILE)),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    get_data_dir().join(CONFIG_FILE)
}

impl QuizConfig {
    /// Read `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = QuizConfig::load(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(config, QuizConfig::default());
        assert_eq!(config.collection, "questions");
        assert_eq!(config.timer, TimerPolicy::Elapsed);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"collection": "algebra", "timer": {"mode": "countdown", "seconds": 45}}"#,
        )
        .unwrap();

        let config = QuizConfig::load(&path).unwrap();
        assert_eq!(config.collection, "algebra");
        assert_eq!(config.timer, TimerPolicy::Countdown { seconds: 45 });
        assert!(!config.shuffle);
        assert_eq!(config.db_path, get_db_path());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = QuizConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
