use std::path::PathBuf;

const DEFAULT_DB_PATH: &str = "./data/word-wizard.db";
const DEFAULT_LOG_DIR: &str = "./logs";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    /// Fixed seed for reproducible sessions; sessions use `seed + n` for the n-th game.
    pub seed: Option<u64>,
    pub bell: bool,
    pub log_level: String,
    /// Directory for rolling log files; `None` logs to stderr only.
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            seed: None,
            bell: true,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let db_path = lookup("WORD_WIZARD_DB")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let seed = lookup("WORD_WIZARD_SEED").and_then(|value| value.trim().parse::<u64>().ok());

        let bell = lookup("WORD_WIZARD_BELL")
            .map(|value| !matches!(value.trim(), "false" | "0" | "off"))
            .unwrap_or(defaults.bell);

        let log_level = lookup("RUST_LOG").unwrap_or(defaults.log_level);

        let file_logs = lookup("ENABLE_FILE_LOGS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let log_dir = file_logs.then(|| {
            lookup("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
        });

        Self {
            db_path,
            seed,
            bell,
            log_level,
            log_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.seed, None);
        assert!(config.bell);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("WORD_WIZARD_DB", "/tmp/ww.db"),
            ("WORD_WIZARD_SEED", "42"),
            ("WORD_WIZARD_BELL", "off"),
            ("RUST_LOG", "debug"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/tmp/ww.db"));
        assert_eq!(config.seed, Some(42));
        assert!(!config.bell);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn file_logs_need_opt_in() {
        let config = Config::from_lookup(lookup(&[("LOG_DIR", "/var/log/ww")]));
        assert_eq!(config.log_dir, None);

        let config = Config::from_lookup(lookup(&[("ENABLE_FILE_LOGS", "1")]));
        assert_eq!(config.log_dir, Some(PathBuf::from(DEFAULT_LOG_DIR)));

        let config = Config::from_lookup(lookup(&[
            ("ENABLE_FILE_LOGS", "true"),
            ("LOG_DIR", "/var/log/ww"),
        ]));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/ww")));
    }

    #[test]
    fn invalid_seed_is_ignored() {
        let config = Config::from_lookup(lookup(&[("WORD_WIZARD_SEED", "abc")]));
        assert_eq!(config.seed, None);
    }
}
