//! Process configuration resolved from environment variables.

use crate::dashboard::DEFAULT_TOP_PERFORMERS;
use crate::logging::default_log_level;
use crate::repo::activity_repo::DEFAULT_RECENT_LIMIT;
use log::warn;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "ROSTER_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "ROSTER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ROSTER_LOG_DIR";
pub const ENV_TOP_PERFORMERS: &str = "ROSTER_TOP_PERFORMERS";
pub const ENV_RECENT_ACTIVITY: &str = "ROSTER_RECENT_ACTIVITY";

const DB_FILE_NAME: &str = "roster.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub top_performers: usize,
    pub recent_activity: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            top_performers: DEFAULT_TOP_PERFORMERS,
            recent_activity: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl CoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves every setting through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            db_path: get(ENV_DB_PATH).map(PathBuf::from).unwrap_or(defaults.db_path),
            log_level: get(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: get(ENV_LOG_DIR).map(PathBuf::from),
            top_performers: parse_or(
                ENV_TOP_PERFORMERS,
                get(ENV_TOP_PERFORMERS),
                defaults.top_performers,
            ),
            recent_activity: parse_or(
                ENV_RECENT_ACTIVITY,
                get(ENV_RECENT_ACTIVITY),
                defaults.recent_activity,
            ),
        }
    }
}

fn parse_or<T: std::str::FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            warn!("event=config_parse module=config status=error key={key} fallback=default");
            default
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
    fn empty_environment_uses_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[]));
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.top_performers, 5);
        assert_eq!(config.recent_activity, 10);
        assert!(config.db_path.ends_with("roster.sqlite3"));
    }

    #[test]
    fn values_override_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/data/roster.db"),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_LOG_DIR, "/var/log/roster"),
            (ENV_TOP_PERFORMERS, "3"),
            (ENV_RECENT_ACTIVITY, " 25 "),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/data/roster.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/roster")));
        assert_eq!(config.top_performers, 3);
        assert_eq!(config.recent_activity, 25);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_TOP_PERFORMERS, "many"),
            (ENV_RECENT_ACTIVITY, "-1"),
            (ENV_LOG_DIR, "   "),
        ]));
        assert_eq!(config.top_performers, 5);
        assert_eq!(config.recent_activity, 10);
        assert_eq!(config.log_dir, None);
    }
}
