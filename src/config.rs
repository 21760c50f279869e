use std::env;
use std::path::PathBuf;
use voxhelper_logger::LogSeverity;

/// Where the palette table is read from when nothing else is configured.
pub const DEFAULT_PALETTE_PATH: &str = "resources/palette.xml";

pub const PALETTE_PATH_ENV: &str = "VOXHELPER_PALETTE";
pub const LOG_LEVEL_ENV: &str = "VOXHELPER_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub palette_path: PathBuf,
    pub log_level: LogSeverity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette_path: PathBuf::from(DEFAULT_PALETTE_PATH),
            log_level: LogSeverity::Info,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the known keys. An unparsable
    /// log level keeps the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(path) = lookup(PALETTE_PATH_ENV).filter(|p| !p.is_empty()) {
            config.palette_path = PathBuf::from(path);
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV).and_then(|l| l.parse().ok()) {
            config.log_level = level;
        }
        config
    }

    /// Applies command line overrides on top of this config.
    pub fn with_overrides(
        mut self,
        palette_path: Option<PathBuf>,
        log_level: Option<LogSeverity>,
    ) -> Self {
        if let Some(path) = palette_path {
            self.palette_path = path;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
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
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.palette_path, PathBuf::from("resources/palette.xml"));
        assert_eq!(config.log_level, LogSeverity::Info);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup(&[
            (PALETTE_PATH_ENV, "/etc/colors.json"),
            (LOG_LEVEL_ENV, "debug"),
        ]));
        assert_eq!(config.palette_path, PathBuf::from("/etc/colors.json"));
        assert_eq!(config.log_level, LogSeverity::Debug);
    }

    #[test]
    fn test_bad_level_keeps_default() {
        let config = Config::from_lookup(lookup(&[
            (LOG_LEVEL_ENV, "chatty"),
            (PALETTE_PATH_ENV, ""),
        ]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = Config::from_lookup(lookup(&[(LOG_LEVEL_ENV, "error")]))
            .with_overrides(Some(PathBuf::from("p.xml")), Some(LogSeverity::Warning));
        assert_eq!(config.palette_path, PathBuf::from("p.xml"));
        assert_eq!(config.log_level, LogSeverity::Warning);

        let untouched = Config::default().with_overrides(None, None);
        assert_eq!(untouched, Config::default());
    }
}
