use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Settings for one game session, loadable from TOML.
///
/// A session takes its own copy of the config at construction; changing a
/// config afterwards never affects a running game.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub winning_length: usize,
    /// Deadline for computed moves, in seconds. `None` disables forfeits;
    /// in TOML that is written `move_timeout_secs = false`.
    #[serde(with = "timeout_secs")]
    pub move_timeout_secs: Option<f64>,
    /// Flip a coin to decide who moves first at every (re)start.
    pub random_start: bool,
}

/// TOML form of the move timeout: a number of seconds, or `false` for none.
mod timeout_secs {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Setting {
        Secs(f64),
        Enabled(bool),
    }

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(secs) => serializer.serialize_f64(*secs),
            None => serializer.serialize_bool(false),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Setting::deserialize(deserializer)? {
            Setting::Secs(secs) => Ok(Some(secs)),
            Setting::Enabled(false) => Ok(None),
            Setting::Enabled(true) => Err(serde::de::Error::custom(
                "move_timeout_secs must be a number of seconds or false",
            )),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: 6,
            cols: 7,
            winning_length: 4,
            move_timeout_secs: Some(0.5),
            random_start: false,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Same config with forfeits on slow moves turned off (debugging).
    pub fn without_move_timeout(mut self) -> Self {
        self.move_timeout_secs = None;
        self
    }

    pub fn move_timeout(&self) -> Option<Duration> {
        self.move_timeout_secs.map(Duration::from_secs_f64)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::Validation("rows must be > 0".into()));
        }
        if self.cols == 0 {
            return Err(ConfigError::Validation("cols must be > 0".into()));
        }
        if self.winning_length == 0 {
            return Err(ConfigError::Validation("winning_length must be > 0".into()));
        }
        if self.winning_length > self.rows.max(self.cols) {
            return Err(ConfigError::Validation(
                "winning_length must be <= max(rows, cols)".into(),
            ));
        }
        if let Some(secs) = self.move_timeout_secs {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(ConfigError::Validation(
                    "move_timeout_secs must be a positive number of seconds".into(),
                ));
            }
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&GameConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.move_timeout(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GameConfig = toml::from_str("winning_length = 5").unwrap();
        assert_eq!(config.winning_length, 5);
        assert_eq!(config.rows, 6);
        assert_eq!(config.cols, 7);
        assert_eq!(config.move_timeout_secs, Some(0.5));
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: GameConfig = toml::from_str("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_without_move_timeout() {
        let config = GameConfig::default().without_move_timeout();
        assert_eq!(config.move_timeout(), None);
        config.validate().expect("disabled timeout is valid");
    }

    #[test]
    fn test_toml_can_disable_timeout() {
        let config: GameConfig = toml::from_str("move_timeout_secs = false").unwrap();
        assert_eq!(config.move_timeout(), None);

        let config: GameConfig = toml::from_str("move_timeout_secs = 2").unwrap();
        assert_eq!(config.move_timeout(), Some(Duration::from_secs(2)));

        assert!(toml::from_str::<GameConfig>("move_timeout_secs = true").is_err());
    }

    #[test]
    fn test_disabled_timeout_roundtrips() {
        let config = GameConfig::default().without_move_timeout();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("move_timeout_secs = false"));
        let parsed: GameConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validation_rejects_zero_dimensions() {
        let mut config = GameConfig::default();
        config.rows = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.cols = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_winning_length() {
        let mut config = GameConfig::default();
        config.winning_length = 0;
        assert!(config.validate().is_err());

        config.winning_length = 8;
        assert!(config.validate().is_err());

        // Longer than the columns is fine as long as rows can hold it
        config.winning_length = 7;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_timeout() {
        let mut config = GameConfig::default();
        config.move_timeout_secs = Some(0.0);
        assert!(config.validate().is_err());

        config.move_timeout_secs = Some(-1.0);
        assert!(config.validate().is_err());

        config.move_timeout_secs = Some(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = GameConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
rows = 8
cols = 9
move_timeout_secs = 2.5
random_start = true
"#
        )
        .unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.rows, 8);
        assert_eq!(config.cols, 9);
        assert_eq!(config.move_timeout(), Some(Duration::from_millis(2500)));
        assert!(config.random_start);
        // Others are defaults
        assert_eq!(config.winning_length, 4);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        std::fs::write(&path, "rows = 0\n").unwrap();
        assert!(matches!(
            GameConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "rows = \"six\"\n").unwrap();
        assert!(matches!(GameConfig::load(&path), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = GameConfig::default_toml();
        let config: GameConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, GameConfig::default());
    }
}
