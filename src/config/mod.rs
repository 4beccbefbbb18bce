//! Configuration management for the quill application.
//!
//! Settings are read from environment variables with sensible defaults.
//!
//! # Environment Variables
//!
//! - `QUILL_DIR`: Path to the storage directory (defaults to ~/Documents/diary)
//! - `QUILL_AUTOSAVE_TICKS`: Idle ticks before an edited entry is saved (defaults to 5)
//! - `QUILL_TICK_MS`: Length of one tick in milliseconds (defaults to 1000)
//! - `HOME`: Used for expanding the default storage directory path

use crate::constants::{
    DEFAULT_AUTOSAVE_TICKS, DEFAULT_JOURNAL_SUBDIR, DEFAULT_TICK_MS, ENV_VAR_HOME,
    ENV_VAR_QUILL_AUTOSAVE_TICKS, ENV_VAR_QUILL_DIR, ENV_VAR_QUILL_TICK_MS,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the quill application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use quill::Config;
/// use std::path::PathBuf;
/// use std::time::Duration;
///
/// let config = Config {
///     journal_dir: PathBuf::from("/path/to/journal"),
///     autosave_ticks: 5,
///     tick_interval: Duration::from_secs(1),
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// Directory holding one `diary-YYYY-MM-DD.md` file per date.
    pub journal_dir: PathBuf,

    /// Number of ticks without edits after which a dirty buffer is saved.
    pub autosave_ticks: u32,

    /// Period of the autosave tick.
    pub tick_interval: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("journal_dir", &"[REDACTED_PATH]")
            .field("autosave_ticks", &self.autosave_ticks)
            .field("tick_interval", &self.tick_interval)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            journal_dir: PathBuf::from(""),
            autosave_ticks: DEFAULT_AUTOSAVE_TICKS,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The storage directory is expanded with `shellexpand`, so `~` and
    /// `$VAR` references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The storage directory path expansion fails or yields an empty path
    /// - `QUILL_AUTOSAVE_TICKS` or `QUILL_TICK_MS` is not a non-negative integer
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use quill::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Autosaving after {} ticks", config.autosave_ticks),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let journal_dir_str = env::var(ENV_VAR_QUILL_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_else(|_| "".to_string());
            format!("{}/{}", home, DEFAULT_JOURNAL_SUBDIR)
        });

        let expanded_path = shellexpand::full(&journal_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let journal_dir = PathBuf::from(expanded_path.into_owned());

        if journal_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Journal directory path is empty".to_string(),
            ));
        }

        let autosave_ticks = parse_env_number(ENV_VAR_QUILL_AUTOSAVE_TICKS)?
            .map(|ticks: u64| {
                u32::try_from(ticks).map_err(|_| {
                    AppError::Config(format!("{} is too large", ENV_VAR_QUILL_AUTOSAVE_TICKS))
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_AUTOSAVE_TICKS);

        let tick_ms = parse_env_number(ENV_VAR_QUILL_TICK_MS)?.unwrap_or(DEFAULT_TICK_MS);

        Ok(Config {
            journal_dir,
            autosave_ticks,
            tick_interval: Duration::from_millis(tick_ms),
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Journal directory path is empty"
    /// - "Journal directory must be an absolute path"
    /// - "Autosave tick count must be at least 1"
    /// - "Tick interval must be greater than zero"
    pub fn validate(&self) -> AppResult<()> {
        if self.journal_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Journal directory path is empty".to_string(),
            ));
        }

        if !self.journal_dir.is_absolute() {
            return Err(AppError::Config(
                "Journal directory must be an absolute path".to_string(),
            ));
        }

        if self.autosave_ticks == 0 {
            return Err(AppError::Config(
                "Autosave tick count must be at least 1".to_string(),
            ));
        }

        if self.tick_interval.is_zero() {
            return Err(AppError::Config(
                "Tick interval must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Reads an optional unsigned integer from the environment.
fn parse_env_number(var: &str) -> AppResult<Option<u64>> {
    match env::var(var) {
        Ok(raw) => raw.trim().parse::<u64>().map(Some).map_err(|_| {
            AppError::Config(format!(
                "{} must be a non-negative integer, got '{}'",
                var, raw
            ))
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::tempdir;

    fn setup() {
        env::remove_var(ENV_VAR_QUILL_DIR);
        env::remove_var(ENV_VAR_QUILL_AUTOSAVE_TICKS);
        env::remove_var(ENV_VAR_QUILL_TICK_MS);
    }

    #[test]
    fn test_debug_impl_redacts_journal_dir() {
        let config = Config {
            journal_dir: PathBuf::from("/home/username/private/diary"),
            ..Config::default()
        };

        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains("[REDACTED_PATH]"));
        assert!(!debug_output.contains("/home/username/private/diary"));
        assert!(debug_output.contains("autosave_ticks: 5"));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.autosave_ticks, 5);
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert_eq!(config.journal_dir, PathBuf::from(""));
    }

    #[test]
    #[serial]
    fn test_load_with_custom_dir() {
        setup();
        let temp_dir = tempdir().unwrap();
        let dir_path = temp_dir.path().to_string_lossy().to_string();

        env::set_var(ENV_VAR_QUILL_DIR, &dir_path);
        let config = Config::load();
        setup();

        let config = config.unwrap();
        assert_eq!(config.journal_dir, PathBuf::from(dir_path));
        assert_eq!(config.autosave_ticks, DEFAULT_AUTOSAVE_TICKS);
    }

    #[test]
    #[serial]
    fn test_load_defaults_to_home_subdir() {
        setup();
        let orig_home = env::var(ENV_VAR_HOME).ok();
        env::set_var(ENV_VAR_HOME, "/home/tester");

        let config = Config::load();

        match orig_home {
            Some(val) => env::set_var(ENV_VAR_HOME, val),
            None => env::remove_var(ENV_VAR_HOME),
        }

        let config = config.unwrap();
        assert_eq!(
            config.journal_dir,
            PathBuf::from("/home/tester/Documents/diary")
        );
    }

    #[test]
    #[serial]
    fn test_load_autosave_overrides() {
        setup();
        env::set_var(ENV_VAR_QUILL_DIR, "/tmp/quill-config-test");
        env::set_var(ENV_VAR_QUILL_AUTOSAVE_TICKS, "3");
        env::set_var(ENV_VAR_QUILL_TICK_MS, "250");

        let config = Config::load();
        setup();

        let config = config.unwrap();
        assert_eq!(config.autosave_ticks, 3);
        assert_eq!(config.tick_interval, Duration::from_millis(250));
    }

    #[test]
    #[serial]
    fn test_load_rejects_non_numeric_ticks() {
        setup();
        env::set_var(ENV_VAR_QUILL_DIR, "/tmp/quill-config-test");
        env::set_var(ENV_VAR_QUILL_AUTOSAVE_TICKS, "five");

        let result = Config::load();
        setup();

        match result {
            Err(AppError::Config(msg)) => {
                assert!(msg.contains("QUILL_AUTOSAVE_TICKS"));
                assert!(msg.contains("five"));
            }
            _ => panic!("Expected Config error for non-numeric tick count"),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        let temp_dir = tempdir().unwrap();
        let config = Config {
            journal_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_relative_journal_dir() {
        let config = Config {
            journal_dir: PathBuf::from("diary"),
            ..Config::default()
        };

        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("must be an absolute path"));
            }
            _ => panic!("Expected Config error about relative path"),
        }
    }

    #[test]
    fn test_validate_empty_journal_dir() {
        let config = Config::default();

        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("Journal directory path is empty"));
            }
            _ => panic!("Expected Config error about empty journal directory"),
        }
    }

    #[test]
    fn test_validate_zero_ticks() {
        let config = Config {
            journal_dir: PathBuf::from("/journal"),
            autosave_ticks: 0,
            ..Config::default()
        };

        match config.validate() {
            Err(AppError::Config(message)) => assert!(message.contains("at least 1")),
            _ => panic!("Expected Config error about autosave ticks"),
        }
    }

    #[test]
    fn test_validate_zero_interval() {
        let config = Config {
            journal_dir: PathBuf::from("/journal"),
            tick_interval: Duration::ZERO,
            ..Config::default()
        };

        match config.validate() {
            Err(AppError::Config(message)) => assert!(message.contains("greater than zero")),
            _ => panic!("Expected Config error about tick interval"),
        }
    }
}
