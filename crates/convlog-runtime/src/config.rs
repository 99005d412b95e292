use crate::{Error, Result};
use convlog_engine::{OutputMode, TruncationBudget};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "convlog.toml";

pub const STATE_DIR_ENV: &str = "OPENCLAW_STATE_DIR";
pub const OUTPUT_DIR_ENV: &str = "CONVLOG_OUTPUT_DIR";
pub const MODE_ENV: &str = "CONVLOG_MODE";
pub const VERBOSE_ENV: &str = "CONVLOG_VERBOSE";

/// Resolve the runtime state directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. OPENCLAW_STATE_DIR environment variable (with tilde expansion)
/// 3. ~/.openclaw
pub fn resolve_state_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    resolve_state_dir_with(explicit_path, &process_env)
}

pub fn resolve_state_dir_with(
    explicit_path: Option<&str>,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Some(env_path) = env(STATE_DIR_ENV).filter(|p| !p.is_empty()) {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".openclaw"));
    }

    Err(Error::Config(
        "Could not determine state directory: no HOME directory found".to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Contents of `<state_dir>/convlog.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub output_dir: Option<PathBuf>,
    pub mode: OutputMode,
    pub verbose: bool,
    pub truncation: TruncationBudget,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn path_in(state_dir: &Path) -> PathBuf {
        state_dir.join(CONFIG_FILE_NAME)
    }
}

/// Values given on the command line. They win over the environment, which
/// wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub state_dir: Option<String>,
    pub output_dir: Option<String>,
    pub mode: Option<OutputMode>,
    pub verbose: Option<bool>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub state_dir: PathBuf,
    pub output_dir: PathBuf,
    pub mode: OutputMode,
    pub verbose: bool,
    pub truncation: TruncationBudget,
}

impl Settings {
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        Self::resolve_with(overrides, &process_env)
    }

    pub fn resolve_with(
        overrides: &Overrides,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let state_dir = resolve_state_dir_with(overrides.state_dir.as_deref(), env)?;
        let config = Config::load_from(&Config::path_in(&state_dir))?;

        let output_dir = match overrides.output_dir.as_deref() {
            Some(path) => expand_tilde(path),
            None => match env(OUTPUT_DIR_ENV).filter(|p| !p.is_empty()) {
                Some(path) => expand_tilde(&path),
                None => config
                    .output_dir
                    .clone()
                    .unwrap_or_else(|| state_dir.join("logs").join("conversations")),
            },
        };

        let mode = match overrides.mode {
            Some(mode) => mode,
            None => match env(MODE_ENV).filter(|m| !m.is_empty()) {
                Some(raw) => raw.trim().to_ascii_lowercase().parse().map_err(Error::Config)?,
                None => config.mode,
            },
        };

        let verbose = overrides
            .verbose
            .or_else(|| env(VERBOSE_ENV).map(|v| is_truthy(&v)))
            .unwrap_or(config.verbose);

        Ok(Self {
            state_dir,
            output_dir,
            mode,
            verbose,
            truncation: config.truncation,
        })
    }

    /// Settings rooted at explicit directories, ignoring environment and
    /// config file.
    pub fn with_dirs(state_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
            output_dir: output_dir.into(),
            mode: OutputMode::default(),
            verbose: false,
            truncation: TruncationBudget::default(),
        }
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("nonexistent.toml"))?;
        assert_eq!(config, Config::default());
        assert_eq!(config.mode, OutputMode::Incremental);
        Ok(())
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = Config::path_in(temp_dir.path());

        let config = Config {
            output_dir: Some(PathBuf::from("/var/log/convlog")),
            mode: OutputMode::Optimized,
            verbose: true,
            truncation: TruncationBudget {
                text: 100,
                ..Default::default()
            },
        };
        config.save_to(&path)?;

        let loaded = Config::load_from(&path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_partial_config_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = Config::path_in(temp_dir.path());
        std::fs::write(&path, "mode = \"full\"\n[truncation]\nthinking = 50\n")?;

        let config = Config::load_from(&path)?;
        assert_eq!(config.mode, OutputMode::Full);
        assert!(!config.verbose);
        assert_eq!(config.truncation.thinking, 50);
        assert_eq!(config.truncation.text, 600);
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_an_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = Config::path_in(temp_dir.path());
        std::fs::write(&path, "mode = \"everything\"\n")?;

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
        Ok(())
    }

    #[test]
    fn test_state_dir_priority() -> Result<()> {
        let env = env_from(&[(STATE_DIR_ENV, "/srv/openclaw")]);

        assert_eq!(
            resolve_state_dir_with(Some("/explicit"), &env)?,
            PathBuf::from("/explicit")
        );
        assert_eq!(
            resolve_state_dir_with(None, &env)?,
            PathBuf::from("/srv/openclaw")
        );

        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                resolve_state_dir_with(None, &env_from(&[]))?,
                home.join(".openclaw")
            );
        }
        Ok(())
    }

    #[test]
    fn test_settings_priority() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let state_dir = temp_dir.path().to_string_lossy().to_string();
        Config {
            output_dir: Some(PathBuf::from("/from/config")),
            mode: OutputMode::Full,
            ..Default::default()
        }
        .save_to(&Config::path_in(temp_dir.path()))?;

        let overrides = Overrides {
            state_dir: Some(state_dir.clone()),
            ..Default::default()
        };

        let settings = Settings::resolve_with(&overrides, &env_from(&[]))?;
        assert_eq!(settings.output_dir, PathBuf::from("/from/config"));
        assert_eq!(settings.mode, OutputMode::Full);
        assert!(!settings.verbose);

        let env = env_from(&[
            (OUTPUT_DIR_ENV, "/from/env"),
            (MODE_ENV, "Optimized"),
            (VERBOSE_ENV, "yes"),
        ]);
        let settings = Settings::resolve_with(&overrides, &env)?;
        assert_eq!(settings.output_dir, PathBuf::from("/from/env"));
        assert_eq!(settings.mode, OutputMode::Optimized);
        assert!(settings.verbose);

        let overrides = Overrides {
            state_dir: Some(state_dir),
            output_dir: Some("/from/flag".to_string()),
            mode: Some(OutputMode::Incremental),
            verbose: Some(false),
        };
        let settings = Settings::resolve_with(&overrides, &env)?;
        assert_eq!(settings.output_dir, PathBuf::from("/from/flag"));
        assert_eq!(settings.mode, OutputMode::Incremental);
        assert!(!settings.verbose);
        Ok(())
    }

    #[test]
    fn test_output_dir_defaults_under_state_dir() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let overrides = Overrides {
            state_dir: Some(temp_dir.path().to_string_lossy().to_string()),
            ..Default::default()
        };

        let settings = Settings::resolve_with(&overrides, &env_from(&[]))?;
        assert_eq!(
            settings.output_dir,
            temp_dir.path().join("logs").join("conversations")
        );
        assert_eq!(settings.mode, OutputMode::Incremental);
        Ok(())
    }

    #[test]
    fn test_unknown_mode_in_env_is_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let overrides = Overrides {
            state_dir: Some(temp_dir.path().to_string_lossy().to_string()),
            ..Default::default()
        };

        let result = Settings::resolve_with(&overrides, &env_from(&[(MODE_ENV, "verbose")]));
        assert!(matches!(result, Err(Error::Config(_))));
        Ok(())
    }

    #[test]
    fn test_truthy_values() {
        for value in ["1", "true", "YES", " on "] {
            assert!(is_truthy(value), "{value}");
        }
        for value in ["0", "false", "", "nope"] {
            assert!(!is_truthy(value), "{value}");
        }
    }
}
