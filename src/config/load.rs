use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `ABYSS__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ABYSS")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.playback.initial_volume > 100 {
            return Err("playback.initial_volume must be <= 100".to_string());
        }
        if self.playback.notify_interval_ms == 0 {
            return Err("playback.notify_interval_ms must be >= 1".to_string());
        }
        if self.controls.volume_step == 0 {
            return Err("controls.volume_step must be >= 1".to_string());
        }
        Ok(())
    }

    /// Render the default settings as TOML, for `--default-config`.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&Settings::default())
    }
}

/// Resolve the config path from `ABYSS_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ABYSS_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/abyss/config.toml`
/// or `~/.config/abyss/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("abyss").join("config.toml"))
}

/// Compute the default log file under `$XDG_STATE_HOME/abyss/abyss.log`
/// or `~/.local/state/abyss/abyss.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("abyss").join("abyss.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
