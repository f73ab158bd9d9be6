use crate::config::Settings;

/// The settings to run with. `fallback` says why the defaults replaced the
/// config file, when they did.
#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub fallback: Option<String>,
}

pub fn load_settings() -> LoadedSettings {
    resolve(Settings::load().map_err(|e| format!("failed to load config: {e}")))
}

/// An unreadable or invalid config never keeps the player from
/// starting; it runs on defaults instead.
pub(super) fn resolve(loaded: Result<Settings, String>) -> LoadedSettings {
    let checked = loaded.and_then(|s| match s.validate() {
        Ok(()) => Ok(s),
        Err(msg) => Err(format!("invalid config: {msg}")),
    });
    match checked {
        Ok(settings) => LoadedSettings {
            settings,
            fallback: None,
        },
        Err(reason) => {
            // Logging is configured from these settings, so stderr is all
            // there is at this point.
            eprintln!("abyss: {reason}, using defaults");
            LoadedSettings {
                settings: Settings::default(),
                fallback: Some(reason),
            }
        }
    }
}
