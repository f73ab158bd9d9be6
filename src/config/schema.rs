use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/abyss/config.toml` or `~/.config/abyss/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ABYSS__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory to scan when none is given on the command line.
    pub root: Option<PathBuf>,
    /// File extensions to accept (case-insensitive, without dot).
    /// Empty means every regular file becomes a track.
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Optional cap on directory recursion depth (root = 0).
    pub max_depth: Option<usize>,
    /// Read durations from file headers while scanning.
    pub probe_durations: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: None,
            extensions: Vec::new(),
            follow_links: true,
            max_depth: None,
            probe_durations: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Volume applied at startup (0-100).
    pub initial_volume: u8,
    /// How often the engine reports the position while playing (milliseconds).
    pub notify_interval_ms: u64,
    /// Whether next/previous wrap around at the ends of the playlist.
    pub repeat: bool,
    /// Whether next/previous walk a shuffled order.
    pub shuffle: bool,
    /// What happens when a track plays to its end.
    pub on_track_end: TrackEndPolicy,
    /// Track to select and play once the playlist is loaded.
    pub initial_track: Option<PathBuf>,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            initial_volume: 50,
            notify_interval_ms: 50,
            repeat: false,
            shuffle: false,
            on_track_end: TrackEndPolicy::Stop,
            initial_track: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackEndPolicy {
    /// Stay stopped on the finished track.
    #[serde(alias = "stopped")]
    Stop,
    /// Move on as if `next` had been pressed.
    #[serde(alias = "next", alias = "auto-next", alias = "auto_next")]
    Advance,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Volume change per `+` / `-` press.
    pub volume_step: u8,
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// What a click on the volume bar away from the handle does.
    pub volume_click: SliderClick,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            volume_step: 5,
            scrub_seconds: 5,
            volume_click: SliderClick::Jump,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SliderClick {
    /// Jump straight to the clicked value.
    #[serde(alias = "jump-to-pointer")]
    Jump,
    /// Move one `volume_step` toward the click.
    #[serde(alias = "page-step", alias = "step")]
    Page,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Show track paths relative to the scanned directory.
    pub relative_paths: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " abyss ".to_string(),
            relative_paths: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file; defaults to `$XDG_STATE_HOME/abyss/abyss.log`.
    pub file: Option<PathBuf>,
    /// `tracing` filter directive, overridden by `ABYSS_LOG`.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}
