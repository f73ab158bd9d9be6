use std::env;
use std::path::{self, PathBuf};

use crate::audio::PlaybackEngine;
use crate::config::{self, LibrarySettings};
use crate::controller::PlaybackController;

pub const USAGE: &str = "usage: abyss [DIR]\n       abyss --default-config";

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cli {
    Run { dir: Option<PathBuf> },
    PrintDefaultConfig,
    Help,
}

pub fn parse_args<I>(args: I) -> Cli
where
    I: IntoIterator<Item = String>,
{
    match args.into_iter().next() {
        None => Cli::Run { dir: None },
        Some(arg) => match arg.as_str() {
            "--default-config" => Cli::PrintDefaultConfig,
            "-h" | "--help" => Cli::Help,
            _ => Cli::Run {
                dir: Some(PathBuf::from(arg)),
            },
        },
    }
}

/// The directory to scan: command line, then `library.root`, then the
/// working directory. Relative roots are made absolute so track paths are.
pub fn resolve_root(arg: Option<PathBuf>, library: &LibrarySettings) -> PathBuf {
    let root = arg
        .or_else(|| library.root.clone())
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    path::absolute(&root).unwrap_or(root)
}

pub fn apply_playback_defaults<E: PlaybackEngine>(
    controller: &mut PlaybackController<E>,
    settings: &config::Settings,
) {
    // The volume slider follows once the engine confirms.
    controller.set_volume(settings.playback.initial_volume);
}
