use std::env;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::audio::AudioPlayer;
use crate::config;
use crate::controller::{ControllerSettings, PlaybackController};

mod event_loop;
mod logging;
mod scan;
mod settings;
mod startup;

use startup::Cli;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let dir = match startup::parse_args(env::args().skip(1)) {
        Cli::Run { dir } => dir,
        Cli::PrintDefaultConfig => {
            print!("{}", config::Settings::default_toml()?);
            return Ok(());
        }
        Cli::Help => {
            println!("{}", startup::USAGE);
            return Ok(());
        }
    };

    let settings::LoadedSettings { settings, fallback } = settings::load_settings();
    match logging::init(&settings.logging) {
        Ok(path) => info!(log = %path.display(), "abyss starting"),
        Err(e) => eprintln!("abyss: logging disabled: {e}"),
    }
    if let Some(reason) = fallback {
        warn!(%reason, "running on default settings");
    }

    let root = startup::resolve_root(dir, &settings.library);
    let (player, engine_events) =
        AudioPlayer::spawn(Duration::from_millis(settings.playback.notify_interval_ms));
    let mut controller =
        PlaybackController::new(player, ControllerSettings::from_settings(&settings));
    let model_events = controller.subscribe();
    startup::apply_playback_defaults(&mut controller, &settings);

    let mut scan = scan::ScanState::start(
        root,
        settings.library.clone(),
        settings.playback.initial_track.clone(),
    );

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::new();
    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut controller,
        &engine_events,
        &model_events,
        &mut scan,
        &mut state,
    );
    if let Err(e) = &run_result {
        warn!(error = %e, "event loop failed");
    }

    // Fade out and join the audio thread before handing the terminal back.
    controller.shutdown();
    drop(controller);
    drop(scan);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("abyss exiting");
    run_result
}
