use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use tracing::{debug, info, warn};

use crate::audio::{EngineCmd, EngineEvent, PlaybackEngine, Transport};
use crate::config::{Settings, SliderClick, TrackEndPolicy};
use crate::error::LibraryError;
use crate::library::Track;
use crate::playlist::{ModelEvent, Playlist};
use crate::slider::{ClickBehavior, Geometry, JumpToPointer, PageStep, Pointer, PointerOutcome};
use crate::time::format_ms;

use super::order::PlayOrder;
use super::state::{Controls, PlaybackState};

/// The parts of [`Settings`] the controller acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    pub repeat: bool,
    pub shuffle: bool,
    pub on_track_end: TrackEndPolicy,
    pub quit_fade_out_ms: u64,
    pub volume_click: SliderClick,
    pub volume_step: u8,
}

impl ControllerSettings {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            repeat: settings.playback.repeat,
            shuffle: settings.playback.shuffle,
            on_track_end: settings.playback.on_track_end,
            quit_fade_out_ms: settings.audio.quit_fade_out_ms,
            volume_click: settings.controls.volume_click,
            volume_step: settings.controls.volume_step,
        }
    }

    fn volume_click_behavior(&self) -> Box<dyn ClickBehavior> {
        match self.volume_click {
            SliderClick::Jump => Box::new(JumpToPointer),
            SliderClick::Page => Box::new(PageStep {
                page: i64::from(self.volume_step),
            }),
        }
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

pub struct PlaybackController<E: PlaybackEngine> {
    engine: E,
    state: PlaybackState,
    playlist: Playlist,
    controls: Controls,
    order: PlayOrder,
    on_track_end: TrackEndPolicy,
    quit_fade_out_ms: u64,
    shut_down: bool,
}

impl<E: PlaybackEngine> PlaybackController<E> {
    pub fn new(engine: E, settings: ControllerSettings) -> Self {
        Self {
            engine,
            state: PlaybackState::default(),
            playlist: Playlist::new(),
            controls: Controls::new(
                settings.repeat,
                settings.shuffle,
                settings.volume_click_behavior(),
            ),
            order: PlayOrder::sequential(0),
            on_track_end: settings.on_track_end,
            quit_fade_out_ms: settings.quit_fade_out_ms,
            shut_down: false,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn status(&self) -> Option<&str> {
        self.controls.status.as_deref()
    }

    #[cfg(test)]
    pub fn order(&self) -> &PlayOrder {
        &self.order
    }

    /// Structural change notifications for views over the playlist.
    pub fn subscribe(&mut self) -> Receiver<ModelEvent> {
        self.playlist.subscribe()
    }

    #[cfg(test)]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    fn send(&mut self, cmd: EngineCmd) {
        match &cmd {
            EngineCmd::SetPlaylist(paths) => debug!(tracks = paths.len(), "engine command: SetPlaylist"),
            other => debug!(cmd = ?other, "engine command"),
        }
        if let Err(err) = self.engine.send(cmd) {
            warn!(error = %err, "engine command failed");
            self.controls.status = Some(err.to_string());
        }
    }

    // User-driven ------------------------------------------------------------

    /// Pause when playing, resume when paused. Does nothing when stopped.
    pub fn toggle_play_pause(&mut self) {
        match self.state.transport {
            Transport::Playing => self.send(EngineCmd::Pause),
            Transport::Paused => self.send(EngineCmd::Play),
            Transport::Stopped => debug!("play/pause ignored while stopped"),
        }
    }

    pub fn stop(&mut self) {
        self.send(EngineCmd::Stop);
    }

    pub fn toggle_mute(&mut self) {
        let muted = self.controls.mute.toggle();
        self.send(EngineCmd::SetMuted(muted));
    }

    pub fn toggle_repeat(&mut self) {
        let repeat = self.controls.repeat.toggle();
        debug!(repeat, "repeat toggled");
    }

    /// Shuffling draws a new random play order each time it is switched on.
    pub fn toggle_shuffle(&mut self) {
        let shuffle = self.controls.shuffle.toggle();
        self.order = PlayOrder::for_playlist(self.playlist.len(), shuffle);
        debug!(shuffle, "shuffle toggled");
    }

    /// Make row `row` the current track and start playing it.
    pub fn activate_row(&mut self, row: usize) {
        if !self.playlist.set_current(row) {
            debug!(row, rows = self.playlist.len(), "ignoring activation of missing row");
            return;
        }
        self.controls.status = None;
        self.send(EngineCmd::SetCurrentTrack(row));
        self.send(EngineCmd::Play);
    }

    pub fn next(&mut self) {
        let target = self
            .order
            .next_after(self.playlist.current(), self.controls.repeat.is_checked());
        if let Some(row) = target {
            self.activate_row(row);
        }
    }

    pub fn previous(&mut self) {
        let target = self
            .order
            .previous_before(self.playlist.current(), self.controls.repeat.is_checked());
        if let Some(row) = target {
            self.activate_row(row);
        }
    }

    /// Keyboard step on the volume slider.
    pub fn nudge_volume(&mut self, delta: i64) {
        self.controls.volume.step_by(delta);
        self.flush_volume();
    }

    /// Keyboard step on the seek slider, in milliseconds.
    pub fn scrub(&mut self, delta_ms: i64) {
        if self.state.transport == Transport::Stopped {
            return;
        }
        self.controls.seek.step_by(delta_ms);
        self.flush_seek();
    }

    /// Ask the engine for a volume; the slider follows once it confirms.
    pub fn set_volume(&mut self, volume: u8) {
        self.send(EngineCmd::SetVolume(volume.min(100)));
    }

    /// Pointer input on the seek bar. A stopped engine has nothing to seek
    /// in, so new presses are ignored until something plays.
    pub fn seek_pointer(&mut self, event: Pointer, geometry: Geometry) -> PointerOutcome {
        if self.state.transport == Transport::Stopped && !self.controls.seek.is_grabbed() {
            return PointerOutcome::Ignored;
        }
        let outcome = self.controls.seek.handle_pointer(event, geometry);
        self.flush_seek();
        outcome
    }

    pub fn volume_pointer(&mut self, event: Pointer, geometry: Geometry) -> PointerOutcome {
        let outcome = self.controls.volume.handle_pointer(event, geometry);
        self.flush_volume();
        outcome
    }

    fn flush_seek(&mut self) {
        let changes = self.controls.seek.take_changes();
        if self.state.transport == Transport::Stopped {
            // Stopped mid-drag: the bar goes back to what the engine reported.
            self.controls.seek.set_value(slider_value(self.state.position_ms));
            return;
        }
        for change in changes {
            let mut ms = u64::try_from(change.value).unwrap_or(0);
            if self.state.duration_ms > 0 {
                ms = ms.min(self.state.duration_ms);
            }
            self.send(EngineCmd::SetPosition(ms));
        }
    }

    fn flush_volume(&mut self) {
        for change in self.controls.volume.take_changes() {
            let volume = u8::try_from(change.value.clamp(0, 100)).unwrap_or(100);
            self.send(EngineCmd::SetVolume(volume));
        }
    }

    /// Install the result of a directory scan as the new playlist.
    pub fn playlist_ready(&mut self, root: PathBuf, result: Result<Vec<Track>, LibraryError>) {
        let tracks = match result {
            Ok(tracks) => {
                self.controls.status = None;
                tracks
            }
            Err(err) => {
                warn!(error = %err, "playlist unavailable");
                self.controls.status = Some(err.to_string());
                Vec::new()
            }
        };

        if self.playlist.current().is_some() || self.state.transport != Transport::Stopped {
            self.send(EngineCmd::Stop);
        }

        info!(root = %root.display(), tracks = tracks.len(), "playlist ready");
        self.playlist.replace(Some(root), tracks);
        self.order =
            PlayOrder::for_playlist(self.playlist.len(), self.controls.shuffle.is_checked());
        let paths = self.playlist.paths();
        self.send(EngineCmd::SetPlaylist(paths));

        self.state.position_ms = 0;
        self.state.duration_ms = 0;
        self.controls.seek.set_range(0, 0);
        self.controls.seek.set_value(0);
        self.refresh_label();
    }

    /// Start the configured initial track. Relative paths are taken from the
    /// playlist root. Returns whether a matching row was found.
    pub fn select_initial_track(&mut self, path: &Path) -> bool {
        let path = match self.playlist.root() {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        };
        match self.playlist.position_of(&path) {
            Some(row) => {
                info!(path = %path.display(), row, "starting initial track");
                self.activate_row(row);
                true
            }
            None => {
                warn!(path = %path.display(), "initial track not in playlist");
                false
            }
        }
    }

    // Engine-driven ----------------------------------------------------------

    pub fn apply(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::TransportChanged(transport) => {
                self.state.transport = transport;
                self.controls.show_transport(transport);
            }
            EngineEvent::PositionChanged(ms) => {
                let ms = if self.state.duration_ms > 0 {
                    ms.min(self.state.duration_ms)
                } else {
                    ms
                };
                self.state.position_ms = ms;
                self.controls.seek.set_value(slider_value(ms));
                self.refresh_label();
            }
            EngineEvent::DurationChanged(ms) => {
                self.state.duration_ms = ms;
                if ms > 0 && self.state.position_ms > ms {
                    self.state.position_ms = ms;
                }
                self.controls.seek.set_range(0, slider_value(ms));
                self.controls.seek.set_value(slider_value(self.state.position_ms));
                if ms > 0 {
                    if let Some(row) = self.playlist.current() {
                        self.playlist.record_duration(row, ms);
                    }
                }
                self.refresh_label();
            }
            EngineEvent::VolumeChanged(volume) => {
                self.state.volume = volume;
                self.controls.volume.set_value(i64::from(volume));
            }
            EngineEvent::MutedChanged(muted) => {
                self.state.muted = muted;
                self.controls.mute.set_checked(muted);
            }
            EngineEvent::TrackFinished => {
                debug!(
                    row = ?self.playlist.current(),
                    path = ?self.playlist.current_track().map(Track::path),
                    "track finished"
                );
                if self.on_track_end == TrackEndPolicy::Advance {
                    self.next();
                }
            }
            EngineEvent::PlaybackError { reason } => {
                warn!(%reason, row = ?self.playlist.current(), "playback error");
                self.state.transport = Transport::Stopped;
                self.controls.show_transport(Transport::Stopped);
                self.controls.status = Some(reason);
            }
        }
    }

    fn refresh_label(&mut self) {
        self.controls.time_label = format!(
            "{} / {}",
            format_ms(self.state.position_ms),
            format_ms(self.state.duration_ms)
        );
    }

    /// Tell the engine to stop and exit. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        info!("shutting down playback");
        self.send(EngineCmd::Shutdown {
            fade_out_ms: self.quit_fade_out_ms,
        });
    }
}

impl<E: PlaybackEngine> Drop for PlaybackController<E> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn slider_value(ms: u64) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX)
}
