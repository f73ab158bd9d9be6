use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, info, warn};

use crate::error::EngineError;

use super::sink::{create_sink_at, probe_duration};
use super::types::{EngineCmd, EngineEvent, Transport};

/// Steps used when fading the output out on shutdown.
const FADE_STEPS: u64 = 20;

pub(super) fn spawn_audio_thread(
    rx: Receiver<EngineCmd>,
    events: Sender<EngineEvent>,
    notify_interval: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let err = EngineError::Output {
                    reason: e.to_string(),
                };
                error!(error = %err, "audio output unavailable");
                run_without_output(rx, events, err);
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut engine = Engine::new(stream, events, notify_interval);
        engine.announce_level();
        loop {
            match rx.recv_timeout(engine.notify_interval) {
                Ok(EngineCmd::Shutdown { fade_out_ms }) => {
                    engine.shutdown(fade_out_ms);
                    break;
                }
                Ok(cmd) => engine.handle(cmd),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    engine.stop();
                    break;
                }
            }
            engine.tick();
        }
        debug!("audio thread exiting");
    })
}

/// Keep answering commands when no output device could be opened, so the
/// rest of the program still runs and reports why nothing plays.
pub(super) fn run_without_output(
    rx: Receiver<EngineCmd>,
    events: Sender<EngineEvent>,
    err: EngineError,
) {
    let reason = err.to_string();
    let mut level = OutputLevel::default();
    for event in level.announce() {
        let _ = events.send(event);
    }
    for cmd in rx {
        let event = match cmd {
            EngineCmd::Shutdown { .. } => break,
            EngineCmd::Play => EngineEvent::PlaybackError {
                reason: reason.clone(),
            },
            EngineCmd::SetVolume(volume) => level.set_volume(volume),
            EngineCmd::SetMuted(muted) => level.set_muted(muted),
            _ => continue,
        };
        let _ = events.send(event);
    }
}

/// Volume and mute as the engine holds them. Every update is echoed back,
/// changed or not, so the controller always mirrors the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) struct OutputLevel {
    pub volume: u8,
    pub muted: bool,
}

impl Default for OutputLevel {
    fn default() -> Self {
        Self {
            volume: 100,
            muted: false,
        }
    }
}

impl OutputLevel {
    pub fn set_volume(&mut self, volume: u8) -> EngineEvent {
        self.volume = volume.min(100);
        EngineEvent::VolumeChanged(self.volume)
    }

    pub fn set_muted(&mut self, muted: bool) -> EngineEvent {
        self.muted = muted;
        EngineEvent::MutedChanged(muted)
    }

    /// The current level as events, sent once when the engine starts.
    pub fn announce(&self) -> [EngineEvent; 2] {
        [
            EngineEvent::VolumeChanged(self.volume),
            EngineEvent::MutedChanged(self.muted),
        ]
    }

    pub fn gain(&self) -> f32 {
        effective_volume(self.volume, self.muted)
    }
}

/// Output gain for a 0-100 volume.
pub(super) fn effective_volume(volume: u8, muted: bool) -> f32 {
    if muted {
        0.0
    } else {
        f32::from(volume.min(100)) / 100.0
    }
}

/// Clamp a seek target to the track length once the length is known.
pub(super) fn clamp_position(target_ms: u64, duration_ms: u64) -> u64 {
    if duration_ms == 0 {
        target_ms
    } else {
        target_ms.min(duration_ms)
    }
}

struct Engine {
    stream: OutputStream,
    events: Sender<EngineEvent>,
    notify_interval: Duration,

    tracks: Vec<PathBuf>,
    current: Option<usize>,
    sink: Option<Sink>,
    transport: Transport,

    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,
    duration_ms: u64,
    last_reported: Option<u64>,

    level: OutputLevel,
}

impl Engine {
    fn new(stream: OutputStream, events: Sender<EngineEvent>, notify_interval: Duration) -> Self {
        Self {
            stream,
            events,
            notify_interval,
            tracks: Vec::new(),
            current: None,
            sink: None,
            transport: Transport::Stopped,
            started_at: None,
            accumulated: Duration::ZERO,
            duration_ms: 0,
            last_reported: None,
            level: OutputLevel::default(),
        }
    }

    fn emit(&self, event: EngineEvent) {
        let _ = self.events.send(event);
    }

    fn handle(&mut self, cmd: EngineCmd) {
        match cmd {
            EngineCmd::SetPlaylist(paths) => {
                self.stop();
                debug!(tracks = paths.len(), "engine playlist replaced");
                self.tracks = paths;
                self.current = None;
                self.set_duration(0);
            }
            EngineCmd::SetCurrentTrack(index) => self.load(index),
            EngineCmd::Play => self.play(),
            EngineCmd::Pause => self.pause(),
            EngineCmd::Stop => self.stop(),
            EngineCmd::SetPosition(ms) => self.seek(ms),
            EngineCmd::SetVolume(volume) => {
                let event = self.level.set_volume(volume);
                self.apply_volume();
                self.emit(event);
            }
            EngineCmd::SetMuted(muted) => {
                let event = self.level.set_muted(muted);
                self.apply_volume();
                self.emit(event);
            }
            // Handled by the thread loop.
            EngineCmd::Shutdown { .. } => {}
        }
    }

    fn load(&mut self, index: usize) {
        let Some(path) = self.tracks.get(index).cloned() else {
            let err = EngineError::NoSuchTrack { index };
            warn!(error = %err, "ignoring track change");
            self.emit(EngineEvent::PlaybackError {
                reason: err.to_string(),
            });
            return;
        };

        let was_playing = self.transport == Transport::Playing;
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.current = Some(index);
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.report_position(0);
        self.set_duration(probe_duration(&path).unwrap_or(0));
        info!(path = %path.display(), "track loaded");

        // A track change keeps playing if the previous track was playing.
        if was_playing {
            if let Err(err) = self.start(Duration::ZERO) {
                self.fail(err);
            }
        } else {
            self.set_transport(Transport::Stopped);
        }
    }

    fn play(&mut self) {
        match self.transport {
            Transport::Playing => {}
            Transport::Paused => {
                if let Some(s) = self.sink.as_ref() {
                    s.play();
                    self.started_at = Some(Instant::now());
                    self.set_transport(Transport::Playing);
                }
            }
            Transport::Stopped => {
                if self.current.is_none() {
                    debug!("play requested with no track loaded");
                    return;
                }
                match self.start(Duration::ZERO) {
                    Ok(()) => self.set_transport(Transport::Playing),
                    Err(err) => self.fail(err),
                }
            }
        }
    }

    fn pause(&mut self) {
        if self.transport != Transport::Playing {
            return;
        }
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        self.accumulated = self.elapsed();
        self.started_at = None;
        self.set_transport(Transport::Paused);
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        if self.transport != Transport::Stopped {
            self.set_transport(Transport::Stopped);
            self.report_position(0);
        }
    }

    fn seek(&mut self, target_ms: u64) {
        if self.transport == Transport::Stopped {
            debug!(target_ms, "seek ignored while stopped");
            return;
        }
        let ms = clamp_position(target_ms, self.duration_ms);
        let paused = self.transport == Transport::Paused;

        // Scrubbing: rebuild the current sink and skip into the file.
        // This uses `Source::skip_duration` (works for common formats).
        match self.start(Duration::from_millis(ms)) {
            Ok(()) => {
                if paused {
                    if let Some(s) = self.sink.as_ref() {
                        s.pause();
                    }
                    self.started_at = None;
                }
                self.report_position(ms);
            }
            Err(err) => self.fail(err),
        }
    }

    /// Replace the sink with a fresh one at `offset` and start it.
    fn start(&mut self, offset: Duration) -> Result<(), EngineError> {
        let index = self.current.ok_or(EngineError::NoSuchTrack { index: 0 })?;
        let path = self
            .tracks
            .get(index)
            .ok_or(EngineError::NoSuchTrack { index })?;

        if let Some(s) = self.sink.take() {
            s.stop();
        }
        let sink = create_sink_at(&self.stream, path, offset)?;
        sink.set_volume(self.level.gain());
        sink.play();

        self.sink = Some(sink);
        self.started_at = Some(Instant::now());
        self.accumulated = offset;
        Ok(())
    }

    fn fail(&mut self, err: EngineError) {
        warn!(error = %err, "playback failed");
        self.stop();
        self.emit(EngineEvent::PlaybackError {
            reason: err.to_string(),
        });
    }

    /// Periodic work between commands: position notifications and end of track.
    fn tick(&mut self) {
        if self.transport != Transport::Playing {
            return;
        }
        let finished = self.sink.as_ref().is_none_or(Sink::empty);
        if finished {
            debug!(index = ?self.current, "track finished");
            self.sink = None;
            self.started_at = None;
            self.accumulated = Duration::ZERO;
            if self.duration_ms > 0 {
                self.report_position(self.duration_ms);
            }
            self.set_transport(Transport::Stopped);
            self.emit(EngineEvent::TrackFinished);
            return;
        }

        let ms = u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.report_position(clamp_position(ms, self.duration_ms));
    }

    fn shutdown(&mut self, fade_out_ms: u64) {
        if self.transport == Transport::Playing {
            if let Some(s) = self.sink.as_ref() {
                fade_out_sink(s, self.level.gain(), fade_out_ms);
            }
        }
        self.stop();
        info!("audio engine shut down");
    }

    fn announce_level(&self) {
        for event in self.level.announce() {
            self.emit(event);
        }
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn apply_volume(&self) {
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(self.level.gain());
        }
    }

    fn set_transport(&mut self, transport: Transport) {
        if self.transport != transport {
            self.transport = transport;
            self.emit(EngineEvent::TransportChanged(transport));
        }
    }

    fn set_duration(&mut self, ms: u64) {
        if self.duration_ms != ms {
            self.duration_ms = ms;
            self.emit(EngineEvent::DurationChanged(ms));
        }
    }

    fn report_position(&mut self, ms: u64) {
        if self.last_reported != Some(ms) {
            self.last_reported = Some(ms);
            self.emit(EngineEvent::PositionChanged(ms));
        }
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let step_ms = (fade_out_ms / FADE_STEPS).max(1);
    for step in 1..=FADE_STEPS {
        let t = step as f32 / FADE_STEPS as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
