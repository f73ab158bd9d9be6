use crate::audio::Transport;
use crate::slider::{ClickBehavior, SeekableSlider};

/// What the controller last heard from the engine.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub transport: Transport,
    pub position_ms: u64,
    /// 0 while unknown.
    pub duration_ms: u64,
    pub volume: u8,
    pub muted: bool,
}

/// A checkable button.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ToggleButton {
    checked: bool,
}

impl ToggleButton {
    pub fn new(checked: bool) -> Self {
        Self { checked }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub(super) fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Flip the checked state and return the new one.
    pub(super) fn toggle(&mut self) -> bool {
        self.checked = !self.checked;
        self.checked
    }
}

/// Everything the UI draws besides the playlist table.
#[derive(Debug)]
pub struct Controls {
    pub play_pause: ToggleButton,
    pub stop: ToggleButton,
    pub mute: ToggleButton,
    pub repeat: ToggleButton,
    pub shuffle: ToggleButton,
    pub seek: SeekableSlider,
    pub volume: SeekableSlider,
    pub time_label: String,
    /// Last user-visible problem, if any.
    pub status: Option<String>,
}

impl Controls {
    pub(super) fn new(repeat: bool, shuffle: bool, volume_click: Box<dyn ClickBehavior>) -> Self {
        Self {
            play_pause: ToggleButton::new(false),
            stop: ToggleButton::new(true),
            mute: ToggleButton::new(false),
            repeat: ToggleButton::new(repeat),
            shuffle: ToggleButton::new(shuffle),
            // Seeking only commits when the handle is released.
            seek: SeekableSlider::new(0, 0).with_tracking(false),
            volume: SeekableSlider::new(0, 100).with_click_behavior(volume_click),
            time_label: "0:00 / 0:00".to_string(),
            status: None,
        }
    }

    /// Mirror a transport state onto the play/pause and stop toggles.
    pub(super) fn show_transport(&mut self, transport: Transport) {
        let (play_pause, stop) = match transport {
            Transport::Stopped => (false, true),
            Transport::Playing => (true, false),
            Transport::Paused => (false, false),
        };
        self.play_pause.set_checked(play_pause);
        self.stop.set_checked(stop);
    }
}
