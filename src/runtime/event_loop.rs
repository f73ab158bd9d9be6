use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Position, Rect},
};
use tracing::debug;

use crate::audio::{EngineEvent, PlaybackEngine};
use crate::config;
use crate::controller::PlaybackController;
use crate::playlist::ModelEvent;
use crate::slider::{Geometry, Point, Pointer};
use crate::ui::{self, Button, ViewState};

use super::scan::ScanState;

/// Two clicks on the same row within this window activate it.
const DOUBLE_CLICK: Duration = Duration::from_millis(400);

/// Input poll timeout; also the redraw cadence while playing.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum SliderTarget {
    Seek,
    Volume,
}

/// What the loop should do after a key press.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Rescan,
    Quit,
}

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    pub view: ViewState,
    /// Internal two-key prefix state used for `gg` handling.
    pending_gg: bool,
    last_click: Option<(Instant, usize)>,
    /// The slider a mouse press started on, until the button is released.
    dragging: Option<(SliderTarget, Rect)>,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Main terminal event loop: applies engine and scan results, draws, and
/// handles input. Returns `Ok(())` when the user quits.
pub fn run<E: PlaybackEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut PlaybackController<E>,
    engine_events: &Receiver<EngineEvent>,
    model_events: &Receiver<ModelEvent>,
    scan: &mut ScanState,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(ev) = engine_events.try_recv() {
            controller.apply(ev);
        }
        scan.poll(controller);
        while let Ok(ev) = model_events.try_recv() {
            state.view.on_model_event(ev);
        }
        state.view.scanning = scan.is_scanning();

        terminal.draw(|f| {
            ui::draw(f, controller, &mut state.view, &settings.ui, &settings.controls)
        })?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match handle_key_event(key, settings, controller, state) {
                        KeyAction::Quit => break,
                        KeyAction::Rescan => scan.rescan(),
                        KeyAction::Continue => {}
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, controller, state, Instant::now()),
                _ => {}
            }
        }
    }

    Ok(())
}

pub fn handle_key_event<E: PlaybackEngine>(
    key: KeyEvent,
    settings: &config::Settings,
    controller: &mut PlaybackController<E>,
    state: &mut EventLoopState,
) -> KeyAction {
    let rows = controller.playlist().len();
    let gg_was_pending = std::mem::take(&mut state.pending_gg);

    match key.code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('u') => return KeyAction::Rescan,
        KeyCode::Char('p') | KeyCode::Char(' ') => controller.toggle_play_pause(),
        KeyCode::Char('s') => controller.stop(),
        KeyCode::Char('m') => controller.toggle_mute(),
        KeyCode::Char('l') => controller.next(),
        KeyCode::Char('h') => controller.previous(),
        KeyCode::Char('r') => controller.toggle_repeat(),
        KeyCode::Char('R') => controller.toggle_shuffle(),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            controller.nudge_volume(i64::from(settings.controls.volume_step));
        }
        KeyCode::Char('-') => {
            controller.nudge_volume(-i64::from(settings.controls.volume_step));
        }
        KeyCode::Char('L') => controller.scrub(scrub_ms(settings)),
        KeyCode::Char('H') => controller.scrub(-scrub_ms(settings)),
        KeyCode::Char('j') | KeyCode::Down => state.view.select_next(rows),
        KeyCode::Char('k') | KeyCode::Up => state.view.select_previous(rows),
        KeyCode::Char('g') => {
            if gg_was_pending {
                state.view.select_first(rows);
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => state.view.select_last(rows),
        KeyCode::Enter => {
            if let Some(row) = state.view.selected() {
                controller.activate_row(row);
            }
        }
        _ => {}
    }

    KeyAction::Continue
}

fn scrub_ms(settings: &config::Settings) -> i64 {
    i64::try_from(settings.controls.scrub_seconds.saturating_mul(1000)).unwrap_or(i64::MAX)
}

/// Route a mouse event to whatever the last frame drew under it. `now`
/// is the event time, used for double-click detection.
pub fn handle_mouse_event<E: PlaybackEngine>(
    mouse: MouseEvent,
    controller: &mut PlaybackController<E>,
    state: &mut EventLoopState,
    now: Instant,
) {
    let (x, y) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let hit = &state.view.hit;
            let slider = [(SliderTarget::Seek, hit.seek), (SliderTarget::Volume, hit.volume)]
                .into_iter()
                .find_map(|(target, area)| {
                    area.filter(|a| a.contains(Position::new(x, y))).map(|a| (target, a))
                });
            if let Some((target, area)) = slider {
                state.dragging = Some((target, area));
                send_pointer(controller, target, Pointer::Press(local(area, x, y)), area);
                return;
            }

            if let Some(button) = hit.button_at(x, y) {
                press_button(controller, button);
                return;
            }

            let rows = controller.playlist().len();
            if let Some(row) = state.view.row_at(x, y, rows) {
                state.view.select(row, rows);
                let double = state
                    .last_click
                    .is_some_and(|(at, last)| last == row && now.duration_since(at) < DOUBLE_CLICK);
                if double {
                    state.last_click = None;
                    controller.activate_row(row);
                } else {
                    state.last_click = Some((now, row));
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some((target, area)) = state.dragging {
                send_pointer(controller, target, Pointer::Drag(local(area, x, y)), area);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some((target, area)) = state.dragging.take() {
                send_pointer(controller, target, Pointer::Release(local(area, x, y)), area);
            }
        }
        MouseEventKind::ScrollDown => state.view.select_next(controller.playlist().len()),
        MouseEventKind::ScrollUp => state.view.select_previous(controller.playlist().len()),
        _ => {}
    }
}

fn press_button<E: PlaybackEngine>(controller: &mut PlaybackController<E>, button: Button) {
    debug!(?button, "button pressed");
    match button {
        Button::PlayPause => controller.toggle_play_pause(),
        Button::Stop => controller.stop(),
        Button::Next => controller.next(),
        Button::Previous => controller.previous(),
        Button::Mute => controller.toggle_mute(),
        Button::Repeat => controller.toggle_repeat(),
        Button::Shuffle => controller.toggle_shuffle(),
    }
}

fn send_pointer<E: PlaybackEngine>(
    controller: &mut PlaybackController<E>,
    target: SliderTarget,
    event: Pointer,
    area: Rect,
) {
    let geometry = Geometry::new(area.width, area.height);
    match target {
        SliderTarget::Seek => controller.seek_pointer(event, geometry),
        SliderTarget::Volume => controller.volume_pointer(event, geometry),
    };
}

/// Screen cell to slider-local cell. Drags past the left/top edge pin to 0.
fn local(area: Rect, x: u16, y: u16) -> Point {
    Point::new(x.saturating_sub(area.x), y.saturating_sub(area.y))
}
