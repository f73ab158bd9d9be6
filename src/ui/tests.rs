use std::path::PathBuf;

use ratatui::{Terminal, backend::TestBackend, layout::Rect};

use super::*;
use crate::audio::{EngineCmd, EngineEvent, Transport};
use crate::config::Settings;
use crate::controller::ControllerSettings;
use crate::error::EngineError;
use crate::library::Track;
use crate::playlist::ModelEvent;
use crate::slider::{Point, Pointer};

struct NullEngine;

impl PlaybackEngine for NullEngine {
    fn send(&mut self, _cmd: EngineCmd) -> Result<(), EngineError> {
        Ok(())
    }
}

fn controller(names: &[&str]) -> PlaybackController<NullEngine> {
    let mut c = PlaybackController::new(NullEngine, ControllerSettings::default());
    let tracks = names
        .iter()
        .map(|n| Track::new(PathBuf::from("/music").join(n)))
        .collect();
    c.playlist_ready(PathBuf::from("/music"), Ok(tracks));
    c
}

fn render(c: &PlaybackController<NullEngine>, view: &mut ViewState) -> String {
    let settings = Settings::default();
    let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
    terminal
        .draw(|frame| draw(frame, c, view, &settings.ui, &settings.controls))
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn slider_line_places_handle_and_fill() {
    let mut slider = SeekableSlider::new(0, 100);
    slider.set_value(50);
    assert_eq!(slider_line(&slider, 11), "━━━━━●─────");

    slider.set_value(0);
    assert_eq!(slider_line(&slider, 5), "●────");

    let mut inverted = SeekableSlider::new(0, 100).with_inverted_appearance(true);
    inverted.set_value(0);
    assert_eq!(slider_line(&inverted, 5), "────●");

    assert_eq!(slider_line(&slider, 0), "");
}

#[test]
fn footer_mentions_configured_steps() {
    let text = controls_text(&ControlsSettings {
        volume_step: 7,
        scrub_seconds: 12,
        ..ControlsSettings::default()
    });
    assert!(text.contains("[H/L] scrub -/+12s"));
    assert!(text.contains("[+/-] volume +/-7"));
    assert!(text.contains("[q] quit"));
}

#[test]
fn frame_shows_rows_label_and_records_hit_areas() {
    let mut c = controller(&["a.ogg", "sub/b.ogg"]);
    c.activate_row(1);
    c.apply(EngineEvent::DurationChanged(125_000));
    c.apply(EngineEvent::PositionChanged(65_000));

    let mut view = ViewState::default();
    let screen = render(&c, &mut view);

    assert!(screen.contains("1:05 / 2:05"));
    assert!(screen.contains("file name"));
    assert!(screen.contains("sub/b.ogg"));
    assert!(screen.contains("2:05"));
    assert_eq!(view.hit.buttons.len(), Button::ALL.len());
    assert!(view.hit.seek.is_some());
    assert!(view.hit.volume.is_some());

    let rows = view.hit.rows.unwrap();
    assert_eq!(view.row_at(rows.x + 3, rows.y, 2), Some(0));
    assert_eq!(view.row_at(rows.x + 3, rows.y + 1, 2), Some(1));
    assert_eq!(view.row_at(rows.x + 3, rows.y + 2, 2), None);
}

#[test]
fn held_seek_handle_previews_the_target_time() {
    let mut c = controller(&["a.ogg"]);
    c.activate_row(0);
    c.apply(EngineEvent::TransportChanged(Transport::Playing));
    c.apply(EngineEvent::DurationChanged(100_000));

    let g = Geometry::new(11, 1);
    c.seek_pointer(Pointer::Press(Point::new(0, 0)), g);
    c.seek_pointer(Pointer::Drag(Point::new(5, 0)), g);
    let screen = render(&c, &mut ViewState::default());
    assert!(screen.contains("0:50 / 1:40"));
    assert_eq!(c.controls().time_label, "0:00 / 1:40");

    c.seek_pointer(Pointer::Release(Point::new(5, 0)), g);
    let screen = render(&c, &mut ViewState::default());
    assert!(screen.contains("0:00 / 1:40"));
    assert!(!screen.contains("0:50 / 1:40"));
}

#[test]
fn empty_playlist_says_whether_a_scan_is_running() {
    let c = controller(&[]);
    let mut view = ViewState {
        scanning: true,
        ..ViewState::default()
    };
    let screen = render(&c, &mut view);
    assert!(screen.contains("scanning..."));

    view.scanning = false;
    let screen = render(&c, &mut view);
    assert!(screen.contains("no tracks found"));
    assert!(!screen.contains("scanning"));
}

#[test]
fn status_line_prefers_errors() {
    let mut c = controller(&["a.ogg"]);
    c.apply(EngineEvent::PlaybackError {
        reason: "cannot play /music/a.ogg: bad header".into(),
    });
    let screen = render(&c, &mut ViewState::default());
    assert!(screen.contains("cannot play /music/a.ogg: bad header"));
}

#[test]
fn buttons_are_found_by_position() {
    let mut hit = HitAreas::default();
    hit.buttons.push((Button::Stop, Rect::new(10, 2, 6, 1)));
    assert_eq!(hit.button_at(12, 2), Some(Button::Stop));
    assert_eq!(hit.button_at(16, 2), None);
    assert_eq!(hit.button_at(12, 3), None);
}

#[test]
fn selection_moves_within_bounds_and_resets() {
    let mut view = ViewState::default();
    view.on_model_event(ModelEvent::Reset { rows: 3 });
    assert_eq!(view.selected(), Some(0));

    view.select_previous(3);
    assert_eq!(view.selected(), Some(0));
    view.select_next(3);
    view.select_next(3);
    view.select_next(3);
    assert_eq!(view.selected(), Some(2));
    view.select_first(3);
    assert_eq!(view.selected(), Some(0));
    view.select_last(3);
    assert_eq!(view.selected(), Some(2));

    view.select(7, 3);
    assert_eq!(view.selected(), Some(2));

    view.on_model_event(ModelEvent::Reset { rows: 0 });
    assert_eq!(view.selected(), None);
    view.select_next(0);
    assert_eq!(view.selected(), None);
}
