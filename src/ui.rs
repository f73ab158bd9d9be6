//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. Drawing
//! also records where the interactive parts ended up (see [`HitAreas`]) so
//! the event loop can route mouse input.

mod view;

pub use view::{Button, HitAreas, ViewState};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, HighlightSpacing, Padding, Paragraph, Row, Table, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::audio::{PlaybackEngine, Transport};
use crate::config::{ControlsSettings, UiSettings};
use crate::controller::PlaybackController;
use crate::playlist::{Column, PlaylistModel};
use crate::slider::{Geometry, Orientation, SeekableSlider};
use crate::time::{format_ms, format_signed_ms};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "play selected");
    map.insert("space/p", "play/pause");
    map.insert("s", "stop");
    map.insert("h/l", "prev/next");
    map.insert("m", "mute");
    map.insert("r", "repeat");
    map.insert("R", "shuffle");
    map.insert("u", "rescan");
    map.insert("q", "quit");
    // H/L and +/- are filled dynamically from config.
    map
});

/// Render the controls help text, incorporating the configured step sizes.
fn controls_text(controls: &ControlsSettings) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "enter", "space/p", "s", "h/l", "H/L", "+/-", "m", "r", "R", "gg/G", "u", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "H/L" => Some(format!("[H/L] scrub -/+{}s", controls.scrub_seconds)),
            "+/-" => Some(format!("[+/-] volume +/-{}", controls.volume_step)),
            _ => CONTROLS_MAP.get(k).map(|v| format!("[{}] {}", k, v)),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Draw a horizontal slider as a single line of `width` cells.
pub fn slider_line(slider: &SeekableSlider, width: u16) -> String {
    let Some(handle) = slider.handle_offset(Geometry::new(width, 1)) else {
        return String::new();
    };
    // The filled part runs from the `min` edge up to the handle.
    let filled = |i: u16| match (slider.orientation(), slider.is_inverted()) {
        (Orientation::Horizontal, false) | (Orientation::Vertical, true) => i < handle,
        _ => i > handle,
    };
    (0..width)
        .map(|i| {
            if i == handle {
                '●'
            } else if filled(i) {
                '━'
            } else {
                '─'
            }
        })
        .collect()
}

fn transport_text(transport: Transport) -> &'static str {
    match transport {
        Transport::Stopped => "Stopped",
        Transport::Playing => "Playing",
        Transport::Paused => "Paused",
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// Render the entire UI into the provided `frame` and record hit areas in `view`.
pub fn draw<E: PlaybackEngine>(
    frame: &mut Frame,
    controller: &PlaybackController<E>,
    view: &mut ViewState,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let model = PlaylistModel::new(controller.playlist()).relative_paths(ui_settings.relative_paths);
    let controls = controller.controls();
    let state = controller.state();

    // Header: what is loaded right now.
    let now_playing = controller
        .playlist()
        .current()
        .and_then(|row| model.data(row, Column::Name))
        .unwrap_or_else(|| "nothing loaded".to_string());
    let header = Paragraph::new(now_playing)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(ui_settings.header_text.as_str())
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Buttons and volume.
    let controls_block = Block::default().borders(Borders::ALL).title(" controls ");
    let inner = controls_block.inner(chunks[1]);
    frame.render_widget(controls_block, chunks[1]);

    let mut buttons = Vec::with_capacity(Button::ALL.len());
    let mut spans = Vec::with_capacity(Button::ALL.len() * 2);
    let mut x = inner.x;
    for button in Button::ALL {
        let checked = match button {
            Button::PlayPause => controls.play_pause.is_checked(),
            Button::Stop => controls.stop.is_checked(),
            Button::Mute => controls.mute.is_checked(),
            Button::Repeat => controls.repeat.is_checked(),
            Button::Shuffle => controls.shuffle.is_checked(),
            Button::Next | Button::Previous => false,
        };
        let text = format!("[{}]", button.label());
        let width = text.chars().count() as u16;
        let span = if checked {
            Span::styled(text, Style::default().add_modifier(Modifier::REVERSED))
        } else {
            Span::raw(text)
        };
        buttons.push((
            button,
            Rect {
                x,
                y: inner.y,
                width,
                height: 1,
            },
        ));
        spans.push(span);
        spans.push(Span::raw(" "));
        x = x.saturating_add(width + 1);
    }
    let buttons_width = x.saturating_sub(inner.x);

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(buttons_width),
            Constraint::Min(1),
            Constraint::Length(5),
        ])
        .split(inner);
    frame.render_widget(Paragraph::new(Line::from(spans)), row[0]);
    frame.render_widget(
        Paragraph::new(slider_line(&controls.volume, row[1].width)),
        row[1],
    );
    frame.render_widget(
        Paragraph::new(format!("{:>4}", controls.volume.value())).alignment(Alignment::Right),
        row[2],
    );
    view.hit.buttons = buttons;
    view.hit.volume = Some(row[1]);

    // Seek bar and time label.
    let seek_block = Block::default().borders(Borders::ALL).title(" seek ");
    let inner = seek_block.inner(chunks[2]);
    frame.render_widget(seek_block, chunks[2]);
    // While the handle is held, preview the time it would seek to.
    let time_label = if controls.seek.is_grabbed() {
        format!(
            "{} / {}",
            format_signed_ms(controls.seek.position()),
            format_ms(state.duration_ms)
        )
    } else {
        controls.time_label.clone()
    };
    let label_width = time_label.chars().count() as u16 + 1;
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(label_width)])
        .split(inner);
    frame.render_widget(
        Paragraph::new(slider_line(&controls.seek, row[0].width)),
        row[0],
    );
    frame.render_widget(
        Paragraph::new(time_label).alignment(Alignment::Right),
        row[1],
    );
    view.hit.seek = Some(row[0]);

    // Playlist table.
    let rows = model.row_count();
    let number_width = rows.max(1).to_string().len() as u16;
    let header_row = Row::new(
        std::iter::once(Cell::from("#"))
            .chain(Column::ALL.iter().map(|c| Cell::from(c.title())))
            .collect::<Vec<_>>(),
    )
    .bold();
    let table_rows = (0..rows).map(|row| {
        let number = model
            .header_data(row, Orientation::Vertical)
            .unwrap_or_default();
        let name = model.data(row, Column::Name).unwrap_or_default();
        let time = model.data(row, Column::Duration).unwrap_or_default();
        let line = Row::new([
            Cell::from(Text::from(number).right_aligned()),
            Cell::from(name),
            Cell::from(Text::from(time).right_aligned()),
        ]);
        if controller.playlist().current() == Some(row) {
            line.add_modifier(Modifier::BOLD)
        } else {
            line
        }
    });
    let table_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" tracks ({rows}) "));
    let table_inner = table_block.inner(chunks[3]);
    let table = Table::new(
        table_rows,
        [
            Constraint::Length(number_width),
            Constraint::Min(10),
            Constraint::Length(8),
        ],
    )
    .header(header_row)
    .block(table_block)
    .highlight_spacing(HighlightSpacing::Always)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ");
    frame.render_stateful_widget(table, chunks[3], &mut view.table);
    if controller.playlist().is_empty() && table_inner.height > 1 {
        let note = if view.scanning {
            "scanning..."
        } else {
            "no tracks found"
        };
        let area = Rect {
            y: table_inner.y + 1,
            height: 1,
            ..table_inner
        };
        frame.render_widget(Paragraph::new(note).alignment(Alignment::Center), area);
    }
    view.hit.rows = (table_inner.height > 1).then(|| Rect {
        y: table_inner.y + 1,
        height: table_inner.height - 1,
        ..table_inner
    });

    // Status line: errors win over the summary.
    let status = match controller.status() {
        Some(message) => Line::from(message.to_string()).red(),
        None => {
            let mut parts = vec![
                transport_text(state.transport).to_string(),
                format!("repeat {}", on_off(controls.repeat.is_checked())),
                format!("shuffle {}", on_off(controls.shuffle.is_checked())),
            ];
            if state.muted {
                parts.push("muted".to_string());
            }
            if view.scanning {
                parts.push("scanning".to_string());
            }
            if let Some(root) = controller.playlist().root() {
                parts.push(format!("dir: {}", root.display()));
            }
            Line::from(parts.join(" • "))
        }
    };
    let status_par = Paragraph::new(status).block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" status "),
    );
    frame.render_widget(status_par, chunks[4]);

    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" keys ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);
}

#[cfg(test)]
mod tests;
