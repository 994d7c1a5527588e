//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::{App, Pane, PlaybackStatus};
use crate::catalog::{GENRES, Track};
use crate::config::{ControlsSettings, UiSettings};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("tab".to_string(), "tracks/genres".to_string());
    map.insert("enter".to_string(), "play selection".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next track".to_string());
    // H/L and -/+ are filled dynamically from config.
    map.insert("/".to_string(), "search".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating configured step sizes.
fn controls_text(scrub_seconds: u64, volume_step: u8) -> String {
    let order = [
        "j/k", "tab", "enter", "space/p", "h/l", "H/L", "-/+", "/", "gg/G", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "H/L" => Some(format!("[H/L] scrub -/+{}s", scrub_seconds)),
            "-/+" => Some(format!("[-/+] volume {}%", volume_step)),
            _ => CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `M:SS` (seconds zero-padded, minutes not).
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// One row of the track list.
fn track_row(track: &Track) -> String {
    format!(
        "{} - {}  [{}]",
        track.artist.name,
        track.title,
        format_mmss(Duration::from_secs(track.duration))
    )
}

/// The now-playing line of the player bar.
fn now_playing_text(track: &Track, status: PlaybackStatus) -> String {
    let glyph = match status {
        PlaybackStatus::Playing => "▶",
        PlaybackStatus::Paused | PlaybackStatus::Stopped => "⏸",
    };
    format!(
        "{} {} - {}  ({})",
        glyph, track.artist.name, track.title, track.album.title
    )
}

/// Render the entire UI into the provided `frame` using `app` state and
/// settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let player_height = if app.current.is_some() { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(player_height),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" vivace ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Results title line: what produced the current list, and how big it is.
    let title_line = format!("{} • {}", app.list_title(), app.list_subtitle());
    let title_par = Paragraph::new(title_line)
        .block(Block::bordered().padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        }))
        .wrap(Wrap { trim: true });
    frame.render_widget(title_par, chunks[1]);

    // Main area: sidebar (search + genres) | track list.
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(1)])
        .split(chunks[2]);

    draw_sidebar(frame, app, main[0]);
    draw_track_list(frame, app, main[1]);

    if app.current.is_some() {
        draw_player_bar(frame, app, chunks[3]);
    }

    let footer_text = controls_text(
        controls_settings.scrub_seconds,
        controls_settings.volume_step,
    );
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    // Search box. A trailing underscore stands in for the cursor while the
    // box is being edited.
    let search_text = if app.search_mode {
        format!("{}_", app.query)
    } else {
        app.query.clone()
    };
    let search_title = if app.search_mode {
        " search (esc: done) "
    } else {
        " search (/) "
    };
    let search = Paragraph::new(search_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(search_title)
            .border_style(if app.search_mode {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(search, rows[0]);

    // Genre list; the selected genre keeps a marker even when the cursor
    // is elsewhere.
    let items: Vec<ListItem> = GENRES
        .iter()
        .map(|g| {
            if app.selected_genre == Some(g.id) {
                ListItem::new(format!("* {}", g.name))
                    .style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(format!("  {}", g.name))
            }
        })
        .collect();

    let focused = app.focus == Pane::Genres && !app.search_mode;
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" genres "))
        .highlight_style(if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        })
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    state.select(Some(app.genre_cursor));
    frame.render_stateful_widget(list, rows[1], &mut state);
}

fn draw_track_list(frame: &mut Frame, app: &App, area: Rect) {
    // Center the cursor when possible by rendering a visible window.
    // Only build ListItems for the window (avoid allocating the entire list).
    let total = app.tracks.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel_pos = app.selected.min(total.saturating_sub(1));
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = if sel_pos > half { sel_pos - half } else { 0 };
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let current_id = app.current.as_ref().map(|t| t.id);
    let visible_items: Vec<ListItem> = app.tracks[start..end]
        .iter()
        .map(|track| {
            if current_id == Some(track.id) {
                let marker = if app.playing { "▶ " } else { "⏸ " };
                ListItem::new(Line::from(format!("{}{}", marker, track_row(track))))
                    .style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(format!("  {}", track_row(track)))
            }
        })
        .collect();

    let focused = app.focus == Pane::Tracks && !app.search_mode;
    let list = List::new(visible_items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        })
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if total > 0 {
        state.select(Some(selected_pos_in_visible));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_player_bar(frame: &mut Frame, app: &App, area: Rect) {
    let Some(track) = app.current.as_ref() else {
        return;
    };

    let block = Block::default().borders(Borders::ALL).title(" player ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let (elapsed, total) = match app.playback_handle.as_ref().and_then(|h| h.lock().ok()) {
        Some(info) => (info.elapsed, info.duration),
        None => (Duration::ZERO, None),
    };

    let line = Paragraph::new(now_playing_text(track, app.playback_status()));
    frame.render_widget(line, rows[0]);

    let total_secs = total.map(|t| t.as_secs()).unwrap_or(0);
    let ratio = if total_secs > 0 {
        (elapsed.as_secs_f64() / total_secs as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .ratio(ratio)
        .label(format!(
            "{} / {}",
            format_mmss(elapsed),
            format_mmss(total.unwrap_or(Duration::ZERO))
        ))
        .use_unicode(true);
    frame.render_widget(gauge, rows[1]);

    let volume = Paragraph::new(format!("vol {:>3}%", app.volume));
    frame.render_widget(volume, rows[2]);
}

#[cfg(test)]
mod tests;
