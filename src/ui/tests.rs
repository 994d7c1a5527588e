use std::time::Duration;

use super::{controls_text, format_mmss, now_playing_text, track_row};
use crate::app::PlaybackStatus;
use crate::catalog::{Album, Artist, Track};

fn t() -> Track {
    Track {
        id: 1,
        title: "Voyager".into(),
        artist: Artist {
            name: "Daft Punk".into(),
            picture_small: None,
        },
        album: Album {
            title: "Discovery".into(),
            cover_medium: None,
        },
        duration: 227,
        preview: "https://cdn.example/preview/1.mp3".into(),
    }
}

#[test]
fn format_mmss_zero_pads_seconds_only() {
    assert_eq!(format_mmss(Duration::from_secs(65)), "1:05");
    assert_eq!(format_mmss(Duration::from_secs(125)), "2:05");
    assert_eq!(format_mmss(Duration::from_secs(0)), "0:00");
    assert_eq!(format_mmss(Duration::from_secs(600)), "10:00");
}

#[test]
fn format_mmss_truncates_subseconds_toward_zero() {
    assert_eq!(format_mmss(Duration::from_millis(65_900)), "1:05");
}

#[test]
fn track_row_shows_artist_title_and_duration() {
    assert_eq!(track_row(&t()), "Daft Punk - Voyager  [3:47]");
}

#[test]
fn now_playing_line_reflects_playback_status() {
    let track = t();
    assert!(now_playing_text(&track, PlaybackStatus::Playing).starts_with("▶ "));
    assert!(now_playing_text(&track, PlaybackStatus::Paused).starts_with("⏸ "));
    assert!(now_playing_text(&track, PlaybackStatus::Playing).contains("Daft Punk - Voyager"));
}

#[test]
fn controls_text_includes_configured_steps() {
    let text = controls_text(5, 10);
    assert!(text.contains("[H/L] scrub -/+5s"));
    assert!(text.contains("[-/+] volume 10%"));
    assert!(text.contains("[q] quit"));
}
