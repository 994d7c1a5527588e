//! Application model types: `App`, `PlaybackStatus` and search jobs.
//!
//! `App` holds the current result list, selection, search and intended
//! playback state used by the UI and runtime. Transitions only mutate
//! state (and hand back `SearchJob`s for the runtime to dispatch); the
//! runtime reconciles the audio thread to whatever the state says.

use crate::audio::PlaybackHandle;
use crate::catalog::{GENRES, Genre, Track, genre_name};

/// The playback status of the application, as shown to the UI and MPRIS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// No current track.
    Stopped,
    Playing,
    Paused,
}

/// Which pane the cursor lives in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pane {
    Tracks,
    Genres,
}

/// A search the runtime should run against the catalog.
///
/// `seq` is assigned at dispatch time and strictly increases; the outcome
/// carries it back so stale responses can be discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchJob {
    pub seq: u64,
    pub query: String,
}

/// The main application model.
pub struct App {
    /// Current result list, in API response order.
    pub tracks: Vec<Track>,
    pub selected_genre: Option<u32>,
    /// The track loaded into the player, if any.
    pub current: Option<Track>,
    /// Intended playback state. True only while `current` is `Some`.
    pub playing: bool,
    /// The raw search text as the user entered it (may be blank).
    pub query: String,
    pub loading: bool,
    /// Player volume, 0..=100.
    pub volume: u8,

    /// Cursor position in the track list.
    pub selected: usize,
    /// Cursor position in the genre list.
    pub genre_cursor: usize,
    pub focus: Pane,
    /// Whether keystrokes currently edit the search box.
    pub search_mode: bool,

    default_query: String,
    latest_seq: u64,
    applied_seq: u64,

    pub playback_handle: Option<PlaybackHandle>,
}

impl App {
    /// Create a new `App`. `default_query` is what an empty search box
    /// resolves to ("top hits" unless configured otherwise).
    pub fn new(default_query: String, volume: u8) -> Self {
        Self {
            tracks: Vec::new(),
            selected_genre: None,
            current: None,
            playing: false,
            query: String::new(),
            loading: false,
            volume: volume.min(100),

            selected: 0,
            genre_cursor: 0,
            focus: Pane::Tracks,
            search_mode: false,

            default_query,
            latest_seq: 0,
            applied_seq: 0,

            playback_handle: None,
        }
    }

    /// Attach the handle used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    fn dispatch(&mut self, query: &str, set_loading: bool) -> SearchJob {
        self.latest_seq += 1;
        if set_loading {
            self.loading = true;
        }
        SearchJob {
            seq: self.latest_seq,
            query: query.to_string(),
        }
    }

    /// The initial search issued on startup.
    pub fn mount_job(&mut self) -> SearchJob {
        let query = self.default_query.clone();
        self.dispatch(&query, true)
    }

    /// Record `text` as the query and produce the job to run for it.
    ///
    /// Blank text re-issues the default query without touching the loading
    /// flag; the raw input is still recorded so the list title falls back
    /// to the genre/default labels.
    pub fn search(&mut self, text: String) -> SearchJob {
        self.query = text;
        self.refresh_search()
    }

    /// Dispatch a job for whatever the query currently holds.
    fn refresh_search(&mut self) -> SearchJob {
        if self.query.trim().is_empty() {
            let query = self.default_query.clone();
            self.dispatch(&query, false)
        } else {
            let query = self.query.clone();
            self.dispatch(&query, true)
        }
    }

    /// Append a character to the search box and re-search, like the live
    /// search input it models.
    pub fn push_search_char(&mut self, c: char) -> SearchJob {
        self.query.push(c);
        self.refresh_search()
    }

    /// Remove the last character from the search box and re-search.
    pub fn pop_search_char(&mut self) -> SearchJob {
        self.query.pop();
        self.refresh_search()
    }

    /// Adopt a search outcome.
    ///
    /// Results apply only when newer than the last applied outcome, so a
    /// slow early request can never overwrite a later one. The loading
    /// indicator clears only once the latest dispatched request resolved.
    pub fn apply_search(&mut self, seq: u64, tracks: Vec<Track>) {
        if seq > self.applied_seq {
            self.applied_seq = seq;
            self.tracks = tracks;
            if self.selected >= self.tracks.len() {
                self.selected = self.tracks.len().saturating_sub(1);
            }
        }
        if seq == self.latest_seq {
            self.loading = false;
        }
    }

    /// Select a genre: remember it and search for its name. The genre name
    /// becomes the recorded query, so the list title reads as a search.
    pub fn select_genre(&mut self, genre: Genre) -> SearchJob {
        self.selected_genre = Some(genre.id);
        self.search(genre.name.to_string())
    }

    /// Select the track at `index` in the result list: selecting the
    /// current track toggles play/pause, any other track becomes current
    /// and starts playing.
    pub fn select_track(&mut self, index: usize) {
        let Some(track) = self.tracks.get(index) else {
            return;
        };

        match &self.current {
            Some(cur) if cur.id == track.id => self.playing = !self.playing,
            _ => {
                self.current = Some(track.clone());
                self.playing = true;
            }
        }
    }

    /// Flip play/pause. A no-op without a current track.
    pub fn toggle_play_pause(&mut self) {
        if self.current.is_some() {
            self.playing = !self.playing;
        }
    }

    /// Position of the current track in the result list, by identifier.
    pub fn current_index(&self) -> Option<usize> {
        let cur = self.current.as_ref()?;
        self.tracks.iter().position(|t| t.id == cur.id)
    }

    /// Advance to the next track in list order. No wraparound: at the end
    /// of the list (or when the current track fell out of the list) this
    /// is a no-op.
    pub fn next_track(&mut self) {
        let Some(idx) = self.current_index() else {
            return;
        };
        if let Some(track) = self.tracks.get(idx + 1) {
            self.current = Some(track.clone());
            self.playing = true;
        }
    }

    /// Step back to the previous track in list order. No wraparound.
    pub fn previous_track(&mut self) {
        let Some(idx) = self.current_index() else {
            return;
        };
        if idx == 0 {
            return;
        }
        if let Some(track) = self.tracks.get(idx - 1) {
            self.current = Some(track.clone());
            self.playing = true;
        }
    }

    /// The current track played to its natural end: advance exactly once.
    /// At the tail of the list there is nothing to advance to, so playback
    /// stops instead of leaving a stale "playing" intent behind.
    pub fn on_track_finished(&mut self) {
        let before = self.current.as_ref().map(|t| t.id);
        self.next_track();
        let after = self.current.as_ref().map(|t| t.id);
        if before == after {
            self.playing = false;
        }
    }

    /// Status for the UI and MPRIS, derived from current/playing.
    pub fn playback_status(&self) -> PlaybackStatus {
        match (&self.current, self.playing) {
            (None, _) => PlaybackStatus::Stopped,
            (Some(_), true) => PlaybackStatus::Playing,
            (Some(_), false) => PlaybackStatus::Paused,
        }
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
    }

    pub fn volume_up(&mut self, step: u8) {
        self.set_volume(self.volume.saturating_add(step));
    }

    pub fn volume_down(&mut self, step: u8) {
        self.set_volume(self.volume.saturating_sub(step));
    }

    /// Title over the track list: a recorded query wins, then the selected
    /// genre's name, then the default label.
    pub fn list_title(&self) -> String {
        if !self.query.is_empty() {
            format!("Search Results for \"{}\"", self.query)
        } else if let Some(id) = self.selected_genre {
            genre_name(id).unwrap_or("Tracks").to_string()
        } else {
            "Popular Tracks".to_string()
        }
    }

    /// Line under the title: loading indicator or the track count.
    pub fn list_subtitle(&self) -> String {
        if self.loading {
            "Loading...".to_string()
        } else {
            format!("{} tracks", self.tracks.len())
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Tracks => Pane::Genres,
            Pane::Genres => Pane::Tracks,
        };
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            Pane::Tracks => self.tracks.len(),
            Pane::Genres => GENRES.len(),
        }
    }

    fn focused_cursor_mut(&mut self) -> &mut usize {
        match self.focus {
            Pane::Tracks => &mut self.selected,
            Pane::Genres => &mut self.genre_cursor,
        }
    }

    /// Move the cursor in the focused pane down one row.
    pub fn cursor_down(&mut self) {
        let len = self.focused_len();
        let cursor = self.focused_cursor_mut();
        if len > 0 && *cursor + 1 < len {
            *cursor += 1;
        }
    }

    /// Move the cursor in the focused pane up one row.
    pub fn cursor_up(&mut self) {
        let cursor = self.focused_cursor_mut();
        *cursor = cursor.saturating_sub(1);
    }

    /// Jump the cursor to the first row of the focused pane.
    pub fn cursor_top(&mut self) {
        *self.focused_cursor_mut() = 0;
    }

    /// Jump the cursor to the last row of the focused pane.
    pub fn cursor_bottom(&mut self) {
        let len = self.focused_len();
        *self.focused_cursor_mut() = len.saturating_sub(1);
    }

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }
}
