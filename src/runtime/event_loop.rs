use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Pane, PlaybackStatus};
use crate::audio::{AudioCmd, AudioPlayer};
use crate::catalog::{CatalogClient, GENRES};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::search::{self, SearchOutcome};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
///
/// The `last_commanded_*` fields are what reconciliation diffs against:
/// the controller owns intent, and only the gap between intent and what
/// was already sent to the audio thread turns into commands.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    last_commanded_track: Option<u64>,
    last_commanded_playing: bool,
    last_commanded_volume: u8,
    last_mpris_track: Option<u64>,
    last_mpris_status: PlaybackStatus,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            pending_gg: false,
            last_commanded_track: None,
            last_commanded_playing: false,
            last_commanded_volume: app.volume,
            last_mpris_track: None,
            last_mpris_status: app.playback_status(),
        }
    }
}

/// Main terminal event loop: adopts search outcomes, reconciles the audio
/// thread to the controller's intent, draws, and handles input. Returns
/// `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    client: &CatalogClient,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    results_tx: &mpsc::Sender<SearchOutcome>,
    results_rx: &mpsc::Receiver<SearchOutcome>,
    state: &mut EventLoopState,
) -> anyhow::Result<()> {
    loop {
        // Adopt whatever searches resolved since the last iteration. The
        // controller's sequence guard drops stale outcomes.
        while let Ok(outcome) = results_rx.try_recv() {
            tracing::debug!(
                seq = outcome.seq,
                query = %outcome.query,
                count = outcome.tracks.len(),
                "search resolved"
            );
            app.apply_search(outcome.seq, outcome.tracks);
        }

        // Natural end-of-track: consume the latch and advance exactly once.
        let finished = app
            .playback_handle
            .as_ref()
            .and_then(|h| {
                h.lock().ok().map(|mut info| {
                    let f = info.finished;
                    info.finished = false;
                    f
                })
            })
            .unwrap_or(false);
        if finished {
            app.on_track_finished();
        }

        reconcile_audio(app, audio_player, state);

        // Keep MPRIS in sync with whatever transition just happened.
        let track_id = app.current.as_ref().map(|t| t.id);
        let status = app.playback_status();
        if track_id != state.last_mpris_track || status != state.last_mpris_status {
            update_mpris(mpris, app);
            state.last_mpris_track = track_id;
            state.last_mpris_status = status;
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(
                    key, settings, app, audio_player, client, control_tx, results_tx, state,
                ) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Close the gap between the controller's intent and the last commands
/// sent to the audio thread.
fn reconcile_audio(app: &App, audio_player: &AudioPlayer, state: &mut EventLoopState) {
    let desired_track = app.current.as_ref().map(|t| t.id);

    if desired_track != state.last_commanded_track {
        match app.current.as_ref() {
            Some(track) => {
                let _ = audio_player.send(AudioCmd::Load {
                    url: track.preview.clone(),
                    autoplay: app.playing,
                });
            }
            None => {
                let _ = audio_player.send(AudioCmd::Stop);
            }
        }
        state.last_commanded_track = desired_track;
        state.last_commanded_playing = app.playing;
    } else if app.playing != state.last_commanded_playing {
        let _ = audio_player.send(if app.playing {
            AudioCmd::Play
        } else {
            AudioCmd::Pause
        });
        state.last_commanded_playing = app.playing;
    }

    if app.volume != state.last_commanded_volume {
        let _ = audio_player.send(AudioCmd::SetVolume(app.volume));
        state.last_commanded_volume = app.volume;
    }
}

/// Apply a control-channel command (MPRIS or keys routed through it).
/// Returns true when shutdown was requested.
fn handle_control_cmd(cmd: ControlCmd, app: &mut App) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            if app.current.is_some() {
                app.playing = true;
            } else if app.has_tracks() {
                app.select_track(app.selected);
            }
        }
        ControlCmd::Pause => {
            if app.current.is_some() {
                app.playing = false;
            }
        }
        ControlCmd::PlayPause => {
            if app.current.is_some() {
                app.toggle_play_pause();
            } else if app.has_tracks() {
                app.select_track(app.selected);
            }
        }
        ControlCmd::Stop => {
            // No stopped-with-track state; Stop degrades to pause.
            if app.current.is_some() {
                app.playing = false;
            }
        }
        ControlCmd::Next => app.next_track(),
        ControlCmd::Prev => app.previous_track(),
    }

    false
}

/// Handle one key press. Returns true when the app should quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    client: &CatalogClient,
    control_tx: &mpsc::Sender<ControlCmd>,
    results_tx: &mpsc::Sender<SearchOutcome>,
    state: &mut EventLoopState,
) -> bool {
    if app.search_mode {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                app.exit_search_mode();
            }
            KeyCode::Backspace => {
                let job = app.pop_search_char();
                search::dispatch(client, job, results_tx);
            }
            KeyCode::Char(c) => {
                // Every edit re-searches, like the live search box it models.
                if !c.is_control() {
                    let job = app.push_search_char(c);
                    search::dispatch(client, job, results_tx);
                }
            }
            _ => {}
        }

        return false;
    }

    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return true;
        }
        KeyCode::Char('/') => {
            state.pending_gg = false;
            app.enter_search_mode();
        }
        KeyCode::Tab => {
            state.pending_gg = false;
            app.toggle_focus();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.cursor_down();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.cursor_up();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.cursor_top();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.cursor_bottom();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            match app.focus {
                Pane::Tracks => app.select_track(app.selected),
                Pane::Genres => {
                    if let Some(genre) = GENRES.get(app.genre_cursor) {
                        let job = app.select_genre(*genre);
                        search::dispatch(client, job, results_tx);
                    }
                }
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            scrub(app, audio_player, settings.controls.scrub_seconds as i64);
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            scrub(app, audio_player, -(settings.controls.scrub_seconds as i64));
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.pending_gg = false;
            app.volume_up(settings.controls.volume_step);
        }
        KeyCode::Char('-') => {
            state.pending_gg = false;
            app.volume_down(settings.controls.volume_step);
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}

/// Seek relative to the currently displayed position.
fn scrub(app: &App, audio_player: &AudioPlayer, delta_secs: i64) {
    if app.current.is_none() {
        return;
    }

    let elapsed = app
        .playback_handle
        .as_ref()
        .and_then(|h| h.lock().ok().map(|info| info.elapsed))
        .unwrap_or(Duration::ZERO);

    let target = if delta_secs >= 0 {
        elapsed + Duration::from_secs(delta_secs as u64)
    } else {
        elapsed.saturating_sub(Duration::from_secs(delta_secs.unsigned_abs()))
    };

    let _ = audio_player.send(AudioCmd::SeekTo(target));
}
