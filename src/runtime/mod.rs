use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::catalog::CatalogClient;
use crate::mpris::ControlCmd;
use crate::search::{self, SearchOutcome};

mod event_loop;
mod mpris_sync;
mod settings;

pub fn run() -> anyhow::Result<()> {
    let settings = settings::load_settings();

    let client = CatalogClient::new(&settings.api);
    let audio_player = AudioPlayer::new(settings.audio.initial_volume);

    let mut app = App::new(
        settings.api.default_query.clone(),
        settings.audio.initial_volume,
    );
    app.set_playback_handle(audio_player.playback_handle());

    let (results_tx, results_rx) = mpsc::channel::<SearchOutcome>();
    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    // The initial "mount" search for the default query.
    search::dispatch(&client, app.mount_job(), &results_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: anyhow::Result<()> = (|| {
        let mut state = event_loop::EventLoopState::new(&app);

        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &audio_player,
            &client,
            &mpris,
            &control_tx,
            &control_rx,
            &results_tx,
            &results_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    audio_player.shutdown();

    run_result
}
