//! Application module: the controller state machine driving the TUI.
//!
//! The `App` model in `app::model` owns the current result list, selection
//! and intended playback state. It never touches the audio resource; the
//! runtime reconciles the audio thread to whatever `App` says.

mod model;

pub use model::*;
