//! Audio-related small types and handles.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Commands accepted by the audio thread.
///
/// `Play` and `Pause` are absolute, not a toggle: the runtime only ever
/// sends the gap between the controller's intent and the last command.
#[derive(Debug)]
pub enum AudioCmd {
    /// Download and load the preview at `url`, replacing whatever is
    /// loaded. Starts playback immediately when `autoplay` is set. The
    /// preview duration stays unknown until the decoder reports it.
    Load { url: String, autoplay: bool },
    Play,
    Pause,
    /// Drop the loaded preview entirely.
    Stop,
    /// Set volume as a percentage, 0..=100.
    SetVolume(u8),
    /// Seek to an absolute position within the loaded preview.
    SeekTo(Duration),
    /// Shut the audio thread down.
    Quit,
}

/// Runtime playback information shared with the UI and the controller.
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    /// Elapsed playback time for the loaded preview.
    pub elapsed: Duration,
    /// Total preview duration; `None` until the decoder reported it.
    pub duration: Option<Duration>,
    /// Whether the sink is actually producing audio right now.
    pub playing: bool,
    /// Latched when the loaded preview drains to its natural end; the
    /// controller consumes it to run its advance transition.
    pub finished: bool,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: None,
            playing: false,
            finished: false,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Map a 0..=100 volume to sink gain 0.0..=1.0.
pub fn volume_to_gain(volume: u8) -> f32 {
    f32::from(volume.min(100)) / 100.0
}

/// Clamp a seek target into the playable range.
pub fn clamp_position(target: Duration, duration: Option<Duration>) -> Duration {
    match duration {
        Some(total) => target.min(total),
        None => target,
    }
}
