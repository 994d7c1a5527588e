use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use reqwest::blocking::Client;
use rodio::{OutputStreamBuilder, Sink};

use super::sink::{fetch_preview, sink_from_bytes};
use super::types::{AudioCmd, PlaybackHandle, clamp_position, volume_to_gain};

/// Per-track state while a preview is loaded.
struct Loaded {
    sink: Sink,
    /// Raw bytes kept so `Play` after a natural end can replay the clip.
    bytes: Vec<u8>,
    /// Whether the natural end of this clip was already reported.
    finished_sent: bool,
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    initial_volume: u8,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        let http = Client::builder()
            .user_agent(concat!("vivace/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        let mut gain = volume_to_gain(initial_volume);
        let mut loaded: Option<Loaded> = None;
        // What the last command asked for; drives end-of-track detection.
        let mut want_playing = false;

        let publish_stopped = |playback_info: &PlaybackHandle| {
            if let Ok(mut info) = playback_info.lock() {
                info.elapsed = Duration::ZERO;
                info.duration = None;
                info.playing = false;
            }
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load { url, autoplay } => {
                        if let Some(old) = loaded.take() {
                            old.sink.stop();
                        }
                        want_playing = false;
                        publish_stopped(&playback_info);

                        let prepared = fetch_preview(&http, &url).and_then(|bytes| {
                            sink_from_bytes(&stream, bytes.clone()).map(|p| (bytes, p))
                        });

                        match prepared {
                            Ok((bytes, preview)) => {
                                preview.sink.set_volume(gain);
                                let duration = preview.duration;
                                if autoplay {
                                    preview.sink.play();
                                    want_playing = true;
                                }
                                if let Ok(mut info) = playback_info.lock() {
                                    info.elapsed = Duration::ZERO;
                                    info.duration = duration;
                                    info.playing = autoplay;
                                }
                                loaded = Some(Loaded {
                                    sink: preview.sink,
                                    bytes,
                                    finished_sent: false,
                                });
                            }
                            Err(e) => {
                                // Fire-and-forget: the controller may still
                                // believe it is playing; nothing to surface.
                                tracing::warn!(%url, error = %e, "failed to load preview");
                            }
                        }
                    }

                    AudioCmd::Play => {
                        if let Some(l) = loaded.as_mut() {
                            // Replay the kept bytes when the clip already
                            // drained (play-after-finish restarts it).
                            if l.sink.empty() {
                                match sink_from_bytes(&stream, l.bytes.clone()) {
                                    Ok(preview) => {
                                        preview.sink.set_volume(gain);
                                        l.sink = preview.sink;
                                        l.finished_sent = false;
                                        if let Ok(mut info) = playback_info.lock() {
                                            info.elapsed = Duration::ZERO;
                                        }
                                    }
                                    Err(e) => {
                                        tracing::warn!(error = %e, "failed to replay preview");
                                    }
                                }
                            }
                            l.sink.play();
                            want_playing = true;
                            if let Ok(mut info) = playback_info.lock() {
                                info.playing = true;
                            }
                        }
                    }

                    AudioCmd::Pause => {
                        if let Some(l) = loaded.as_ref() {
                            l.sink.pause();
                        }
                        want_playing = false;
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                    }

                    AudioCmd::Stop => {
                        if let Some(l) = loaded.take() {
                            l.sink.stop();
                        }
                        want_playing = false;
                        publish_stopped(&playback_info);
                    }

                    AudioCmd::SetVolume(volume) => {
                        gain = volume_to_gain(volume);
                        if let Some(l) = loaded.as_ref() {
                            l.sink.set_volume(gain);
                        }
                    }

                    AudioCmd::SeekTo(target) => {
                        let Some(l) = loaded.as_mut() else {
                            continue;
                        };
                        let duration = playback_info.lock().ok().and_then(|info| info.duration);
                        let target = clamp_position(target, duration);
                        if let Err(e) = l.sink.try_seek(target) {
                            tracing::warn!(?target, error = %e, "seek failed");
                            continue;
                        }
                        // Optimistic: show the new position before the sink
                        // confirms it through get_pos.
                        if let Ok(mut info) = playback_info.lock() {
                            info.elapsed = target;
                        }
                    }

                    AudioCmd::Quit => {
                        if let Some(l) = loaded.take() {
                            l.sink.stop();
                        }
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },

                Err(RecvTimeoutError::Timeout) => {
                    // Periodic tick: publish progress and detect natural end.
                    if let Some(l) = loaded.as_mut() {
                        if want_playing && l.sink.empty() && !l.finished_sent {
                            l.finished_sent = true;
                            want_playing = false;
                            if let Ok(mut info) = playback_info.lock() {
                                info.playing = false;
                                info.finished = true;
                            }
                        } else if !l.sink.empty() {
                            if let Ok(mut info) = playback_info.lock() {
                                info.elapsed = l.sink.get_pos();
                                info.playing = !l.sink.is_paused();
                            }
                        }
                    }
                }

                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
