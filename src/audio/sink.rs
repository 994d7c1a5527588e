//! Utilities for turning a preview URL into a ready `rodio` sink.
//!
//! Previews are short MP3 clips; downloading them whole and decoding from
//! an in-memory cursor keeps the audio thread free of streaming state.

use std::io::Cursor;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use rodio::decoder::{Decoder, DecoderBuilder};
use rodio::{OutputStream, Sink, Source};
use thiserror::Error;

/// Why a preview could not be loaded. Logged by the audio thread, never
/// surfaced to the user.
#[derive(Debug, Error)]
pub(super) enum PreviewError {
    #[error("download failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("preview endpoint returned status {0}")]
    Status(StatusCode),
    #[error("could not decode preview: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

/// Download the preview at `url`.
pub(super) fn fetch_preview(http: &Client, url: &str) -> Result<Vec<u8>, PreviewError> {
    let response = http.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(PreviewError::Status(status));
    }
    Ok(response.bytes()?.to_vec())
}

/// Decode downloaded preview bytes. Passing the byte length lets the
/// decoder report a total duration up front.
pub(super) fn decode_preview(bytes: Vec<u8>) -> Result<Decoder<Cursor<Vec<u8>>>, PreviewError> {
    let decoder = DecoderBuilder::new()
        .with_byte_len(bytes.len() as u64)
        .with_data(Cursor::new(bytes))
        .build()?;
    Ok(decoder)
}

/// A decoded preview loaded into a fresh paused sink.
pub(super) struct LoadedPreview {
    pub sink: Sink,
    /// Duration as reported by the decoder, when it knows.
    pub duration: Option<Duration>,
}

/// Build a paused sink for `bytes` on the given output stream.
pub(super) fn sink_from_bytes(
    stream: &OutputStream,
    bytes: Vec<u8>,
) -> Result<LoadedPreview, PreviewError> {
    let source = decode_preview(bytes)?;
    let duration = source.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();

    Ok(LoadedPreview { sink, duration })
}
