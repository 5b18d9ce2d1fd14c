//! Speech-to-text transcription.

mod whisper;

pub use whisper::WhisperTranscriber;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for transcription implementations.
///
/// Takes raw audio bytes and returns plain transcript text. Whether the
/// audio is intelligible is the service's judgment call; nothing is
/// validated locally and nothing is retried.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe audio bytes. `filename` is forwarded to the service so it
    /// can infer the container format from the extension.
    async fn transcribe(&self, filename: &str, audio_bytes: Vec<u8>) -> Result<String>;
}
