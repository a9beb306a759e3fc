//! Spoken rendition helper. Real TTS is an external collaborator; here it
//! sits behind `SpeechBackend`, with a simulated backend that sleeps for a
//! duration proportional to the text length, as the original did outside
//! real devices.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("播放失败: {0}")]
    Playback(String),
}

#[allow(async_fn_in_trait)]
pub trait SpeechBackend: Send + Sync {
    async fn speak(&self, text: &str) -> Result<(), AudioError>;
}

/// About 400ms per word, never under 2.5s.
pub fn playback_duration(text: &str) -> Duration {
    let word_count = text.split_whitespace().count() as u64;
    Duration::from_millis((word_count * 400).max(2500))
}

/// Online TTS endpoint for a sentence, for backends that stream real audio.
pub fn tts_url(text: &str) -> String {
    format!(
        "https://dict.youdao.com/dictvoice?audio={}&type=1",
        urlencoding::encode(text)
    )
}

pub struct SimulatedSpeech;

impl SpeechBackend for SimulatedSpeech {
    async fn speak(&self, text: &str) -> Result<(), AudioError> {
        tokio::time::sleep(playback_duration(text)).await;
        Ok(())
    }
}

/// Refuses overlapping playback: a second play while one is in flight
/// returns false instead of queueing.
pub struct AudioPlayer<S: SpeechBackend> {
    backend: S,
    playing: Arc<AtomicBool>,
}

impl<S: SpeechBackend> AudioPlayer<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            playing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    pub async fn play_sentence(&self, text: &str) -> bool {
        if self.playing.swap(true, Ordering::SeqCst) {
            return false;
        }

        if let Err(err) = self.backend.speak(text).await {
            tracing::warn!(error = %err, "speech playback failed");
        }

        self.playing.store(false, Ordering::SeqCst);
        true
    }

    pub fn stop(&self) {
        self.playing.store(false, Ordering::SeqCst);
    }
}
