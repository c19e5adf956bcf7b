//! Voice notes: record from the microphone, translate to English text and
//! append the result to the draft's notes.
//!
//! ```text
//! Idle --start--> Recording --stop--> Transcribing --done/failed--> Idle
//! ```
//!
//! Every call that leaves `Recording` releases the input device. Both
//! transitions take `&mut self`, so a second toggle cannot run while a
//! transcription is in flight.

use crate::domain::model::{append_note_text, AudioClip, Notice};
use crate::domain::ports::{AudioInput, AudioStream, Transcriber};
use crate::utils::error::VoiceError;

const MIME_CANDIDATES: &[&str] = &["audio/webm;codecs=opus", "audio/webm", "audio/mp4", "audio/ogg"];
const FALLBACK_MIME: &str = "audio/webm";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Recording,
    Transcribing,
}

pub fn pick_mime_type(input: &dyn AudioInput) -> &'static str {
    MIME_CANDIDATES
        .iter()
        .copied()
        .find(|m| input.supports(m))
        .unwrap_or(FALLBACK_MIME)
}

pub struct VoiceNoteCapturer<A: AudioInput, T: Transcriber> {
    input: A,
    transcriber: T,
    state: CaptureState,
    stream: Option<Box<dyn AudioStream>>,
    pending: Option<AudioClip>,
}

impl<A: AudioInput, T: Transcriber> VoiceNoteCapturer<A, T> {
    pub fn new(input: A, transcriber: T) -> Self {
        Self {
            input,
            transcriber,
            state: CaptureState::Idle,
            stream: None,
            pending: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == CaptureState::Recording
    }

    pub async fn start(&mut self) -> Result<Notice, VoiceError> {
        if self.state != CaptureState::Idle {
            return Err(VoiceError::AlreadyRecording);
        }

        let mime_type = pick_mime_type(&self.input);
        match self.input.open(mime_type).await {
            Ok(stream) => {
                tracing::debug!("Recording voice note as {}", mime_type);
                self.stream = Some(stream);
                self.state = CaptureState::Recording;
                Ok(Notice::info("Recording started", "Speak now to add notes."))
            }
            Err(e) => {
                tracing::warn!("Could not open microphone: {}", e);
                self.state = CaptureState::Idle;
                Err(VoiceError::Microphone(e))
            }
        }
    }

    /// Stops the recording and releases the device. The captured clip is held
    /// for `transcribe`; the returned notice is shown while that call runs.
    pub fn stop(&mut self) -> Result<Notice, VoiceError> {
        let mut stream = match (self.state, self.stream.take()) {
            (CaptureState::Recording, Some(stream)) => stream,
            _ => return Err(VoiceError::NotRecording),
        };

        let mime_type = stream.mime_type().to_string();
        let chunks = stream.finish();
        stream.release();
        drop(stream);
        self.state = CaptureState::Idle;

        let chunks = chunks.map_err(|e| {
            tracing::error!("Recorder failed: {}", e);
            VoiceError::Recording(e)
        })?;
        let bytes = chunks.concat();
        if bytes.is_empty() {
            tracing::warn!("Recording stopped with no audio captured");
            return Err(VoiceError::NoAudio);
        }

        self.pending = Some(AudioClip { bytes, mime_type });
        self.state = CaptureState::Transcribing;
        Ok(Notice::info("Recording stopped", "Processing audio…"))
    }

    /// Translates the clip captured by `stop` and appends the text to `notes`.
    /// `notes` is left untouched on any failure.
    pub async fn transcribe(&mut self, notes: &mut Option<String>) -> Result<Notice, VoiceError> {
        let clip = match (self.state, self.pending.take()) {
            (CaptureState::Transcribing, Some(clip)) => clip,
            (CaptureState::Transcribing, None) => {
                // an earlier transcription was cancelled mid-call
                self.state = CaptureState::Idle;
                return Err(VoiceError::NotRecording);
            }
            _ => return Err(VoiceError::NotRecording),
        };

        let result = self.transcriber.translate(&clip).await;
        self.state = CaptureState::Idle;

        let text = result.map_err(|e| {
            tracing::error!("Transcription failed: {}", e);
            VoiceError::Transcription(e)
        })?;
        let text = text.trim();
        if text.is_empty() {
            return Err(VoiceError::EmptyTranscript);
        }

        append_note_text(notes, text);
        Ok(Notice::info("Transcribed", "Added text to notes."))
    }

    /// `stop` followed by `transcribe`, for hosts that skip the interim notice.
    pub async fn stop_and_transcribe(
        &mut self,
        notes: &mut Option<String>,
    ) -> Result<Notice, VoiceError> {
        self.stop()?;
        self.transcribe(notes).await
    }

    pub async fn toggle(&mut self, notes: &mut Option<String>) -> Result<Notice, VoiceError> {
        match self.state {
            CaptureState::Recording => self.stop_and_transcribe(notes).await,
            CaptureState::Transcribing => self.transcribe(notes).await,
            CaptureState::Idle => self.start().await,
        }
    }
}

impl<A: AudioInput, T: Transcriber> Drop for VoiceNoteCapturer<A, T> {
    fn drop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            tracing::debug!("Releasing microphone on teardown");
            let _ = stream.finish();
            stream.release();
        }
    }
}
