use crate::domain::model::{AudioClip, Draft, EmailRequest};
use crate::utils::error::{DeviceError, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Transactional email provider.
#[async_trait]
pub trait EmailDelivery: Send + Sync {
    async fn send(&self, request: &EmailRequest) -> Result<()>;
}

/// Remote speech-to-text that returns English text for a clip.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn translate(&self, clip: &AudioClip) -> Result<String>;
}

/// Whatever turns a finished draft into a delivered summary.
#[async_trait]
pub trait SummarySender: Send + Sync {
    async fn send_summary(&self, draft: &Draft) -> Result<()>;
}

/// Microphone access.
#[async_trait]
pub trait AudioInput: Send {
    fn supports(&self, mime_type: &str) -> bool;

    /// Acquires exclusive access to the input device and starts capturing.
    async fn open(&mut self, mime_type: &str) -> std::result::Result<Box<dyn AudioStream>, DeviceError>;
}

/// A live capture. Dropping it without calling `release` leaks the device.
pub trait AudioStream: Send {
    fn mime_type(&self) -> &str;

    /// Stops capturing and returns every chunk recorded so far.
    fn finish(&mut self) -> std::result::Result<Vec<Vec<u8>>, DeviceError>;

    fn release(&mut self);
}

pub trait DocumentMetrics: Send + Sync {
    /// Every height measurement the document exposes (scroll, offset, client).
    fn heights(&self) -> Vec<u32>;
}

pub trait HostFrame: Send + Sync {
    fn post_message(&self, message: &serde_json::Value, target_origin: &str);
}

pub trait Navigator: Send + Sync {
    fn redirect_top(&self, url: &str);
}

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
