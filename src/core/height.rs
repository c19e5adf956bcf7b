//! Broadcasts the document height to the embedding frame so it can resize
//! its iframe.

use crate::domain::ports::{DocumentMetrics, HostFrame};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

pub const HEIGHT_MESSAGE_TYPE: &str = "height-notification";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeightMessage {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub height: u32,
}

/// Events that may change the document's height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightTrigger {
    Load,
    Resize,
    ViewportResize,
    TransitionEnd,
    FontsReady,
    Mutation,
}

#[derive(Debug, Clone)]
pub struct HeightReporterConfig {
    pub parent_origin: String,
    pub throttle: Duration,
}

impl Default for HeightReporterConfig {
    fn default() -> Self {
        Self {
            parent_origin: "*".to_string(),
            throttle: Duration::from_millis(50),
        }
    }
}

pub fn document_height(metrics: &dyn DocumentMetrics) -> u32 {
    metrics.heights().into_iter().max().unwrap_or(0)
}

/// Running reporter. Dropping it (or calling `teardown`) detaches it.
pub struct HeightReporter {
    triggers: mpsc::UnboundedSender<HeightTrigger>,
    task: JoinHandle<()>,
}

impl HeightReporter {
    /// Starts reporting. One height is posted right away; later triggers are
    /// throttled so that posts are at least `config.throttle` apart. A trigger
    /// inside the window is deferred to its end, never dropped.
    pub fn spawn<M, H>(metrics: M, frame: H, config: HeightReporterConfig) -> Self
    where
        M: DocumentMetrics + 'static,
        H: HostFrame + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(Arc::new(metrics), Arc::new(frame), config, rx));
        Self { triggers: tx, task }
    }

    pub fn trigger(&self, trigger: HeightTrigger) {
        tracing::trace!("Height trigger: {:?}", trigger);
        let _ = self.triggers.send(trigger);
    }

    pub fn teardown(self) {
        drop(self);
    }
}

impl Drop for HeightReporter {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<M: DocumentMetrics, H: HostFrame>(
    metrics: Arc<M>,
    frame: Arc<H>,
    config: HeightReporterConfig,
    mut triggers: mpsc::UnboundedReceiver<HeightTrigger>,
) {
    let mut last_sent: Option<Instant> = None;

    loop {
        if let Some(last) = last_sent {
            let next_allowed = last + config.throttle;
            if Instant::now() < next_allowed {
                tokio::time::sleep_until(next_allowed).await;
            }
        }

        // Everything queued up to now is covered by this measurement.
        while triggers.try_recv().is_ok() {}

        let message = HeightMessage {
            kind: HEIGHT_MESSAGE_TYPE,
            height: document_height(metrics.as_ref()),
        };
        match serde_json::to_value(message) {
            Ok(value) => frame.post_message(&value, &config.parent_origin),
            Err(e) => tracing::warn!("Could not encode height message: {}", e),
        }
        last_sent = Some(Instant::now());

        if triggers.recv().await.is_none() {
            break;
        }
    }
}
