//! Headless engine for the Handpick Request intake wizard: a multi-step lead
//! form that validates each step, captures voice notes as English text,
//! emails an HTML summary, and reports its height to an embedding page.
//!
//! Browser and network concerns sit behind the traits in [`domain::ports`];
//! [`adapters`] provides the HTTP-backed implementations.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{EmailJsClient, OpenAiTranscriber};
pub use config::AppConfig;
pub use core::height::{HeightReporter, HeightReporterConfig};
pub use core::summary::{EmailCredentials, EmailSender};
pub use core::voice::VoiceNoteCapturer;
pub use core::wizard::{Wizard, WizardOptions};
pub use domain::model::{Draft, Field, LineItem, Notice};
pub use utils::error::{IntakeError, Result, VoiceError, WizardError};
