pub mod env;
pub mod toml_config;

pub use toml_config::{AppConfig, EmailConfig, EmbedConfig, TranscriptionConfig, WizardConfig};
