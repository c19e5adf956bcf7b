use crate::config::toml_config::{
    AppConfig, EmailConfig, EmbedConfig, TranscriptionConfig, WizardConfig,
};

pub const SERVICE_ID_VAR: &str = "HANDPICK_EMAIL_SERVICE_ID";
pub const TEMPLATE_ID_VAR: &str = "HANDPICK_EMAIL_TEMPLATE_ID";
pub const PUBLIC_KEY_VAR: &str = "HANDPICK_EMAIL_PUBLIC_KEY";
pub const EMAIL_URL_VAR: &str = "HANDPICK_EMAIL_BASE_URL";
pub const OPENAI_KEY_VAR: &str = "HANDPICK_OPENAI_API_KEY";
pub const OPENAI_URL_VAR: &str = "HANDPICK_OPENAI_BASE_URL";
pub const PARENT_ORIGIN_VAR: &str = "HANDPICK_PARENT_ORIGIN";
pub const THROTTLE_VAR: &str = "HANDPICK_HEIGHT_THROTTLE_MS";
pub const PRESET_VAR: &str = "HANDPICK_STEP_PRESET";

impl AppConfig {
    /// Builds the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let throttle_ms = get(THROTTLE_VAR).and_then(|v| match v.parse::<u64>() {
            Ok(ms) => Some(ms),
            Err(_) => {
                tracing::warn!("Ignoring {}={}: not a number of milliseconds", THROTTLE_VAR, v);
                None
            }
        });

        Self {
            email: EmailConfig {
                service_id: get(SERVICE_ID_VAR),
                template_id: get(TEMPLATE_ID_VAR),
                public_key: get(PUBLIC_KEY_VAR),
                base_url: get(EMAIL_URL_VAR),
            },
            transcription: TranscriptionConfig {
                api_key: get(OPENAI_KEY_VAR),
                base_url: get(OPENAI_URL_VAR),
                model: None,
            },
            embed: EmbedConfig {
                parent_origin: get(PARENT_ORIGIN_VAR),
                throttle_ms,
            },
            wizard: WizardConfig {
                preset: get(PRESET_VAR),
                ..Default::default()
            },
        }
    }
}
