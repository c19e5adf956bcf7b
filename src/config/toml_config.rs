use crate::adapters::emailjs::DEFAULT_EMAILJS_URL;
use crate::adapters::openai::{DEFAULT_OPENAI_URL, DEFAULT_TRANSLATION_MODEL};
use crate::core::height::HeightReporterConfig;
use crate::core::steps::{StepPlan, StepSpec};
use crate::core::summary::EmailCredentials;
use crate::core::wizard::{WizardOptions, DEFAULT_RETURN_URL};
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    #[serde(default)]
    pub embed: EmbedConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailConfig {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbedConfig {
    pub parent_origin: Option<String>,
    pub throttle_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardConfig {
    pub success_delay_ms: Option<u64>,
    pub return_url: Option<String>,
    /// `contact_first` or `contact_late`; ignored when `steps` is given.
    pub preset: Option<String>,
    pub steps: Option<Vec<StepSpec>>,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IntakeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string, substituting `${VAR}` first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| IntakeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unknown variables
    /// are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| IntakeError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn email_credentials(&self) -> EmailCredentials {
        EmailCredentials {
            service_id: self.email.service_id.clone(),
            template_id: self.email.template_id.clone(),
            public_key: self.email.public_key.clone(),
        }
    }

    pub fn email_base_url(&self) -> &str {
        self.email.base_url.as_deref().unwrap_or(DEFAULT_EMAILJS_URL)
    }

    pub fn transcription_base_url(&self) -> &str {
        self.transcription
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_OPENAI_URL)
    }

    pub fn transcription_model(&self) -> &str {
        self.transcription
            .model
            .as_deref()
            .unwrap_or(DEFAULT_TRANSLATION_MODEL)
    }

    pub fn height_reporter(&self) -> HeightReporterConfig {
        let defaults = HeightReporterConfig::default();
        HeightReporterConfig {
            parent_origin: self
                .embed
                .parent_origin
                .clone()
                .unwrap_or(defaults.parent_origin),
            throttle: self
                .embed
                .throttle_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.throttle),
        }
    }

    pub fn step_plan(&self) -> Result<StepPlan> {
        if let Some(steps) = &self.wizard.steps {
            return StepPlan::new(steps.clone());
        }
        match self.wizard.preset.as_deref() {
            None => Ok(StepPlan::default()),
            Some(name) => StepPlan::preset(name).ok_or_else(|| IntakeError::InvalidConfigValueError {
                field: "wizard.preset".to_string(),
                value: name.to_string(),
                reason: "Unknown preset. Valid presets: contact_first, contact_late".to_string(),
            }),
        }
    }

    pub fn wizard_options(&self) -> Result<WizardOptions> {
        let defaults = WizardOptions::default();
        Ok(WizardOptions {
            plan: self.step_plan()?,
            success_delay: self
                .wizard
                .success_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.success_delay),
            return_url: self
                .wizard
                .return_url
                .clone()
                .unwrap_or_else(|| DEFAULT_RETURN_URL.to_string()),
        })
    }

    /// Checks everything that can be checked without a network call.
    /// Missing email credentials are reported at send time instead.
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("email.base_url", self.email_base_url())?;
        validation::validate_url("transcription.base_url", self.transcription_base_url())?;
        validation::validate_non_empty_string("transcription.model", self.transcription_model())?;

        if let Some(origin) = &self.embed.parent_origin {
            validation::validate_origin("embed.parent_origin", origin)?;
        }
        if let Some(throttle) = self.embed.throttle_ms {
            validation::validate_positive_number("embed.throttle_ms", throttle, 1)?;
        }
        if let Some(url) = &self.wizard.return_url {
            validation::validate_url("wizard.return_url", url)?;
        }

        self.step_plan()?;
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::steps::StepKind;
    use crate::domain::model::Field;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[email]
service_id = "service_riaaj"
template_id = "template_handpick"
public_key = "pk_live"

[transcription]
api_key = "sk-test"

[embed]
parent_origin = "https://www.riaajvintage.com"
throttle_ms = 80

[wizard]
success_delay_ms = 500
preset = "contact_late"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.email_credentials().public_key.as_deref(), Some("pk_live"));
        assert_eq!(config.email_base_url(), DEFAULT_EMAILJS_URL);
        assert_eq!(config.transcription_model(), "whisper-1");
        assert_eq!(config.height_reporter().throttle, Duration::from_millis(80));

        let options = config.wizard_options().unwrap();
        assert_eq!(options.success_delay, Duration::from_millis(500));
        assert_eq!(options.plan, StepPlan::contact_late());
        assert_eq!(options.return_url, DEFAULT_RETURN_URL);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.height_reporter().parent_origin, "*");
        assert_eq!(config.step_plan().unwrap(), StepPlan::contact_first());
        assert!(config.email_credentials().service_id.is_none());
    }

    #[test]
    fn test_explicit_steps_override_preset() {
        let toml_content = r#"
[wizard]
preset = "contact_first"

[[wizard.steps]]
kind = "welcome"

[[wizard.steps]]
kind = "contact"
fields = ["name", "email"]

[[wizard.steps]]
kind = "review"
fields = ["consent"]
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        let plan = config.step_plan().unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.get(2).unwrap().kind, StepKind::Contact);
        assert_eq!(plan.fields_for(2), &[Field::Name, Field::Email]);
        assert!(plan.fields_for(1).is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HANDPICK_TEST_SERVICE_ID", "service_from_env");

        let toml_content = r#"
[email]
service_id = "${HANDPICK_TEST_SERVICE_ID}"
template_id = "${HANDPICK_TEST_UNSET_VARIABLE}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.email.service_id.as_deref(), Some("service_from_env"));
        assert_eq!(
            config.email.template_id.as_deref(),
            Some("${HANDPICK_TEST_UNSET_VARIABLE}")
        );

        std::env::remove_var("HANDPICK_TEST_SERVICE_ID");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_origin = AppConfig::from_toml_str(
            r#"
[embed]
parent_origin = "https://www.riaajvintage.com/handpick"
"#,
        )
        .unwrap();
        assert!(bad_origin.validate().is_err());

        let bad_preset = AppConfig::from_toml_str(
            r#"
[wizard]
preset = "alphabetical"
"#,
        )
        .unwrap();
        assert!(matches!(
            bad_preset.validate(),
            Err(IntakeError::InvalidConfigValueError { .. })
        ));

        let zero_throttle = AppConfig::from_toml_str(
            r#"
[embed]
throttle_ms = 0
"#,
        )
        .unwrap();
        assert!(zero_throttle.validate().is_err());
    }

    #[test]
    fn test_unknown_field_key_fails_parsing() {
        let result = AppConfig::from_toml_str(
            r#"
[[wizard.steps]]
kind = "contact"
fields = ["brands"]
"#,
        );
        assert!(matches!(
            result,
            Err(IntakeError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[wizard]\nreturn_url = \"https://example.com/\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.wizard_options().unwrap().return_url, "https://example.com/");
    }
}
