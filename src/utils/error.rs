use crate::core::schema::ValidationReport;
use crate::domain::model::Notice;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("{service} responded with status {status}: {body}")]
    RemoteError {
        service: String,
        status: u16,
        body: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, IntakeError>;

/// Where an error came from, which decides how the host surfaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Inline next to a field; blocks advancing past its step.
    FieldValidation,
    /// Cross-field business rule such as the budget minimum.
    Business,
    /// Microphone permission or hardware.
    Device,
    /// A remote call failed.
    Transport,
    /// Credentials or settings are missing or malformed.
    Configuration,
}

impl IntakeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IntakeError::ApiError(_) | IntakeError::RemoteError { .. } => ErrorCategory::Transport,
            IntakeError::IoError(_) | IntakeError::SerializationError(_) => ErrorCategory::Transport,
            IntakeError::MissingConfigError { .. }
            | IntakeError::InvalidConfigValueError { .. }
            | IntakeError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            IntakeError::ValidationError { .. } => ErrorCategory::FieldValidation,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => {
                "The service is not configured correctly. Please contact us directly.".to_string()
            }
            ErrorCategory::FieldValidation => {
                "Please fix the errors in the form before proceeding.".to_string()
            }
            _ => "Something went wrong while contacting the service. Please try again.".to_string(),
        }
    }
}

/// Failure to open or read the audio input device.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("microphone permission denied")]
    PermissionDenied,

    #[error("no audio input device available")]
    NoDevice,

    #[error("audio device failure: {0}")]
    Failure(String),
}

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("microphone unavailable: {0}")]
    Microphone(DeviceError),

    #[error("recording failed: {0}")]
    Recording(DeviceError),

    #[error("not recording")]
    NotRecording,

    #[error("already recording")]
    AlreadyRecording,

    #[error("no audio captured")]
    NoAudio,

    #[error("transcription returned no text")]
    EmptyTranscript,

    #[error("transcription failed: {0}")]
    Transcription(#[source] IntakeError),
}

impl VoiceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VoiceError::Microphone(_)
            | VoiceError::Recording(_)
            | VoiceError::NotRecording
            | VoiceError::AlreadyRecording
            | VoiceError::NoAudio => ErrorCategory::Device,
            VoiceError::EmptyTranscript => ErrorCategory::Transport,
            VoiceError::Transcription(inner) => inner.category(),
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            VoiceError::Microphone(_) => {
                Notice::destructive("Microphone blocked", "Allow mic access and try again.")
            }
            VoiceError::Recording(_) => Notice::destructive(
                "Recording error",
                "Could not record audio. Please try again.",
            ),
            VoiceError::NotRecording | VoiceError::AlreadyRecording => {
                Notice::destructive("Recording unavailable", "Please try again.")
            }
            VoiceError::NoAudio => Notice::destructive(
                "No audio captured",
                "Please try again and speak clearly.",
            ),
            VoiceError::EmptyTranscript => {
                Notice::destructive("Empty transcript", "Couldn't detect speech. Try again.")
            }
            VoiceError::Transcription(_) => Notice::destructive(
                "Transcription failed",
                "We could not turn your recording into text.",
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("step validation failed: {0}")]
    Validation(ValidationReport),

    #[error("{0}")]
    BudgetBlocked(String),

    #[error("submission is only possible from the final step")]
    NotOnFinalStep,

    #[error("request already submitted")]
    AlreadySubmitted,

    #[error("submission failed: {0}")]
    Submission(#[source] IntakeError),
}

impl WizardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WizardError::Validation(_) => ErrorCategory::FieldValidation,
            WizardError::BudgetBlocked(_)
            | WizardError::NotOnFinalStep
            | WizardError::AlreadySubmitted => ErrorCategory::Business,
            WizardError::Submission(inner) => inner.category(),
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            WizardError::Validation(_) => Notice::destructive(
                "Validation Error",
                "Please fix the errors in the form before proceeding.",
            ),
            WizardError::BudgetBlocked(message) => Notice::destructive("Budget Error", message),
            WizardError::NotOnFinalStep => Notice::destructive(
                "Not ready to submit",
                "Complete every step before submitting.",
            ),
            WizardError::AlreadySubmitted => Notice::destructive(
                "Already submitted",
                "Your handpick request has already been sent.",
            ),
            WizardError::Submission(_) => Notice::destructive(
                "Submission Failed",
                "There was an error submitting your form. Please try again.",
            ),
        }
    }
}
