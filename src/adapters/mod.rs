// Adapters layer: concrete clients for the remote services behind the domain ports.

pub mod emailjs;
pub mod openai;

pub use emailjs::EmailJsClient;
pub use openai::OpenAiTranscriber;
