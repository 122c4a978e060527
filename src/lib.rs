pub mod app_config;
pub mod error;
pub mod knowledge;
pub mod models;
pub mod phone;
pub mod poller;
pub mod routes;
pub mod summarizer;
pub mod telephony;
pub mod voice_agent;

pub use app_config::AppConfig;
pub use error::ServiceError;
pub use phone::format_uk_number;
pub use poller::{poll_call_status, PollOutcome, PollPolicy};
pub use routes::{router, AppState};
pub use summarizer::TranscriptSummarizer;
pub use telephony::TelephonyClient;
pub use voice_agent::VoiceAgentClient;
