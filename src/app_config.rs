use anyhow::{Context, Result};
use std::env;

use crate::poller::PollPolicy;

pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";
pub const DEFAULT_TWILIO_BASE_URL: &str = "https://api.twilio.com";

#[derive(Debug, Clone)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // --- Server ---
    pub port: String,

    // --- ElevenLabs ---
    pub agent_id: String,
    pub elevenlabs_api_key: String,
    pub agent_phone_number_id: String,
    pub elevenlabs_base_url: String,

    // --- Twilio ---
    pub twilio: Option<TwilioCredentials>,
    pub twilio_base_url: String,

    // --- Azure OpenAI ---
    pub azure_openai_endpoint: String,
    pub azure_openai_api_key: String,
    pub azure_openai_deployment: String,
    pub azure_openai_api_version: String,

    pub poll: PollPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        // dotenv belongs HERE, nowhere else
        dotenvy::dotenv().ok();

        let twilio = match (
            optional("TWILIO_ACCOUNT_SID"),
            optional("TWILIO_AUTH_TOKEN"),
        ) {
            (Some(account_sid), Some(auth_token)) => Some(TwilioCredentials {
                account_sid,
                auth_token,
            }),
            _ => None,
        };

        Ok(Self {
            port: env::var("PORT").unwrap_or_else(|_| "8000".into()),

            agent_id: env::var("AGENT_ID").context("AGENT_ID missing")?,
            elevenlabs_api_key: env::var("ELEVENLABS_API_KEY")
                .context("ELEVENLABS_API_KEY missing")?,
            agent_phone_number_id: env::var("AGENT_PHONE_NUMBER_ID")
                .context("AGENT_PHONE_NUMBER_ID missing")?,
            elevenlabs_base_url: env::var("ELEVENLABS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ELEVENLABS_BASE_URL.into()),

            twilio,
            twilio_base_url: env::var("TWILIO_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_TWILIO_BASE_URL.into()),

            azure_openai_endpoint: env::var("AZURE_OPENAI_ENDPOINT")
                .context("AZURE_OPENAI_ENDPOINT missing")?,
            azure_openai_api_key: env::var("AZURE_OPENAI_API_KEY")
                .context("AZURE_OPENAI_API_KEY missing")?,
            azure_openai_deployment: env::var("AZURE_OPENAI_DEPLOYMENT")
                .unwrap_or_else(|_| "gpt-4o".into()),
            azure_openai_api_version: env::var("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|_| "2025-01-01-preview".into()),

            poll: PollPolicy::default(),
        })
    }
}

/// Blank values count as unset; `.env` files often carry `KEY=` placeholders.
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
