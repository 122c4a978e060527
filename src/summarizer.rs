use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use crate::models::TranscriptEntry;

pub const SUMMARY_FAILED: &str = "Error generating summary.";
pub const SUMMARY_EMPTY: &str = "No summary generated.";

const SYSTEM_PROMPT: &str = "You are an AI assistant that simply summarises call transcripts in a \
clear coherent way, keeping all the key points. Given a transcript, simply give a summary of the \
call and key points discussed. Secondly give feedback on the call to the user e.g. keep up the \
good work on x. Do the feedback in bullet points. ENSURE THE OUTPUT IS NO LONGER THAN 400 WORDS \
MAX, DO NOT GO ABOVE THIS LIMIT.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Flatten a transcript into `role: message` lines.
pub fn format_transcript(transcript: &[TranscriptEntry]) -> String {
    transcript
        .iter()
        .map(|entry| {
            format!(
                "{}: {}",
                entry.role.as_deref().unwrap_or("Unknown"),
                entry.message.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// -----------------------------
/// Transcript summarizer (Azure OpenAI chat completions)
/// -----------------------------
#[derive(Clone)]
pub struct TranscriptSummarizer {
    client: Client,
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,
}

impl TranscriptSummarizer {
    pub fn new(
        endpoint: &str,
        api_key: String,
        deployment: String,
        api_version: String,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            deployment,
            api_version,
        })
    }

    /// Summary plus feedback bullets, or a fixed placeholder on any failure.
    pub async fn summarize(&self, transcript: &[TranscriptEntry]) -> String {
        info!("Summarizing transcript of {} entries", transcript.len());
        match self.complete(transcript).await {
            Ok(Some(summary)) => summary,
            Ok(None) => SUMMARY_EMPTY.to_string(),
            Err(e) => {
                error!("Error during transcript summarization: {:#}", e);
                SUMMARY_FAILED.to_string()
            }
        }
    }

    async fn complete(&self, transcript: &[TranscriptEntry]) -> Result<Option<String>> {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint, self.deployment
        );

        let request = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format_transcript(transcript),
                },
            ],
            max_tokens: 800,
            temperature: 0.7,
            top_p: 0.95,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Azure OpenAI request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Azure OpenAI error {}: {}", status, body);
        }

        let completion: ChatResponse = response
            .json()
            .await
            .context("Failed to parse Azure OpenAI response JSON")?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }
}
