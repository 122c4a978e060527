use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::error::ServiceError;
use crate::models::{ConversationDetail, ConversationList, KnowledgeBaseDocument, OutboundCall};

#[derive(Serialize)]
struct OutboundCallRequest<'a> {
    agent_id: &'a str,
    agent_phone_number_id: &'a str,
    to_number: &'a str,
}

#[derive(Serialize)]
struct TextDocumentRequest<'a> {
    text: &'a str,
    name: &'a str,
}

/// ElevenLabs Conversational AI client bound to one agent.
#[derive(Clone)]
pub struct VoiceAgentClient {
    client: Client,
    base_url: String,
    api_key: String,
    agent_id: String,
    agent_phone_number_id: String,
}

impl VoiceAgentClient {
    pub fn new(
        base_url: &str,
        api_key: String,
        agent_id: String,
        agent_phone_number_id: String,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("call-desk/voice-agent")
            .build()
            .context("Failed to build reqwest client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            agent_id,
            agent_phone_number_id,
        })
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ServiceError> {
        let response = request
            .header("xi-api-key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!("ElevenLabs error {}: {}", status, text);
            return Err(ServiceError::from_vendor_status("elevenlabs", status, &text));
        }

        Ok(response.json().await?)
    }

    /// Ask the agent to ring `to_number` over its Twilio line.
    pub async fn outbound_call(&self, to_number: &str) -> Result<OutboundCall, ServiceError> {
        info!("Initiating outbound call to {}", to_number);
        let body = OutboundCallRequest {
            agent_id: &self.agent_id,
            agent_phone_number_id: &self.agent_phone_number_id,
            to_number,
        };
        self.send(
            self.client
                .post(self.url("/v1/convai/twilio/outbound-call"))
                .json(&body),
        )
        .await
    }

    pub async fn list_conversations(&self) -> Result<ConversationList, ServiceError> {
        let list: ConversationList = self
            .send(
                self.client
                    .get(self.url("/v1/convai/conversations"))
                    .query(&[("agent_id", self.agent_id.as_str())]),
            )
            .await?;
        debug!("Fetched {} conversations", list.conversations.len());
        Ok(list)
    }

    pub async fn get_conversation(
        &self,
        conversation_id: &str,
    ) -> Result<ConversationDetail, ServiceError> {
        let detail = self
            .send(
                self.client
                    .get(self.url(&format!("/v1/convai/conversations/{conversation_id}"))),
            )
            .await?;
        debug!("Fetched conversation details for {}", conversation_id);
        Ok(detail)
    }

    /// Store `text` in the agent platform's knowledge base.
    pub async fn create_text_document(
        &self,
        name: &str,
        text: &str,
    ) -> Result<KnowledgeBaseDocument, ServiceError> {
        self.send(
            self.client
                .post(self.url("/v1/convai/knowledge-base/text"))
                .json(&TextDocumentRequest { text, name }),
        )
        .await
    }
}
