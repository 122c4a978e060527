use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::app_config::AppConfig;
use crate::error::ServiceError;
use crate::knowledge::{
    compose_document, document_name, is_presentable, unix_to_iso, MIN_CALL_DURATION_SECS,
};
use crate::models::{
    CallRequest, CallResponse, ConversationDetail, ConversationList, LatestSummary,
};
use crate::phone::format_uk_number;
use crate::poller::{poll_call_status, PollPolicy};
use crate::summarizer::TranscriptSummarizer;
use crate::telephony::TelephonyClient;
use crate::voice_agent::VoiceAgentClient;

const INDEX_HTML: &str = include_str!("index.html");

pub const NO_POLLING_STATUS: &str = "No call_sid or Twilio credentials available.";

/// -----------------------------
/// App State
/// -----------------------------
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Services>,
}

struct Services {
    voice: VoiceAgentClient,
    telephony: Option<TelephonyClient>,
    summarizer: TranscriptSummarizer,
    poll: PollPolicy,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let voice = VoiceAgentClient::new(
            &config.elevenlabs_base_url,
            config.elevenlabs_api_key.clone(),
            config.agent_id.clone(),
            config.agent_phone_number_id.clone(),
        )?;

        let telephony = match &config.twilio {
            Some(credentials) => Some(TelephonyClient::new(
                &config.twilio_base_url,
                credentials.clone(),
            )?),
            None => None,
        };

        let summarizer = TranscriptSummarizer::new(
            &config.azure_openai_endpoint,
            config.azure_openai_api_key.clone(),
            config.azure_openai_deployment.clone(),
            config.azure_openai_api_version.clone(),
        )?;

        Ok(Self {
            inner: Arc::new(Services {
                voice,
                telephony,
                summarizer,
                poll: config.poll,
            }),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/call", post(make_call))
        .route("/conversations", get(list_conversations))
        .route("/conversation/{id}", get(get_conversation))
        .route("/latest_transcript_summary", get(latest_transcript_summary))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> &'static str {
    "OK"
}

/// -----------------------------
/// Outbound call
/// -----------------------------
async fn make_call(
    State(state): State<AppState>,
    payload: Result<Json<CallRequest>, JsonRejection>,
) -> Result<Json<CallResponse>, ServiceError> {
    let Json(req) = payload?;
    let phone_input = req.phone_number.trim().to_string();
    if phone_input.is_empty() {
        return Err(ServiceError::Validation("phone_number is required".into()));
    }

    let to_number = format_uk_number(&phone_input);
    let call = state.inner.voice.outbound_call(&to_number).await?;
    info!("API Response: {:?}, call_sid: {:?}", call.message, call.call_sid);

    if call.success == Some(false) {
        let reason = call
            .message
            .unwrap_or_else(|| "voice agent did not place the call".to_string());
        error!("Outbound call to {} was not placed: {}", to_number, reason);
        return Err(ServiceError::UpstreamUnavailable(reason));
    }

    let (call_status, poll_result) = match (&call.call_sid, &state.inner.telephony) {
        (Some(call_sid), Some(telephony)) => {
            info!("Waiting for call {} to complete...", call_sid);
            let outcome = poll_call_status(state.inner.poll, move || {
                telephony.status_or_none(call_sid)
            })
            .await;
            if !outcome.reached_terminal() {
                warn!(
                    "Call {} not finished after {} status checks",
                    call_sid,
                    outcome.observed.len()
                );
            }
            (outcome.final_status().map(String::from), outcome.observed)
        }
        _ => {
            warn!("No call_sid or Twilio credentials available for status polling.");
            (Some(NO_POLLING_STATUS.to_string()), Vec::new())
        }
    };

    if let Err(e) = store_call_summary(&state, call.conversation_id.as_deref()).await {
        error!("Error saving transcript summary: {}", e);
    }

    Ok(Json(CallResponse {
        status_msg: call.message,
        call_status,
        phone_input,
        poll_result,
        flash_message: Some("Call initiated successfully!".to_string()),
        flash_category: Some("success".to_string()),
    }))
}

/// Summarise the placed call's conversation and file it in the knowledge base.
///
/// Falls back to the newest listed conversation when the vendor did not
/// report which conversation the call belongs to.
async fn store_call_summary(
    state: &AppState,
    conversation_id: Option<&str>,
) -> Result<(), ServiceError> {
    let voice = &state.inner.voice;
    let conversation_id = match conversation_id {
        Some(id) => id.to_string(),
        None => {
            let list = voice.list_conversations().await?;
            let Some(latest) = list.most_recent() else {
                info!("No conversations yet for agent {}", voice.agent_id());
                return Ok(());
            };
            latest.conversation_id.clone()
        }
    };

    let detail = voice.get_conversation(&conversation_id).await?;
    let summary = state.inner.summarizer.summarize(&detail.transcript).await;
    let text = compose_document(
        Utc::now(),
        &detail.conversation_id,
        &summary,
        &detail.transcript,
    );

    let doc = voice
        .create_text_document(&document_name(&detail.conversation_id), &text)
        .await?;
    info!(
        "Saved transcript summary for conversation {} as document {}",
        detail.conversation_id, doc.id
    );
    Ok(())
}

/// -----------------------------
/// Conversations
/// -----------------------------
async fn list_conversations(
    State(state): State<AppState>,
) -> Result<Json<ConversationList>, ServiceError> {
    state.inner.voice.list_conversations().await.map(Json)
}

async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConversationDetail>, ServiceError> {
    state.inner.voice.get_conversation(&id).await.map(Json)
}

async fn latest_transcript_summary(
    State(state): State<AppState>,
) -> Result<Json<LatestSummary>, ServiceError> {
    let voice = &state.inner.voice;
    let list = voice.list_conversations().await?;
    if list.conversations.is_empty() {
        return Err(ServiceError::NotFound("No conversations found.".into()));
    }

    for convo in list.by_recency() {
        // too short to be worth a detail lookup
        if convo.call_duration_secs < MIN_CALL_DURATION_SECS {
            continue;
        }
        let detail = match voice.get_conversation(&convo.conversation_id).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!("Skipping conversation {}: {}", convo.conversation_id, e);
                continue;
            }
        };
        let Some(summary) = detail
            .transcript_summary()
            .filter(|s| is_presentable(convo.call_duration_secs, Some(s)))
        else {
            continue;
        };

        return Ok(Json(LatestSummary {
            time: unix_to_iso(convo.start_time_unix_secs),
            conversation_id: convo.conversation_id.clone(),
            duration_seconds: convo.call_duration_secs,
            transcript_summary: summary.to_string(),
        }));
    }

    Err(ServiceError::NotFound("No matching conversation found.".into()))
}
