use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One turn of an agent-led call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TranscriptEntry {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub time_in_call_secs: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TranscriptEntry {
    pub fn new(role: &str, message: &str, time_in_call_secs: i64) -> Self {
        Self {
            role: Some(role.to_string()),
            message: Some(message.to_string()),
            time_in_call_secs: Some(time_in_call_secs),
            extra: Map::new(),
        }
    }
}

/// Row of the agent's conversation listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub conversation_id: String,
    #[serde(default)]
    pub start_time_unix_secs: i64,
    #[serde(default)]
    pub call_duration_secs: i64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationList {
    #[serde(default)]
    pub conversations: Vec<ConversationSummary>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConversationList {
    /// Conversation with the latest start time.
    pub fn most_recent(&self) -> Option<&ConversationSummary> {
        self.conversations
            .iter()
            .max_by_key(|c| c.start_time_unix_secs)
    }

    /// Newest first.
    pub fn by_recency(&self) -> Vec<&ConversationSummary> {
        let mut sorted: Vec<_> = self.conversations.iter().collect();
        sorted.sort_by(|a, b| b.start_time_unix_secs.cmp(&a.start_time_unix_secs));
        sorted
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationAnalysis {
    #[serde(default)]
    pub transcript_summary: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationDetail {
    pub conversation_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub transcript: Vec<TranscriptEntry>,
    #[serde(default)]
    pub analysis: Option<ConversationAnalysis>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConversationDetail {
    pub fn transcript_summary(&self) -> Option<&str> {
        self.analysis
            .as_ref()
            .and_then(|a| a.transcript_summary.as_deref())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<TranscriptEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<TranscriptEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reply from the outbound-call endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutboundCall {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default, rename = "callSid", alias = "call_sid")]
    pub call_sid: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeBaseDocument {
    pub id: String,
}

/// `POST /call` request body.
#[derive(Debug, Deserialize)]
pub struct CallRequest {
    #[serde(default)]
    pub phone_number: String,
}

/// `POST /call` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallResponse {
    pub status_msg: Option<String>,
    pub call_status: Option<String>,
    pub phone_input: String,
    pub poll_result: Vec<Option<String>>,
    pub flash_message: Option<String>,
    pub flash_category: Option<String>,
}

/// `GET /latest_transcript_summary` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatestSummary {
    pub time: String,
    pub conversation_id: String,
    pub duration_seconds: i64,
    pub transcript_summary: String,
}
