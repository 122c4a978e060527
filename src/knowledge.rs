//! Text stored in the agent's knowledge base after each call.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::TranscriptEntry;

/// Placeholder the voice platform writes when its own analysis failed.
pub const UNUSABLE_SUMMARY: &str = "Summary couldn't be generated for this call.";

/// Calls shorter than this are treated as hang-ups or voicemail.
pub const MIN_CALL_DURATION_SECS: i64 = 10;

pub fn compose_document(
    at: DateTime<Utc>,
    conversation_id: &str,
    summary: &str,
    transcript: &[TranscriptEntry],
) -> String {
    let lines: Vec<String> = transcript
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let time = entry
                .time_in_call_secs
                .map(|t| t.to_string())
                .unwrap_or_else(|| "?".to_string());
            format!(
                "{}. [{}, {}s]: {}",
                idx + 1,
                entry.role.as_deref().unwrap_or("?"),
                time,
                entry.message.as_deref().unwrap_or_default()
            )
        })
        .collect();

    format!(
        "Date: {}\nConversation ID: {}\nSummary: {}\nTranscript:\n{}",
        at.to_rfc3339_opts(SecondsFormat::Secs, true),
        conversation_id,
        summary,
        lines.join("\n")
    )
}

pub fn document_name(conversation_id: &str) -> String {
    format!("Call summary {conversation_id}")
}

/// Whether a conversation is worth showing as "the latest summary".
pub fn is_presentable(call_duration_secs: i64, transcript_summary: Option<&str>) -> bool {
    call_duration_secs >= MIN_CALL_DURATION_SECS
        && transcript_summary.is_some_and(|s| !s.trim().is_empty() && s != UNUSABLE_SUMMARY)
}

/// Unix seconds as an ISO-8601 UTC timestamp.
pub fn unix_to_iso(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| secs.to_string())
}
