use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use crate::app_config::TwilioCredentials;
use crate::error::ServiceError;

#[derive(Debug, Deserialize)]
struct CallRecord {
    status: Option<String>,
}

/// Read-only view of Twilio's call resource.
#[derive(Clone)]
pub struct TelephonyClient {
    client: Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
}

impl TelephonyClient {
    pub fn new(base_url: &str, credentials: TwilioCredentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("call-desk/telephony")
            .build()
            .context("Failed to build reqwest client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            account_sid: credentials.account_sid,
            auth_token: credentials.auth_token,
        })
    }

    /// Current status of `call_sid` (`queued`, `ringing`, `completed`, ...).
    pub async fn fetch_status(&self, call_sid: &str) -> Result<String, ServiceError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Calls/{}.json",
            self.base_url, self.account_sid, call_sid
        );

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!("Twilio status fetch error: {} {}", status, text);
            return Err(ServiceError::from_vendor_status("twilio", status, &text));
        }

        let record: CallRecord = response.json().await?;
        let status = record.status.ok_or_else(|| {
            ServiceError::UpstreamUnavailable(format!("twilio call {call_sid} has no status"))
        })?;
        debug!("Fetched call status for {}: {}", call_sid, status);
        Ok(status)
    }

    /// Like [`fetch_status`](Self::fetch_status) but logs and swallows the error,
    /// which is what the poll loop wants.
    pub async fn status_or_none(&self, call_sid: &str) -> Option<String> {
        match self.fetch_status(call_sid).await {
            Ok(status) => Some(status),
            Err(e) => {
                error!("Call status query for {} failed: {}", call_sid, e);
                None
            }
        }
    }
}
