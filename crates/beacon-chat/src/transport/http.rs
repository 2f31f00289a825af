//! reqwest-backed transport for the dashboard backend.

use async_trait::async_trait;
use beacon_common::BeaconError;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::settings::ChatSettings;

use super::{AskRequest, AskTransport, TransportError};

pub const ASK_PATH: &str = "/api/chat/ask";

/// HTTP client for `POST {base_url}/api/chat/ask`.
///
/// No overall request timeout is configured here; the request manager
/// enforces it so a timeout can be told apart from a transport failure.
pub struct HttpTransport {
    endpoint: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct AskReply {
    reply: Option<String>,
    #[serde(default)]
    meta: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl HttpTransport {
    pub fn new(settings: &ChatSettings) -> Result<Self, BeaconError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|e| BeaconError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            endpoint: endpoint_for(&settings.base_url),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint_for(base_url: &str) -> String {
    format!("{}{ASK_PATH}", base_url.trim_end_matches('/'))
}

/// FastAPI puts a string in `detail`, validation failures put a list.
fn detail_text(detail: serde_json::Value) -> Option<String> {
    match detail {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl AskTransport for HttpTransport {
    async fn ask(&self, request: &AskRequest) -> Result<String, TransportError> {
        debug!(
            endpoint = %self.endpoint,
            history = request.history.len(),
            "ask request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .and_then(detail_text);
            warn!(status = status.as_u16(), detail = ?detail, "ask endpoint returned an error");
            return Err(TransportError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        let body: AskReply = response
            .json()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if let Some(meta) = &body.meta {
            debug!(%meta, "ask reply metadata");
        }

        match body.reply {
            Some(reply) if !reply.is_empty() => Ok(reply),
            _ => Err(TransportError::Network("empty response".into())),
        }
    }
}
