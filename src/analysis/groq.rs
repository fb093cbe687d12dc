//! Groq-backed analyst.
//!
//! Calls an OpenAI-compatible chat-completions endpoint with a JSON-object
//! response format and decodes the model's message content into an
//! [`AnalysisReport`]. Content the model got wrong degrades to a default
//! report; only transport and status failures surface as errors.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AnalysisReport, AnalysisRequest, Analyst, build_user_prompt};
use crate::config::AnalysisSettings;
use crate::error::AnalysisError;

const SYSTEM_PROMPT: &str = "You are CORTEX, an advanced cybersecurity AI. Analyze the system \
     metrics provided. Be concise, technical, and authoritative. Output JSON with 'analysis', \
     'action', and 'confidence'.";

/// Maximum upstream body length echoed into error messages.
const ERROR_BODY_LIMIT: usize = 512;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

/// Analyst backed by a Groq (or any OpenAI-compatible) endpoint.
#[derive(Debug, Clone)]
pub struct GroqAnalyst {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GroqAnalyst {
    /// Creates an analyst from settings and an already-resolved API key.
    #[must_use]
    pub fn new(settings: &AnalysisSettings, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait::async_trait]
impl Analyst for GroqAnalyst {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        let user_prompt = build_user_prompt(request);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::Uplink(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            body.truncate(ERROR_BODY_LIMIT);
            return Err(AnalysisError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

        let content = chat
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .unwrap_or_default();

        debug!(model = %self.model, bytes = content.len(), "analysis uplink responded");

        // The model promised a JSON object; if it rambled instead, fall
        // back to an empty report rather than failing the request.
        Ok(serde_json::from_str(content).unwrap_or_else(|e| {
            warn!(error = %e, "upstream content was not the requested JSON object");
            AnalysisReport::default()
        }))
    }
}
