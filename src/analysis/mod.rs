//! LLM analysis uplink.
//!
//! A stateless pass-through that narrates the current telemetry via an
//! OpenAI-compatible chat-completions API. The engine knows nothing about
//! this boundary; the server hands it a request shaped from the latest
//! snapshot. When no API key is configured the mock analyst answers
//! instead, so the dashboard's analyze button always does something.

pub mod groq;
pub mod mock;

use serde::{Deserialize, Serialize};

use crate::engine::snapshot::{LogEntry, Process};
use crate::error::AnalysisError;

pub use groq::GroqAnalyst;
pub use mock::MockAnalyst;

/// Telemetry bundle submitted for analysis.
///
/// Field names follow the dashboard's wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub cpu: f64,
    pub entropy: f64,
    pub processes: Vec<Process>,
    #[serde(rename = "attackType", skip_serializing_if = "Option::is_none")]
    pub attack_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<LogEntry>>,
}

/// The analyst's verdict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Narrative assessment of the telemetry.
    #[serde(default)]
    pub analysis: String,
    /// Recommended response.
    #[serde(default)]
    pub action: String,
    /// Analyst confidence in [0, 1].
    #[serde(default)]
    pub confidence: f64,
}

/// An analysis backend.
///
/// Implementations must be infallible in shape: a malformed upstream answer
/// degrades to a default report, and only transport-level failures surface
/// as errors.
#[async_trait::async_trait]
pub trait Analyst: Send + Sync {
    /// Analyzes one telemetry bundle.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] only for uplink failures (network,
    /// upstream status); never for content the upstream happened to emit.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError>;
}

/// Renders the user prompt sent upstream.
///
/// Mirrors the dashboard's framing: load, entropy, active signature, and
/// the top process by CPU.
#[must_use]
pub fn build_user_prompt(request: &AnalysisRequest) -> String {
    let attack = request.attack_type.as_deref().unwrap_or("None");
    let top_process = request
        .processes
        .first()
        .map_or("Unknown", |p| p.name.as_str());
    format!(
        "System status:\n\
         - CPU load: {:.1}%\n\
         - Entropy: {:.3}\n\
         - Active attack signature: {attack}\n\
         - Top process: {top_process}\n\n\
         Analyze threat level and recommend countermeasures.",
        request.cpu, request.entropy
    )
}
