//! Offline analyst.
//!
//! Used when no API key is configured. Produces a deterministic canned
//! verdict that names the active attack, so the analyze button keeps
//! working in demos without credentials.

use super::{AnalysisReport, AnalysisRequest, Analyst};
use crate::error::AnalysisError;

/// Canned confidence for offline verdicts.
const MOCK_CONFIDENCE: f64 = 0.85;

/// Analyst that answers locally without an uplink.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAnalyst;

#[async_trait::async_trait]
impl Analyst for MockAnalyst {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        let signature = request.attack_type.as_deref().unwrap_or("anomaly");
        Ok(AnalysisReport {
            analysis: format!(
                "MOCK ANALYSIS: AI neural core offline (missing API key). \
                 System heuristics suggest high probability of {signature}."
            ),
            action: "Recommended: manual intervention or automated countermeasure.".to_string(),
            confidence: MOCK_CONFIDENCE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(attack: Option<&str>) -> AnalysisRequest {
        AnalysisRequest {
            cpu: 85.0,
            entropy: 0.6,
            processes: vec![],
            attack_type: attack.map(str::to_string),
            logs: None,
        }
    }

    #[tokio::test]
    async fn names_the_active_attack() {
        let report = MockAnalyst.analyze(&request(Some("CRYPTOMINER"))).await.unwrap();
        assert!(report.analysis.contains("CRYPTOMINER"));
        assert!((report.confidence - 0.85).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn falls_back_to_anomaly() {
        let report = MockAnalyst.analyze(&request(None)).await.unwrap();
        assert!(report.analysis.contains("anomaly"));
        assert!(!report.action.is_empty());
    }
}
