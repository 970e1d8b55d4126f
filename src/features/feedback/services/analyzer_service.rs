use lazy_static::lazy_static;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::config::AnalyzerConfig;
use crate::core::error::{AppError, Result};
use crate::shared::llm::{json_schema_string, parse_json};

/// Keywords that mark a report as an emergency when the external analyzer
/// is unavailable
const EMERGENCY_KEYWORDS: [&str; 6] = [
    "urgent",
    "emergency",
    "critical",
    "dangerous",
    "broken",
    "flood",
];

/// Coarse emotional classification of report text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Urgent,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Urgent => write!(f, "urgent"),
        }
    }
}

/// Result of analyzing a report's text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Analysis {
    /// Urgency estimate in [0, 1]; drives the automatic priority tier
    pub urgency: f64,
    pub sentiment: Sentiment,
}

impl Analysis {
    /// Fixed default applied when analysis fails entirely; submission never
    /// blocks on analyzer availability.
    pub fn neutral() -> Self {
        Self {
            urgency: 0.5,
            sentiment: Sentiment::Neutral,
        }
    }
}

/// Expected reply from the external text-analysis service
#[derive(Debug, Deserialize, JsonSchema)]
#[schemars(title = "FeedbackAnalysis")]
struct AnalysisResponse {
    #[schemars(description = "Urgency from 0.0 (routine) to 1.0 (critical emergency)")]
    urgency_score: f64,

    #[schemars(description = "One of: positive, neutral, negative, urgent")]
    sentiment: Sentiment,

    #[serde(default)]
    #[schemars(description = "Brief explanation of the scores")]
    reasoning: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

lazy_static! {
    static ref ANALYSIS_INSTRUCTION: String = format!(
        "You analyze citizen feedback submitted to municipal services. \
         Score the urgency of the report from 0.0 (routine) to 1.0 (critical emergency) \
         and classify its sentiment as one of: positive, neutral, negative, urgent. \
         Respond with ONLY a JSON object matching this schema:\n{}",
        json_schema_string::<AnalysisResponse>()
    );
}

/// Scores urgency and sentiment of submitted feedback.
///
/// Primary path is an OpenAI-compatible chat-completions call with a bounded
/// timeout. Every remote failure (missing key, transport error, timeout,
/// non-success status, invalid JSON) falls back to the deterministic keyword
/// scan, which needs no network access.
pub struct AnalyzerService {
    config: AnalyzerConfig,
    http_client: reqwest::Client,
}

impl AnalyzerService {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create analyzer client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Upper bound the caller should apply to the whole analysis step
    pub fn analysis_budget(&self) -> Duration {
        self.config.analysis_budget()
    }

    /// Analyze a report's title and description.
    ///
    /// Never fails: any remote error degrades to the keyword fallback.
    pub async fn analyze(&self, title: &str, description: &str) -> Analysis {
        match self.remote_analyze(title, description).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(
                    "Text analysis unavailable, using keyword fallback: {}",
                    e
                );
                keyword_analysis(title, description)
            }
        }
    }

    async fn remote_analyze(&self, title: &str, description: &str) -> Result<Analysis> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            AppError::ExternalServiceError("Analyzer API key not configured".to_string())
        })?;

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": ANALYSIS_INSTRUCTION.as_str() },
                {
                    "role": "user",
                    "content": format!("Title: {}\n\nDescription: {}", title, description)
                }
            ],
            "temperature": 0.0,
        });

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Analyzer request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalServiceError(format!(
                "Analyzer returned HTTP {}",
                status
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse analyzer response: {}", e))
        })?;

        let content = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| {
                AppError::ExternalServiceError("Analyzer returned no choices".to_string())
            })?;

        let parsed: AnalysisResponse = parse_json(content)
            .map_err(|e| AppError::ExternalServiceError(format!("Invalid analyzer JSON: {}", e)))?;

        tracing::debug!(
            urgency = parsed.urgency_score,
            sentiment = %parsed.sentiment,
            "Analyzer reasoning: {}",
            parsed.reasoning
        );

        Ok(Analysis {
            urgency: parsed.urgency_score.clamp(0.0, 1.0),
            sentiment: parsed.sentiment,
        })
    }
}

/// Deterministic, side-effect-free fallback: scan the concatenated text for
/// emergency keywords, case-insensitively.
pub fn keyword_analysis(title: &str, description: &str) -> Analysis {
    let text = format!("{} {}", title, description).to_lowercase();

    if EMERGENCY_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        Analysis {
            urgency: 0.7,
            sentiment: Sentiment::Urgent,
        }
    } else {
        Analysis {
            urgency: 0.3,
            sentiment: Sentiment::Neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match_scores_point_seven_urgent() {
        let analysis = keyword_analysis(
            "Major water leak flooding street",
            "Water gushing, road is flooding, urgent!",
        );
        assert_eq!(analysis.urgency, 0.7);
        assert_eq!(analysis.sentiment, Sentiment::Urgent);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let analysis = keyword_analysis("BROKEN streetlight", "It fell over");
        assert_eq!(analysis.urgency, 0.7);
        assert_eq!(analysis.sentiment, Sentiment::Urgent);
    }

    #[test]
    fn test_keyword_in_description_only() {
        let analysis = keyword_analysis("Corner of 5th and Main", "The situation is dangerous");
        assert_eq!(analysis.urgency, 0.7);
        assert_eq!(analysis.sentiment, Sentiment::Urgent);
    }

    #[test]
    fn test_no_keyword_scores_point_three_neutral() {
        let analysis = keyword_analysis("Park bench", "Paint is peeling on the bench");
        assert_eq!(analysis.urgency, 0.3);
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let first = keyword_analysis("flood on my street", "water everywhere");
        let second = keyword_analysis("flood on my street", "water everywhere");
        assert_eq!(first, second);
    }

    #[test]
    fn test_neutral_default() {
        let neutral = Analysis::neutral();
        assert_eq!(neutral.urgency, 0.5);
        assert_eq!(neutral.sentiment, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn test_analyze_without_api_key_uses_fallback() {
        let service = AnalyzerService::new(AnalyzerConfig {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        let analysis = service
            .analyze("Emergency: gas smell", "Strong smell near the school")
            .await;
        assert_eq!(analysis.urgency, 0.7);
        assert_eq!(analysis.sentiment, Sentiment::Urgent);

        let analysis = service.analyze("Quiet park", "More benches please").await;
        assert_eq!(analysis.urgency, 0.3);
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_analysis_response_parses_strict_json() {
        let reply = r#"{"urgency_score": 0.85, "sentiment": "urgent", "reasoning": "Gas leak"}"#;
        let parsed: AnalysisResponse = parse_json(reply).unwrap();
        assert_eq!(parsed.urgency_score, 0.85);
        assert_eq!(parsed.sentiment, Sentiment::Urgent);
    }

    #[test]
    fn test_analysis_response_rejects_unknown_sentiment() {
        let reply = r#"{"urgency_score": 0.5, "sentiment": "confused", "reasoning": ""}"#;
        let parsed: std::result::Result<AnalysisResponse, String> = parse_json(reply);
        assert!(parsed.is_err());
    }
}
