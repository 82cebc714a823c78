//! Google Gemini generative-AI backend.
//!
//! Thin HTTP client for the generateContent endpoint. Error classification is
//! by status code so the fallback chain can tell a rate-limited or retired
//! model (try the next one) apart from a broken request (give up).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{GenerativeBackend, SummarizeError};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GEMINI_API_BASE.to_string())
    }

    /// Point the client at a different API host. Used by tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            api_key,
            base_url,
            client,
        }
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn classify_status(status: reqwest::StatusCode, body: String) -> SummarizeError {
        match status.as_u16() {
            429 => SummarizeError::QuotaExhausted(body),
            404 => SummarizeError::ModelNotFound(body),
            400 => SummarizeError::InvalidRequest(body),
            _ => SummarizeError::Transport(format!("status {}: {}", status, body)),
        }
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, SummarizeError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url(model))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| SummarizeError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, error_text));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SummarizeError::MalformedResponse(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                SummarizeError::MalformedResponse("response contained no candidates".to_string())
            })?;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url() {
        let client = GeminiClient::new("key".to_string());
        assert_eq!(
            client.generate_url("gemini-2.0-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_status_classification() {
        use reqwest::StatusCode;

        assert!(matches!(
            GeminiClient::classify_status(StatusCode::TOO_MANY_REQUESTS, "q".into()),
            SummarizeError::QuotaExhausted(_)
        ));
        assert!(matches!(
            GeminiClient::classify_status(StatusCode::NOT_FOUND, "m".into()),
            SummarizeError::ModelNotFound(_)
        ));
        assert!(matches!(
            GeminiClient::classify_status(StatusCode::BAD_REQUEST, "b".into()),
            SummarizeError::InvalidRequest(_)
        ));
        assert!(matches!(
            GeminiClient::classify_status(StatusCode::INTERNAL_SERVER_ERROR, "s".into()),
            SummarizeError::Transport(_)
        ));
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "<p>summary</p>" } ], "role": "model" } }
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "<p>summary</p>");
    }
}
