/// Gemini recommendation provider
///
/// Calls `models/{model}:generateContent` with a system instruction and a response
/// schema so the model answers with JSON only. The answer is still untrusted text
/// until it parses into `AgentRecommendationList` and passes validation.
///
/// Request shape (abridged):
/// ```json
/// {
///   "systemInstruction": { "parts": [{ "text": "..." }] },
///   "contents": [{ "role": "user", "parts": [{ "text": "<prompt>" }] }],
///   "generationConfig": { "responseMimeType": "application/json", "responseSchema": { ... } }
/// }
/// ```
use crate::{
    error::{AppError, AppResult},
    models::{AgentRecommendationList, CandidateBook},
    services::providers::RecommendationModel,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
    recommendation_count: usize,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseCandidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        recommendation_count: usize,
    ) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
            recommendation_count,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        )
    }

    fn system_instruction(&self) -> String {
        format!(
            "You are a helpful and creative book recommendation agent. \
             Provide exactly {} distinct book recommendations based on the user's prompt. \
             Include the exact title and author for each book. \
             **DO NOT** include cover URLs. The response must strictly match the given JSON schema.",
            self.recommendation_count
        )
    }

    /// Schema for `AgentRecommendationList`, in Gemini's OpenAPI subset
    fn response_schema(&self) -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "recommendations": {
                    "type": "ARRAY",
                    "description": format!("A list of {} book recommendations.", self.recommendation_count),
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "title": {
                                "type": "STRING",
                                "description": "The title of the recommended book."
                            },
                            "author": {
                                "type": "STRING",
                                "description": "The author of the recommended book."
                            },
                            "reasoning": {
                                "type": "STRING",
                                "description": "A brief explanation of why this book was recommended."
                            }
                        },
                        "required": ["title", "author", "reasoning"],
                        "propertyOrdering": ["title", "author", "reasoning"]
                    }
                }
            },
            "required": ["recommendations"]
        })
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "systemInstruction": {
                "parts": [{ "text": self.system_instruction() }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": self.response_schema()
            }
        })
    }
}

/// Concatenated text of the first candidate
fn extract_text(response: GenerateContentResponse) -> AppResult<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Generation("model returned no candidates".to_string()))?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
        return Err(AppError::Generation(format!(
            "model returned no content (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}

/// Parse and validate the model's JSON answer
fn parse_recommendations(text: &str) -> AppResult<Vec<CandidateBook>> {
    let list: AgentRecommendationList = serde_json::from_str(text).map_err(|e| {
        tracing::error!(error = %e, response = %text, "Model output did not match schema");
        AppError::Generation(format!("model output did not match schema: {}", e))
    })?;

    for (index, book) in list.recommendations.iter().enumerate() {
        if book.title.trim().is_empty() || book.author.trim().is_empty() {
            return Err(AppError::Generation(format!(
                "recommendation {} is missing a title or author",
                index
            )));
        }
    }

    Ok(list.recommendations)
}

#[async_trait::async_trait]
impl RecommendationModel for GeminiProvider {
    async fn recommend(&self, prompt: &str) -> AppResult<Vec<CandidateBook>> {
        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Gemini request failed");
            return Err(AppError::Generation(format!(
                "Gemini API returned status {}",
                status
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Generation(format!("Failed to parse Gemini response: {}", e)))?;

        let books = parse_recommendations(&extract_text(body)?)?;

        tracing::info!(
            model = %self.model,
            candidates = books.len(),
            provider = "gemini",
            "Recommendations generated"
        );

        Ok(books)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider() -> GeminiProvider {
        GeminiProvider::new(
            "test_key".to_string(),
            "http://test.local/".to_string(),
            "gemini-2.5-flash".to_string(),
            3,
        )
    }

    #[test]
    fn test_endpoint() {
        let provider = create_test_provider();
        assert_eq!(
            provider.endpoint(),
            "http://test.local/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let provider = create_test_provider();
        let body = provider.request_body("A sci-fi book with a strong female lead.");

        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "A sci-fi book with a strong female lead."
        );
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        let instruction = body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap();
        assert!(instruction.contains("exactly 3 distinct book recommendations"));
        assert!(instruction.contains("**DO NOT** include cover URLs"));

        let items = &body["generationConfig"]["responseSchema"]["properties"]["recommendations"]
            ["items"];
        assert_eq!(items["required"], json!(["title", "author", "reasoning"]));
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"recommendations\":" }, { "text": "[]}" }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "{\"recommendations\":[]}");
    }

    #[test]
    fn test_extract_text_no_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();
        assert!(matches!(
            extract_text(response),
            Err(AppError::Generation(_))
        ));
    }

    #[test]
    fn test_extract_text_empty_content_reports_finish_reason() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        match extract_text(response) {
            Err(AppError::Generation(msg)) => assert!(msg.contains("SAFETY")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_recommendations_valid() {
        let text = r#"{"recommendations": [
            {"title": "The Left Hand of Darkness", "author": "Ursula K. Le Guin", "reasoning": "Classic."},
            {"title": "Ancillary Justice", "author": "Ann Leckie", "reasoning": "Strong lead."},
            {"title": "The Fifth Season", "author": "N. K. Jemisin", "reasoning": "Award winner."}
        ]}"#;

        let books = parse_recommendations(text).unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(books[1].title, "Ancillary Justice");
        assert_eq!(books[2].author, "N. K. Jemisin");
    }

    #[test]
    fn test_parse_recommendations_not_json() {
        let result = parse_recommendations("Here are three books you might enjoy...");
        assert!(matches!(result, Err(AppError::Generation(_))));
    }

    #[test]
    fn test_parse_recommendations_missing_field() {
        let text = r#"{"recommendations": [{"title": "Dune", "reasoning": "Spice."}]}"#;
        assert!(matches!(
            parse_recommendations(text),
            Err(AppError::Generation(_))
        ));
    }

    #[test]
    fn test_parse_recommendations_blank_author() {
        let text = r#"{"recommendations": [{"title": "Dune", "author": " ", "reasoning": "Spice."}]}"#;
        assert!(matches!(
            parse_recommendations(text),
            Err(AppError::Generation(_))
        ));
    }
}
