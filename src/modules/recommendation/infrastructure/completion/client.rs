use super::models::ChatCompletionResponse;
use crate::modules::recommendation::domain::entities::SuggestionList;
use crate::modules::recommendation::domain::provider::CompletionProvider;
use crate::shared::errors::AppResult;
use crate::shared::http::RateLimitClient;
use async_trait::async_trait;
use serde_json::{json, Value};

const SYSTEM_PROMPT: &str = "Extract the movie recommendation information.";

/// Adapter for an OpenAI-compatible chat completions endpoint with strict
/// structured output.
pub struct OpenAiClient {
    http_client: RateLimitClient,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http_client: RateLimitClient::for_completion().with_bearer_token(api_key),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Strict JSON schema for the structured output: a list of
    /// {title, reason} pairs, nothing else.
    fn response_format() -> Value {
        json!({
            "type": "json_schema",
            "json_schema": {
                "name": "recommendation",
                "strict": true,
                "schema": {
                    "type": "object",
                    "properties": {
                        "recommendation": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "title": { "type": "string" },
                                    "reason": { "type": "string" }
                                },
                                "required": ["title", "reason"],
                                "additionalProperties": false
                            }
                        }
                    },
                    "required": ["recommendation"],
                    "additionalProperties": false
                }
            }
        })
    }

    fn build_request(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt }
            ],
            "response_format": Self::response_format()
        })
    }

    /// Parse the structured content, treating any schema violation as
    /// "no suggestions this run".
    fn parse_suggestions(content: &str) -> Option<SuggestionList> {
        match serde_json::from_str::<SuggestionList>(content) {
            Ok(list) => Some(list),
            Err(e) => {
                log::warn!(
                    "Completion output failed schema validation: {}. Content: {}",
                    e,
                    if content.len() > 200 {
                        format!("{}...", &content[..200])
                    } else {
                        content.to_string()
                    }
                );
                None
            }
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn suggest_recommendations(&self, prompt: &str) -> AppResult<Option<SuggestionList>> {
        let body = self.build_request(prompt);
        let url = self.completions_url();

        log::info!("Completion: requesting suggestions from model '{}'", self.model);

        let response: ChatCompletionResponse = self.http_client.post_json(&url, &body).await?;

        let content = match response.first_content() {
            Some(content) => content,
            None => {
                log::warn!("Completion returned no content; skipping this run");
                return Ok(None);
            }
        };

        Ok(Self::parse_suggestions(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_model_and_strict_schema() {
        let client = OpenAiClient::new("https://api.openai.com/v1", "sk-test", "gpt-5-nano");
        let body = client.build_request("suggest similar movies");

        assert_eq!(body["model"], "gpt-5-nano");
        assert_eq!(body["messages"][1]["content"], "suggest similar movies");
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(
            body["response_format"]["json_schema"]["strict"],
            Value::Bool(true)
        );
        let schema = &body["response_format"]["json_schema"]["schema"];
        assert_eq!(schema["additionalProperties"], Value::Bool(false));
    }

    #[test]
    fn parse_suggestions_accepts_valid_payload() {
        let content = r#"{"recommendation":[{"title":"Se7en","reason":"same director"}]}"#;
        let parsed = OpenAiClient::parse_suggestions(content).unwrap();
        assert_eq!(parsed.recommendation.len(), 1);
        assert_eq!(parsed.recommendation[0].reason, "same director");
    }

    #[test]
    fn parse_suggestions_swallows_malformed_payload() {
        assert!(OpenAiClient::parse_suggestions("not json at all").is_none());
        assert!(OpenAiClient::parse_suggestions(r#"{"recommendation":"wrong"}"#).is_none());
    }

    #[test]
    fn completions_url_joins_base() {
        let client = OpenAiClient::new("https://api.openai.com/v1", "sk-test", "gpt-5-nano");
        assert_eq!(
            client.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
