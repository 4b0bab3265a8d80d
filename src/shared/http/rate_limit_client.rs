//! HTTP client with automatic rate limiting and retry logic
//!
//! Shared by the catalog and completion adapters so neither duplicates
//! backoff handling. A 404 maps to a typed `NotFound`, distinct from other
//! transport failures.

use super::retry_policy::{is_retryable_error, RateLimitInfo, RetryPolicy};
use crate::shared::errors::{AppError, AppResult};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::sleep;

type DirectRateLimiter = GovernorRateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
    governor::middleware::NoOpMiddleware,
>;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "cinerec/0.1";

pub struct RateLimitClient {
    client: Client,
    rate_limiter: DirectRateLimiter,
    retry_policy: RetryPolicy,
    bearer_token: Option<String>,
    service_name: String,
}

impl RateLimitClient {
    /// Client for the TMDB catalog API (auth travels as a query parameter)
    pub fn for_tmdb() -> Self {
        Self::new(
            "TMDB",
            RetryPolicy::tmdb(),
            // TMDB: generous limit, keep a safety margin at 4 req/sec
            Self::create_rate_limiter(4.0, 8),
        )
    }

    /// Client for the OpenAI-compatible completion API
    pub fn for_completion() -> Self {
        Self::new(
            "Completion",
            RetryPolicy::completion(),
            Self::create_rate_limiter(1.0, 2),
        )
    }

    fn create_rate_limiter(requests_per_second: f64, burst_size: u32) -> DirectRateLimiter {
        let duration = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::MAX
        };

        let burst = NonZeroU32::new(burst_size.max(1)).unwrap();
        let quota = Quota::with_period(duration).unwrap().allow_burst(burst);

        GovernorRateLimiter::direct(quota)
    }

    pub fn new(service_name: &str, retry_policy: RetryPolicy, rate_limiter: DirectRateLimiter) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            rate_limiter,
            retry_policy,
            bearer_token: None,
            service_name: service_name.to_string(),
        }
    }

    /// Attach a bearer token sent with every request
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Make a GET request with rate limiting and retries
    pub async fn get<T>(&self, url: &str) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.request_with_retries(Method::GET, url, None).await
    }

    /// Make a POST request with a JSON body
    pub async fn post_json<T>(&self, url: &str, body: &Value) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.request_with_retries(Method::POST, url, Some(body.clone()))
            .await
    }

    async fn request_with_retries<T>(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut last_error = None;

        for attempt in 0..=self.retry_policy.max_retries {
            // Wait for rate limiter before attempting request
            self.rate_limiter.until_ready().await;

            match self.build_and_send_request(&method, url, &body).await {
                Ok(response) => {
                    if response.status() == 429 {
                        let rate_limit_info = RateLimitInfo::from_headers(response.headers());

                        if attempt < self.retry_policy.max_retries {
                            let delay = self.calculate_retry_delay(attempt, &rate_limit_info);
                            log::warn!(
                                "{} API rate limited (attempt {}/{}). Waiting {:?} before retry.",
                                self.service_name,
                                attempt + 1,
                                self.retry_policy.max_retries + 1,
                                delay
                            );
                            sleep(delay).await;
                            continue;
                        } else {
                            return Err(AppError::RateLimitError(format!(
                                "{} API rate limit exceeded after {} attempts",
                                self.service_name,
                                self.retry_policy.max_retries + 1
                            )));
                        }
                    }

                    // The collaborators report missing resources with 404;
                    // that is a typed miss, never retried.
                    if response.status() == 404 {
                        return Err(AppError::NotFound(format!(
                            "{} API has no resource at {}",
                            self.service_name, url
                        )));
                    }

                    if !response.status().is_success() {
                        let error_msg = format!(
                            "{} API returned error: {}",
                            self.service_name,
                            response.status()
                        );

                        // Only retry server errors
                        if response.status().is_server_error()
                            && attempt < self.retry_policy.max_retries
                        {
                            let delay = self.retry_policy.calculate_delay(attempt, None);
                            log::warn!(
                                "{} (attempt {}/{}). Retrying in {:?}",
                                error_msg,
                                attempt + 1,
                                self.retry_policy.max_retries + 1,
                                delay
                            );
                            sleep(delay).await;
                            continue;
                        } else {
                            return Err(AppError::ApiError(error_msg));
                        }
                    }

                    return self.parse_response(response).await;
                }
                Err(e) => {
                    let retryable = is_retryable_error(&e);
                    last_error = Some(AppError::ExternalServiceError(e.to_string()));

                    if retryable && attempt < self.retry_policy.max_retries {
                        let delay = self.retry_policy.calculate_delay(attempt, None);
                        log::warn!(
                            "{} API request failed (attempt {}/{}): {}. Retrying in {:?}",
                            self.service_name,
                            attempt + 1,
                            self.retry_policy.max_retries + 1,
                            e,
                            delay
                        );
                        sleep(delay).await;
                        continue;
                    } else {
                        return Err(AppError::ExternalServiceError(format!(
                            "{} API request failed: {}",
                            self.service_name, e
                        )));
                    }
                }
            }
        }

        Err(AppError::ExternalServiceError(format!(
            "{} API request failed after {} attempts: {}",
            self.service_name,
            self.retry_policy.max_retries + 1,
            last_error.map_or_else(|| "Unknown error".to_string(), |e| e.to_string())
        )))
    }

    async fn build_and_send_request(
        &self,
        method: &Method,
        url: &str,
        body: &Option<Value>,
    ) -> Result<Response, reqwest::Error> {
        let mut request_builder = self
            .client
            .request(method.clone(), url)
            .header("Accept", "application/json");

        if let Some(token) = &self.bearer_token {
            request_builder = request_builder.bearer_auth(token);
        }

        if let Some(json_body) = body {
            request_builder = request_builder.json(json_body);
        }

        request_builder.send().await
    }

    /// Read the body and deserialize it into the typed boundary model.
    /// A payload that does not match the expected shape is a malformed
    /// response, not a transport failure.
    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| {
            AppError::ExternalServiceError(format!(
                "Failed to read {} response: {}",
                self.service_name, e
            ))
        })?;

        serde_json::from_str(&response_text).map_err(|e| {
            AppError::MalformedResponse(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.service_name,
                e,
                if response_text.len() > 200 {
                    format!("{}...", &response_text[..200])
                } else {
                    response_text
                }
            ))
        })
    }

    fn calculate_retry_delay(&self, attempt: u32, rate_limit_info: &RateLimitInfo) -> Duration {
        if let Some(server_delay) = rate_limit_info.recommended_delay() {
            return server_delay.min(self.retry_policy.max_delay);
        }

        self.retry_policy.calculate_delay(attempt, None)
    }

    /// Check if a request can be made now (for testing/debugging)
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let tmdb = RateLimitClient::for_tmdb();
        assert_eq!(tmdb.service_name(), "TMDB");

        let completion = RateLimitClient::for_completion();
        assert_eq!(completion.service_name(), "Completion");
    }

    #[test]
    fn test_can_make_request() {
        let client = RateLimitClient::for_tmdb();
        assert!(client.can_make_request_now());
    }
}
