//! HTTP dispatcher for the remote analysis service.
//!
//! Each call issues exactly one `POST {endpoint}?<feature>=true&...&language=<code>`
//! with a JSON body of `{"text": ...}` or `{"url": ...}`. Failures are
//! reported once and never retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use textlens_core::{
    AnalysisDispatcher, AnalysisRequest, AnalysisResult, InputMode, Result, TextLensError,
};
use textlens_infrastructure::ServiceConfig;

/// Header carrying the request's correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum AnalyzeBody<'a> {
    Text(&'a str),
    Url(&'a str),
}

/// Calls the analysis endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    client: Client,
    endpoint: String,
}

impl HttpAnalysisClient {
    /// Creates a client for `endpoint` with no request timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Creates a client for `endpoint` that gives up after `timeout`.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TextLensError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Creates a client from the `[service]` configuration section.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        match config.timeout() {
            Some(timeout) => Self::with_timeout(config.endpoint(), timeout),
            None => Ok(Self::new(config.endpoint())),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn body(request: &AnalysisRequest) -> AnalyzeBody<'_> {
        match request.input_mode() {
            InputMode::Text => AnalyzeBody::Text(request.input_value()),
            InputMode::Url => AnalyzeBody::Url(request.input_value()),
        }
    }
}

#[async_trait]
impl AnalysisDispatcher for HttpAnalysisClient {
    async fn dispatch(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let mut query: Vec<(&str, &str)> = request.features().query_pairs();
        query.push(("language", request.language()));

        tracing::debug!(
            correlation_id = %request.correlation_id(),
            endpoint = %self.endpoint,
            mode = %request.input_mode(),
            "Dispatching analysis request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&query)
            .header(REQUEST_ID_HEADER, request.correlation_id().as_str())
            .json(&Self::body(request))
            .send()
            .await
            .map_err(|e| TextLensError::analysis(format!("request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TextLensError::analysis(format!("request failed: {}", e)))?;

        let result = parse_response(status.as_u16(), status.is_success(), &text);
        if let Err(e) = &result {
            tracing::debug!(
                correlation_id = %request.correlation_id(),
                status = status.as_u16(),
                error = %e,
                "Analysis request failed"
            );
        }
        result
    }
}

/// Interprets a response body.
///
/// An `error` field wins over the status code; a non-2xx status without one
/// gets a generic message; a 2xx response must carry a `results` object.
fn parse_response(status: u16, success: bool, body: &str) -> Result<AnalysisResult> {
    let payload: Option<Value> = serde_json::from_str(body).ok();

    if let Some(error) = payload
        .as_ref()
        .and_then(|p| p.get("error"))
        .filter(|e| !e.is_null())
    {
        let (message, code) = error_details(error);
        let message = message.unwrap_or_else(|| generic_failure(status));
        return Err(TextLensError::analysis_response(message, code, status));
    }

    if !success {
        return Err(TextLensError::analysis_response(
            generic_failure(status),
            None,
            status,
        ));
    }

    let payload = payload.ok_or_else(|| {
        TextLensError::analysis("malformed response: body is not valid JSON")
    })?;
    let results = match payload.get("results") {
        Some(results @ Value::Object(_)) => results.clone(),
        Some(_) => {
            return Err(TextLensError::analysis(
                "malformed response: `results` is not an object",
            ));
        }
        None => {
            return Err(TextLensError::analysis(
                "malformed response: missing `results`",
            ));
        }
    };

    AnalysisResult::from_value(results)
        .map_err(|e| TextLensError::analysis(format!("malformed response: {}", e)))
}

fn error_details(error: &Value) -> (Option<String>, Option<String>) {
    match error {
        Value::String(message) if !message.trim().is_empty() => (Some(message.clone()), None),
        Value::Object(fields) => {
            let message = fields
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.trim().is_empty())
                .map(str::to_string);
            let code = fields.get("code").and_then(|c| match c {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            });
            (message, code)
        }
        _ => (None, None),
    }
}

fn generic_failure(status: u16) -> String {
    format!("Analysis request failed (HTTP {})", status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use textlens_core::{Feature, FeatureDescriptor, SectionState, build_descriptor};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn text_request(text: &str, features: FeatureDescriptor) -> AnalysisRequest {
        AnalysisRequest::new(InputMode::Text, text, features, "en").unwrap()
    }

    fn client_for(server: &MockServer) -> HttpAnalysisClient {
        HttpAnalysisClient::new(format!("{}/api/analyze", server.uri()))
    }

    #[tokio::test]
    async fn test_successful_analysis() {
        let server = MockServer::start().await;
        let request = text_request(
            "Rust is a systems language.",
            build_descriptor([(Feature::Summarize, true), (Feature::Topics, true)]).unwrap(),
        );

        Mock::given(method("POST"))
            .and(path("/api/analyze"))
            .and(query_param("summarize", "true"))
            .and(query_param("topics", "true"))
            .and(query_param("language", "en"))
            .and(header(REQUEST_ID_HEADER, request.correlation_id().as_str()))
            .and(body_json(json!({ "text": "Rust is a systems language." })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": {
                    "summary": { "text": "A language." },
                    "topics": { "segments": [ { "topics": [ { "topic": "Rust", "confidence_score": 0.9 } ] } ] }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).dispatch(&request).await.unwrap();
        assert_eq!(result.summary.unwrap().text, "A language.");
        assert_eq!(result.topics.unwrap().segments[0].topics[0].topic, "Rust");
    }

    #[tokio::test]
    async fn test_url_mode_sends_url_body() {
        let server = MockServer::start().await;
        let request = AnalysisRequest::new(
            InputMode::Url,
            "https://example.com/post",
            build_descriptor([(Feature::Sentiment, true)]).unwrap(),
            "de",
        )
        .unwrap();

        Mock::given(method("POST"))
            .and(query_param("sentiment", "true"))
            .and(query_param("language", "de"))
            .and(body_json(json!({ "url": "https://example.com/post" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": {} })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).dispatch(&request).await.unwrap();
        assert_eq!(result.section_state(Feature::Sentiment), SectionState::Absent);
    }

    #[tokio::test]
    async fn test_backend_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "message": "quota exceeded", "code": "rate_limited" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .dispatch(&text_request("hello", FeatureDescriptor::all()))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TextLensError::Analysis {
                message: "quota exceeded".to_string(),
                code: Some("rate_limited".to_string()),
                status: Some(429),
            }
        );
        assert_eq!(err.user_message(), "quota exceeded");
    }

    #[tokio::test]
    async fn test_non_success_without_body_uses_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .dispatch(&text_request("hello", FeatureDescriptor::all()))
            .await
            .unwrap_err();

        assert!(err.is_analysis());
        assert_eq!(err.user_message(), "Analysis request failed (HTTP 502)");
    }

    #[tokio::test]
    async fn test_error_field_on_success_status_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": { "message": "text too short" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .dispatch(&text_request("hi", FeatureDescriptor::all()))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "text too short");
    }

    #[tokio::test]
    async fn test_partial_response_with_nulls_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": {
                    "summary": { "text": null },
                    "topics": { "segments": null },
                    "sentiments": { "segments": [ { "sentiment": null } ] }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .dispatch(&text_request("hello", FeatureDescriptor::all()))
            .await
            .unwrap();

        assert_eq!(result.section_state(Feature::Summarize), SectionState::Empty);
        assert_eq!(result.section_state(Feature::Topics), SectionState::Empty);
        assert_eq!(result.section_state(Feature::Sentiment), SectionState::Empty);
        assert_eq!(result.section_state(Feature::Intents), SectionState::Absent);
    }

    #[tokio::test]
    async fn test_missing_results_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .dispatch(&text_request("hello", FeatureDescriptor::all()))
            .await
            .unwrap_err();

        assert!(err.is_analysis());
        assert!(err.user_message().starts_with("malformed response"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let server = MockServer::start().await;
        let endpoint = format!("{}/api/analyze", server.uri());
        drop(server);

        let err = HttpAnalysisClient::new(endpoint)
            .dispatch(&text_request("hello", FeatureDescriptor::all()))
            .await
            .unwrap_err();

        assert!(err.is_analysis());
        assert!(err.user_message().starts_with("request failed"));
    }

    #[test]
    fn test_from_config_joins_endpoint() {
        let config = ServiceConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..ServiceConfig::default()
        };
        let client = HttpAnalysisClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/api/analyze");
    }

    #[test]
    fn test_parse_response_error_string_with_numeric_code() {
        let err = parse_response(400, false, r#"{"error": {"message": "bad", "code": 17}}"#)
            .unwrap_err();
        assert_eq!(
            err,
            TextLensError::Analysis {
                message: "bad".to_string(),
                code: Some("17".to_string()),
                status: Some(400),
            }
        );

        let err = parse_response(500, false, r#"{"error": "boom"}"#).unwrap_err();
        assert_eq!(err.user_message(), "boom");
    }
}
