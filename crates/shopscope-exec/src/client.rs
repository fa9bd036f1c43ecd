use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use shopscope_core::config::GenerationConfig;
use shopscope_core::AnswerStore;
use shopscope_core::GenerationRequest;
use thiserror::Error;
use tracing::debug;

use crate::contracts::GeminiErrorBody;
use crate::contracts::GeminiRequest;
use crate::contracts::GeminiResponse;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key found in ${env}")]
    MissingApiKey { env: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("generation API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Text generation collaborator. `Ok(None)` means the service answered
/// without any text.
pub trait GenerationClient: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, GenerationError>;

    fn label(&self) -> &str;
}

pub struct GeminiClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(GenerationError::Client)?;
        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key(),
            api_key_env: config.api_key_env.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl GenerationClient for GeminiClient {
    fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::MissingApiKey {
                env: self.api_key_env.clone(),
            })?;

        debug!(model = %self.model, prompt_chars = request.prompt.len(), "calling generateContent");
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&GeminiRequest::user_prompt(&request.prompt))
            .send()
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let body = response.text().map_err(|err| self.transport_error(err))?;
        debug!(status = status.as_u16(), bytes = body.len(), "generateContent answered");
        parse_generate_response(status, &body)
    }

    fn label(&self) -> &str {
        &self.model
    }
}

impl GeminiClient {
    fn transport_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout {
                secs: self.timeout_secs,
            }
        } else {
            GenerationError::Transport(err)
        }
    }
}

/// Maps a raw `generateContent` reply to its text. Non-2xx statuses become
/// [`GenerationError::Api`], using the API's own message when the body has one.
pub fn parse_generate_response(
    status: StatusCode,
    body: &str,
) -> Result<Option<String>, GenerationError> {
    if !status.is_success() {
        let message = serde_json::from_str::<GeminiErrorBody>(body)
            .map(|parsed| parsed.error.message)
            .unwrap_or_else(|_| body.trim().to_string());
        return Err(GenerationError::Api {
            status: status.as_u16(),
            message,
        });
    }
    let parsed: GeminiResponse = serde_json::from_str(body)?;
    Ok(parsed.text())
}

/// Offline stand-in that drafts a short brief from the submitted answers.
pub struct SimulatedGenerationClient {
    delay: Duration,
}

impl SimulatedGenerationClient {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedGenerationClient {
    fn default() -> Self {
        Self::new(Duration::from_millis(800))
    }
}

impl GenerationClient for SimulatedGenerationClient {
    fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, GenerationError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let answers: AnswerStore = serde_json::from_str(&request.answers_json)?;
        Ok(Some(simulated_brief(&answers)))
    }

    fn label(&self) -> &str {
        "simulated"
    }
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "not specified"
    } else {
        value
    }
}

fn simulated_brief(answers: &AnswerStore) -> String {
    let mut modules: Vec<&str> = Vec::new();
    modules.extend(answers.payments.online_methods.iter().map(String::as_str));
    modules.extend(answers.payments.offline_methods.iter().map(String::as_str));
    modules.extend(answers.features.selected.iter().map(String::as_str));

    let complexity = match modules.len()
        + usize::from(answers.products.has_variants == "yes")
        + usize::from(answers.shipping.rate_calculation == "automatic")
    {
        0..=3 => "Low",
        4..=7 => "Medium",
        _ => "High",
    };

    let mut out = String::new();
    out.push_str("# Project Scope & Estimation Brief\n\n");
    out.push_str("## Executive Summary\n");
    out.push_str(&format!(
        "A {} store with {} categories and *{}* shipping.\n\n",
        or_unset(&answers.brand.website_status),
        or_unset(&answers.products.category_count),
        or_unset(&answers.shipping.scope),
    ));
    out.push_str("## Technical Complexity Assessment\n");
    out.push_str(&format!(
        "**{complexity}**: {} integrations and features requested.\n\n",
        modules.len()
    ));
    out.push_str("## Key Features & Modules\n");
    if modules.is_empty() {
        out.push_str("- Core catalog and checkout\n");
    }
    for module in &modules {
        out.push_str(&format!("- {module}\n"));
    }
    out.push_str("\n## Potential Challenges\n");
    if answers.content.content_creation_help == "needs_help" {
        out.push_str("- Content still has to be written.\n");
    }
    if answers.products.upload_method == "developer" && answers.products.content_ready != "yes" {
        out.push_str("- Product photos and descriptions are not ready.\n");
    }
    out.push_str(&format!(
        "- Deadline: {}\n\n",
        or_unset(&answers.timeline.deadline)
    ));
    out.push_str("## Next Steps Recommendation\n");
    out.push_str("Request the product list and brand assets before estimating.\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shopscope_core::FieldUpdate;
    use shopscope_core::MultiField;

    #[test]
    fn success_body_yields_text() {
        let body = r##"{"candidates":[{"content":{"parts":[{"text":"# Scope"}]}}]}"##;
        let text = parse_generate_response(StatusCode::OK, body).expect("ok");
        assert_eq!(text.as_deref(), Some("# Scope"));
    }

    #[test]
    fn error_status_uses_api_message() {
        let body = r#"{"error":{"code":403,"message":"Permission denied.","status":"PERMISSION_DENIED"}}"#;
        let err = parse_generate_response(StatusCode::FORBIDDEN, body).expect_err("403");
        match err {
            GenerationError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Permission denied.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_status_with_plain_body_keeps_body() {
        let err = parse_generate_response(StatusCode::BAD_GATEWAY, " upstream down \n")
            .expect_err("502");
        assert_eq!(err.to_string(), "generation API returned 502: upstream down");
    }

    #[test]
    fn malformed_success_body_is_a_parse_error() {
        let err = parse_generate_response(StatusCode::OK, "<html>").expect_err("not json");
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[test]
    fn gemini_client_without_key_fails_before_sending() {
        let config = GenerationConfig {
            api_key_env: "SHOPSCOPE_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..GenerationConfig::default()
        };
        let client = GeminiClient::new(&config).expect("client");
        assert_eq!(
            client.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );

        let request = GenerationRequest::from_answers(&AnswerStore::new()).expect("request");
        let err = client.generate(&request).expect_err("missing key");
        assert!(matches!(err, GenerationError::MissingApiKey { .. }));
    }

    #[test]
    fn simulated_client_lists_selected_modules() {
        let answers = AnswerStore::new().with_update(FieldUpdate::Multi(
            MultiField::Features,
            vec!["Blog".to_string(), "Coupons".to_string()],
        ));
        let request = GenerationRequest::from_answers(&answers).expect("request");

        let text = SimulatedGenerationClient::new(Duration::ZERO)
            .generate(&request)
            .expect("generate")
            .expect("text");

        assert!(text.contains("- Blog\n- Coupons\n"));
        assert!(text.contains("## Next Steps Recommendation"));
    }
}
