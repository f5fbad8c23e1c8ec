pub mod prompts;

use log::{debug, error};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use prompts::{compose_fix_prompt, compose_generate_prompt};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-2.5-flash";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AssistError {
    #[error("authentication failed")]
    Auth,
    #[error("rate limit exceeded")]
    RateLimited,
    #[error("service unavailable")]
    Unavailable,
    #[error("request blocked by safety filters")]
    SafetyBlocked,
    #[error("{0}")]
    Other(String),
}

impl AssistError {
    /// Render the error as a commented pseudo-document so the editor surface
    /// always holds displayable text.
    pub fn to_comment_block(&self) -> String {
        match self {
            AssistError::Auth => "# Error: Authentication Failed\n\
                # The provided API Key is invalid or missing. Please check your configuration."
                .to_string(),
            AssistError::RateLimited => "# Error: Rate Limit Exceeded\n\
                # You have sent too many requests in a short period. Please wait a moment and try again."
                .to_string(),
            AssistError::Unavailable => "# Error: Service Unavailable\n\
                # The AI service is currently experiencing high load. Please try again later."
                .to_string(),
            AssistError::SafetyBlocked => "# Error: Content Blocked\n\
                # The request was blocked by safety filters. Please try rephrasing your request."
                .to_string(),
            AssistError::Other(message) => format!(
                "# Error contacting Gemini API: {message}\n# Please check the logs for more details."
            ),
        }
    }
}

/// Classify a raw failure message the way the API surfaces them.
pub fn classify_error(message: &str) -> AssistError {
    let lowered = message.to_lowercase();
    if message.contains("401") || message.contains("403") || lowered.contains("api key") {
        AssistError::Auth
    } else if message.contains("429") || lowered.contains("quota") {
        AssistError::RateLimited
    } else if message.contains("503") || lowered.contains("service unavailable") {
        AssistError::Unavailable
    } else if lowered.contains("safety") {
        AssistError::SafetyBlocked
    } else {
        AssistError::Other(message.to_string())
    }
}

/// Strip a surrounding markdown code fence (optionally language-tagged) from a
/// model response. Unfenced input is returned trimmed but unchanged.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    // Drop the fence line itself, including any language tag.
    let body = match rest.find('\n') {
        Some(index) => &rest[index + 1..],
        None => return String::new(),
    };

    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim().to_string()
}

/// Leftover fence artifact detection for documents pasted or received from
/// elsewhere.
pub fn has_fence_artifact(text: &str) -> bool {
    text.trim_start().starts_with("```")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    code: Option<u16>,
    message: Option<String>,
    status: Option<String>,
}

/// Failed requests come back as a JSON envelope; fold its fields into one
/// message for classification, falling back to the raw body.
fn error_body_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => format!(
            "{} {} {}",
            envelope.error.code.unwrap_or(status.as_u16()),
            envelope.error.status.unwrap_or_default(),
            envelope.error.message.unwrap_or_default(),
        ),
        Err(_) => format!("{status} {body}"),
    }
}

fn content(text: String) -> Content {
    Content {
        parts: vec![Part { text }],
    }
}

pub struct AssistClient {
    http: reqwest::Client,
    api_key: String,
}

impl AssistClient {
    pub fn new(api_key: String) -> Self {
        AssistClient {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Generate a full configuration from a natural-language request,
    /// optionally seeded with the current document.
    pub async fn generate(
        &self,
        request: &str,
        current_yaml: Option<&str>,
    ) -> Result<String, AssistError> {
        let prompt = compose_generate_prompt(request, current_yaml);
        self.request(prompts::SYSTEM_INSTRUCTION, prompt, 0.4).await
    }

    /// Repair a configuration given the validator's error output.
    pub async fn fix(&self, current_yaml: &str, error_message: &str) -> Result<String, AssistError> {
        let prompt = compose_fix_prompt(current_yaml, error_message);
        self.request(prompts::DEBUG_SYSTEM_INSTRUCTION, prompt, 0.2)
            .await
    }

    async fn request(
        &self,
        system_instruction: &str,
        prompt: String,
        temperature: f32,
    ) -> Result<String, AssistError> {
        let url = format!(
            "{API_BASE}/{MODEL}:generateContent?key={key}",
            key = self.api_key
        );
        let body = GenerateContentRequest {
            system_instruction: content(system_instruction.to_string()),
            contents: vec![content(prompt)],
            generation_config: GenerationConfig { temperature },
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_error(&e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Gemini API returned {}: {}", status, body);
            return Err(classify_error(&error_body_message(status, &body)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AssistError::Other(e.to_string()))?;

        if let Some(feedback) = &parsed.prompt_feedback {
            if feedback.block_reason.is_some() {
                return Err(AssistError::SafetyBlocked);
            }
        }

        let candidate = parsed
            .candidates
            .and_then(|mut candidates| {
                if candidates.is_empty() {
                    None
                } else {
                    Some(candidates.remove(0))
                }
            })
            .ok_or_else(|| AssistError::Other("empty response".to_string()))?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(AssistError::SafetyBlocked);
        }

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        debug!("Gemini returned {} bytes", text.len());
        Ok(strip_code_fences(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tagged_fence() {
        assert_eq!(strip_code_fences("```yaml\nfoo: 1\n```"), "foo: 1");
    }

    #[test]
    fn strips_untagged_fence() {
        assert_eq!(strip_code_fences("```\nfoo: 1\nbar: 2\n```"), "foo: 1\nbar: 2");
    }

    #[test]
    fn unfenced_text_is_only_trimmed() {
        assert_eq!(strip_code_fences("  foo: 1\n"), "foo: 1");
    }

    #[test]
    fn missing_trailing_fence_still_strips_leading_one() {
        assert_eq!(strip_code_fences("```yaml\nfoo: 1\n"), "foo: 1");
    }

    #[test]
    fn detects_fence_artifact() {
        assert!(has_fence_artifact("```yaml\nfoo: 1"));
        assert!(!has_fence_artifact("foo: 1"));
    }

    #[test]
    fn error_envelope_is_folded_into_the_message() {
        let body = r#"{"error":{"code":429,"message":"Resource exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        let message = error_body_message(reqwest::StatusCode::TOO_MANY_REQUESTS, body);

        assert!(message.contains("429"));
        assert!(message.contains("Resource exhausted"));
        assert_eq!(classify_error(&message), AssistError::RateLimited);
    }

    #[test]
    fn non_json_error_body_falls_back_to_raw_text() {
        let message = error_body_message(reqwest::StatusCode::BAD_GATEWAY, "upstream broke");
        assert!(message.contains("upstream broke"));
    }

    #[test]
    fn classifies_auth_failures() {
        assert_eq!(classify_error("401 Unauthorized"), AssistError::Auth);
        assert_eq!(classify_error("API key not valid"), AssistError::Auth);
    }

    #[test]
    fn classifies_rate_limits() {
        assert_eq!(classify_error("429 Too Many Requests"), AssistError::RateLimited);
        assert_eq!(classify_error("Quota exceeded"), AssistError::RateLimited);
    }

    #[test]
    fn classifies_unavailability() {
        assert_eq!(classify_error("503 Service Unavailable"), AssistError::Unavailable);
    }

    #[test]
    fn classifies_safety_blocks() {
        assert_eq!(
            classify_error("blocked due to SAFETY settings"),
            AssistError::SafetyBlocked
        );
    }

    #[test]
    fn unknown_errors_keep_their_message() {
        assert_eq!(
            classify_error("connection reset"),
            AssistError::Other("connection reset".to_string())
        );
    }

    #[test]
    fn comment_blocks_are_displayable_documents() {
        for err in [
            AssistError::Auth,
            AssistError::RateLimited,
            AssistError::Unavailable,
            AssistError::SafetyBlocked,
            AssistError::Other("boom".to_string()),
        ] {
            let block = err.to_comment_block();
            assert!(block.lines().all(|line| line.trim_start().starts_with('#')));
        }
    }
}
