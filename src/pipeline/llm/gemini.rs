use serde::{Deserialize, Serialize};

use super::{send_error, ImageData, ModelClient, ModelError, Prompt};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const PROVIDER: &str = "gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";
const TEMPERATURE: f32 = 0.3;
const MAX_OUTPUT_TOKENS: u32 = 800;

/// Gemini `generateContent` client. Images travel as inline base64 parts.
/// The API key goes in a header so it never appears in a request URL.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, ModelError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ModelError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        })
    }

    pub fn hosted(api_key: &str, timeout_secs: u64) -> Result<Self, ModelError> {
        Self::new(GEMINI_BASE_URL, api_key, timeout_secs)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    Inline { inline_data: InlineData<'a> },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

fn build_request<'a>(prompt: &'a Prompt, image: Option<&'a ImageData>) -> GenerateRequest<'a> {
    let mut parts = vec![Part::Text { text: &prompt.user }];
    if let Some(image) = image {
        parts.push(Part::Inline {
            inline_data: InlineData {
                mime_type: &image.mime_type,
                data: &image.base64,
            },
        });
    }

    GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part::Text {
                text: &prompt.system,
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts,
        }],
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        },
    }
}

fn joined_text(parsed: GenerateResponse) -> Result<String, ModelError> {
    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(ModelError::EmptyResponse { provider: PROVIDER })
    } else {
        Ok(text)
    }
}

impl ModelClient for GeminiClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn generate(
        &self,
        model: &str,
        prompt: &Prompt,
        image: Option<&ImageData>,
    ) -> Result<String, ModelError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let body = build_request(prompt, image);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| send_error(PROVIDER, &self.base_url, self.timeout_secs, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ModelError::Http {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| ModelError::ResponseParsing(e.without_url().to_string()))?;

        joined_text(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> Prompt {
        Prompt {
            system: "be kind".into(),
            user: "read this meter".into(),
        }
    }

    #[test]
    fn constructor_trims_trailing_slash() {
        let client = GeminiClient::new("http://localhost:9000/v1beta/", "k", 10).unwrap();
        assert_eq!(client.base_url, "http://localhost:9000/v1beta");
    }

    #[test]
    fn image_goes_in_inline_data_part() {
        let p = prompt();
        let image = ImageData::from_data_url("aGVsbG8=").unwrap();
        let json = serde_json::to_value(build_request(&p, Some(&image))).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "read this meter");
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[1]["inline_data"]["data"], "aGVsbG8=");
        assert_eq!(json["system_instruction"]["parts"][0]["text"], "be kind");
        assert!(json["system_instruction"].get("role").is_none());
        assert_eq!(json["generation_config"]["max_output_tokens"], 800);
    }

    #[test]
    fn joins_candidate_parts() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"GLUCOSE_LEVEL: "},{"text":"98"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(joined_text(parsed).unwrap(), "GLUCOSE_LEVEL: 98");
    }

    #[test]
    fn blocked_candidate_is_empty_response() {
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert!(joined_text(parsed).is_err());
    }

    #[test]
    fn failed_request_does_not_leak_api_key() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                drop(stream);
            }
        });

        let client = GeminiClient::new(&format!("http://{addr}/v1beta"), "SECRET-KEY-123", 5).unwrap();
        let err = client.generate("gemini-2.0-flash", &prompt(), None).unwrap_err();
        server.join().unwrap();

        let text = err.to_string();
        assert!(!text.contains("SECRET-KEY-123"), "key leaked: {text}");
        assert!(!format!("{err:?}").contains("SECRET-KEY-123"));
    }
}
