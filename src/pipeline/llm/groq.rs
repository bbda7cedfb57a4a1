use serde::{Deserialize, Serialize};

use super::{send_error, ImageData, ModelClient, ModelError, Prompt};

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

const PROVIDER: &str = "groq";
const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 800;
const TOP_P: f32 = 0.9;

/// OpenAI-compatible chat-completions client (Groq).
pub struct GroqClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GroqClient {
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
        Self::new(GROQ_BASE_URL, api_key, timeout_secs)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn build_request<'a>(model: &'a str, prompt: &'a Prompt, image: Option<&ImageData>) -> ChatRequest<'a> {
    let user = match image {
        Some(image) => MessageContent::Parts(vec![
            ContentPart::Text { text: &prompt.user },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: image.data_url(),
                },
            },
        ]),
        None => MessageContent::Text(&prompt.user),
    };

    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: MessageContent::Text(&prompt.system),
            },
            ChatMessage {
                role: "user",
                content: user,
            },
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
        top_p: TOP_P,
    }
}

fn first_choice(parsed: ChatResponse) -> Result<String, ModelError> {
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(ModelError::EmptyResponse { provider: PROVIDER })
}

impl ModelClient for GroqClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn generate(
        &self,
        model: &str,
        prompt: &Prompt,
        image: Option<&ImageData>,
    ) -> Result<String, ModelError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = build_request(model, prompt, image);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
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

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| ModelError::ResponseParsing(e.without_url().to_string()))?;

        first_choice(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> Prompt {
        Prompt {
            system: "be kind".into(),
            user: "read this".into(),
        }
    }

    #[test]
    fn constructor_trims_trailing_slash() {
        let client = GroqClient::new("https://api.groq.com/openai/v1/", "key", 30).unwrap();
        assert_eq!(client.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(client.timeout_secs, 30);
    }

    #[test]
    fn text_request_uses_plain_string_content() {
        let p = prompt();
        let json = serde_json::to_value(build_request("llama", &p, None)).unwrap();
        assert_eq!(json["model"], "llama");
        assert_eq!(json["max_tokens"], 800);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "read this");
    }

    #[test]
    fn image_request_sends_data_url_part() {
        let p = prompt();
        let image = ImageData::from_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        let json = serde_json::to_value(build_request("llava", &p, Some(&image))).unwrap();
        let parts = &json["messages"][1]["content"];
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(parts[1]["image_url"]["url"], "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn reads_first_choice_content() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"URGENCY: MONITOR"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice(parsed).unwrap(), "URGENCY: MONITOR");
    }

    #[test]
    fn missing_choices_is_empty_response() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            first_choice(parsed),
            Err(ModelError::EmptyResponse { .. })
        ));
    }
}
