use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// POST /filter request body
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct FilterRequest {
    #[serde(rename = "originalText", default)]
    pub original_text: Option<String>,
}

// POST /filter response body
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FilterResponse {
    #[serde(rename = "filteredText")]
    pub filtered_text: String,
}

// POST /flip and /generate-all request body
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct LensRequest {
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub lens: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FlipResponse {
    pub ok: bool,
    pub text: String,
}

// lens name -> rewrite
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct GenerateAllResponse {
    pub ok: bool,
    pub results: BTreeMap<String, String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

// Chat completions API request format
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

// Chat completions API response format, only the fields we read
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    pub fn first_content(&self) -> Option<Option<&str>> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_deref())
    }
}
