use serde::{Deserialize, Serialize};

use crate::validate::word_count;

// Body of POST /api/humanize
#[derive(Deserialize, Debug)]
pub struct HumanizeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

// Reply of POST /api/humanize
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HumanizeResponse {
    pub humanized_text: String,
    pub original_word_count: usize,
    pub humanized_word_count: usize,
}

impl HumanizeResponse {
    /// Build the reply from the submitted text and what the upstream wrote back.
    pub fn shape(original: &str, rewritten: &str) -> Self {
        let humanized_text = rewritten.trim().to_string();
        Self {
            original_word_count: word_count(original.trim()),
            humanized_word_count: word_count(&humanized_text),
            humanized_text,
        }
    }
}

// Chat completion API request format
#[derive(Serialize, Debug)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage<'a>; 2],
    pub max_tokens: u32,
    pub temperature: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

#[derive(Serialize, Debug)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

// Chat completion API response format, only what we read
#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Deserialize, Debug)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    // First completion's content, empty when the upstream sent none
    pub fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default()
    }
}

// Error envelope returned by the completion API on failure
#[derive(Deserialize, Debug, Default)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}
