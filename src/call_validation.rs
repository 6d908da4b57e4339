use serde::{Deserialize, Serialize};


#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: String) -> Self {
        ChatMessage { role, content }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SamplingParameters {
    pub temperature: f64,
    pub max_tokens: usize,
}

impl Default for SamplingParameters {
    fn default() -> Self {
        SamplingParameters {
            temperature: 0.3,
            max_tokens: 4096,
        }
    }
}
