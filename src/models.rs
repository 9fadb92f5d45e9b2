use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const DEFAULT_TONE: &str = "Professional";
pub const DEFAULT_STYLE: &str = "Descriptive";
pub const DEFAULT_LENGTH: &str = "Medium";
pub const DEFAULT_COMPLEXITY: &str = "Intermediate";

/// The four generation knobs the user can turn.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKey {
    Tone,
    Style,
    Length,
    Complexity,
}

impl ParameterKey {
    pub const ALL: [ParameterKey; 4] = [Self::Tone, Self::Style, Self::Length, Self::Complexity];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tone => "tone",
            Self::Style => "style",
            Self::Length => "length",
            Self::Complexity => "complexity",
        }
    }
}

impl std::fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ParameterKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PromptParameters {
    pub tone: String,
    pub style: String,
    pub length: String,
    pub complexity: String,
}

impl Default for PromptParameters {
    fn default() -> Self {
        Self {
            tone: DEFAULT_TONE.to_string(),
            style: DEFAULT_STYLE.to_string(),
            length: DEFAULT_LENGTH.to_string(),
            complexity: DEFAULT_COMPLEXITY.to_string(),
        }
    }
}

impl PromptParameters {
    pub fn get(&self, key: ParameterKey) -> &str {
        match key {
            ParameterKey::Tone => &self.tone,
            ParameterKey::Style => &self.style,
            ParameterKey::Length => &self.length,
            ParameterKey::Complexity => &self.complexity,
        }
    }

    pub fn set(&mut self, key: ParameterKey, value: impl Into<String>) {
        let slot = match key {
            ParameterKey::Tone => &mut self.tone,
            ParameterKey::Style => &mut self.style,
            ParameterKey::Length => &mut self.length,
            ParameterKey::Complexity => &mut self.complexity,
        };
        *slot = value.into();
    }
}

/// One completed generation. Only `is_favorite` changes after creation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPrompt {
    pub id: String,
    pub content: String,
    #[serde(alias = "type")]
    pub category: String,
    pub parameters: PromptParameters,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl GeneratedPrompt {
    /// `parameters` is taken by value: the caller hands over its own copy, so
    /// later edits to the live state never reach this entry.
    pub fn new(content: String, category: &str, topic: &str, parameters: PromptParameters) -> Self {
        let created_at = Utc::now();
        Self {
            id: new_prompt_id(created_at),
            content,
            category: category.to_string(),
            parameters,
            topic: topic.to_string(),
            created_at,
            is_favorite: false,
        }
    }
}

// timestamp seed plus a random suffix, two entries in the same millisecond stay distinct
fn new_prompt_id(at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("prompt_{}_{}", at.timestamp_millis(), &suffix[..8])
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PromptType {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub category: &'static str,
    pub template: &'static str, // stored only, never expanded
}

/// Input handed to the text-generation collaborator.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub instruction: String,
    pub model: String,
    pub max_output_tokens: u32,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// User-facing toast.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), variant: NoticeVariant::Default }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), variant: NoticeVariant::Destructive }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TopicRequest {
    pub topic: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CategoryRequest {
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ParameterRequest {
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub email: String,
}
