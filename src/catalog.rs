use serde::Serialize;

use crate::models::{ParameterKey, PromptTemplate, PromptType};

pub const PROMPT_TYPES: &[PromptType] = &[
    PromptType { id: "creative-writing", name: "Creative Writing", description: "Stories, poems, and creative content", icon: "✍️" },
    PromptType { id: "chatbot", name: "Chatbot", description: "Conversational AI and assistant prompts", icon: "🤖" },
    PromptType { id: "image-generation", name: "Image Generation", description: "Visual art and image creation prompts", icon: "🎨" },
    PromptType { id: "code", name: "Code", description: "Programming and development tasks", icon: "💻" },
    PromptType { id: "business", name: "Business", description: "Marketing, strategy, and professional content", icon: "💼" },
];

pub const TONE_OPTIONS: &[&str] = &[
    "Professional", "Casual", "Friendly", "Formal", "Creative",
    "Humorous", "Serious", "Enthusiastic", "Calm", "Authoritative",
];

pub const STYLE_OPTIONS: &[&str] = &[
    "Descriptive", "Concise", "Detailed", "Simple", "Complex",
    "Technical", "Conversational", "Academic", "Storytelling", "Direct",
];

pub const LENGTH_OPTIONS: &[&str] = &["Short", "Medium", "Long", "Very Long"];

pub const COMPLEXITY_OPTIONS: &[&str] = &["Beginner", "Intermediate", "Advanced", "Expert"];

pub const PROMPT_TEMPLATES: &[PromptTemplate] = &[
    PromptTemplate {
        id: "story-starter",
        name: "Story Starter",
        description: "Creative writing prompt for stories",
        category: "creative-writing",
        template: "Write a compelling story beginning about {topic} with a {tone} tone",
    },
    PromptTemplate {
        id: "chatbot-persona",
        name: "Chatbot Persona",
        description: "Define a chatbot personality",
        category: "chatbot",
        template: "Create a {tone} chatbot that specializes in {topic} and responds in a {style} manner",
    },
    PromptTemplate {
        id: "image-prompt",
        name: "Image Description",
        description: "Detailed image generation prompt",
        category: "image-generation",
        template: "Generate a {style} image of {topic} with {tone} mood and {complexity} level of detail",
    },
    PromptTemplate {
        id: "code-task",
        name: "Coding Task",
        description: "Programming assignment prompt",
        category: "code",
        template: "Write {complexity} level code for {topic} using {style} approach with {tone} documentation",
    },
    PromptTemplate {
        id: "marketing-copy",
        name: "Marketing Copy",
        description: "Business marketing content",
        category: "business",
        template: "Create {tone} marketing copy for {topic} in a {style} format targeting {complexity} audience",
    },
];

pub fn default_category() -> &'static str {
    PROMPT_TYPES[0].id
}

pub fn prompt_type(id: &str) -> Option<&'static PromptType> {
    PROMPT_TYPES.iter().find(|t| t.id == id)
}

pub fn template(id: &str) -> Option<&'static PromptTemplate> {
    PROMPT_TEMPLATES.iter().find(|t| t.id == id)
}

pub fn options(key: ParameterKey) -> &'static [&'static str] {
    match key {
        ParameterKey::Tone => TONE_OPTIONS,
        ParameterKey::Style => STYLE_OPTIONS,
        ParameterKey::Length => LENGTH_OPTIONS,
        ParameterKey::Complexity => COMPLEXITY_OPTIONS,
    }
}

pub fn is_option(key: ParameterKey, value: &str) -> bool {
    options(key).contains(&value)
}

/// "creative-writing" -> "creative writing"
pub fn category_label(id: &str) -> String {
    id.replace('-', " ")
}

/// Everything the selection widgets render, in one payload.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub prompt_types: &'static [PromptType],
    pub tone_options: &'static [&'static str],
    pub style_options: &'static [&'static str],
    pub length_options: &'static [&'static str],
    pub complexity_options: &'static [&'static str],
    pub templates: &'static [PromptTemplate],
}

pub fn view() -> CatalogView {
    CatalogView {
        prompt_types: PROMPT_TYPES,
        tone_options: TONE_OPTIONS,
        style_options: STYLE_OPTIONS,
        length_options: LENGTH_OPTIONS,
        complexity_options: COMPLEXITY_OPTIONS,
        templates: PROMPT_TEMPLATES,
    }
}
