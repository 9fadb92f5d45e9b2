use serde::Serialize;

use crate::{
    catalog,
    error::ParameterError,
    models::{GeneratedPrompt, ParameterKey, PromptParameters, PromptTemplate},
};

/// The live, editable configuration: category, topic and the four knobs.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ParameterState {
    category: String,
    topic: String,
    parameters: PromptParameters,
}

/// Owned copy of the live configuration taken at trigger time.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSnapshot {
    pub category: String,
    pub topic: String,
    pub parameters: PromptParameters,
}

impl Default for ParameterState {
    fn default() -> Self {
        Self {
            category: catalog::default_category().to_string(),
            topic: String::new(),
            parameters: PromptParameters::default(),
        }
    }
}

impl ParameterState {
    pub fn category(&self) -> &str { &self.category }
    pub fn topic(&self) -> &str { &self.topic }
    pub fn parameters(&self) -> &PromptParameters { &self.parameters }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn set_category(&mut self, category: &str) -> Result<(), ParameterError> {
        if catalog::prompt_type(category).is_none() {
            return Err(ParameterError::UnknownCategory(category.to_string()));
        }
        self.category = category.to_string();
        Ok(())
    }

    /// Replaces exactly one field. Values outside the catalog's option set are
    /// rejected and leave the state untouched.
    pub fn set_parameter(&mut self, key: ParameterKey, value: &str) -> Result<(), ParameterError> {
        if !catalog::is_option(key, value) {
            return Err(ParameterError::UnknownOption { key, value: value.to_string() });
        }
        self.parameters.set(key, value);
        Ok(())
    }

    /// Switches category, clears the topic and resets the knobs to defaults.
    /// The template's pattern text is not adopted.
    pub fn select_template(&mut self, template: &PromptTemplate) {
        self.category = template.category.to_string();
        self.topic.clear();
        self.parameters = PromptParameters::default();
    }

    /// Reselecting a history entry restores the configuration that produced it.
    pub fn restore(&mut self, entry: &GeneratedPrompt) {
        self.category = entry.category.clone();
        self.topic = entry.topic.clone();
        self.parameters = entry.parameters.clone();
    }

    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot {
            category: self.category.clone(),
            topic: self.topic.clone(),
            parameters: self.parameters.clone(),
        }
    }
}
