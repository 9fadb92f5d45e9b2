use std::sync::{atomic::{AtomicBool, Ordering}, Arc};

use async_trait::async_trait;
use tracing::{info, warn, error};

use crate::{
    catalog,
    error::GenerationError,
    models::{GeneratedPrompt, GenerationRequest, PromptParameters},
};

/// Output budget for a single generation, in tokens.
pub const MAX_OUTPUT_TOKENS: u32 = 300;

/// Remote text generation. One request in, one complete text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, request: GenerationRequest) -> anyhow::Result<String>;
}

/// Builds the instruction sent to the model. The field order (tone, category,
/// topic, then style, length, complexity) is part of the contract.
pub fn build_instruction(category: &str, topic: &str, parameters: &PromptParameters) -> String {
    format!(
        "Generate a {tone} {category} prompt about \"{topic}\" with the following specifications:\n\
         - Style: {style}\n\
         - Length: {length}\n\
         - Complexity: {complexity}\n\
         \n\
         Make it creative, engaging, and specific. The prompt should be ready to use with AI models.",
        tone = parameters.tone.to_lowercase(),
        category = catalog::category_label(category),
        style = parameters.style,
        length = parameters.length,
        complexity = parameters.complexity,
    )
}

/// Turns the live configuration into a `GeneratedPrompt`, one call at a time.
pub struct PromptGenerator {
    client: Arc<dyn TextGenerator>,
    model: String,
    in_flight: AtomicBool,
}

// Clears the in-flight flag however the call ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl PromptGenerator {
    pub fn new(client: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self { client, model: model.into(), in_flight: AtomicBool::new(false) }
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Fails fast with `EmptyTopic` on a blank topic and with `InFlight` while
    /// another call is outstanding; neither reaches the client. The returned
    /// entry is not stored anywhere yet.
    pub async fn generate(
        &self,
        category: &str,
        topic: &str,
        parameters: &PromptParameters,
    ) -> Result<GeneratedPrompt, GenerationError> {
        if topic.trim().is_empty() {
            warn!("Refusing generation: empty topic");
            return Err(GenerationError::EmptyTopic);
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            warn!("Refusing generation: another request is in flight");
            return Err(GenerationError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let request = GenerationRequest {
            instruction: build_instruction(category, topic, parameters),
            model: self.model.clone(),
            max_output_tokens: MAX_OUTPUT_TOKENS,
        };
        info!("🎯 Generating {} prompt (topic: {} chars) with {}", category, topic.len(), self.model);

        match self.client.generate_text(request).await {
            Ok(text) => {
                info!("✅ Prompt generated ({} chars)", text.len());
                Ok(GeneratedPrompt::new(text, category, topic, parameters.clone()))
            }
            Err(e) => {
                error!("❌ Prompt generation failed: {:#}", e);
                Err(GenerationError::GenerationFailed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    /// Scriptable stand-in for the remote model.
    #[derive(Default)]
    pub struct StubGenerator {
        pub reply: Mutex<Option<String>>,
        pub calls: AtomicUsize,
        pub last_request: Mutex<Option<GenerationRequest>>,
        pub hold: Option<(Arc<Notify>, Arc<Notify>)>,
    }

    impl StubGenerator {
        pub fn replying(text: &str) -> Self {
            Self { reply: Mutex::new(Some(text.to_string())), ..Default::default() }
        }

        pub fn failing() -> Self {
            Self::default()
        }

        /// Replies only once `release` is notified; notifies `started` on entry.
        pub fn held(text: &str, started: Arc<Notify>, release: Arc<Notify>) -> Self {
            Self { hold: Some((started, release)), ..Self::replying(text) }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate_text(&self, request: GenerationRequest) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock() = Some(request);
            if let Some((started, release)) = &self.hold {
                started.notify_one();
                release.notified().await;
            }
            self.reply.lock().clone().ok_or_else(|| anyhow::anyhow!("upstream unavailable"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StubGenerator;
    use super::*;
    use crate::models::ParameterKey;
    use pretty_assertions::assert_eq;
    use tokio::sync::Notify;

    fn normalize(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn instruction_for_mysterious_forest() {
        let text = build_instruction("creative-writing", "A mysterious forest", &PromptParameters::default());
        assert_eq!(
            normalize(&text),
            "Generate a professional creative writing prompt about \"A mysterious forest\" with the following specifications: - Style: Descriptive - Length: Medium - Complexity: Intermediate Make it creative, engaging, and specific. The prompt should be ready to use with AI models."
        );
    }

    #[test]
    fn instruction_keeps_topic_verbatim() {
        let mut params = PromptParameters::default();
        params.set(ParameterKey::Tone, "Very Serious");
        let text = build_instruction("image-generation", "  Neon CITY \"at\" night ", &params);
        assert!(text.starts_with("Generate a very serious image generation prompt about \"  Neon CITY \"at\" night \""));
    }

    #[tokio::test]
    async fn blank_topics_never_reach_the_client() {
        let stub = Arc::new(StubGenerator::replying("unused"));
        let gen = PromptGenerator::new(stub.clone(), "test-model");
        for topic in ["", " ", "\t\n  "] {
            let err = gen.generate("code", topic, &PromptParameters::default()).await.unwrap_err();
            assert_eq!(err, GenerationError::EmptyTopic);
        }
        assert_eq!(stub.call_count(), 0);
        assert!(!gen.is_generating());
    }

    #[tokio::test]
    async fn success_builds_a_fresh_entry() {
        let stub = Arc::new(StubGenerator::replying("Once upon a time..."));
        let gen = PromptGenerator::new(stub.clone(), "test-model");
        let entry = gen
            .generate("creative-writing", "A mysterious forest", &PromptParameters::default())
            .await
            .unwrap();

        assert_eq!(entry.content, "Once upon a time...");
        assert_eq!(entry.category, "creative-writing");
        assert_eq!(entry.topic, "A mysterious forest");
        assert_eq!(entry.parameters, PromptParameters::default());
        assert!(!entry.is_favorite);

        let request = stub.last_request.lock().clone().unwrap();
        assert_eq!(request.max_output_tokens, 300);
        assert_eq!(request.model, "test-model");
        assert!(request.instruction.contains("\"A mysterious forest\""));
    }

    #[tokio::test]
    async fn client_failure_maps_to_generation_failed() {
        let gen = PromptGenerator::new(Arc::new(StubGenerator::failing()), "test-model");
        let err = gen.generate("code", "a linter", &PromptParameters::default()).await.unwrap_err();
        assert!(matches!(err, GenerationError::GenerationFailed(_)));
        assert!(!gen.is_generating());
    }

    #[tokio::test]
    async fn second_trigger_while_in_flight_is_refused() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let stub = Arc::new(StubGenerator::held("first", started.clone(), release.clone()));
        let gen = Arc::new(PromptGenerator::new(stub.clone(), "test-model"));

        let first = {
            let gen = gen.clone();
            tokio::spawn(async move { gen.generate("code", "a parser", &PromptParameters::default()).await })
        };
        started.notified().await;
        assert!(gen.is_generating());

        let second = gen.generate("code", "a parser", &PromptParameters::default()).await;
        assert_eq!(second.unwrap_err(), GenerationError::InFlight);

        release.notify_one();
        let entry = first.await.unwrap().unwrap();
        assert_eq!(entry.content, "first");
        assert_eq!(stub.call_count(), 1);
        assert!(!gen.is_generating());
    }
}
