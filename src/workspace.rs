//! Page-scoped application state and the operations that mutate it.
//!
//! `Page` is the one owner of session, parameters and history. Handlers never
//! touch the pieces directly; they go through the methods here, and the async
//! generation path goes through [`generate`], which is the only place a lock
//! is dropped and re-taken around an await.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn, error};

use crate::{
    catalog,
    error::{AppError, GenerationError},
    generator::PromptGenerator,
    history::HistoryStore,
    models::{GeneratedPrompt, ParameterKey, PromptParameters, PromptTemplate},
    parameters::ParameterState,
    session::{SessionGate, SessionSnapshot, SessionView},
};

#[derive(Debug, Default, Clone)]
pub struct Workspace {
    pub params: ParameterState,
    pub history: HistoryStore,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceView {
    pub category: String,
    pub topic: String,
    pub parameters: PromptParameters,
    pub current: Option<GeneratedPrompt>,
    pub history: Vec<GeneratedPrompt>,
    pub favorite_count: usize,
    pub is_generating: bool,
}

impl Workspace {
    pub fn set_topic(&mut self, topic: &str) {
        self.params.set_topic(topic);
    }

    pub fn set_category(&mut self, category: &str) -> Result<(), AppError> {
        self.params.set_category(category).map_err(|e| {
            warn!("Rejected category change: {}", e);
            AppError::from(e)
        })
    }

    pub fn set_parameter(&mut self, key: ParameterKey, value: &str) -> Result<(), AppError> {
        self.params.set_parameter(key, value).map_err(|e| {
            warn!("Rejected parameter change: {}", e);
            AppError::from(e)
        })
    }

    pub fn select_template(&mut self, id: &str) -> Result<&'static PromptTemplate, AppError> {
        let template = catalog::template(id).ok_or_else(|| AppError::NotFound(format!("template {id}")))?;
        self.params.select_template(template);
        info!("📋 Template selected: {} -> {}", template.name, template.category);
        Ok(template)
    }

    /// Reselect: display the entry and restore the configuration behind it.
    pub fn select(&mut self, id: &str) -> Result<GeneratedPrompt, AppError> {
        let entry = self.history.select(id).cloned().ok_or_else(|| not_found(id))?;
        self.params.restore(&entry);
        Ok(entry)
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, AppError> {
        let favorite = self.history.toggle_favorite(id).ok_or_else(|| not_found(id))?;
        info!("⭐ Prompt {} favorite={}", id, favorite);
        Ok(favorite)
    }

    pub fn remove(&mut self, id: &str) -> Result<GeneratedPrompt, AppError> {
        let removed = self.history.remove(id).ok_or_else(|| not_found(id))?;
        info!("🗑️ Prompt {} removed ({} left)", id, self.history.len());
        Ok(removed)
    }

    pub fn content_of(&self, id: &str) -> Result<String, AppError> {
        self.history.get(id).map(|e| e.content.clone()).ok_or_else(|| not_found(id))
    }

    pub fn view(&self, is_generating: bool) -> WorkspaceView {
        WorkspaceView {
            category: self.params.category().to_string(),
            topic: self.params.topic().to_string(),
            parameters: self.params.parameters().clone(),
            current: self.history.current().cloned(),
            history: self.history.entries().to_vec(),
            favorite_count: self.history.favorites().count(),
            is_generating,
        }
    }
}

fn not_found(id: &str) -> AppError {
    warn!("Unknown prompt id: {}", id);
    AppError::NotFound(format!("prompt {id}"))
}

/// Session gate plus the workspace it guards. The workspace comes into being
/// on the first signed-in resolution and outlives a logout.
#[derive(Debug, Default)]
pub struct Page {
    gate: SessionGate,
    workspace: Option<Workspace>,
}

impl Page {
    pub fn new() -> Self { Self::default() }

    pub fn apply_session(&mut self, snapshot: &SessionSnapshot) {
        let before = self.gate.view();
        self.gate.apply(snapshot);
        let after = self.gate.view();
        if before != after {
            info!("🔐 Session: {:?} -> {:?}", before, after);
        }
        if self.gate.user().is_some() && self.workspace.is_none() {
            self.workspace = Some(Workspace::default());
        }
    }

    pub fn session(&self) -> SessionView {
        self.gate.view()
    }

    fn check_gate(&self) -> Result<(), AppError> {
        match self.gate {
            SessionGate::Loading => Err(AppError::SessionLoading),
            SessionGate::Resolved(None) => Err(AppError::SignedOut),
            SessionGate::Resolved(Some(_)) => Ok(()),
        }
    }

    pub fn workspace(&self) -> Result<&Workspace, AppError> {
        self.check_gate()?;
        self.workspace.as_ref().ok_or(AppError::SignedOut)
    }

    pub fn workspace_mut(&mut self) -> Result<&mut Workspace, AppError> {
        self.check_gate()?;
        self.workspace.as_mut().ok_or(AppError::SignedOut)
    }
}

/// Generate from the live configuration, then append and display the result.
///
/// Regeneration is the same call: it reads whatever is live now, not the
/// previous entry's snapshot. On any failure the page is left as it was.
///
/// The work runs on its own task, so dropping the returned future (a client
/// hanging up) does not drop a result the remote model already produced.
pub async fn generate(page: Arc<RwLock<Page>>, generator: Arc<PromptGenerator>) -> Result<GeneratedPrompt, AppError> {
    let task = tokio::spawn(async move { generate_and_store(&page, &generator).await });
    task.await.map_err(|e| {
        error!("❌ Generation task did not complete: {}", e);
        AppError::from(GenerationError::GenerationFailed(e.to_string()))
    })?
}

async fn generate_and_store(page: &RwLock<Page>, generator: &PromptGenerator) -> Result<GeneratedPrompt, AppError> {
    let snapshot = {
        let guard = page.read();
        guard.workspace()?.params.snapshot()
    };
    let entry = generator
        .generate(&snapshot.category, &snapshot.topic, &snapshot.parameters)
        .await?;

    let mut guard = page.write();
    // the workspace is never dropped once created, a logout mid-flight keeps it
    let workspace = guard.workspace.get_or_insert_with(Workspace::default);
    let stored = workspace.history.push_and_select(entry).clone();
    info!("📚 History now holds {} prompts", workspace.history.len());
    Ok(stored)
}

/// Applies every session notification to the page until the provider goes away.
pub async fn follow_session(page: Arc<RwLock<Page>>, mut rx: watch::Receiver<SessionSnapshot>) {
    loop {
        let snapshot = rx.borrow_and_update().clone();
        page.write().apply_session(&snapshot);
        if rx.changed().await.is_err() {
            break;
        }
    }
}
