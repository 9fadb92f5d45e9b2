use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use serde::Serialize;
use std::sync::Arc;
use parking_lot::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, error};

use crate::{
    catalog::{self, CatalogView},
    clipboard::Clipboard,
    error::AppError,
    generator::PromptGenerator,
    models::{CategoryRequest, GeneratedPrompt, LoginRequest, Notice, ParameterKey, ParameterRequest, TopicRequest},
    session::{SessionProvider, SessionView},
    workspace::{self, Page, WorkspaceView},
};

#[derive(Clone)]
pub struct AppState {
    pub page: Arc<RwLock<Page>>,
    pub generator: Arc<PromptGenerator>,
    pub session: Arc<dyn SessionProvider>,
    pub clipboard: Arc<dyn Clipboard>,
}

/// A payload plus the toast that goes with it.
#[derive(Debug, Serialize)]
pub struct WithNotice<T> {
    pub data: T,
    pub notice: Notice,
}

type ApiResult<T> = Result<Json<T>, AppError>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/session/login", post(login))
        .route("/api/session/logout", post(logout))
        .route("/api/catalog", get(get_catalog))
        .route("/api/workspace", get(get_workspace))
        .route("/api/workspace/topic", put(set_topic))
        .route("/api/workspace/category", put(set_category))
        .route("/api/workspace/parameters/:key", put(set_parameter))
        .route("/api/workspace/templates/:id", post(select_template))
        .route("/api/workspace/generate", post(generate_prompt))
        .route("/api/workspace/regenerate", post(generate_prompt))
        .route("/api/history/:id", axum::routing::delete(delete_prompt))
        .route("/api/history/:id/select", post(select_prompt))
        .route("/api/history/:id/favorite", post(toggle_favorite))
        .route("/api/history/:id/copy", post(copy_prompt))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

fn workspace_view(state: &AppState) -> Result<WorkspaceView, AppError> {
    let page = state.page.read();
    Ok(page.workspace()?.view(state.generator.is_generating()))
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.page.read().session())
}

pub async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Json<Notice> {
    state.session.login(&body.email);
    Json(Notice::info("Signing in", format!("Signing in as {}", body.email.trim())))
}

pub async fn logout(State(state): State<AppState>) -> Json<Notice> {
    state.session.logout();
    Json(Notice::info("Logged out", "You have been successfully logged out"))
}

pub async fn get_catalog() -> Json<CatalogView> {
    Json(catalog::view())
}

pub async fn get_workspace(State(state): State<AppState>) -> ApiResult<WorkspaceView> {
    workspace_view(&state).map(Json)
}

pub async fn set_topic(State(state): State<AppState>, Json(body): Json<TopicRequest>) -> ApiResult<WorkspaceView> {
    state.page.write().workspace_mut()?.set_topic(&body.topic);
    workspace_view(&state).map(Json)
}

pub async fn set_category(State(state): State<AppState>, Json(body): Json<CategoryRequest>) -> ApiResult<WorkspaceView> {
    state.page.write().workspace_mut()?.set_category(&body.category)?;
    workspace_view(&state).map(Json)
}

pub async fn set_parameter(
    Path(key): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<ParameterRequest>,
) -> ApiResult<WorkspaceView> {
    let key: ParameterKey = key.parse().map_err(|k| AppError::from(crate::error::ParameterError::UnknownParameter(k)))?;
    state.page.write().workspace_mut()?.set_parameter(key, &body.value)?;
    workspace_view(&state).map(Json)
}

pub async fn select_template(Path(id): Path<String>, State(state): State<AppState>) -> ApiResult<WithNotice<WorkspaceView>> {
    let template = state.page.write().workspace_mut()?.select_template(&id)?;
    Ok(Json(WithNotice {
        data: workspace_view(&state)?,
        notice: Notice::info("Template selected", format!("Using {} template", template.name)),
    }))
}

/// Serves both generate and regenerate: both read the live configuration.
pub async fn generate_prompt(State(state): State<AppState>) -> ApiResult<WithNotice<GeneratedPrompt>> {
    let prompt = workspace::generate(state.page.clone(), state.generator.clone()).await?;
    Ok(Json(WithNotice {
        data: prompt,
        notice: Notice::info("Prompt generated!", "Your AI prompt is ready to use"),
    }))
}

pub async fn select_prompt(Path(id): Path<String>, State(state): State<AppState>) -> ApiResult<WorkspaceView> {
    state.page.write().workspace_mut()?.select(&id)?;
    workspace_view(&state).map(Json)
}

pub async fn toggle_favorite(Path(id): Path<String>, State(state): State<AppState>) -> ApiResult<WorkspaceView> {
    state.page.write().workspace_mut()?.toggle_favorite(&id)?;
    workspace_view(&state).map(Json)
}

pub async fn delete_prompt(Path(id): Path<String>, State(state): State<AppState>) -> ApiResult<WorkspaceView> {
    state.page.write().workspace_mut()?.remove(&id)?;
    workspace_view(&state).map(Json)
}

pub async fn copy_prompt(Path(id): Path<String>, State(state): State<AppState>) -> ApiResult<Notice> {
    let content = state.page.read().workspace()?.content_of(&id)?;
    state.clipboard.copy(&content).map_err(|e| {
        error!("❌ Copy failed: {}", e);
        AppError::from(e)
    })?;
    info!("📋 Copied prompt {} ({} chars)", id, content.len());
    Ok(Json(Notice::info("Copied!", "Prompt copied to clipboard")))
}
