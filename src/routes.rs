use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::{
    client::RecipeBackend,
    error::{AppError, InputError},
    render::render_page,
    session::{RecipeSession, SessionStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: SessionStore,
    pub backend: Arc<dyn RecipeBackend>,
}

#[derive(Debug, Deserialize)]
pub struct IngredientUpdate {
    pub value: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct PreferencesUpdate {
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/sessions/:id/ingredients", post(add_ingredient_slot))
        .route("/api/sessions/:id/ingredients/:index", put(set_ingredient))
        .route("/api/sessions/:id/preferences", put(set_preferences))
        .route("/api/sessions/:id/generate", post(generate_recipes))
        .route("/sessions/:id", get(session_page))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

pub async fn create_session(State(state): State<AppState>) -> Json<RecipeSession> {
    Json(state.store.create())
}

pub async fn get_session(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<RecipeSession>, AppError> {
    state.store.get(id).map(Json)
}

/// Called when the page is left or reloaded; the next visit starts fresh.
pub async fn delete_session(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.store.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn session_page(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let session = state.store.get(id)?;
    Ok(Html(render_page(&session)))
}

pub async fn add_ingredient_slot(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<RecipeSession>, AppError> {
    state
        .store
        .update(id, |session| {
            session.add_ingredient_slot();
            Ok::<_, InputError>(())
        })
        .map(Json)
}

pub async fn set_ingredient(
    Path((id, index)): Path<(Uuid, usize)>,
    State(state): State<AppState>,
    Json(body): Json<IngredientUpdate>,
) -> Result<Json<RecipeSession>, AppError> {
    state
        .store
        .update(id, |session| session.set_ingredient_at(index, body.value))
        .map(Json)
}

pub async fn set_preferences(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<PreferencesUpdate>,
) -> Result<Json<RecipeSession>, AppError> {
    state
        .store
        .update(id, |session| {
            if let Some(course) = body.course {
                session.set_course(course);
            }
            if let Some(diet) = body.diet {
                session.set_diet(diet);
            }
            Ok::<_, InputError>(())
        })
        .map(Json)
}

pub async fn generate_recipes(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<RecipeSession>, AppError> {
    tracing::info!("🚀 Generating recipes for session {}", id);
    let session = state.store.generate(id, state.backend.as_ref()).await?;
    tracing::info!(
        "✅ Session {} now shows {} recipes (nutrition {})",
        id,
        session.recipes.len(),
        if session.nutrition.is_some() { "ready" } else { "pending" }
    );
    Ok(Json(session))
}
