use axum::{body::Bytes, extract::State, Json};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::{
    api::types::{GenerateRequest, GenerationResult, HealthResponse},
    error::RelayError,
    state::AppState,
};

pub const HEALTH_MESSAGE: &str = "XIVIX 후킹메세지 생성기가 실행 중입니다.";

/// `POST /api/generate`
///
/// The body is decoded by hand rather than through the `Json` extractor so a
/// missing `Content-Type` is accepted and every rejection keeps the
/// `{"error": ...}` shape.
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerationResult>, RelayError> {
    let request_id = Uuid::new_v4().to_string();
    relay(&state, &body)
        .instrument(info_span!("generate", %request_id))
        .await
        .map(Json)
}

async fn relay(state: &AppState, body: &[u8]) -> Result<GenerationResult, RelayError> {
    let api_key = state.config.api_key().ok_or(RelayError::MissingCredential)?;

    let req: GenerateRequest =
        serde_json::from_slice(body).map_err(|e| RelayError::InvalidBody(e.to_string()))?;

    if req.prompt.trim().is_empty() {
        return Err(RelayError::EmptyPrompt);
    }

    let result = state.gemini.suggest(api_key, &req.prompt).await?;
    info!(suggestions = result.suggestions.len(), "generation succeeded");
    Ok(result)
}

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: HEALTH_MESSAGE,
    })
}
