//! Translation route.

use axum::Json;
use axum::extract::State;
use pocket_translator_core::{Lang, TranslateResponse, detect_direction};
use serde::Deserialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct TranslateBody {
    pub text: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

/// Translate one text. Always 200; failures are reported in the body.
///
/// Missing languages fall back to the Chinese/English guess.
pub async fn translate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TranslateBody>,
) -> Json<TranslateResponse> {
    let (guessed_source, guessed_target) = detect_direction(&body.text);
    let source = body.source.map_or(guessed_source, Lang::from);
    let target = body.target.map_or(guessed_target, Lang::from);

    let result = state
        .coordinator
        .translate(body.text.trim(), &source, &target)
        .await;

    Json(result.into_response())
}
