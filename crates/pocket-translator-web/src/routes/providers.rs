use axum::Json;
use axum::extract::State;
use pocket_translator_core::{ProviderConfig, ProviderKind};
use pocket_translator_core::translator::{TranslatorInfo, provider_info};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Serialize)]
pub struct ProviderEntry {
    pub id: ProviderKind,
    #[serde(flatten)]
    pub info: TranslatorInfo,
    pub selected: bool,
    /// Credentials present (always true for providers without keys)
    pub ready: bool,
}

/// Every provider with its requirements and whether it is usable right now.
pub async fn list_providers(State(state): State<Arc<AppState>>) -> Json<Vec<ProviderEntry>> {
    let settings = state.store.load();

    let entries = ProviderKind::ALL
        .into_iter()
        .map(|kind| ProviderEntry {
            id: kind,
            info: provider_info(kind),
            selected: settings.provider == kind,
            ready: ProviderConfig {
                provider: kind,
                ..settings.clone()
            }
            .is_ready(),
        })
        .collect();

    Json(entries)
}
