//! Settings routes - provider selection and credentials.

use axum::Json;
use axum::extract::State;
use pocket_translator_core::{ProviderConfig, ProviderKind};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::helpers::{ResultExt, RouteResult};
use crate::state::AppState;

/// Partial update; absent fields keep their stored value.
///
/// Secrets come back masked from `GET`, so a client echoing the whole
/// document would otherwise overwrite them with the mask.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub provider: Option<String>,
    pub youdao_app_key: Option<String>,
    pub youdao_app_secret: Option<String>,
    pub baidu_app_id: Option<String>,
    pub baidu_key: Option<String>,
}

/// Current settings with secrets masked.
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<ProviderConfig> {
    Json(state.store.load().redacted())
}

/// Apply an update and persist it. The next translation uses it.
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SettingsUpdate>,
) -> RouteResult<Json<ProviderConfig>> {
    let mut settings = state.store.load();

    if let Some(name) = update.provider {
        settings.provider = name.parse::<ProviderKind>().or_bad_request()?;
    }
    if let Some(value) = update.youdao_app_key {
        settings.youdao.app_key = value;
    }
    if let Some(value) = update.youdao_app_secret {
        settings.youdao.app_secret = value;
    }
    if let Some(value) = update.baidu_app_id {
        settings.baidu.app_id = value;
    }
    if let Some(value) = update.baidu_key {
        settings.baidu.key = value;
    }

    state.store.save(&settings).or_internal_error()?;
    info!("Settings updated, provider is now {}", settings.provider);

    Ok(Json(settings.redacted()))
}
