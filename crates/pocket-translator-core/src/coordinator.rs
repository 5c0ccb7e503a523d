//! Single entry point for translations.
//!
//! The coordinator re-reads the provider settings on every call, builds the
//! matching adapter and turns every outcome into a [`TranslationResult`]
//! value. Nothing past this boundary sees an `Err`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{AppConfig, EndpointConfig, Lang, ProviderKind};
use crate::error::{Error, ErrorKind, Result};
use crate::settings::SettingsStore;
use crate::translator::{HttpTransport, ReqwestTransport, create_translator};

/// Validated input of one translation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source: Lang,
    pub target: Lang,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source: impl Into<Lang>, target: impl Into<Lang>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::EmptyText);
        }

        Ok(Self {
            text,
            source: source.into(),
            target: target.into(),
        })
    }
}

/// Outcome of a translation, as a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationResult {
    Success { translated_text: String },
    Failure { kind: ErrorKind, message: String },
}

impl TranslationResult {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Flatten to the caller-facing shape
    pub fn into_response(self) -> TranslateResponse {
        match self {
            Self::Success { translated_text } => TranslateResponse {
                success: true,
                text: Some(translated_text),
                error: None,
            },
            Self::Failure { message, .. } => TranslateResponse {
                success: false,
                text: None,
                error: Some(message),
            },
        }
    }
}

impl From<Result<String>> for TranslationResult {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(translated_text) => Self::Success { translated_text },
            Err(e) => Self::Failure {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

/// `{ success, text?, error? }`, the only shape callers observe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslateResponse {
    /// What the result area shows: the translation, or `error: <message>`
    pub fn render(&self) -> String {
        if self.success {
            self.text.clone().unwrap_or_default()
        } else {
            format!("error: {}", self.error.as_deref().unwrap_or("unknown error"))
        }
    }
}

/// Anything that can service translation calls for a session
#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn translate(&self, text: &str, source: &Lang, target: &Lang) -> TranslationResult;
}

pub struct TranslationCoordinator {
    store: Arc<dyn SettingsStore>,
    transport: Arc<dyn HttpTransport>,
    endpoints: EndpointConfig,
}

impl TranslationCoordinator {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        transport: Arc<dyn HttpTransport>,
        config: &AppConfig,
    ) -> Self {
        Self {
            store,
            transport,
            endpoints: config.endpoints.clone(),
        }
    }

    /// Coordinator over the real network, with the configured request timeout
    pub fn with_defaults(store: Arc<dyn SettingsStore>, config: &AppConfig) -> Self {
        let transport = Arc::new(ReqwestTransport::new(Duration::from_secs(
            config.http.timeout_secs,
        )));
        Self::new(store, transport, config)
    }

    /// Currently selected provider
    pub fn provider(&self) -> ProviderKind {
        self.store.load().provider
    }

    /// Translate `text`; failures come back as [`TranslationResult::Failure`]
    pub async fn translate(&self, text: &str, source: &Lang, target: &Lang) -> TranslationResult {
        let result = self.try_translate(text, source, target).await;
        if let Err(ref e) = result {
            warn!("Translation failed: {}", e);
        }
        result.into()
    }

    async fn try_translate(&self, text: &str, source: &Lang, target: &Lang) -> Result<String> {
        let request = TranslationRequest::new(text, source.clone(), target.clone())?;
        let settings = self.store.load();

        let translator = create_translator(&settings, &self.endpoints, Arc::clone(&self.transport));
        info!(
            "Translating {} chars with {} ({} -> {})",
            request.text.chars().count(),
            translator.name(),
            request.source,
            request.target
        );

        translator
            .translate(&request.text, &request.source, &request.target)
            .await
    }
}

#[async_trait]
impl TranslationService for TranslationCoordinator {
    async fn translate(&self, text: &str, source: &Lang, target: &Lang) -> TranslationResult {
        Self::translate(self, text, source, target).await
    }
}
