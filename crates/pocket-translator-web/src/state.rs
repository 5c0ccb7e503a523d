use pocket_translator_core::{
    AppConfig, HttpTransport, JsonSettingsStore, ReqwestTransport, SettingsStore,
    TranslationCoordinator,
};
use std::sync::Arc;
use std::time::Duration;

/// Global application state
pub struct AppState {
    pub coordinator: TranslationCoordinator,
    /// Same store the coordinator reads on every call
    pub store: Arc<dyn SettingsStore>,
}

impl AppState {
    /// State over the settings document named by `config`, using the network
    pub fn new(config: &AppConfig) -> Self {
        let store = Arc::new(JsonSettingsStore::new(config.settings_path()));
        let transport = Arc::new(ReqwestTransport::new(Duration::from_secs(
            config.http.timeout_secs,
        )));
        Self::with_parts(store, transport, config)
    }

    pub fn with_parts(
        store: Arc<dyn SettingsStore>,
        transport: Arc<dyn HttpTransport>,
        config: &AppConfig,
    ) -> Self {
        let coordinator = TranslationCoordinator::new(Arc::clone(&store), transport, config);
        Self { coordinator, store }
    }
}
