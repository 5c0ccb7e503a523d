//! Provider selection and credentials, plus the stores that persist them.
//!
//! The settings document is the only durable state of the application. It is
//! small JSON with flat camelCase keys:
//!
//! ```json
//! {
//!   "provider": "youdao",
//!   "youdaoAppKey": "...",
//!   "youdaoAppSecret": "...",
//!   "baiduAppId": "",
//!   "baiduKey": ""
//! }
//! ```
//!
//! Loading never fails: a missing, unreadable or corrupt document yields the
//! defaults (Google, no credentials).

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, warn};

use crate::config::ProviderKind;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YoudaoCredentials {
    #[serde(rename = "youdaoAppKey")]
    pub app_key: String,
    #[serde(rename = "youdaoAppSecret")]
    pub app_secret: String,
}

impl YoudaoCredentials {
    pub fn new(app_key: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: app_secret.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.app_key.trim().is_empty() && !self.app_secret.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaiduCredentials {
    #[serde(rename = "baiduAppId")]
    pub app_id: String,
    #[serde(rename = "baiduKey")]
    pub key: String,
}

impl BaiduCredentials {
    pub fn new(app_id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            key: key.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.app_id.trim().is_empty() && !self.key.trim().is_empty()
    }
}

/// Selected provider and the secrets of every provider.
///
/// Credentials of providers that are not selected may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    #[serde(deserialize_with = "lenient_provider")]
    pub provider: ProviderKind,
    #[serde(flatten)]
    pub youdao: YoudaoCredentials,
    #[serde(flatten)]
    pub baidu: BaiduCredentials,
}

/// Unknown provider names select the default instead of rejecting the whole document.
fn lenient_provider<'de, D>(deserializer: D) -> std::result::Result<ProviderKind, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|name| name.parse().ok())
        .unwrap_or_default())
}

impl ProviderConfig {
    pub fn with_provider(provider: ProviderKind) -> Self {
        Self {
            provider,
            ..Self::default()
        }
    }

    /// Whether the selected provider can be called without failing on credentials
    pub fn is_ready(&self) -> bool {
        match self.provider {
            ProviderKind::Google => true,
            ProviderKind::Youdao => self.youdao.is_complete(),
            ProviderKind::Baidu => self.baidu.is_complete(),
        }
    }

    /// Copy with secrets masked, safe to print or send to a UI
    pub fn redacted(&self) -> Self {
        Self {
            provider: self.provider,
            youdao: YoudaoCredentials {
                app_key: self.youdao.app_key.clone(),
                app_secret: mask(&self.youdao.app_secret),
            },
            baidu: BaiduCredentials {
                app_id: self.baidu.app_id.clone(),
                key: mask(&self.baidu.key),
            },
        }
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        let visible: String = secret.chars().take(2).collect();
        format!("{visible}****")
    }
}

/// Synchronous key-value persistence for [`ProviderConfig`].
pub trait SettingsStore: Send + Sync {
    /// Current settings; defaults when nothing usable is stored
    fn load(&self) -> ProviderConfig;

    fn save(&self, config: &ProviderConfig) -> Result<()>;
}

/// Settings kept in a JSON document on disk
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the per-user application data directory
    pub fn default_location() -> Self {
        Self::new(crate::util::default_settings_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<ProviderConfig> {
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            Error::ConfigLoad(format!("Failed to parse {}: {e}", self.path.display()))
        })
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> ProviderConfig {
        if !self.path.exists() {
            debug!("No settings at {}, using defaults", self.path.display());
            return ProviderConfig::default();
        }

        match self.read() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load settings, using defaults: {}", e);
                ProviderConfig::default()
            }
        }
    }

    fn save(&self, config: &ProviderConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::ConfigSave(format!(
                    "Failed to create settings directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content =
            serde_json::to_string_pretty(config).map_err(|e| Error::ConfigSave(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| {
            Error::ConfigSave(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        info!(
            "Saved settings to {} (provider: {})",
            self.path.display(),
            config.provider
        );
        Ok(())
    }
}

/// In-process settings, for embedding and one-off overrides
#[derive(Default)]
pub struct MemorySettingsStore {
    inner: RwLock<ProviderConfig>,
}

impl MemorySettingsStore {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            inner: RwLock::new(config),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> ProviderConfig {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, config: &ProviderConfig) -> Result<()> {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = config.clone();
        Ok(())
    }
}
