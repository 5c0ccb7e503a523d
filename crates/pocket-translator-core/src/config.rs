use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Error;

/// Language codes as understood by the upstream services ("en", "zh-CN", "auto", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lang(pub String);

impl Lang {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn auto() -> Self {
        Self::new(AUTO_LANG)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_auto(&self) -> bool {
        self.0 == AUTO_LANG
    }

    /// Generic code for Simplified Chinese used by the UI and the Google endpoint
    pub fn is_chinese(&self) -> bool {
        self.0 == CHINESE_LANG
    }
}

/// Source language placeholder asking the provider to detect
pub const AUTO_LANG: &str = "auto";
/// Generic Chinese code; providers with their own code rewrite it
pub const CHINESE_LANG: &str = "zh-CN";
/// Non-Chinese side of the detection heuristic
pub const ENGLISH_LANG: &str = "en";

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Lang {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Lang {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The closed set of translation backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Free endpoint, no authentication
    #[default]
    Google,
    /// SHA-256 signed API (app key + app secret)
    Youdao,
    /// MD5 signed API (app id + key)
    Baidu,
}

impl ProviderKind {
    pub const ALL: [Self; 3] = [Self::Google, Self::Youdao, Self::Baidu];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Youdao => "youdao",
            Self::Baidu => "baidu",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Youdao => "Youdao",
            Self::Baidu => "Baidu",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "youdao" => Ok(Self::Youdao),
            "baidu" => Ok(Self::Baidu),
            other => Err(Error::ConfigInvalid {
                field: "provider".to_string(),
                reason: format!("unknown provider '{other}' (expected google, youdao or baidu)"),
            }),
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout; the upstream services set no cap of their own
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    15
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Interactive session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Quiet period before a burst of edits triggers a translation
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

const fn default_debounce_ms() -> u64 {
    1000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Base URLs of the upstream services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_google_endpoint")]
    pub google: String,
    #[serde(default = "default_youdao_endpoint")]
    pub youdao: String,
    #[serde(default = "default_baidu_endpoint")]
    pub baidu: String,
}

fn default_google_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_youdao_endpoint() -> String {
    "https://openapi.youdao.com/api".to_string()
}

fn default_baidu_endpoint() -> String {
    "https://fanyi-api.baidu.com/api/trans/vip/translate".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            google: default_google_endpoint(),
            youdao: default_youdao_endpoint(),
            baidu: default_baidu_endpoint(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// Where provider settings live (defaults to the per-user data directory)
    #[serde(default)]
    pub settings_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::ConfigLoad(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content)
            .map_err(|e| Error::ConfigLoad(format!("Failed to parse config: {e}")))
    }

    /// Load from default locations (<config dir>/pocket-translator/config.toml, ./config.toml)
    pub fn load() -> Self {
        if let Some(user_config) = crate::util::app_config_path()
            && user_config.exists()
        {
            match Self::from_file(&user_config) {
                Ok(config) => {
                    tracing::debug!("Loaded config from {}", user_config.display());
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}", user_config.display(), e);
                }
            }
        }

        let local_config = PathBuf::from("config.toml");
        if local_config.exists() {
            match Self::from_file(&local_config) {
                Ok(config) => {
                    tracing::debug!("Loaded config from ./config.toml");
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load ./config.toml: {}", e);
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Self::default()
    }

    /// Settings document location, honoring the override
    pub fn settings_path(&self) -> PathBuf {
        self.settings_path
            .clone()
            .unwrap_or_else(crate::util::default_settings_path)
    }
}
