//! Pocket Translator Core Library
//!
//! Everything behind the translation window:
//! - Provider adapters for Google, Youdao and Baidu
//! - Persisted provider settings
//! - A coordinator that turns every outcome into a value
//! - Session orchestration (debounce, latest-wins)

pub mod config;
pub mod coordinator;
pub mod error;
pub mod language;
pub mod session;
pub mod settings;
pub mod translator;
pub mod util;

pub use config::{AppConfig, Lang, ProviderKind, AUTO_LANG, CHINESE_LANG, ENGLISH_LANG};
pub use coordinator::{
    TranslateResponse, TranslationCoordinator, TranslationRequest, TranslationResult,
    TranslationService,
};
pub use error::{Error, ErrorKind, Result};
pub use language::{contains_chinese, detect_direction};
pub use session::{Debouncer, SessionEvent, TranslationSession};
pub use settings::{
    BaiduCredentials, JsonSettingsStore, MemorySettingsStore, ProviderConfig, SettingsStore,
    YoudaoCredentials,
};
pub use translator::{HttpTransport, ReqwestTransport, Translator, TranslatorInfo, create_translator};
