mod traits;
mod transport;
mod google;
mod youdao;
mod baidu;
pub mod sign;

#[cfg(test)]
pub(crate) mod testing;

pub use traits::{Translator, TranslatorInfo};
pub use transport::{HttpTransport, ReqwestTransport};
pub use google::GoogleTranslator;
pub use youdao::YoudaoTranslator;
pub use baidu::{BaiduTranslator, baidu_lang};

use crate::config::{EndpointConfig, ProviderKind};
use crate::settings::ProviderConfig;
use serde_json::Value;
use std::sync::Arc;

/// Create the adapter for the provider selected in `settings`
pub fn create_translator(
    settings: &ProviderConfig,
    endpoints: &EndpointConfig,
    transport: Arc<dyn HttpTransport>,
) -> Box<dyn Translator> {
    match settings.provider {
        ProviderKind::Google => Box::new(GoogleTranslator::new(endpoints.google.clone(), transport)),
        ProviderKind::Youdao => Box::new(YoudaoTranslator::new(
            endpoints.youdao.clone(),
            settings.youdao.clone(),
            transport,
        )),
        ProviderKind::Baidu => Box::new(BaiduTranslator::new(
            endpoints.baidu.clone(),
            settings.baidu.clone(),
            transport,
        )),
    }
}

/// Static description of a provider, without building an adapter
pub const fn provider_info(kind: ProviderKind) -> TranslatorInfo {
    TranslatorInfo {
        name: kind.display_name(),
        requires_api_key: !matches!(kind, ProviderKind::Google),
        supports_auto_detect: true,
    }
}

/// Error codes arrive as strings, but tolerate bare numbers
fn code_string(code: &Value) -> String {
    match code {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
