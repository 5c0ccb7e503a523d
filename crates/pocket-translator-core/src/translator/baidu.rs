use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::sign::{Salt, baidu_sign};
use super::traits::{Translator, TranslatorInfo};
use super::transport::HttpTransport;
use super::code_string;
use crate::config::Lang;
use crate::error::{Error, Result};
use crate::settings::BaiduCredentials;

const PROVIDER: &str = "Baidu";
/// Baidu's own code for Simplified Chinese
const BAIDU_CHINESE: &str = "zh";

/// Baidu general translation API, MD5 signed.
pub struct BaiduTranslator {
    endpoint: String,
    credentials: BaiduCredentials,
    transport: Arc<dyn HttpTransport>,
}

#[derive(Debug, Deserialize)]
struct BaiduResponse {
    error_code: Option<Value>,
    error_msg: Option<String>,
    trans_result: Option<Vec<BaiduTranslation>>,
}

#[derive(Debug, Deserialize)]
struct BaiduTranslation {
    dst: String,
}

/// Rewrite the generic Chinese code; everything else passes through
pub fn baidu_lang(lang: &Lang) -> &str {
    if lang.is_chinese() {
        BAIDU_CHINESE
    } else {
        lang.as_str()
    }
}

impl BaiduTranslator {
    pub fn new(
        endpoint: impl Into<String>,
        credentials: BaiduCredentials,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            credentials,
            transport,
        }
    }

    /// Signed request URL with Baidu language codes on `from`/`to`
    pub fn build_url(
        endpoint: &str,
        credentials: &BaiduCredentials,
        text: &str,
        source: &Lang,
        target: &Lang,
        salt: Salt,
    ) -> Result<String> {
        let salt_str = salt.salt();
        let sign = baidu_sign(&credentials.app_id, text, &salt_str, &credentials.key);

        let url = Url::parse_with_params(
            endpoint,
            &[
                ("q", text),
                ("appid", credentials.app_id.as_str()),
                ("salt", salt_str.as_str()),
                ("from", baidu_lang(source)),
                ("to", baidu_lang(target)),
                ("sign", sign.as_str()),
            ],
        )
        .map_err(|e| Error::ConfigInvalid {
            field: "endpoints.baidu".to_string(),
            reason: e.to_string(),
        })?;

        Ok(url.into())
    }

    /// Success is the absence of `error_code`; the result is `trans_result[0].dst`
    pub fn parse_response(body: &str) -> Result<String> {
        let response: BaiduResponse =
            serde_json::from_str(body).map_err(|e| Error::UpstreamParse {
                provider: PROVIDER,
                reason: e.to_string(),
            })?;

        if let Some(code) = response.error_code.as_ref() {
            return Err(Error::Upstream {
                provider: PROVIDER,
                code: code_string(code),
                message: response.error_msg,
            });
        }

        Ok(response
            .trans_result
            .and_then(|results| results.into_iter().next())
            .map(|t| t.dst)
            .unwrap_or_default())
    }
}

#[async_trait]
impl Translator for BaiduTranslator {
    fn info(&self) -> TranslatorInfo {
        TranslatorInfo {
            name: PROVIDER,
            requires_api_key: true,
            supports_auto_detect: true,
        }
    }

    async fn translate(&self, text: &str, source: &Lang, target: &Lang) -> Result<String> {
        if !self.credentials.is_complete() {
            return Err(Error::MissingCredentials {
                provider: PROVIDER,
                fields: "app id or key",
            });
        }

        let url = Self::build_url(
            &self.endpoint,
            &self.credentials,
            text,
            source,
            target,
            Salt::now(),
        )?;
        debug!(
            "Baidu translation {} -> {} ({} chars)",
            baidu_lang(source),
            baidu_lang(target),
            text.chars().count()
        );

        let body = self.transport.get(&url).await?;
        Self::parse_response(&body)
    }
}
