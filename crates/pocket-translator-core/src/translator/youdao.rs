use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::sign::{Salt, youdao_sign};
use super::traits::{Translator, TranslatorInfo};
use super::transport::HttpTransport;
use super::code_string;
use crate::config::Lang;
use crate::error::{Error, Result};
use crate::settings::YoudaoCredentials;

const PROVIDER: &str = "Youdao";
const SIGN_TYPE: &str = "v3";

/// Youdao open API, SHA-256 signed (`signType=v3`).
pub struct YoudaoTranslator {
    endpoint: String,
    credentials: YoudaoCredentials,
    transport: Arc<dyn HttpTransport>,
}

#[derive(Debug, Deserialize)]
struct YoudaoResponse {
    #[serde(rename = "errorCode")]
    error_code: Option<Value>,
    translation: Option<Vec<String>>,
}

impl YoudaoTranslator {
    pub fn new(
        endpoint: impl Into<String>,
        credentials: YoudaoCredentials,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            credentials,
            transport,
        }
    }

    /// Signed request URL; the full text is sent, only the signature sees the truncated form
    pub fn build_url(
        endpoint: &str,
        credentials: &YoudaoCredentials,
        text: &str,
        source: &Lang,
        target: &Lang,
        salt: Salt,
    ) -> Result<String> {
        let salt_str = salt.salt();
        let curtime = salt.curtime();
        let sign = youdao_sign(
            &credentials.app_key,
            text,
            &salt_str,
            &curtime,
            &credentials.app_secret,
        );

        let url = Url::parse_with_params(
            endpoint,
            &[
                ("q", text),
                ("appKey", credentials.app_key.as_str()),
                ("salt", salt_str.as_str()),
                ("from", source.as_str()),
                ("to", target.as_str()),
                ("sign", sign.as_str()),
                ("signType", SIGN_TYPE),
                ("curtime", curtime.as_str()),
            ],
        )
        .map_err(|e| Error::ConfigInvalid {
            field: "endpoints.youdao".to_string(),
            reason: e.to_string(),
        })?;

        Ok(url.into())
    }

    /// `errorCode == "0"` means success; the first `translation` entry is the result
    pub fn parse_response(body: &str) -> Result<String> {
        let response: YoudaoResponse =
            serde_json::from_str(body).map_err(|e| Error::UpstreamParse {
                provider: PROVIDER,
                reason: e.to_string(),
            })?;

        // Anything but "0" is a rejection, a missing code included
        let Some(code) = response.error_code.as_ref().map(code_string) else {
            return Err(Error::Upstream {
                provider: PROVIDER,
                code: "unknown".to_string(),
                message: Some("response has no errorCode".to_string()),
            });
        };

        if code != "0" {
            return Err(Error::Upstream {
                provider: PROVIDER,
                code,
                message: None,
            });
        }

        Ok(response
            .translation
            .and_then(|t| t.into_iter().next())
            .unwrap_or_default())
    }
}

#[async_trait]
impl Translator for YoudaoTranslator {
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
                fields: "app key or app secret",
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
        debug!("Youdao translation {} -> {} ({} chars)", source, target, text.chars().count());

        let body = self.transport.get(&url).await?;
        Self::parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::sign::sha256_hex;
    use crate::translator::testing::{MockTransport, query_pairs, query_param};

    const ENDPOINT: &str = "https://openapi.youdao.com/api";

    fn creds() -> YoudaoCredentials {
        YoudaoCredentials::new("my-app-key", "my-app-secret")
    }

    #[test]
    fn test_build_url_parameters() {
        let text = "Hello, how are you doing today?";
        let url = YoudaoTranslator::build_url(
            ENDPOINT,
            &creds(),
            text,
            &Lang::auto(),
            &Lang::new("zh-CN"),
            Salt::from_millis(1_700_000_000_123),
        )
        .unwrap();

        assert!(url.starts_with("https://openapi.youdao.com/api?"));
        let names: Vec<String> = query_pairs(&url).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            names,
            ["q", "appKey", "salt", "from", "to", "sign", "signType", "curtime"]
        );

        assert_eq!(query_param(&url, "q").unwrap(), text);
        assert_eq!(query_param(&url, "from").unwrap(), "auto");
        assert_eq!(query_param(&url, "to").unwrap(), "zh-CN");
        assert_eq!(query_param(&url, "salt").unwrap(), "1700000000123");
        assert_eq!(query_param(&url, "curtime").unwrap(), "1700000000");
        assert_eq!(query_param(&url, "signType").unwrap(), "v3");

        let expected = sha256_hex("my-app-keyHello, how31ing today?17000000001231700000000my-app-secret");
        assert_eq!(query_param(&url, "sign").unwrap(), expected);
    }

    #[test]
    fn test_parse_success() {
        let body = r#"{"errorCode":"0","query":"hello","translation":["你好"],"l":"en2zh-CHS"}"#;
        assert_eq!(YoudaoTranslator::parse_response(body).unwrap(), "你好");
    }

    #[test]
    fn test_parse_success_without_translation_is_empty() {
        assert_eq!(YoudaoTranslator::parse_response(r#"{"errorCode":"0"}"#).unwrap(), "");
    }

    #[test]
    fn test_parse_error_code() {
        let err = YoudaoTranslator::parse_response(r#"{"errorCode":"108","l":"null2null"}"#).unwrap_err();
        match err {
            Error::Upstream { provider, code, message } => {
                assert_eq!(provider, "Youdao");
                assert_eq!(code, "108");
                assert!(message.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_numeric_error_code() {
        let err = YoudaoTranslator::parse_response(r#"{"errorCode":202}"#).unwrap_err();
        assert_eq!(err.to_string(), "Youdao error: 202");
    }

    #[test]
    fn test_parse_malformed_body() {
        assert!(matches!(
            YoudaoTranslator::parse_response("not json").unwrap_err(),
            Error::UpstreamParse { provider: "Youdao", .. }
        ));
    }

    #[test]
    fn test_parse_missing_error_code_is_rejection() {
        let err = YoudaoTranslator::parse_response(r#"{"translation":["x"]}"#).unwrap_err();
        assert!(matches!(err, Error::Upstream { provider: "Youdao", .. }), "got {err:?}");
        assert_eq!(err.to_string(), "Youdao error: unknown - response has no errorCode");
    }

    #[tokio::test]
    async fn test_missing_credentials_short_circuit() {
        let transport = Arc::new(MockTransport::responding(r#"{"errorCode":"0","translation":["x"]}"#));

        for credentials in [
            YoudaoCredentials::default(),
            YoudaoCredentials::new("key", ""),
            YoudaoCredentials::new("", "secret"),
        ] {
            let translator = YoudaoTranslator::new(ENDPOINT, credentials, transport.clone());
            let err = translator
                .translate("hello", &Lang::new("en"), &Lang::new("zh-CN"))
                .await
                .unwrap_err();
            assert!(matches!(err, Error::MissingCredentials { provider: "Youdao", .. }));
        }

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_translate_signs_with_sent_salt() {
        let transport = Arc::new(MockTransport::responding(r#"{"errorCode":"0","translation":["你好"]}"#));
        let translator = YoudaoTranslator::new(ENDPOINT, creds(), transport.clone());

        let out = translator
            .translate("hello", &Lang::new("en"), &Lang::new("zh-CN"))
            .await
            .unwrap();
        assert_eq!(out, "你好");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let url = &requests[0];
        let salt = query_param(url, "salt").unwrap();
        let curtime = query_param(url, "curtime").unwrap();
        assert_eq!(
            query_param(url, "sign").unwrap(),
            youdao_sign("my-app-key", "hello", &salt, &curtime, "my-app-secret")
        );
    }
}
