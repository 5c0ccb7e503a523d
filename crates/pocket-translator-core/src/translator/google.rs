use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use super::traits::{Translator, TranslatorInfo};
use super::transport::HttpTransport;
use crate::config::{AUTO_LANG, Lang};
use crate::error::{Error, Result};

const PROVIDER: &str = "Google";

/// Free Google endpoint (`client=gtx`), no authentication.
pub struct GoogleTranslator {
    endpoint: String,
    transport: Arc<dyn HttpTransport>,
}

impl GoogleTranslator {
    pub fn new(endpoint: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    /// `<endpoint>?client=gtx&sl=<src>&tl=<tgt>&dt=t&q=<text>`
    pub fn build_url(endpoint: &str, text: &str, source: &Lang, target: &Lang) -> String {
        let sl = if source.as_str().is_empty() {
            AUTO_LANG
        } else {
            source.as_str()
        };
        format!(
            "{endpoint}?client=gtx&sl={}&tl={}&dt=t&q={}",
            urlencoding::encode(sl),
            urlencoding::encode(target.as_str()),
            urlencoding::encode(text)
        )
    }

    /// Join the translated fragments of `[[["frag", "orig", ...], ...], ...]`.
    ///
    /// A body that parses but lacks that shape (or yields no text) is not an
    /// error: the original text is returned instead.
    pub fn parse_response(body: &str, original: &str) -> Result<String> {
        let value: Value = serde_json::from_str(body).map_err(|e| Error::UpstreamParse {
            provider: PROVIDER,
            reason: e.to_string(),
        })?;

        let Some(segments) = value.get(0).and_then(Value::as_array) else {
            warn!("Unexpected Google response shape, returning input unchanged");
            return Ok(original.to_string());
        };

        let has_text = segments
            .first()
            .and_then(|segment| segment.get(0))
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty());
        if !has_text {
            warn!("Google response carried no translation, returning input unchanged");
            return Ok(original.to_string());
        }

        Ok(segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect())
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn info(&self) -> TranslatorInfo {
        TranslatorInfo {
            name: PROVIDER,
            requires_api_key: false,
            supports_auto_detect: true,
        }
    }

    async fn translate(&self, text: &str, source: &Lang, target: &Lang) -> Result<String> {
        let url = Self::build_url(&self.endpoint, text, source, target);
        debug!("Google translation {} -> {} ({} chars)", source, target, text.chars().count());

        let body = self.transport.get(&url).await?;
        Self::parse_response(&body, text)
    }
}
