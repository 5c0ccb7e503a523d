//! Request signing for the commercial providers.
//!
//! Both services authenticate every request with a digest over the app
//! identity, the text, a fresh salt and the shared secret. The concatenation
//! order and the text transform must match the services bit for bit.

use sha2::{Digest, Sha256};

/// Per-request nonce pair, captured once so salt and curtime agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Salt {
    millis: u128,
}

impl Salt {
    pub fn now() -> Self {
        Self::from_millis(crate::util::unix_millis())
    }

    pub const fn from_millis(millis: u128) -> Self {
        Self { millis }
    }

    /// Millisecond timestamp used as the salt
    pub fn salt(&self) -> String {
        self.millis.to_string()
    }

    /// Timestamp in seconds, rounded to the nearest second
    pub fn curtime(&self) -> String {
        ((self.millis + 500) / 1000).to_string()
    }
}

/// Shorten long text for the Youdao signature input.
///
/// Text of at most 20 characters is used as is; longer text becomes its first
/// 10 characters, its character count, and its last 10 characters. Only the
/// signature sees this form; the request still carries the full text.
pub fn truncate_for_sign(text: &str) -> String {
    let len = text.chars().count();
    if len <= 20 {
        return text.to_string();
    }

    let head: String = text.chars().take(10).collect();
    let tail: String = text.chars().skip(len - 10).collect();
    format!("{head}{len}{tail}")
}

pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

pub fn md5_hex(input: &str) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}

/// sha256(appKey + truncate(text) + salt + curtime + appSecret)
pub fn youdao_sign(app_key: &str, text: &str, salt: &str, curtime: &str, app_secret: &str) -> String {
    sha256_hex(&format!(
        "{app_key}{}{salt}{curtime}{app_secret}",
        truncate_for_sign(text)
    ))
}

/// md5(appId + text + salt + key), text untruncated
pub fn baidu_sign(app_id: &str, text: &str, salt: &str, key: &str) -> String {
    md5_hex(&format!("{app_id}{text}{salt}{key}"))
}
