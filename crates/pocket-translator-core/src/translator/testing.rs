//! Offline transport for adapter unit tests.

use async_trait::async_trait;
use std::sync::Mutex;

use super::transport::HttpTransport;
use crate::error::{Error, Result};

pub struct MockTransport {
    body: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn responding(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            body: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.body
            .clone()
            .ok_or_else(|| Error::Transport("connection refused".to_string()))
    }
}

/// Query parameters of a recorded request, decoded
pub fn query_pairs(url: &str) -> Vec<(String, String)> {
    reqwest::Url::parse(url)
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn query_param(url: &str, name: &str) -> Option<String> {
    query_pairs(url)
        .into_iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v)
}
