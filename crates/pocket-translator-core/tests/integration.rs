//! Integration tests for pocket-translator-core
//!
//! These tests drive the coordinator end to end against an offline transport:
//! - URL construction and response parsing per provider
//! - Failures surfacing as values
//! - Settings re-read on every call
//! - Every call reaching the network

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use pocket_translator_core::{
    AppConfig, BaiduCredentials, Error, ErrorKind, HttpTransport, JsonSettingsStore, Lang,
    MemorySettingsStore, ProviderConfig, ProviderKind, Result, SettingsStore,
    TranslationCoordinator, TranslationResult, YoudaoCredentials,
};

// =============================================================================
// Mock Transport for Testing
// =============================================================================

/// Returns canned bodies (or fails) and records every requested URL.
///
/// Queued bodies are served first, in order; `reply` answers afterwards.
struct MockTransport {
    queued: Mutex<VecDeque<String>>,
    reply: std::result::Result<String, fn() -> Error>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    fn replying(body: &str) -> Arc<Self> {
        Self::replying_in_order(&[body])
    }

    fn replying_in_order(bodies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            queued: Mutex::new(bodies.iter().map(ToString::to_string).collect()),
            reply: Ok(bodies.last().copied().unwrap_or_default().to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn failing(error: fn() -> Error) -> Arc<Self> {
        Arc::new(Self {
            queued: Mutex::new(VecDeque::new()),
            reply: Err(error),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        if let Some(body) = self.queued.lock().unwrap().pop_front() {
            return Ok(body);
        }
        match &self.reply {
            Ok(body) => Ok(body.clone()),
            Err(make) => Err(make()),
        }
    }
}

// =============================================================================
// Test Fixtures
// =============================================================================

const GOOGLE_HELLO: &str = r#"[[["你好","hello",null,null,1]],null,"en"]"#;

fn coordinator(
    settings: ProviderConfig,
    transport: Arc<MockTransport>,
) -> (TranslationCoordinator, Arc<MemorySettingsStore>) {
    let store = Arc::new(MemorySettingsStore::new(settings));
    let coordinator = TranslationCoordinator::new(store.clone(), transport, &AppConfig::default());
    (coordinator, store)
}

fn en() -> Lang {
    Lang::new("en")
}

fn zh() -> Lang {
    Lang::new("zh-CN")
}

// =============================================================================
// Provider Round Trips
// =============================================================================

#[tokio::test]
async fn test_google_end_to_end() {
    let transport = MockTransport::replying(GOOGLE_HELLO);
    let (coordinator, _) = coordinator(ProviderConfig::default(), transport.clone());

    let result = coordinator.translate("hello", &en(), &zh()).await;
    assert_eq!(
        result,
        TranslationResult::Success {
            translated_text: "你好".to_string()
        }
    );

    assert_eq!(
        transport.requests(),
        ["https://translate.googleapis.com/translate_a/single?client=gtx&sl=en&tl=zh-CN&dt=t&q=hello"]
    );
}

#[tokio::test]
async fn test_google_unexpected_shape_returns_input() {
    let transport = MockTransport::replying(r#"{"unexpected":true}"#);
    let (coordinator, _) = coordinator(ProviderConfig::default(), transport);

    let result = coordinator.translate("hello", &en(), &zh()).await;
    assert_eq!(
        result,
        TranslationResult::Success {
            translated_text: "hello".to_string()
        }
    );
}

#[tokio::test]
async fn test_baidu_end_to_end_uses_baidu_codes() {
    let transport = MockTransport::replying(r#"{"trans_result":[{"src":"apple","dst":"苹果"}]}"#);
    let settings = ProviderConfig {
        provider: ProviderKind::Baidu,
        baidu: BaiduCredentials::new("2015063000000001", "12345678"),
        ..Default::default()
    };
    let (coordinator, _) = coordinator(settings, transport.clone());

    let result = coordinator.translate("apple", &en(), &zh()).await;
    assert!(result.is_success());

    let url = &transport.requests()[0];
    assert!(url.starts_with("https://fanyi-api.baidu.com/api/trans/vip/translate?"));
    assert!(url.contains("&to=zh&"), "Baidu should receive zh, got {url}");
    assert!(!url.contains("zh-CN"));
}

// =============================================================================
// Failures as Values
// =============================================================================

#[tokio::test]
async fn test_missing_credentials_never_reach_network() {
    for provider in [ProviderKind::Youdao, ProviderKind::Baidu] {
        let transport = MockTransport::replying("{}");
        let (coordinator, _) = coordinator(ProviderConfig::with_provider(provider), transport.clone());

        match coordinator.translate("hello", &en(), &zh()).await {
            TranslationResult::Failure { kind, message } => {
                assert_eq!(kind, ErrorKind::MissingCredentials);
                assert!(message.contains(provider.display_name()), "{message}");
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(transport.requests().is_empty());
    }
}

#[tokio::test]
async fn test_every_failure_kind_is_a_value() {
    let youdao = ProviderConfig {
        provider: ProviderKind::Youdao,
        youdao: YoudaoCredentials::new("key", "secret"),
        ..Default::default()
    };

    let cases: Vec<(Arc<MockTransport>, ErrorKind)> = vec![
        (MockTransport::replying(r#"{"errorCode":"108"}"#), ErrorKind::Upstream),
        (MockTransport::replying("<html>busy</html>"), ErrorKind::UpstreamParse),
        (
            MockTransport::failing(|| Error::Transport("connection reset".to_string())),
            ErrorKind::Transport,
        ),
        (MockTransport::failing(|| Error::TranslationTimeout), ErrorKind::Transport),
    ];

    for (transport, expected) in cases {
        let (coordinator, _) = coordinator(youdao.clone(), transport);
        let result = coordinator.translate("hello", &en(), &zh()).await;

        match &result {
            TranslationResult::Failure { kind, .. } => assert_eq!(*kind, expected),
            other => panic!("expected {expected:?}, got {other:?}"),
        }

        let response = result.into_response();
        assert!(!response.success);
        assert!(response.text.is_none());
        assert!(response.render().starts_with("error: "));
    }
}

#[tokio::test]
async fn test_blank_text_is_rejected() {
    let transport = MockTransport::replying(GOOGLE_HELLO);
    let (coordinator, _) = coordinator(ProviderConfig::default(), transport.clone());

    let result = coordinator.translate("   ", &en(), &zh()).await;
    assert!(matches!(
        result,
        TranslationResult::Failure {
            kind: ErrorKind::InvalidRequest,
            ..
        }
    ));
    assert!(transport.requests().is_empty());
}

// =============================================================================
// Settings Tests
// =============================================================================

#[tokio::test]
async fn test_provider_switch_applies_to_next_call() {
    let transport = MockTransport::replying(GOOGLE_HELLO);
    let (coordinator, store) = coordinator(ProviderConfig::default(), transport.clone());

    assert!(coordinator.translate("hello", &en(), &zh()).await.is_success());
    assert_eq!(coordinator.provider(), ProviderKind::Google);

    store
        .save(&ProviderConfig::with_provider(ProviderKind::Youdao))
        .unwrap();
    assert_eq!(coordinator.provider(), ProviderKind::Youdao);

    let result = coordinator.translate("hello", &en(), &zh()).await;
    assert!(matches!(
        result,
        TranslationResult::Failure {
            kind: ErrorKind::MissingCredentials,
            ..
        }
    ));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_json_store_feeds_coordinator() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonSettingsStore::new(dir.path().join("settings.json")));
    let transport = MockTransport::replying(r#"{"errorCode":"0","translation":["你好"]}"#);
    let coordinator =
        TranslationCoordinator::new(store.clone(), transport.clone(), &AppConfig::default());

    store
        .save(&ProviderConfig {
            provider: ProviderKind::Youdao,
            youdao: YoudaoCredentials::new("key", "secret"),
            ..Default::default()
        })
        .unwrap();

    let result = coordinator.translate("hello", &en(), &zh()).await;
    assert_eq!(
        result,
        TranslationResult::Success {
            translated_text: "你好".to_string()
        }
    );
    assert!(transport.requests()[0].starts_with("https://openapi.youdao.com/api?"));
}

// =============================================================================
// Retry Tests
// =============================================================================

#[tokio::test]
async fn test_retry_after_fallback_reaches_network() {
    let transport = MockTransport::replying_in_order(&[r#"{"error":"rate limited"}"#, GOOGLE_HELLO]);
    let (coordinator, _) = coordinator(ProviderConfig::default(), transport.clone());

    let first = coordinator.translate("hello", &en(), &zh()).await;
    assert_eq!(
        first,
        TranslationResult::Success {
            translated_text: "hello".to_string()
        },
        "Unexpected shape should hand the input back"
    );

    let retry = coordinator.translate("hello", &en(), &zh()).await;
    assert_eq!(
        retry,
        TranslationResult::Success {
            translated_text: "你好".to_string()
        }
    );
    assert_eq!(transport.requests().len(), 2, "Each call should issue its own GET");
}

#[tokio::test]
async fn test_repeated_failures_each_reach_network() {
    let transport = MockTransport::replying(r#"{"errorCode":"411"}"#);
    let settings = ProviderConfig {
        provider: ProviderKind::Youdao,
        youdao: YoudaoCredentials::new("key", "secret"),
        ..Default::default()
    };
    let (coordinator, _) = coordinator(settings, transport.clone());

    let _ = coordinator.translate("hello", &en(), &zh()).await;
    let _ = coordinator.translate("hello", &en(), &zh()).await;
    assert_eq!(transport.requests().len(), 2);
}
