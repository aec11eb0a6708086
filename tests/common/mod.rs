//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use instance_control::config::ControlConfig;
use instance_control::provider::{InstanceProvider, InstanceSnapshot, ProviderError, ProviderResult};
use instance_control::HttpServer;
use serde_json::Value;
use tower::ServiceExt;

pub const INSTANCE: &str = "web-1";

/// Scripted stand-in for the cloud provider.
///
/// Every call sleeps for `delay`, then either fails with `failure` or
/// applies the transition to the in-memory instance.
pub struct FakeProvider {
    instance: Mutex<InstanceSnapshot>,
    delay: Duration,
    failure: Option<String>,
    strict_transitions: bool,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn running(ip: &str) -> Self {
        Self::with_state("running", Some(ip))
    }

    pub fn stopped() -> Self {
        Self::with_state("stopped", None)
    }

    fn with_state(state: &str, ip: Option<&str>) -> Self {
        Self {
            instance: Mutex::new(InstanceSnapshot {
                name: INSTANCE.to_string(),
                state: state.to_string(),
                public_ip: ip.map(str::to_string),
            }),
            delay: Duration::ZERO,
            failure: None,
            strict_transitions: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Reject stop-when-stopped and start-when-running, like a provider that
    /// enforces valid transitions.
    pub fn strict(mut self) -> Self {
        self.strict_transitions = true;
        self
    }

    pub fn state(&self) -> String {
        self.instance.lock().unwrap().state.clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> ProviderResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.failure {
            Some(message) => Err(ProviderError::Api(message.clone())),
            None => Ok(()),
        }
    }

    fn transition(&self, from: &str, to: &str, ip: Option<&str>) -> ProviderResult<()> {
        let mut instance = self.instance.lock().unwrap();
        if self.strict_transitions && instance.state != from {
            return Err(ProviderError::Api(format!(
                "InvalidInputException: instance is {}",
                instance.state
            )));
        }
        instance.state = to.to_string();
        instance.public_ip = ip.map(str::to_string);
        Ok(())
    }
}

#[async_trait]
impl InstanceProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn get_instance(&self, instance_name: &str) -> ProviderResult<InstanceSnapshot> {
        self.enter().await?;
        let instance = self.instance.lock().unwrap().clone();
        if instance.name != instance_name {
            return Err(ProviderError::Api(format!("NotFoundException: {}", instance_name)));
        }
        Ok(instance)
    }

    async fn start_instance(&self, _instance_name: &str) -> ProviderResult<()> {
        self.enter().await?;
        self.transition("stopped", "running", Some("203.0.113.10"))
    }

    async fn stop_instance(&self, _instance_name: &str) -> ProviderResult<()> {
        self.enter().await?;
        self.transition("running", "stopped", None)
    }
}

/// Valid configuration pointing at [`INSTANCE`].
pub fn test_config(timeout_secs: u64) -> ControlConfig {
    let mut config = ControlConfig::default();
    config.provider.access_key_id = "AKIDEXAMPLE".into();
    config.provider.secret_access_key = "secret".into();
    config.provider.region = "us-east-1".into();
    config.provider.instance_name = INSTANCE.into();
    config.timeouts.request_secs = timeout_secs;
    config
}

/// Router wired to `provider` with the default 15 second deadline.
pub fn app(provider: Arc<FakeProvider>) -> Router {
    app_with_timeout(provider, 15)
}

pub fn app_with_timeout(provider: Arc<FakeProvider>, timeout_secs: u64) -> Router {
    HttpServer::new(test_config(timeout_secs), provider).router()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub raw: String,
}

/// Send a bodiless request through the router in-process.
pub async fn send(router: Router, method: Method, path: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send_request(router, request).await
}

pub async fn send_request(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let raw = String::from_utf8_lossy(&bytes).to_string();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse { status, headers, body, raw }
}
