//! End-to-end test over a real socket.

use std::sync::Arc;
use std::time::Duration;

use instance_control::http::{MessageResponse, StatusResponse};
use instance_control::{HttpServer, Shutdown};

mod common;

use common::{test_config, FakeProvider};

#[tokio::test]
async fn serves_routes_and_shuts_down_gracefully() {
    let provider = Arc::new(FakeProvider::stopped());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(test_config(15), provider.clone());
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let base = format!("http://{}", addr);

    let res = client.post(format!("{}/api/start", base)).send().await.expect("server unreachable");
    assert_eq!(res.status(), 200);
    let body: MessageResponse = res.json().await.unwrap();
    assert_eq!(body.message, "Server start initiated successfully");

    let res = client.get(format!("{}/api/status", base)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    let status: StatusResponse = res.json().await.unwrap();
    assert_eq!(status.status, "running");
    assert_eq!(status.ip.as_deref(), Some("203.0.113.10"));
    assert_eq!(status.name, "web-1");

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
