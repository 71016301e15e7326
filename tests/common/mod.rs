use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// A running cipher API instance bound to a random port.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    #[allow(dead_code)]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// GET a path and return (json body, status).
    #[allow(dead_code)]
    pub async fn get_json(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// GET a path with query parameters and return (json body, status).
    #[allow(dead_code)]
    pub async fn get_query(&self, path: &str, query: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .expect("request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn the cipher API on a random port.
pub async fn spawn_app() -> TestApp {
    let app = cipherform::build_app();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
    }
}
