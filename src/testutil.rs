//! Loopback fake backend shared by the client and view tests.

use axum::Router;

use crate::api::ApiClient;
use crate::config::ApiConfig;

/// Serves `router` on an ephemeral loopback port and returns its base URL.
pub(crate) async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub(crate) fn client_for(base_url: &str) -> ApiClient {
    ApiClient::new(&ApiConfig::with_base_url(base_url)).unwrap()
}
