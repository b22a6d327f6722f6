use crate::api::{ApiClient, ThemesSummary};

use super::state::{LoadState, ViewCell};

/// Theme distribution view: one `/themes` load per activation.
#[derive(Clone)]
pub struct ThemesView {
    client: ApiClient,
    state: ViewCell<ThemesSummary>,
}

impl ThemesView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: ViewCell::new(),
        }
    }

    pub async fn load(&self) {
        let ticket = self.state.begin_load();
        ticket.commit(self.client.themes().await);
    }

    pub fn snapshot(&self) -> LoadState<ThemesSummary> {
        self.state.snapshot()
    }

    pub fn unmount(&self) {
        self.state.unmount();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use tokio::sync::oneshot;

    use super::*;
    use crate::testutil::{client_for, spawn_backend};

    #[tokio::test]
    async fn load_reaches_ready_with_the_decoded_summary() {
        let router = Router::new().route(
            "/themes",
            get(|| async {
                Json(json!({
                    "total_articles": 120,
                    "themes": [{"id": "1", "count": 80}, {"id": "2", "count": 40}]
                }))
            }),
        );
        let base = spawn_backend(router).await;

        let view = ThemesView::new(client_for(&base));
        view.load().await;

        let snapshot = view.snapshot();
        let summary = snapshot.data().expect("themes should be ready");
        assert_eq!(summary.total_articles, 120);
        assert_eq!(summary.themes[1].count, 40);
    }

    #[tokio::test]
    async fn load_reaches_failed_on_backend_error() {
        let router = Router::new().route(
            "/themes",
            get(|| async { (axum::http::StatusCode::BAD_GATEWAY, "upstream gone") }),
        );
        let base = spawn_backend(router).await;

        let view = ThemesView::new(client_for(&base));
        view.load().await;

        let snapshot = view.snapshot();
        let message = snapshot.error().expect("themes should have failed");
        assert!(message.contains("502"), "got: {}", message);
    }

    // Deactivating the view before the response arrives must leave the
    // state untouched.
    #[tokio::test]
    async fn unmount_before_settlement_suppresses_the_transition() {
        let (entered_tx, entered_rx) = oneshot::channel::<()>();
        let (release_tx, release_rx) = oneshot::channel::<()>();
        let gate = Arc::new(Mutex::new(Some((entered_tx, release_rx))));

        let router = Router::new().route(
            "/themes",
            get(move || {
                let gate = gate.clone();
                async move {
                    let pair = gate.lock().unwrap().take();
                    if let Some((entered_tx, release_rx)) = pair {
                        entered_tx.send(()).unwrap();
                        release_rx.await.unwrap();
                    }
                    Json(json!({"total_articles": 1, "themes": []}))
                }
            }),
        );
        let base = spawn_backend(router).await;

        let view = ThemesView::new(client_for(&base));
        let load = {
            let view = view.clone();
            tokio::spawn(async move { view.load().await })
        };

        entered_rx.await.unwrap();
        view.unmount();
        release_tx.send(()).unwrap();
        load.await.unwrap();

        assert!(view.snapshot().is_loading());
    }
}
