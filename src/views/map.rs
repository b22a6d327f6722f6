use crate::api::{ApiClient, MapSnapshot};

use super::state::{LoadState, ViewCell};

/// Neighborhood-intensity view: one `/map-data` load per activation. The
/// focused single-neighborhood form lives on [`ApiClient::neighborhood`].
#[derive(Clone)]
pub struct MapView {
    client: ApiClient,
    state: ViewCell<MapSnapshot>,
}

impl MapView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: ViewCell::new(),
        }
    }

    pub async fn load(&self) {
        let ticket = self.state.begin_load();
        ticket.commit(self.client.map_data().await);
    }

    pub fn snapshot(&self) -> LoadState<MapSnapshot> {
        self.state.snapshot()
    }

    pub fn unmount(&self) {
        self.state.unmount();
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::RawQuery;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;
    use crate::testutil::{client_for, spawn_backend};

    fn map_router() -> Router {
        Router::new().route(
            "/map-data",
            get(|RawQuery(query): RawQuery| async move {
                if query.as_deref() == Some("neighborhood=Mission") {
                    Json(json!({
                        "neighborhood": "Mission",
                        "article_count": 9,
                        "theme_distribution": [{"id": "2", "count": 4}],
                        "top_keywords": [{"keyword": "mural", "count": 3}]
                    }))
                } else {
                    Json(json!({
                        "total_neighborhoods": 2,
                        "neighborhoods": [
                            {
                                "neighborhood": "Mission",
                                "article_count": 9,
                                "theme_distribution": [{"id": "2", "count": 4}],
                                "top_keywords": [{"keyword": "mural", "count": 3}]
                            },
                            {
                                "neighborhood": "Sunset",
                                "article_count": 4,
                                "theme_distribution": [],
                                "top_keywords": []
                            }
                        ]
                    }))
                }
            }),
        )
    }

    #[tokio::test]
    async fn load_reaches_ready_with_all_neighborhoods() {
        let base = spawn_backend(map_router()).await;

        let view = MapView::new(client_for(&base));
        view.load().await;

        let snapshot = view.snapshot();
        let map = snapshot.data().expect("map should be ready");
        assert_eq!(map.total_neighborhoods, 2);
        assert_eq!(map.neighborhoods[0].neighborhood, "Mission");
        assert_eq!(map.neighborhoods[1].article_count, 4);
    }

    #[tokio::test]
    async fn focused_neighborhood_fetch_decodes_a_single_block() {
        let base = spawn_backend(map_router()).await;

        let stats = client_for(&base).neighborhood("Mission").await.unwrap();
        assert_eq!(stats.neighborhood, "Mission");
        assert_eq!(stats.article_count, 9);
        assert_eq!(stats.top_keywords[0].keyword, "mural");
    }
}
