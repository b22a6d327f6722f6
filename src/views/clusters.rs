use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::debug;

use crate::api::{ApiClient, ClusterDetail, ClusterSummary, DETAIL_ARTICLE_LIMIT};

use super::state::{LoadState, ViewCell};

/// Master-detail controller for the clusters view: the primary list load
/// plus an on-demand detail fetch keyed by the selected topic.
#[derive(Clone)]
pub struct ClustersView {
    client: ApiClient,
    list: ViewCell<Vec<ClusterSummary>>,
    pane: Arc<Mutex<PaneInner>>,
}

/// Observable detail pane beside the cluster list.
///
/// `selection` is owned exclusively by this controller. `detail` keeps the
/// last successfully loaded record so a failed refresh leaves rendered
/// content in place, with the error shown alongside.
#[derive(Debug, Clone, Default)]
pub struct DetailPane {
    pub selection: Option<i64>,
    pub detail: Option<ClusterDetail>,
    pub error: Option<String>,
    pub pending: bool,
}

struct PaneInner {
    pane: DetailPane,
    mounted: bool,
}

impl ClustersView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            list: ViewCell::new(),
            pane: Arc::new(Mutex::new(PaneInner {
                pane: DetailPane::default(),
                mounted: true,
            })),
        }
    }

    /// Primary list load, once per activation.
    pub async fn load(&self) {
        let ticket = self.list.begin_load();
        ticket.commit(self.client.clusters().await.map(|r| r.clusters));
    }

    /// Records the selection and fetches the expanded cluster. Settlement is
    /// tagged with the requesting topic and discarded if the selection moved
    /// on in the meantime (last request wins).
    pub async fn select_topic(&self, topic_id: i64) {
        let request = self.begin_selection(topic_id);
        let outcome = self
            .client
            .cluster_detail(topic_id, DETAIL_ARTICLE_LIMIT)
            .await;
        request.settle(outcome);
    }

    /// Sets the selection, clears the detail-scoped error, and hands out the
    /// tagged one-shot settlement for this request.
    pub fn begin_selection(&self, topic_id: i64) -> DetailRequest {
        let mut inner = self.pane.lock().unwrap();
        inner.pane.selection = Some(topic_id);
        inner.pane.error = None;
        inner.pane.pending = true;
        DetailRequest {
            pane: Arc::clone(&self.pane),
            topic_id,
        }
    }

    pub fn list_snapshot(&self) -> LoadState<Vec<ClusterSummary>> {
        self.list.snapshot()
    }

    pub fn detail_snapshot(&self) -> DetailPane {
        self.pane.lock().unwrap().pane.clone()
    }

    pub fn unmount(&self) {
        self.list.unmount();
        self.pane.lock().unwrap().mounted = false;
    }
}

/// One in-flight detail fetch, tagged with the topic that requested it.
pub struct DetailRequest {
    pane: Arc<Mutex<PaneInner>>,
    topic_id: i64,
}

impl DetailRequest {
    /// Commits the detail outcome. Returns false when discarded because the
    /// selection changed or the view unmounted before settlement. A failure
    /// never reverts the selection or clears previously loaded detail.
    pub fn settle(self, outcome: Result<ClusterDetail>) -> bool {
        let mut inner = self.pane.lock().unwrap();
        if !inner.mounted {
            debug!("cluster detail settled after unmount, discarding");
            return false;
        }
        if inner.pane.selection != Some(self.topic_id) {
            debug!(
                "detail for topic {} superseded by a newer selection, discarding",
                self.topic_id
            );
            return false;
        }
        inner.pane.pending = false;
        match outcome {
            Ok(detail) => {
                inner.pane.detail = Some(detail);
                inner.pane.error = None;
            }
            Err(e) => {
                inner.pane.error = Some(e.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::extract::RawQuery;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;
    use crate::testutil::{client_for, spawn_backend};

    fn offline_view() -> ClustersView {
        // Never dialed in these tests; settlement goes through the tagged
        // request objects directly.
        ClustersView::new(client_for("http://127.0.0.1:1"))
    }

    fn detail(topic_id: i64) -> ClusterDetail {
        ClusterDetail {
            topic_id,
            count: 1,
            top_keywords: Vec::new(),
            theme_distribution: Vec::new(),
            articles: Vec::new(),
        }
    }

    // Selecting topic A then topic B must render B regardless of which
    // response arrives first.
    #[tokio::test]
    async fn last_selected_topic_wins_regardless_of_arrival_order() {
        let view = offline_view();

        let first = view.begin_selection(5);
        let second = view.begin_selection(7);

        assert!(second.settle(Ok(detail(7))));
        assert!(!first.settle(Ok(detail(5))));

        let pane = view.detail_snapshot();
        assert_eq!(pane.selection, Some(7));
        assert_eq!(pane.detail.unwrap().topic_id, 7);
        assert!(pane.error.is_none());
    }

    #[tokio::test]
    async fn detail_failure_keeps_selection_and_previous_detail() {
        let view = offline_view();

        view.begin_selection(5).settle(Ok(detail(5)));
        view.begin_selection(9)
            .settle(Err(anyhow!("GET /clusters failed: 500 boom")));

        let pane = view.detail_snapshot();
        assert_eq!(pane.selection, Some(9));
        assert_eq!(pane.detail.unwrap().topic_id, 5);
        assert!(pane.error.unwrap().contains("500"));
    }

    #[tokio::test]
    async fn reselecting_clears_the_previous_detail_error() {
        let view = offline_view();

        view.begin_selection(5).settle(Err(anyhow!("boom")));
        let request = view.begin_selection(5);

        let pane = view.detail_snapshot();
        assert!(pane.error.is_none());
        assert!(pane.pending);
        request.settle(Ok(detail(5)));
        assert!(!view.detail_snapshot().pending);
    }

    #[tokio::test]
    async fn unmount_discards_a_late_detail_settlement() {
        let view = offline_view();

        let request = view.begin_selection(5);
        view.unmount();
        assert!(!request.settle(Ok(detail(5))));
        assert!(view.detail_snapshot().detail.is_none());
    }

    // Scenario: list load, then drill into topic 5 with the capped
    // article fetch.
    #[tokio::test]
    async fn drill_down_fetches_and_renders_the_selected_topic() {
        let router = Router::new().route(
            "/clusters",
            get(|RawQuery(query): RawQuery| async move {
                match query.as_deref() {
                    None => Json(json!({
                        "total_clusters": 1,
                        "clusters": [{
                            "topic_id": 5,
                            "count": 12,
                            "top_keywords": [{"keyword": "rent", "count": 9}],
                            "theme_distribution": []
                        }]
                    })),
                    Some("topic_id=5&include_articles=true&limit_articles=5") => Json(json!({
                        "topic_id": 5,
                        "count": 12,
                        "top_keywords": [{"keyword": "rent", "count": 9}],
                        "theme_distribution": [{"id": "1", "count": 7}],
                        "articles": [{
                            "title": "Rents rise again",
                            "date": "Mon, 02 Jun 2025 08:00:00 GMT",
                            "link": "https://example.com/rents",
                            "source": "Example Daily",
                            "neighborhood": "Mission",
                            "themes": [1],
                            "keywords": ["rent"]
                        }]
                    })),
                    other => panic!("unexpected query: {:?}", other),
                }
            }),
        );
        let base = spawn_backend(router).await;

        let view = ClustersView::new(client_for(&base));
        view.load().await;
        let list = view.list_snapshot();
        assert_eq!(list.data().unwrap()[0].topic_id, 5);

        view.select_topic(5).await;
        let pane = view.detail_snapshot();
        let detail = pane.detail.expect("detail should have loaded");
        assert_eq!(detail.topic_id, 5);
        assert_eq!(detail.articles.len(), 1);
        assert_eq!(detail.articles[0].title.as_deref(), Some("Rents rise again"));
        // The list stays rendered alongside the detail.
        assert!(view.list_snapshot().data().is_some());
    }
}
