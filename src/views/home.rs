use anyhow::Result;

use crate::api::{ApiClient, ClusterSummary, ReportSnapshot, ReportSort, ThemesSummary};

use super::state::{LoadState, ViewCell};

/// Latest-items cap for the home page's report call.
pub const HOME_LATEST_LIMIT: u32 = 5;

/// Composite data behind the home page. All three resources load together;
/// there is no partial rendering.
#[derive(Debug, Clone)]
pub struct HomeData {
    pub themes: ThemesSummary,
    pub report: ReportSnapshot,
    pub clusters: Vec<ClusterSummary>,
}

/// Home overview: themes, report summary, and cluster preview fetched
/// concurrently, fan-in with first-failure-wins.
#[derive(Clone)]
pub struct HomeView {
    client: ApiClient,
    state: ViewCell<HomeData>,
}

impl HomeView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: ViewCell::new(),
        }
    }

    pub async fn load(&self) {
        let ticket = self.state.begin_load();
        ticket.commit(self.fetch().await);
    }

    async fn fetch(&self) -> Result<HomeData> {
        let (themes, report, clusters) = tokio::try_join!(
            self.client.themes(),
            self.client.report_data(HOME_LATEST_LIMIT, ReportSort::DateDesc),
            self.client.clusters(),
        )?;
        Ok(HomeData {
            themes,
            report,
            clusters: clusters.clusters,
        })
    }

    pub fn snapshot(&self) -> LoadState<HomeData> {
        self.state.snapshot()
    }

    pub fn unmount(&self) {
        self.state.unmount();
    }
}
