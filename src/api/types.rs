//! Wire types for the Community Flow backend responses.

use serde::{Deserialize, Serialize};

/// How many articles tagged with a theme. Theme ids travel as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeCount {
    pub id: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u64,
}

/// Response of `/themes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemesSummary {
    pub total_articles: u64,
    pub themes: Vec<ThemeCount>,
}

/// One cluster in the `/clusters` list form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub topic_id: i64,
    pub count: u64,
    pub top_keywords: Vec<KeywordCount>,
    #[serde(default)]
    pub theme_distribution: Vec<ThemeCount>,
}

/// Response of `/clusters` without a `topic_id` filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClustersResponse {
    #[serde(default)]
    pub total_clusters: u64,
    pub clusters: Vec<ClusterSummary>,
}

/// A sample article attached to a cluster detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterArticle {
    pub title: Option<String>,
    pub date: Option<String>,
    pub link: Option<String>,
    pub source: Option<String>,
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub themes: Vec<i64>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Response of `/clusters?topic_id=N`: a single expanded cluster. The
/// backend answers an unknown topic with an empty cluster (count 0), never
/// a 404.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterDetail {
    pub topic_id: i64,
    pub count: u64,
    pub top_keywords: Vec<KeywordCount>,
    #[serde(default)]
    pub theme_distribution: Vec<ThemeCount>,
    #[serde(default)]
    pub articles: Vec<ClusterArticle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopClusterCount {
    pub topic_id: i64,
    pub count: u64,
}

/// One entry of the report's latest-items list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportItem {
    pub title: Option<String>,
    pub date: Option<String>,
    pub link: Option<String>,
    pub source: Option<String>,
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub themes: Vec<i64>,
    pub topic_id: Option<i64>,
}

/// Response of `/report-data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub total_articles: u64,
    pub theme_distribution: Vec<ThemeCount>,
    pub top_clusters: Vec<TopClusterCount>,
    pub latest_items: Vec<ReportItem>,
}

/// Per-neighborhood aggregates of `/map-data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborhoodStats {
    pub neighborhood: String,
    pub article_count: u64,
    #[serde(default)]
    pub theme_distribution: Vec<ThemeCount>,
    #[serde(default)]
    pub top_keywords: Vec<KeywordCount>,
}

/// Response of `/map-data` without a `neighborhood` filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSnapshot {
    #[serde(default)]
    pub total_neighborhoods: u64,
    pub neighborhoods: Vec<NeighborhoodStats>,
}

/// Sort modes accepted by `/report-data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSort {
    None,
    DateDesc,
    DateAsc,
}

impl ReportSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportSort::None => "none",
            ReportSort::DateDesc => "date_desc",
            ReportSort::DateAsc => "date_asc",
        }
    }
}
