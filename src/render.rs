//! Plain-text rendering of the view models.
//!
//! Pure functions from snapshot data to printable lines; the CLI decides
//! where and how they are shown. Wording follows the dashboard's pills and
//! cards ("Theme 1: 80", "Topic 5").

use crate::api::{
    ClusterDetail, ClusterSummary, KeywordCount, MapSnapshot, NeighborhoodStats, ReportSnapshot,
    ThemeCount, ThemesSummary,
};
use crate::views::HomeData;

/// Keywords shown inline in a cluster list row.
const TOP_KEYWORDS_PREVIEW: usize = 3;

/// Keyword pills shown in detail and map blocks.
const MAX_KEYWORD_PILLS: usize = 10;

/// Cluster cards shown in the home page preview.
const HOME_CLUSTER_PREVIEW: usize = 6;

pub fn theme_pills(themes: &[ThemeCount]) -> Vec<String> {
    themes
        .iter()
        .map(|t| format!("Theme {}: {}", t.id, t.count))
        .collect()
}

pub fn keyword_pills(keywords: &[KeywordCount]) -> Vec<String> {
    keywords
        .iter()
        .take(MAX_KEYWORD_PILLS)
        .map(|k| format!("{}: {}", k.keyword, k.count))
        .collect()
}

fn article_line(
    title: Option<&str>,
    date: Option<&str>,
    source: Option<&str>,
    neighborhood: Option<&str>,
) -> String {
    format!(
        "{} ({} • {} • {})",
        title.unwrap_or("Untitled"),
        date.unwrap_or("No date"),
        source.unwrap_or("Unknown source"),
        neighborhood.unwrap_or("Unknown neighborhood"),
    )
}

pub fn themes_lines(summary: &ThemesSummary) -> Vec<String> {
    let mut lines = vec![format!("Total articles: {}", summary.total_articles)];
    lines.extend(theme_pills(&summary.themes));
    lines
}

pub fn cluster_list_lines(clusters: &[ClusterSummary]) -> Vec<String> {
    clusters
        .iter()
        .map(|c| {
            let keywords = c
                .top_keywords
                .iter()
                .take(TOP_KEYWORDS_PREVIEW)
                .map(|k| k.keyword.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("Topic {} • {} items • {}", c.topic_id, c.count, keywords)
        })
        .collect()
}

pub fn cluster_detail_lines(detail: &ClusterDetail) -> Vec<String> {
    let mut lines = vec![
        format!("Topic {}", detail.topic_id),
        format!("{} items", detail.count),
        "Top keywords:".to_string(),
    ];
    for pill in keyword_pills(&detail.top_keywords) {
        lines.push(format!("  {}", pill));
    }
    lines.push("Sample articles:".to_string());
    if detail.articles.is_empty() {
        lines.push("  No articles returned.".to_string());
    }
    for a in &detail.articles {
        lines.push(format!(
            "  {}",
            article_line(
                a.title.as_deref(),
                a.date.as_deref(),
                a.source.as_deref(),
                a.neighborhood.as_deref(),
            )
        ));
    }
    lines
}

pub fn neighborhood_lines(stats: &NeighborhoodStats) -> Vec<String> {
    let mut lines = vec![format!(
        "{} • {} articles",
        stats.neighborhood, stats.article_count
    )];
    lines.push("Theme distribution:".to_string());
    for pill in theme_pills(&stats.theme_distribution) {
        lines.push(format!("  {}", pill));
    }
    lines.push("Top keywords:".to_string());
    for pill in keyword_pills(&stats.top_keywords) {
        lines.push(format!("  {}", pill));
    }
    lines
}

pub fn map_lines(map: &MapSnapshot) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, stats) in map.neighborhoods.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(neighborhood_lines(stats));
    }
    lines
}

pub fn report_lines(report: &ReportSnapshot) -> Vec<String> {
    let mut lines = vec![format!("Total articles: {}", report.total_articles)];
    lines.push("Top themes:".to_string());
    for pill in theme_pills(&report.theme_distribution) {
        lines.push(format!("  {}", pill));
    }
    lines.push("Top clusters:".to_string());
    for c in &report.top_clusters {
        lines.push(format!("  Topic {}: {}", c.topic_id, c.count));
    }
    lines.push("Latest items:".to_string());
    if report.latest_items.is_empty() {
        lines.push("  No items.".to_string());
    }
    for item in &report.latest_items {
        lines.push(format!(
            "  {}",
            article_line(
                item.title.as_deref(),
                item.date.as_deref(),
                item.source.as_deref(),
                item.neighborhood.as_deref(),
            )
        ));
    }
    lines
}

pub fn home_lines(home: &HomeData) -> Vec<String> {
    let mut lines = vec![format!(
        "Total Articles: {} (current weekly snapshot)",
        home.report.total_articles
    )];
    match home.report.theme_distribution.first() {
        Some(top) => lines.push(format!("Top Theme: Theme {} ({} tagged items)", top.id, top.count)),
        None => lines.push("Top Theme: none".to_string()),
    }
    match home.report.top_clusters.first() {
        Some(top) => lines.push(format!("Top Cluster: Topic {} ({} items)", top.topic_id, top.count)),
        None => lines.push("Top Cluster: none".to_string()),
    }

    lines.push("Latest Items:".to_string());
    for item in &home.report.latest_items {
        lines.push(format!(
            "  {}",
            article_line(
                item.title.as_deref(),
                item.date.as_deref(),
                item.source.as_deref(),
                item.neighborhood.as_deref(),
            )
        ));
    }

    lines.push("Top Clusters (Preview):".to_string());
    for line in cluster_list_lines(&home.clusters).into_iter().take(HOME_CLUSTER_PREVIEW) {
        lines.push(format!("  {}", line));
    }

    lines.push("Theme Distribution:".to_string());
    for pill in theme_pills(&home.themes.themes) {
        lines.push(format!("  {}", pill));
    }
    lines
}
