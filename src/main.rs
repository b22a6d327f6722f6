use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::debug;

use community_flow::api::ApiClient;
use community_flow::config::ApiConfig;
use community_flow::logging::configure_logging;
use community_flow::render;
use community_flow::views::{
    ClustersView, ExportOutcome, HomeView, LoadState, MapView, ReportView, ThemesView,
};

#[derive(Parser)]
#[command(
    name = "community-flow",
    version,
    about = "Weekly snapshot dashboard for classified community news"
)]
struct Cli {
    /// Backend base URL (overrides COMMUNITY_FLOW_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Snapshot overview: stats, latest items, cluster preview, themes.
    Home,
    /// Theme distribution across the snapshot.
    Themes,
    /// Topic clusters, optionally drilling into one topic.
    Clusters {
        /// Topic to expand with sample articles.
        #[arg(long)]
        topic: Option<i64>,
    },
    /// Neighborhood intensity data behind the map.
    Map {
        /// Show a single neighborhood instead of the full map.
        #[arg(long)]
        neighborhood: Option<String>,
    },
    /// Weekly report summary, optionally downloading the PDF.
    Report {
        /// Also download the weekly report PDF.
        #[arg(long)]
        pdf: bool,
        /// Directory the PDF is saved into.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Backend health check.
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();
    let cli = Cli::parse();
    debug!(
        "community-flow built {} ({})",
        env!("BUILD_TIMESTAMP"),
        option_env!("GIT_HASH").unwrap_or("unknown")
    );

    let config = ApiConfig::resolve(cli.api_url.clone());
    let client = ApiClient::new(&config)?;

    match cli.command {
        Command::Home => {
            let view = HomeView::new(client);
            view.load().await;
            if !print_page("Community Flow", view.snapshot(), &config.base_url, render::home_lines) {
                process::exit(1);
            }
        }
        Command::Themes => {
            let view = ThemesView::new(client);
            view.load().await;
            if !print_page("Themes", view.snapshot(), &config.base_url, render::themes_lines) {
                process::exit(1);
            }
        }
        Command::Clusters { topic } => {
            let view = ClustersView::new(client);
            view.load().await;
            let ok = print_page("Clusters", view.list_snapshot(), &config.base_url, |clusters| {
                render::cluster_list_lines(clusters)
            });
            if !ok {
                process::exit(1);
            }
            if let Some(topic_id) = topic {
                view.select_topic(topic_id).await;
                let pane = view.detail_snapshot();
                if let Some(message) = pane.error {
                    // Scoped notice: the list above stays rendered.
                    println!();
                    println!(
                        "{}",
                        format!("Failed to load cluster details: {}", message).yellow()
                    );
                } else if let Some(detail) = pane.detail {
                    println!();
                    for line in render::cluster_detail_lines(&detail) {
                        println!("{}", line);
                    }
                }
            }
        }
        Command::Map { neighborhood: Some(name) } => match client.neighborhood(&name).await {
            Ok(stats) => {
                println!("{}", "Map".bold());
                for line in render::neighborhood_lines(&stats) {
                    println!("{}", line);
                }
            }
            Err(e) => {
                print_error_panel("Map", &e.to_string(), &config.base_url);
                process::exit(1);
            }
        },
        Command::Map { neighborhood: None } => {
            let view = MapView::new(client);
            view.load().await;
            if !print_page("Map", view.snapshot(), &config.base_url, render::map_lines) {
                process::exit(1);
            }
        }
        Command::Report { pdf, out_dir } => {
            let view = ReportView::new(client, out_dir);
            view.load().await;
            let ok = print_page("Weekly Report", view.snapshot(), &config.base_url, render::report_lines);
            // The PDF action stays usable even when the page load failed.
            if pdf {
                match view.exporter().export_pdf().await {
                    ExportOutcome::Saved(path) => {
                        println!("Saved weekly report to {}", path.display());
                    }
                    ExportOutcome::Failed(message) => {
                        println!("{}", format!("PDF download failed: {}", message).yellow());
                    }
                    ExportOutcome::AlreadyDownloading => {}
                }
            }
            if !ok {
                process::exit(1);
            }
        }
        Command::Health => match client.health().await {
            Ok(status) => println!("{}", serde_json::to_string_pretty(&status)?),
            Err(e) => {
                print_error_panel("Health", &e.to_string(), &config.base_url);
                process::exit(1);
            }
        },
    }

    Ok(())
}

fn print_page<T>(
    title: &str,
    snapshot: LoadState<T>,
    base_url: &str,
    render_lines: impl FnOnce(&T) -> Vec<String>,
) -> bool {
    match snapshot {
        LoadState::Ready(data) => {
            println!("{}", title.bold());
            for line in render_lines(&data) {
                println!("{}", line);
            }
            true
        }
        LoadState::Failed(message) => {
            print_error_panel(title, &message, base_url);
            false
        }
        LoadState::Loading => {
            println!("Loading...");
            false
        }
    }
}

fn print_error_panel(title: &str, message: &str, base_url: &str) {
    eprintln!("{}", title.bold());
    eprintln!("{}", "Error".red().bold());
    eprintln!("{}", message.red());
    eprintln!(
        "Make sure the backend is running at {} and CORS is enabled.",
        base_url
    );
}
