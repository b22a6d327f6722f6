use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ReportSnapshot, ReportSort};
use crate::TARGET_EXPORT;

use super::state::{LoadState, ViewCell};

/// Latest-items cap for the report page load.
pub const REPORT_LATEST_LIMIT: u32 = 10;

/// The weekly report is always saved under this name.
pub const REPORT_PDF_FILE_NAME: &str = "community_flow_weekly_report.pdf";

/// Weekly report view: the `/report-data` load plus the PDF export flow,
/// each with its own independent state.
#[derive(Clone)]
pub struct ReportView {
    client: ApiClient,
    state: ViewCell<ReportSnapshot>,
    exporter: ReportExporter,
}

impl ReportView {
    pub fn new(client: ApiClient, out_dir: impl Into<PathBuf>) -> Self {
        let exporter = ReportExporter::new(client.clone(), out_dir);
        Self {
            client,
            state: ViewCell::new(),
            exporter,
        }
    }

    pub async fn load(&self) {
        let ticket = self.state.begin_load();
        ticket.commit(
            self.client
                .report_data(REPORT_LATEST_LIMIT, ReportSort::DateDesc)
                .await,
        );
    }

    pub fn snapshot(&self) -> LoadState<ReportSnapshot> {
        self.state.snapshot()
    }

    pub fn exporter(&self) -> &ReportExporter {
        &self.exporter
    }

    pub fn unmount(&self) {
        self.state.unmount();
    }
}

/// User-triggered download of the weekly report PDF.
///
/// Entirely decoupled from the page's data load: it never touches the
/// primary ReportSnapshot state, and a failure is recorded as a transient
/// notice rather than a page-level error.
#[derive(Clone)]
pub struct ReportExporter {
    client: ApiClient,
    out_dir: PathBuf,
    downloading: Arc<AtomicBool>,
    notice: Arc<Mutex<Option<String>>>,
}

#[derive(Debug, Clone)]
pub enum ExportOutcome {
    Saved(PathBuf),
    Failed(String),
    /// An export was already running; no second request was issued.
    AlreadyDownloading,
}

impl ReportExporter {
    pub fn new(client: ApiClient, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            out_dir: out_dir.into(),
            downloading: Arc::new(AtomicBool::new(false)),
            notice: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_downloading(&self) -> bool {
        self.downloading.load(Ordering::SeqCst)
    }

    /// Last export failure, if any. Cleared when a new export starts.
    pub fn notice(&self) -> Option<String> {
        self.notice.lock().unwrap().clone()
    }

    /// Fetches `/report-pdf` and writes the bytes under the fixed file
    /// name. Re-invocation while a download is in flight is a no-op.
    pub async fn export_pdf(&self) -> ExportOutcome {
        if self
            .downloading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!(target: TARGET_EXPORT, "export already in progress, ignoring");
            return ExportOutcome::AlreadyDownloading;
        }

        *self.notice.lock().unwrap() = None;
        let outcome = match self.fetch_and_save().await {
            Ok(path) => {
                info!(target: TARGET_EXPORT, "Saved weekly report to {}", path.display());
                ExportOutcome::Saved(path)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(target: TARGET_EXPORT, "Weekly report download failed: {}", message);
                *self.notice.lock().unwrap() = Some(message.clone());
                ExportOutcome::Failed(message)
            }
        };
        self.downloading.store(false, Ordering::SeqCst);
        outcome
    }

    async fn fetch_and_save(&self) -> Result<PathBuf> {
        let bytes = self.client.report_pdf().await?;
        let path = self.out_dir.join(REPORT_PDF_FILE_NAME);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;
        Ok(path)
    }
}
