//! Per-view async orchestration over the API client.
//!
//! Each view owns its load lifecycle independently; nothing is cached or
//! shared across views.

mod clusters;
mod home;
mod map;
mod report;
mod state;
mod themes;

pub use self::clusters::{ClustersView, DetailPane, DetailRequest};
pub use self::home::{HomeData, HomeView, HOME_LATEST_LIMIT};
pub use self::map::MapView;
pub use self::report::{
    ExportOutcome, ReportExporter, ReportView, REPORT_LATEST_LIMIT, REPORT_PDF_FILE_NAME,
};
pub use self::state::{LoadState, LoadTicket, ViewCell};
pub use self::themes::ThemesView;
