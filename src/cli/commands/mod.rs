pub mod backup;
pub mod config;
pub mod export;
pub mod init;
pub mod log;
pub mod reset;
pub mod run;
pub mod scan;
pub mod show;

use crate::config::Config;
use crate::core::session::Timing;
use crate::core::sheet::SheetLayout;
use crate::core::updater::AttendanceUpdater;
use crate::device::{Connectivity, DatabaseLink};
use crate::errors::{AppError, AppResult};
use crate::remote::SqliteSheetStore;

/// Open the sheet database, refusing to create it implicitly.
pub(crate) fn open_store(cfg: &Config) -> AppResult<SqliteSheetStore> {
    let mut link = DatabaseLink::new(&cfg.database);
    if !link.ready() {
        return Err(AppError::ConnectivityUnavailable(format!(
            "sheet database {} not found, run `rattendance init` first",
            cfg.database
        )));
    }
    SqliteSheetStore::open(&cfg.database)
}

pub(crate) fn layout(cfg: &Config) -> SheetLayout {
    SheetLayout::new(&cfg.sheet_id, &cfg.sheet_name)
}

pub(crate) fn updater(cfg: &Config) -> AttendanceUpdater {
    AttendanceUpdater::new(&cfg.sheet_id, &cfg.sheet_name, cfg.max_students)
}

pub(crate) fn timing(cfg: &Config) -> Timing {
    Timing::from_millis(
        cfg.poll_interval_ms,
        cfg.connect_retry_ms,
        cfg.post_scan_delay_ms,
    )
}
