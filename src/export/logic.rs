// src/export/logic.rs

use crate::core::sheet::SheetLayout;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::AttendanceExport;
use crate::export::xlsx::export_xlsx;
use crate::remote::RowStore;
use crate::ui::messages::warning;
use crate::utils::path::require_absolute;
use chrono::Local;
use std::path::PathBuf;

/// High-level export of the attendance table.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the student rows of the sheet.
    ///
    /// - `format`: csv | json | xlsx
    /// - `file`: absolute output path (`~/` is expanded)
    ///
    /// Returns the written path, or `None` when there was nothing to export.
    pub fn export<S: RowStore + ?Sized>(
        store: &mut S,
        layout: &SheetLayout,
        students: u32,
        sheet_name: &str,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let path = require_absolute(file)?;

        ensure_writable(&path, force)?;

        let now = Local::now().to_rfc3339();
        let rows: Vec<AttendanceExport> = layout
            .snapshot(store, students)?
            .iter()
            .map(|r| AttendanceExport::from_record(r, &now))
            .collect();

        if rows.is_empty() {
            warning("No students to export.");
            return Ok(None);
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, &path, sheet_name)?,
        }

        Ok(Some(path))
    }
}
