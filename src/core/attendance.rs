//! Console and journal reporting around the attendance core, plus the
//! one-shot operations of the CLI (manual scan, table view, reset).

use crate::core::session::CycleOutcome;
use crate::core::sheet::SheetLayout;
use crate::core::updater::{ATTENDANCE_COL, AttendanceUpdater};
use crate::db::cells::updated_at_by_row;
use crate::db::log::ttlog_soft;
use crate::errors::{AppResult, UpdateError};
use crate::models::student::{AttendanceCount, AttendanceRecord, FIRST_STUDENT_ROW, Student};
use crate::remote::RowStore;
use crate::ui::messages::{card, error, info, link, success, warning};
use crate::utils::table::{Column, Table};
use rusqlite::Connection;

/// Turns loop outcomes into console lines and journal rows.
pub struct Reporter<'a> {
    roster: &'a [Student],
    journal: Option<&'a Connection>,
    link_down: bool,
}

impl<'a> Reporter<'a> {
    pub fn new(roster: &'a [Student], journal: Option<&'a Connection>) -> Self {
        Self {
            roster,
            journal,
            link_down: false,
        }
    }

    fn journal(&self, operation: &str, target: &str, message: &str) {
        if let Some(conn) = self.journal {
            ttlog_soft(conn, operation, target, message);
        }
    }

    fn label(&self, student: i64) -> String {
        usize::try_from(student)
            .ok()
            .and_then(|i| self.roster.get(i))
            .map(|s| format!("student {} ({})", student, s.full_name()))
            .unwrap_or_else(|| format!("student {}", student))
    }

    pub fn observe(&mut self, outcome: &CycleOutcome) {
        match outcome {
            CycleOutcome::Connected => {
                self.link_down = false;
                link("Link up, waiting for cards…");
                self.journal("link_up", "", "Sheet store reachable");
            }
            CycleOutcome::NotReady => {
                // Only the transition is worth a line.
                if !self.link_down {
                    self.link_down = true;
                    link("Link down, retrying…");
                    self.journal("link_down", "", "Sheet store unreachable");
                }
            }
            CycleOutcome::Idle => {}
            CycleOutcome::Arrived { student, result } => {
                let who = self.label(*student);
                card(format!("Card detected → {}", who));
                self.result(*student, &who, result);
            }
            CycleOutcome::Removed => {
                card("Card removed");
                self.journal("removal", "", "Card removed");
            }
        }
    }

    /// Report one increment result.
    pub fn result(
        &self,
        student: i64,
        who: &str,
        result: &Result<AttendanceCount, UpdateError>,
    ) {
        let target = format!("student {}", student);
        match result {
            Ok(count) => {
                success(format!("Attendance for {}: {}", who, count));
                self.journal("credit", &target, &format!("Attendance now {}", count));
            }
            Err(e @ UpdateError::InvalidStudent { .. }) => {
                error(e);
                self.journal("invalid_student", &target, &e.to_string());
            }
            Err(e @ UpdateError::CounterOverflow { .. }) => {
                error(e);
                self.journal("overflow", &target, &e.to_string());
            }
            Err(e @ UpdateError::RemoteWriteFailed(_)) => {
                error(format!("Attendance for {} lost: {}", who, e));
                self.journal("write_failed", &target, &e.to_string());
            }
        }
    }
}

pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Credit `student` once, outside the scan loop.
    pub fn scan_once<S: RowStore + ?Sized>(
        store: &mut S,
        updater: &AttendanceUpdater,
        student: i64,
        reporter: &Reporter<'_>,
    ) -> AppResult<AttendanceCount> {
        let result = updater.increment(store, student);
        reporter.result(student, &reporter.label(student), &result);
        Ok(result?)
    }

    /// Print the attendance table. `conn` adds the last-update column.
    pub fn show<S: RowStore + ?Sized>(
        store: &mut S,
        layout: &SheetLayout,
        students: u32,
        conn: Option<(&Connection, &str, &str)>,
    ) -> AppResult<Vec<AttendanceRecord>> {
        let records = layout.snapshot(store, students)?;

        if records.is_empty() {
            warning("No students configured.");
            return Ok(records);
        }

        let updated = match conn {
            Some((c, sheet_id, sheet)) => updated_at_by_row(c, sheet_id, sheet, ATTENDANCE_COL)?,
            None => Default::default(),
        };

        let mut table = Table::new(vec![
            Column::right("Id"),
            Column::left("Last Name"),
            Column::left("First Name"),
            Column::right("Attendance"),
            Column::left("Updated"),
        ]);

        for r in &records {
            let at = updated
                .get(&(r.id + FIRST_STUDENT_ROW))
                .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "--".to_string());

            table.add_row(vec![
                r.id.to_string(),
                r.last_name.clone(),
                r.first_name.clone(),
                r.attendance.to_string(),
                at,
            ]);
        }

        print!("{}", table.render());

        let total: AttendanceCount = records.iter().map(|r| r.attendance).sum();
        info(format!("{} students, {} check-ins in total", records.len(), total));

        Ok(records)
    }

    pub fn reset<S: RowStore + ?Sized>(
        store: &mut S,
        layout: &SheetLayout,
        students: u32,
        journal: Option<&Connection>,
    ) -> AppResult<()> {
        layout.reset(store, students)?;
        success(format!("Attendance reset for {} students.", students));
        if let Some(conn) = journal {
            ttlog_soft(conn, "reset", "", &format!("{} counters set to 0", students));
        }
        Ok(())
    }
}
