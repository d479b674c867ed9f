//! Read-modify-write of a student's attendance cell.
//!
//! The cycle is not atomic: a failed write after a successful read drops the
//! increment. Delivery is at most once.

use crate::errors::UpdateError;
use crate::models::address::{RangeExpr, SheetAddress};
use crate::models::student::{AttendanceCount, StudentId};
use crate::remote::RowStore;
use crate::ui::messages::warning;

/// Column holding the counter (C).
pub const ATTENDANCE_COL: u32 = 3;

#[derive(Debug, Clone)]
pub struct AttendanceUpdater {
    sheet_id: String,
    sheet_name: String,
    max_students: u32,
}

impl AttendanceUpdater {
    pub fn new(sheet_id: &str, sheet_name: &str, max_students: u32) -> Self {
        Self {
            sheet_id: sheet_id.to_string(),
            sheet_name: sheet_name.to_string(),
            max_students,
        }
    }

    pub fn max_students(&self) -> u32 {
        self.max_students
    }

    /// Address of the counter cell for `student`.
    pub fn cell_address(&self, student: StudentId) -> SheetAddress {
        SheetAddress::new(
            &self.sheet_id,
            RangeExpr::cell(&self.sheet_name, ATTENDANCE_COL, student.row()),
        )
    }

    /// Add one attendance to `student` and return the new count.
    ///
    /// Out of range ids never reach the store. An unreadable or non-numeric
    /// cell counts as 0.
    /// A counter already at its maximum is left as is.
    pub fn increment<S>(&self, store: &mut S, student: i64) -> Result<AttendanceCount, UpdateError>
    where
        S: RowStore + ?Sized,
    {
        let id = StudentId::checked(student, self.max_students)?;
        let address = self.cell_address(id);

        let current = match store.get(&address) {
            Ok(rows) => parse_count(&rows).unwrap_or(0),
            Err(e) => {
                warning(format!("Read of {} failed ({}), counting from 0", address, e));
                0
            }
        };

        let new_count = current
            .checked_add(1)
            .ok_or(UpdateError::CounterOverflow {
                id: student,
                count: current,
            })?;

        store
            .update(&address, &[vec![new_count.to_string()]])
            .map_err(|e| UpdateError::RemoteWriteFailed(e.to_string()))?;

        Ok(new_count)
    }
}

/// First cell of the first row, if it holds a non-negative integer.
pub fn parse_count(rows: &[Vec<String>]) -> Option<AttendanceCount> {
    rows.first()
        .and_then(|row| row.first())
        .and_then(|cell| cell.trim().parse::<AttendanceCount>().ok())
}
