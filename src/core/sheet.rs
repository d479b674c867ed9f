//! Layout of the attendance sheet.
//!
//! Row 1 holds `Last Name | First Name | Attendance`, student `i` sits on
//! row `i + 2` and its counter in column C.

use crate::core::updater::{ATTENDANCE_COL, parse_count};
use crate::errors::AppResult;
use crate::models::address::{RangeExpr, SheetAddress};
use crate::models::student::{AttendanceRecord, FIRST_STUDENT_ROW, HEADER_ROW, Student};
use crate::remote::{Row, RowStore};

pub const HEADER: [&str; 3] = ["Last Name", "First Name", "Attendance"];

pub struct SheetLayout {
    sheet_id: String,
    sheet_name: String,
}

impl SheetLayout {
    pub fn new(sheet_id: &str, sheet_name: &str) -> Self {
        Self {
            sheet_id: sheet_id.to_string(),
            sheet_name: sheet_name.to_string(),
        }
    }

    fn address(&self, range: RangeExpr) -> SheetAddress {
        SheetAddress::new(&self.sheet_id, range)
    }

    fn last_row(students: u32) -> u32 {
        FIRST_STUDENT_ROW + students.saturating_sub(1)
    }

    /// Wipe columns A..C, write the header and one zeroed row per student.
    pub fn prepare<S: RowStore + ?Sized>(&self, store: &mut S, roster: &[Student]) -> AppResult<()> {
        store.clear(&self.address(RangeExpr::columns(&self.sheet_name, 1, ATTENDANCE_COL)))?;

        let header: Row = HEADER.iter().map(|h| h.to_string()).collect();
        store.update(
            &self.address(RangeExpr::block(
                &self.sheet_name,
                1,
                HEADER_ROW,
                ATTENDANCE_COL,
                HEADER_ROW,
            )),
            &[header],
        )?;

        if roster.is_empty() {
            return Ok(());
        }

        let rows: Vec<Row> = roster
            .iter()
            .map(|s| vec![s.last_name.clone(), s.first_name.clone(), "0".to_string()])
            .collect();

        store.append(
            &self.address(RangeExpr::columns(&self.sheet_name, 1, ATTENDANCE_COL)),
            &rows,
        )
    }

    /// Put every counter back to 0.
    pub fn reset<S: RowStore + ?Sized>(&self, store: &mut S, students: u32) -> AppResult<()> {
        if students == 0 {
            return Ok(());
        }

        let zeros: Vec<Row> = (0..students).map(|_| vec!["0".to_string()]).collect();
        store.update(
            &self.address(RangeExpr::block(
                &self.sheet_name,
                ATTENDANCE_COL,
                FIRST_STUDENT_ROW,
                ATTENDANCE_COL,
                Self::last_row(students),
            )),
            &zeros,
        )
    }

    /// Header row as stored, if any.
    pub fn header<S: RowStore + ?Sized>(&self, store: &mut S) -> AppResult<Option<Row>> {
        let rows = store.get(&self.address(RangeExpr::block(
            &self.sheet_name,
            1,
            HEADER_ROW,
            ATTENDANCE_COL,
            HEADER_ROW,
        )))?;
        Ok(rows.into_iter().next())
    }

    /// Read back the student rows. Missing or non-numeric counters read as 0.
    pub fn snapshot<S: RowStore + ?Sized>(
        &self,
        store: &mut S,
        students: u32,
    ) -> AppResult<Vec<AttendanceRecord>> {
        if students == 0 {
            return Ok(Vec::new());
        }

        let rows = store.get(&self.address(RangeExpr::block(
            &self.sheet_name,
            1,
            FIRST_STUDENT_ROW,
            ATTENDANCE_COL,
            Self::last_row(students),
        )))?;

        let records = (0..students)
            .map(|id| {
                let row = rows.get(id as usize).cloned().unwrap_or_default();
                let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
                AttendanceRecord {
                    id,
                    last_name: cell(0),
                    first_name: cell(1),
                    attendance: parse_count(&[vec![cell(2)]]).unwrap_or(0),
                }
            })
            .collect();

        Ok(records)
    }
}
