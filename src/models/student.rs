//! Student identity, roster entries and attendance records.

use crate::errors::UpdateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Row 1 of the sheet holds the column titles.
pub const HEADER_ROW: u32 = 1;

/// Student 0 lives on the row right after the header.
pub const FIRST_STUDENT_ROW: u32 = HEADER_ROW + 1;

/// Largest supported class size; keeps every student row addressable.
pub const MAX_STUDENTS_LIMIT: u32 = 100_000;

/// Sole mutable field per student row.
pub type AttendanceCount = u64;

/// Index of a student row, always below the configured maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct StudentId(u32);

impl StudentId {
    /// Validate `raw` against `max` (capped at [`MAX_STUDENTS_LIMIT`]).
    /// Out of range values are rejected, never clamped.
    pub fn checked(raw: i64, max: u32) -> Result<Self, UpdateError> {
        let max = max.min(MAX_STUDENTS_LIMIT);
        if raw < 0 || raw >= i64::from(max) {
            return Err(UpdateError::InvalidStudent { id: raw, max });
        }
        Ok(Self(raw as u32))
    }

    /// Sheet row holding this student (1-based).
    pub fn row(&self) -> u32 {
        self.0 + FIRST_STUDENT_ROW
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the name table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub last_name: String,
    pub first_name: String,
}

impl Student {
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A student row as read back from the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub id: u32,
    pub last_name: String,
    pub first_name: String,
    pub attendance: AttendanceCount,
}
