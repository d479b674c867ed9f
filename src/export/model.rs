// src/export/model.rs

use crate::models::student::{AttendanceCount, AttendanceRecord};
use serde::Serialize;

/// Flat export row, one per student.
#[derive(Serialize, Clone, Debug)]
pub struct AttendanceExport {
    pub id: u32,
    pub last_name: String,
    pub first_name: String,
    pub attendance: AttendanceCount,
    pub exported_at: String,
}

impl AttendanceExport {
    pub fn from_record(r: &AttendanceRecord, exported_at: &str) -> Self {
        Self {
            id: r.id,
            last_name: r.last_name.clone(),
            first_name: r.first_name.clone(),
            attendance: r.attendance,
            exported_at: exported_at.to_string(),
        }
    }
}

/// Column titles for CSV / XLSX.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["id", "last_name", "first_name", "attendance", "exported_at"]
}

pub(crate) fn export_to_row(e: &AttendanceExport) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.last_name.clone(),
        e.first_name.clone(),
        e.attendance.to_string(),
        e.exported_at.clone(),
    ]
}
