//! The student name table.

use crate::errors::{AppError, AppResult};
use crate::models::student::Student;
use crate::utils::path::expand_tilde;

/// `Student 001`, `Student 002`, ... for sheets without a roster file.
pub fn placeholder(max_students: u32) -> Vec<Student> {
    (1..=max_students)
        .map(|n| Student::new(format!("{n:03}"), "Student"))
        .collect()
}

/// Load a roster CSV with a `last_name,first_name` header.
/// The file must list exactly `max_students` students.
pub fn load_csv(path: &str, max_students: u32) -> AppResult<Vec<Student>> {
    let resolved = expand_tilde(path);

    let mut rdr = csv::Reader::from_path(&resolved)
        .map_err(|e| AppError::Roster(format!("cannot open {}: {e}", resolved.display())))?;

    let mut students = Vec::new();
    for (line, rec) in rdr.deserialize::<Student>().enumerate() {
        let student =
            rec.map_err(|e| AppError::Roster(format!("record {}: {e}", line + 1)))?;
        students.push(student);
    }

    if students.len() != max_students as usize {
        return Err(AppError::Roster(format!(
            "{} lists {} students, max_students is {}",
            resolved.display(),
            students.len(),
            max_students
        )));
    }

    Ok(students)
}

/// Roster from the configured file, or placeholders when none is set.
pub fn resolve(path: Option<&str>, max_students: u32) -> AppResult<Vec<Student>> {
    match path {
        Some(p) if !p.trim().is_empty() => load_csv(p, max_students),
        _ => Ok(placeholder(max_students)),
    }
}
