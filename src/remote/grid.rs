//! Range arithmetic shared by the row store backends.
//! Cells are keyed by `(row, col)`, both 1-based.

use crate::errors::{AppError, AppResult};
use crate::models::address::RangeExpr;
use crate::remote::Row;
use std::collections::BTreeMap;

pub type Cells = BTreeMap<(u32, u32), String>;

/// Cut the block covered by `range` out of `cells`.
///
/// Rows run from the range's first row down to the last row holding data;
/// trailing empty cells of each row are dropped.
pub fn extract(cells: &Cells, range: &RangeExpr) -> Vec<Row> {
    let inside: Vec<(&(u32, u32), &String)> = cells
        .iter()
        .filter(|((row, col), value)| !value.is_empty() && range.contains(*col, *row))
        .collect();

    let Some(last_row) = inside.iter().map(|((row, _), _)| *row).max() else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for row in range.first_row..=last_row {
        let mut values: Row = inside
            .iter()
            .filter(|((r, _), _)| *r == row)
            .fold(Vec::new(), |mut acc, ((_, col), value)| {
                let idx = (col - range.first_col) as usize;
                if acc.len() <= idx {
                    acc.resize(idx + 1, String::new());
                }
                acc[idx] = (*value).clone();
                acc
            });

        while values.last().is_some_and(|v| v.is_empty()) {
            values.pop();
        }
        rows.push(values);
    }

    rows
}

/// Row where an append into `range` starts.
pub fn next_append_row(cells: &Cells, range: &RangeExpr) -> u32 {
    cells
        .iter()
        .filter(|((row, col), value)| {
            !value.is_empty()
                && *row >= range.first_row
                && col >= &range.first_col
                && range.last_col.is_none_or(|c| *col <= c)
        })
        .map(|((row, _), _)| row + 1)
        .max()
        .unwrap_or(range.first_row)
}

/// Resolve `rows` written from (`first_row`, `range.first_col`) into
/// `(row, col, value)` triples, refusing values outside a bounded range.
pub fn place(range: &RangeExpr, first_row: u32, rows: &[Row]) -> AppResult<Vec<(u32, u32, String)>> {
    let mut out = Vec::new();

    for (r, values) in rows.iter().enumerate() {
        let row = first_row + r as u32;
        for (c, value) in values.iter().enumerate() {
            let col = range.first_col + c as u32;
            if range.last_col.is_some_and(|lc| col > lc) || range.last_row.is_some_and(|lr| row > lr)
            {
                return Err(AppError::Store(format!(
                    "{} values do not fit in range {range}",
                    rows.iter().map(Vec::len).sum::<usize>()
                )));
            }
            out.push((row, col, value.clone()));
        }
    }

    Ok(out)
}

/// Apply placed values: empty strings erase the cell.
pub fn apply(cells: &mut Cells, placed: Vec<(u32, u32, String)>) {
    for (row, col, value) in placed {
        if value.is_empty() {
            cells.remove(&(row, col));
        } else {
            cells.insert((row, col), value);
        }
    }
}

pub fn clear(cells: &mut Cells, range: &RangeExpr) {
    cells.retain(|(row, col), _| !range.contains(*col, *row));
}
