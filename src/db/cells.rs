//! SQL access to the `cells` table backing the sheet store.

use crate::errors::AppResult;
use crate::models::address::RangeExpr;
use crate::remote::grid::Cells;
use chrono::Local;
use rusqlite::{Connection, params};
use std::collections::HashMap;

/// Open upper bounds are sent to SQLite as this value.
const UNBOUNDED: i64 = i64::MAX;

fn bound(v: Option<u32>) -> i64 {
    v.map(i64::from).unwrap_or(UNBOUNDED)
}

/// Load every non-empty cell inside `range`.
pub fn load_range(conn: &Connection, sheet_id: &str, range: &RangeExpr) -> AppResult<Cells> {
    let mut stmt = conn.prepare_cached(
        "SELECT row, col, value FROM cells
         WHERE sheet_id = ?1 AND sheet = ?2
           AND row BETWEEN ?3 AND ?4
           AND col BETWEEN ?5 AND ?6
         ORDER BY row ASC, col ASC",
    )?;

    let rows = stmt.query_map(
        params![
            sheet_id,
            range.sheet,
            range.first_row,
            bound(range.last_row),
            range.first_col,
            bound(range.last_col)
        ],
        |row| {
            Ok((
                row.get::<_, u32>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, String>(2)?,
            ))
        },
    )?;

    let mut cells = Cells::new();
    for r in rows {
        let (row, col, value) = r?;
        cells.insert((row, col), value);
    }
    Ok(cells)
}

/// Write placed values in one transaction; empty values erase the cell.
pub fn write_cells(
    conn: &mut Connection,
    sheet_id: &str,
    sheet: &str,
    placed: &[(u32, u32, String)],
) -> AppResult<()> {
    let now = Local::now().to_rfc3339();
    let tx = conn.transaction()?;

    {
        let mut upsert = tx.prepare_cached(
            "INSERT INTO cells (sheet_id, sheet, row, col, value, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(sheet_id, sheet, row, col)
             DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )?;
        let mut delete = tx.prepare_cached(
            "DELETE FROM cells WHERE sheet_id = ?1 AND sheet = ?2 AND row = ?3 AND col = ?4",
        )?;

        for (row, col, value) in placed {
            if value.is_empty() {
                delete.execute(params![sheet_id, sheet, row, col])?;
            } else {
                upsert.execute(params![sheet_id, sheet, row, col, value, now])?;
            }
        }
    }

    tx.commit()?;
    Ok(())
}

pub fn clear_range(conn: &Connection, sheet_id: &str, range: &RangeExpr) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM cells
         WHERE sheet_id = ?1 AND sheet = ?2
           AND row BETWEEN ?3 AND ?4
           AND col BETWEEN ?5 AND ?6",
        params![
            sheet_id,
            range.sheet,
            range.first_row,
            bound(range.last_row),
            range.first_col,
            bound(range.last_col)
        ],
    )?;
    Ok(n)
}

/// Last write time of every cell in one column, keyed by row.
pub fn updated_at_by_row(
    conn: &Connection,
    sheet_id: &str,
    sheet: &str,
    col: u32,
) -> AppResult<HashMap<u32, String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT row, updated_at FROM cells
         WHERE sheet_id = ?1 AND sheet = ?2 AND col = ?3",
    )?;

    let rows = stmt.query_map(params![sheet_id, sheet, col], |row| {
        Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut out = HashMap::new();
    for r in rows {
        let (row, at) = r?;
        out.insert(row, at);
    }
    Ok(out)
}
