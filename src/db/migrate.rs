use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Schema steps, applied in order. Each one is recorded in `log` once done.
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250110_0001_create_cells",
        "Created cells table",
        r#"
        CREATE TABLE IF NOT EXISTS cells (
            sheet_id  TEXT NOT NULL,
            sheet     TEXT NOT NULL,
            row       INTEGER NOT NULL CHECK(row >= 1),
            col       INTEGER NOT NULL CHECK(col >= 1),
            value     TEXT NOT NULL,
            PRIMARY KEY (sheet_id, sheet, row, col)
        );
        "#,
    ),
    (
        "20250124_0002_cells_updated_at",
        "Added updated_at to cells",
        r#"
        ALTER TABLE cells ADD COLUMN updated_at TEXT NOT NULL DEFAULT '';
        "#,
    ),
    (
        "20250207_0003_cells_column_index",
        "Added column index on cells",
        r#"
        CREATE INDEX IF NOT EXISTS idx_cells_sheet_col ON cells(sheet_id, sheet, col, row);
        "#,
    ),
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already recorded in the journal, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}

/// Public entry point: run all pending migrations.
///
/// Called by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for &(version, description, sql) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        conn.execute_batch(&format!("BEGIN;\n{sql}\nCOMMIT;"))
            .inspect_err(|_| {
                let _ = conn.execute_batch("ROLLBACK;");
            })?;

        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            params![version, description],
        )?;

        success(format!("Migration applied: {} → {}", version, description));
    }

    Ok(())
}
