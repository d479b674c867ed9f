use crate::config::Config;
use crate::core::attendance::AttendanceLogic;
use crate::errors::AppResult;
use rusqlite::Connection;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut store = super::open_store(cfg)?;
    let conn = Connection::open(&cfg.database)?;

    AttendanceLogic::show(
        &mut store,
        &super::layout(cfg),
        cfg.max_students,
        Some((&conn, &cfg.sheet_id, &cfg.sheet_name)),
    )?;

    Ok(())
}
