use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::{AttendanceLogic, Reporter};
use crate::core::roster;
use crate::errors::AppResult;

/// Credit one attendance by hand, as if the card had just been read.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan { student } = cmd {
        let mut store = super::open_store(cfg)?;
        let students = roster::resolve(cfg.roster.as_deref(), cfg.max_students)?;
        let updater = super::updater(cfg);

        let journal = rusqlite::Connection::open(&cfg.database)?;
        let reporter = Reporter::new(&students, Some(&journal));

        AttendanceLogic::scan_once(&mut store, &updater, *student, &reporter)?;
    }

    Ok(())
}
