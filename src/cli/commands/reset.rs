use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::AttendanceLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use crate::utils::prompt::confirm;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Reset { force } = cmd {
        let mut store = super::open_store(cfg)?;

        if !*force {
            warning(format!(
                "This sets the attendance of all {} students to 0.",
                cfg.max_students
            ));
            if !confirm("Continue?")? {
                info("Reset cancelled.");
                return Ok(());
            }
        }

        let journal = rusqlite::Connection::open(&cfg.database)?;
        AttendanceLogic::reset(
            &mut store,
            &super::layout(cfg),
            cfg.max_students,
            Some(&journal),
        )?;
    }

    Ok(())
}
