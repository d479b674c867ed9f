use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd {
        let store = super::open_store(cfg)?;
        if *print {
            LogLogic::print_log(store.pool())?;
        } else {
            LogLogic::print_summary(store.pool())?;
        }
    }

    Ok(())
}
