use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let mut store = super::open_store(cfg)?;
        ExportLogic::export(
            &mut store,
            &super::layout(cfg),
            cfg.max_students,
            &cfg.sheet_name,
            *format,
            file,
            *force,
        )?;
    }
    Ok(())
}
