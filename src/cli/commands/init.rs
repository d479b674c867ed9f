use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::roster;
use crate::db::log::ttlog_soft;
use crate::errors::AppResult;
use crate::remote::SqliteSheetStore;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (not in test mode)
///  - the sheet database and its migrations
///  - the attendance sheet: header plus one zeroed row per student
pub fn handle(cli: &Cli, force: bool) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.config.as_deref(), cli.test)?;

    println!("⚙️  Initializing rattendance…");
    println!("🗄️  Database   : {}", &cfg.database);
    println!("📋 Sheet      : {} / {}", &cfg.sheet_id, &cfg.sheet_name);

    let mut store = SqliteSheetStore::open(&cfg.database)?;
    let layout = super::layout(&cfg);

    if layout.header(&mut store)?.is_some() && !force {
        info("Sheet already prepared, attendance kept (use --force to re-seed).");
        return Ok(());
    }

    let students = roster::resolve(cfg.roster.as_deref(), cfg.max_students)?;
    layout.prepare(&mut store, &students)?;

    success(format!("Sheet seeded with {} students.", students.len()));

    ttlog_soft(
        &store.pool().conn,
        "init",
        &cfg.sheet_id,
        &format!("Sheet seeded with {} students", students.len()),
    );

    println!("🎉 rattendance initialization completed!");
    Ok(())
}
