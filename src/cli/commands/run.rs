use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::{AttendanceLogic, Reporter};
use crate::core::resolver::{FixedResolver, RandomResolver, StudentResolver};
use crate::core::roster;
use crate::core::session::{RunSummary, Session, Timing};
use crate::device::{AlwaysReady, Connectivity, DatabaseLink, ScriptedReader};
use crate::errors::AppResult;
use crate::models::student::Student;
use crate::remote::{MemoryStore, RowStore};
use crate::ui::messages::{header, info};
use crate::utils::path::expand_tilde;
use rusqlite::Connection;
use std::fs;
use std::io::{self, Read};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Run {
        script,
        cycles,
        student,
        dry_run,
        no_wait,
    } = cmd
    {
        let text = if script == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            fs::read_to_string(expand_tilde(script))?
        };
        let reader = ScriptedReader::parse(&text)?;

        let students = roster::resolve(cfg.roster.as_deref(), cfg.max_students)?;
        let timing = if *no_wait {
            Timing::immediate()
        } else {
            super::timing(cfg)
        };
        let resolver: Box<dyn StudentResolver> = match student {
            Some(id) => Box::new(FixedResolver(*id)),
            None => Box::new(RandomResolver::new(cfg.max_students, cfg.seed)),
        };

        header(format!("Scanning into {} / {}", cfg.sheet_id, cfg.sheet_name));

        if *dry_run {
            let mut store = MemoryStore::new();
            super::layout(cfg).prepare(&mut store, &students)?;

            let (summary, mut store) =
                drive(reader, AlwaysReady, store, resolver, cfg, timing, *cycles, &students, None);
            print_summary(&summary);

            info("Dry run: nothing was written to the sheet database.");
            AttendanceLogic::show(&mut store, &super::layout(cfg), cfg.max_students, None)?;
        } else {
            let store = super::open_store(cfg)?;
            let journal = Connection::open(&cfg.database)?;

            let (summary, _) = drive(
                reader,
                DatabaseLink::new(&cfg.database),
                store,
                resolver,
                cfg,
                timing,
                *cycles,
                &students,
                Some(&journal),
            );
            print_summary(&summary);
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn drive<C, S, P>(
    reader: ScriptedReader,
    link: C,
    store: S,
    resolver: P,
    cfg: &Config,
    timing: Timing,
    cycles: Option<u64>,
    students: &[Student],
    journal: Option<&Connection>,
) -> (RunSummary, S)
where
    C: Connectivity,
    S: RowStore,
    P: StudentResolver,
{
    let mut session = Session::new(reader, link, store, resolver, super::updater(cfg), timing);
    let mut reporter = Reporter::new(students, journal);

    let summary = session.run(cycles, |outcome| reporter.observe(outcome));

    let (_, _, store) = session.into_parts();
    (summary, store)
}

fn print_summary(summary: &RunSummary) {
    info(format!(
        "{} cycles, {} arrivals ({} credited, {} failed), {} removals",
        summary.cycles, summary.arrivals, summary.credited, summary.failed, summary.removals
    ));
}
