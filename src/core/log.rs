use crate::db::log::count_operation;
use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;

fn strip_ansi(re: &Regex, s: &str) -> String {
    re.replace_all(s, "").into_owned()
}

/// Colour of each journal operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "credit" => Colour::Green,
        "write_failed" | "invalid_student" | "overflow" => Colour::Red,
        "removal" => Colour::Cyan,
        "link_up" | "link_down" => Colour::Yellow,
        "reset" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// One line per journal topic: schema version and scan activity.
    pub fn print_summary(pool: &DbPool) -> AppResult<()> {
        let versions = applied_versions(&pool.conn)?;
        match versions.last() {
            Some(latest) => println!("🗄️  Schema     : {} migrations (latest {})", versions.len(), latest),
            None => println!("🗄️  Schema     : no migrations recorded"),
        }

        let credits = count_operation(&pool.conn, "credit")?;
        let failed = count_operation(&pool.conn, "write_failed")?
            + count_operation(&pool.conn, "invalid_student")?
            + count_operation(&pool.conn, "overflow")?;
        let resets = count_operation(&pool.conn, "reset")?;

        println!("✅ Credits    : {}", credits);
        println!("❌ Rejected   : {}", failed);
        println!("🔄 Resets     : {}", resets);
        Ok(())
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let re = Regex::new(r"\x1B\[[0-9;]*[mK]").map_err(|e| {
            crate::errors::AppError::Other(format!("ANSI pattern: {e}"))
        })?;

        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let raw_date: String = row.get(1)?;
            let operation: String = row.get(2)?;
            let target: Option<String> = row.get(3)?;
            let message: String = row.get(4)?;

            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok((id, date, operation, target.unwrap_or_default(), message))
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(10);

        let op_w = entries
            .iter()
            .map(|(_, _, op, target, _)| {
                let extra = if target.is_empty() { 0 } else { target.chars().count() + 3 };
                op.chars().count() + extra
            })
            .max()
            .unwrap_or(10)
            .min(60);

        println!("📜 Internal log:\n");

        for (id, date, operation, target, message) in entries {
            let color = color_for_operation(&operation);

            let mut op_target = color.paint(operation.as_str()).to_string();
            if !target.is_empty() {
                op_target.push_str(&format!(" ({target})"));
            }

            // Truncate on visible width; only the operation keeps its colour.
            let visible = strip_ansi(&re, &op_target);
            let shown = if visible.chars().count() > 60 {
                let cut: String = visible.chars().take(57).collect();
                match cut.split_once(' ') {
                    Some((op, rest)) => format!("{} {}...", color.paint(op), rest),
                    None => format!("{}...", color.paint(cut.as_str())),
                }
            } else {
                op_target
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&re, &shown).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                shown,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
