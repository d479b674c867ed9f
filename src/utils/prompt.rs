//! Interactive yes/no confirmation.

use crate::errors::{AppError, AppResult};
use std::io::{self, Write};

/// Ask `question` on stdout; only `y` / `yes` count as consent.
pub fn confirm(question: &str) -> AppResult<bool> {
    print!("{question} [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(AppError::from)?;
    let ans = answer.trim().to_ascii_lowercase();

    Ok(ans == "y" || ans == "yes")
}
