// src/models/address.rs

use crate::errors::{AppError, AppResult};
use std::fmt;

/// A1-notation range inside one sheet.
///
/// Supported forms:
/// - `Sheet`          → whole sheet
/// - `Sheet!C4`       → single cell
/// - `Sheet!A1:C6`    → bounded block
/// - `Sheet!A:C`      → whole columns
///
/// Columns and rows are 1-based; `None` bounds are open-ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeExpr {
    pub sheet: String,
    pub first_col: u32,
    pub last_col: Option<u32>,
    pub first_row: u32,
    pub last_row: Option<u32>,
}

impl RangeExpr {
    pub fn whole_sheet(sheet: &str) -> Self {
        Self {
            sheet: sheet.to_string(),
            first_col: 1,
            last_col: None,
            first_row: 1,
            last_row: None,
        }
    }

    pub fn cell(sheet: &str, col: u32, row: u32) -> Self {
        Self::block(sheet, col, row, col, row)
    }

    pub fn block(sheet: &str, first_col: u32, first_row: u32, last_col: u32, last_row: u32) -> Self {
        Self {
            sheet: sheet.to_string(),
            first_col,
            last_col: Some(last_col),
            first_row,
            last_row: Some(last_row),
        }
    }

    pub fn columns(sheet: &str, first_col: u32, last_col: u32) -> Self {
        Self {
            sheet: sheet.to_string(),
            first_col,
            last_col: Some(last_col),
            first_row: 1,
            last_row: None,
        }
    }

    pub fn contains(&self, col: u32, row: u32) -> bool {
        col >= self.first_col
            && self.last_col.is_none_or(|c| col <= c)
            && row >= self.first_row
            && self.last_row.is_none_or(|r| row <= r)
    }

    /// Parse an A1 expression such as `Sheet1!A2:C6`.
    pub fn parse(expr: &str) -> AppResult<Self> {
        let invalid = || AppError::InvalidRange(expr.to_string());
        let expr_trim = expr.trim();

        let Some((sheet, cells)) = expr_trim.split_once('!') else {
            if expr_trim.is_empty() {
                return Err(invalid());
            }
            return Ok(Self::whole_sheet(expr_trim));
        };

        if sheet.is_empty() || cells.is_empty() {
            return Err(invalid());
        }

        match cells.split_once(':') {
            None => {
                let (col, row) = parse_cell_ref(cells).ok_or_else(invalid)?;
                let row = row.ok_or_else(invalid)?;
                Ok(Self::cell(sheet, col, row))
            }
            Some((start, end)) => {
                let (c1, r1) = parse_cell_ref(start).ok_or_else(invalid)?;
                let (c2, r2) = parse_cell_ref(end).ok_or_else(invalid)?;

                if c1 > c2 {
                    return Err(invalid());
                }

                match (r1, r2) {
                    (Some(r1), Some(r2)) if r1 <= r2 => Ok(Self::block(sheet, c1, r1, c2, r2)),
                    (None, None) => Ok(Self::columns(sheet, c1, c2)),
                    _ => Err(invalid()),
                }
            }
        }
    }
}

impl fmt::Display for RangeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.last_col, self.last_row) {
            (None, _) => write!(f, "{}", self.sheet),
            (Some(lc), None) => write!(
                f,
                "{}!{}:{}",
                self.sheet,
                column_letters(self.first_col),
                column_letters(lc)
            ),
            (Some(lc), Some(lr)) if lc == self.first_col && lr == self.first_row => write!(
                f,
                "{}!{}{}",
                self.sheet,
                column_letters(self.first_col),
                self.first_row
            ),
            (Some(lc), Some(lr)) => write!(
                f,
                "{}!{}{}:{}{}",
                self.sheet,
                column_letters(self.first_col),
                self.first_row,
                column_letters(lc),
                lr
            ),
        }
    }
}

/// Full address of a range in the row store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetAddress {
    pub sheet_id: String,
    pub range: RangeExpr,
}

impl SheetAddress {
    pub fn new(sheet_id: &str, range: RangeExpr) -> Self {
        Self {
            sheet_id: sheet_id.to_string(),
            range,
        }
    }

    pub fn parse(sheet_id: &str, range: &str) -> AppResult<Self> {
        Ok(Self::new(sheet_id, RangeExpr::parse(range)?))
    }
}

impl fmt::Display for SheetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.sheet_id, self.range)
    }
}

/// 1 → "A", 26 → "Z", 27 → "AA".
pub fn column_letters(mut col: u32) -> String {
    let mut out = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        out.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// "C4" → (3, Some(4)), "C" → (3, None).
fn parse_cell_ref(s: &str) -> Option<(u32, Option<u32>)> {
    let s = s.trim();
    let split = s.find(|c: char| c.is_ascii_digit()).unwrap_or(s.len());
    let (letters, digits) = s.split_at(split);

    if letters.is_empty() || letters.len() > 3 {
        return None;
    }

    let mut col: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        col = col * 26 + (ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }

    if digits.is_empty() {
        return Some((col, None));
    }

    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((col, Some(row)))
}
