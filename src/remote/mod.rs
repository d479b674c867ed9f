//! Remote row store: the spreadsheet-like service that keeps one row per
//! student. The core only talks to it through [`RowStore`].

pub mod grid;
pub mod memory;
pub mod sqlite;

use crate::errors::AppResult;
use crate::models::address::SheetAddress;

pub use memory::MemoryStore;
pub use sqlite::SqliteSheetStore;

/// One row of cell values, left to right.
pub type Row = Vec<String>;

pub trait RowStore {
    /// Rows of the range that hold data, trailing empty cells trimmed.
    fn get(&mut self, address: &SheetAddress) -> AppResult<Vec<Row>>;

    /// Write `rows` after the last non-empty row of the range's columns.
    fn append(&mut self, address: &SheetAddress, rows: &[Row]) -> AppResult<()>;

    /// Write `rows` starting at the range's top-left cell.
    fn update(&mut self, address: &SheetAddress, rows: &[Row]) -> AppResult<()>;

    /// Remove every value inside the range.
    fn clear(&mut self, address: &SheetAddress) -> AppResult<()>;
}

impl<S: RowStore + ?Sized> RowStore for &mut S {
    fn get(&mut self, address: &SheetAddress) -> AppResult<Vec<Row>> {
        (**self).get(address)
    }

    fn append(&mut self, address: &SheetAddress, rows: &[Row]) -> AppResult<()> {
        (**self).append(address, rows)
    }

    fn update(&mut self, address: &SheetAddress, rows: &[Row]) -> AppResult<()> {
        (**self).update(address, rows)
    }

    fn clear(&mut self, address: &SheetAddress) -> AppResult<()> {
        (**self).clear(address)
    }
}
