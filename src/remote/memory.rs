//! In-memory row store used for dry runs and tests.
//! Reads and writes can be made to fail to exercise the error paths.

use crate::errors::{AppError, AppResult};
use crate::models::address::SheetAddress;
use crate::remote::grid::{self, Cells};
use crate::remote::{Row, RowStore};
use std::collections::HashMap;

/// Number of requests received, per operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestCounts {
    pub gets: usize,
    pub appends: usize,
    pub updates: usize,
    pub clears: usize,
}

impl RequestCounts {
    pub fn total(&self) -> usize {
        self.gets + self.appends + self.updates + self.clears
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    sheets: HashMap<(String, String), Cells>,
    fail_reads: bool,
    fail_writes: bool,
    requests: RequestCounts,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `get` fails from now on.
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Every `append` / `update` / `clear` fails from now on.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn requests(&self) -> RequestCounts {
        self.requests
    }

    fn cells_mut(&mut self, address: &SheetAddress) -> &mut Cells {
        self.sheets
            .entry((address.sheet_id.clone(), address.range.sheet.clone()))
            .or_default()
    }

    fn check_write(&self, address: &SheetAddress) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::Store(format!("write to {address} rejected")));
        }
        Ok(())
    }
}

impl RowStore for MemoryStore {
    fn get(&mut self, address: &SheetAddress) -> AppResult<Vec<Row>> {
        self.requests.gets += 1;
        if self.fail_reads {
            return Err(AppError::Store(format!("read of {address} rejected")));
        }

        Ok(self
            .sheets
            .get(&(address.sheet_id.clone(), address.range.sheet.clone()))
            .map(|cells| grid::extract(cells, &address.range))
            .unwrap_or_default())
    }

    fn append(&mut self, address: &SheetAddress, rows: &[Row]) -> AppResult<()> {
        self.requests.appends += 1;
        self.check_write(address)?;

        let cells = self.cells_mut(address);
        let start = grid::next_append_row(cells, &address.range);
        let placed = grid::place(&address.range, start, rows)?;
        grid::apply(cells, placed);
        Ok(())
    }

    fn update(&mut self, address: &SheetAddress, rows: &[Row]) -> AppResult<()> {
        self.requests.updates += 1;
        self.check_write(address)?;

        let placed = grid::place(&address.range, address.range.first_row, rows)?;
        grid::apply(self.cells_mut(address), placed);
        Ok(())
    }

    fn clear(&mut self, address: &SheetAddress) -> AppResult<()> {
        self.requests.clears += 1;
        self.check_write(address)?;

        grid::clear(self.cells_mut(address), &address.range);
        Ok(())
    }
}
