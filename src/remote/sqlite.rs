//! Row store kept in the local sheet database.

use crate::db::cells;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::address::SheetAddress;
use crate::remote::grid;
use crate::remote::{Row, RowStore};

pub struct SqliteSheetStore {
    pool: DbPool,
}

impl SqliteSheetStore {
    /// Open the database at `path`, applying pending migrations.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl RowStore for SqliteSheetStore {
    fn get(&mut self, address: &SheetAddress) -> AppResult<Vec<Row>> {
        let cells = cells::load_range(&self.pool.conn, &address.sheet_id, &address.range)?;
        Ok(grid::extract(&cells, &address.range))
    }

    fn append(&mut self, address: &SheetAddress, rows: &[Row]) -> AppResult<()> {
        let existing = cells::load_range(&self.pool.conn, &address.sheet_id, &address.range)?;
        let start = grid::next_append_row(&existing, &address.range);
        let placed = grid::place(&address.range, start, rows)?;

        cells::write_cells(
            &mut self.pool.conn,
            &address.sheet_id,
            &address.range.sheet,
            &placed,
        )
    }

    fn update(&mut self, address: &SheetAddress, rows: &[Row]) -> AppResult<()> {
        let placed = grid::place(&address.range, address.range.first_row, rows)?;

        cells::write_cells(
            &mut self.pool.conn,
            &address.sheet_id,
            &address.range.sheet,
            &placed,
        )
    }

    fn clear(&mut self, address: &SheetAddress) -> AppResult<()> {
        cells::clear_range(&self.pool.conn, &address.sheet_id, &address.range)?;
        Ok(())
    }
}
