pub mod cells;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
