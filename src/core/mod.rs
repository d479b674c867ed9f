pub mod attendance;
pub mod backup;
pub mod config;
pub mod debouncer;
pub mod log;
pub mod resolver;
pub mod roster;
pub mod session;
pub mod sheet;
pub mod updater;
