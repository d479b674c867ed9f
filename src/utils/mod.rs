pub mod path;
pub mod table;
pub mod prompt;
