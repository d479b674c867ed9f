use std::path::PathBuf;

/// Precondition gate checked before any remote operation.
pub trait Connectivity {
    fn ready(&mut self) -> bool;
}

/// Ready whenever the sheet database file can be reached.
pub struct DatabaseLink {
    path: PathBuf,
}

impl DatabaseLink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Connectivity for DatabaseLink {
    fn ready(&mut self) -> bool {
        self.path.is_file()
    }
}

/// Link without a physical endpoint (in-memory dry runs).
pub struct AlwaysReady;

impl Connectivity for AlwaysReady {
    fn ready(&mut self) -> bool {
        true
    }
}
