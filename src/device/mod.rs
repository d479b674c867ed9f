//! Hardware-facing collaborators of the scan loop: the card reader and the
//! connectivity gate.

pub mod connectivity;
pub mod reader;

pub use connectivity::{AlwaysReady, Connectivity, DatabaseLink};
pub use reader::{CardReader, Sample, ScriptedReader};
