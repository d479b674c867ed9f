use serde::Serialize;

/// A debounced transition in physical card presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardEvent {
    Arrived,
    Removed,
}
