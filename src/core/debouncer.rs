//! Card presence debouncer.
//!
//! Turns the polled "is a card in the field" flag into one `Arrived` per
//! physical insertion and one `Removed` per withdrawal.

use crate::models::card_event::CardEvent;

#[derive(Debug, Default)]
pub struct PresenceDebouncer {
    card_present: bool,
}

impl PresenceDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card_present(&self) -> bool {
        self.card_present
    }

    /// Feed one poll result.
    ///
    /// `read_serial` is only called when a card shows up while none is
    /// tracked. A card whose serial cannot be read leaves the state untouched
    /// and is retried on the next poll.
    pub fn poll<F>(&mut self, raw_present: bool, read_serial: F) -> Option<CardEvent>
    where
        F: FnOnce() -> bool,
    {
        match (self.card_present, raw_present) {
            (false, true) => {
                if read_serial() {
                    self.card_present = true;
                    Some(CardEvent::Arrived)
                } else {
                    None
                }
            }
            (true, false) => {
                self.card_present = false;
                Some(CardEvent::Removed)
            }
            _ => None,
        }
    }
}
