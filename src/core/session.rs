//! The scan loop.
//!
//! One session owns every collaborator: reader, connectivity gate, row store,
//! debouncer, resolver and updater. Each cycle checks the gate, polls the
//! reader, feeds the debouncer and, on arrival, credits one student.

use crate::core::debouncer::PresenceDebouncer;
use crate::core::resolver::StudentResolver;
use crate::core::updater::AttendanceUpdater;
use crate::device::{CardReader, Connectivity};
use crate::errors::UpdateError;
use crate::models::card_event::CardEvent;
use crate::models::student::AttendanceCount;
use crate::remote::RowStore;
use std::thread;
use std::time::Duration;

/// Fixed waits of the loop. There is no backoff growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub poll_interval: Duration,
    pub connect_retry: Duration,
    pub post_scan: Duration,
}

impl Timing {
    pub fn from_millis(poll_interval: u64, connect_retry: u64, post_scan: u64) -> Self {
        Self {
            poll_interval: Duration::from_millis(poll_interval),
            connect_retry: Duration::from_millis(connect_retry),
            post_scan: Duration::from_millis(post_scan),
        }
    }

    /// No waiting at all (scripted runs, tests).
    pub fn immediate() -> Self {
        Self::from_millis(0, 0, 0)
    }
}

/// What one cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The gate just opened; polling starts next cycle.
    Connected,
    /// The gate is closed; nothing was polled.
    NotReady,
    Idle,
    Arrived {
        student: i64,
        result: Result<AttendanceCount, UpdateError>,
    },
    Removed,
}

/// Counters over a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub arrivals: u64,
    pub credited: u64,
    pub failed: u64,
    pub removals: u64,
    pub not_ready: u64,
}

impl RunSummary {
    fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::Arrived { result, .. } => {
                self.arrivals += 1;
                if result.is_ok() {
                    self.credited += 1;
                } else {
                    self.failed += 1;
                }
            }
            CycleOutcome::Removed => self.removals += 1,
            CycleOutcome::NotReady => self.not_ready += 1,
            CycleOutcome::Connected | CycleOutcome::Idle => {}
        }
    }
}

pub struct Session<R, C, S, P> {
    reader: R,
    link: C,
    store: S,
    resolver: P,
    debouncer: PresenceDebouncer,
    updater: AttendanceUpdater,
    timing: Timing,
    initialized: bool,
    link_up: bool,
}

impl<R, C, S, P> Session<R, C, S, P>
where
    R: CardReader,
    C: Connectivity,
    S: RowStore,
    P: StudentResolver,
{
    pub fn new(
        reader: R,
        link: C,
        store: S,
        resolver: P,
        updater: AttendanceUpdater,
        timing: Timing,
    ) -> Self {
        Self {
            reader,
            link,
            store,
            resolver,
            debouncer: PresenceDebouncer::new(),
            updater,
            timing,
            initialized: false,
            link_up: false,
        }
    }

    /// Has the gate ever opened?
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_parts(self) -> (R, C, S) {
        (self.reader, self.link, self.store)
    }

    /// Run one cycle without sleeping.
    pub fn step(&mut self) -> CycleOutcome {
        if !self.link.ready() {
            self.link_up = false;
            return CycleOutcome::NotReady;
        }

        if !self.link_up {
            self.link_up = true;
            self.initialized = true;
            return CycleOutcome::Connected;
        }

        let raw_present = self.reader.is_card_present();
        let reader = &mut self.reader;
        let event = self
            .debouncer
            .poll(raw_present, || reader.read_card_serial());

        match event {
            Some(CardEvent::Arrived) => {
                let student = self.resolver.resolve();
                let result = self.updater.increment(&mut self.store, student);
                self.reader.release();
                CycleOutcome::Arrived { student, result }
            }
            Some(CardEvent::Removed) => CycleOutcome::Removed,
            None => CycleOutcome::Idle,
        }
    }

    /// Wait that follows `outcome`.
    pub fn delay_after(&self, outcome: &CycleOutcome) -> Duration {
        match outcome {
            CycleOutcome::NotReady => self.timing.connect_retry,
            CycleOutcome::Arrived { .. } => self.timing.post_scan,
            _ => self.timing.poll_interval,
        }
    }

    /// Cycle until `limit` cycles ran or the reader has nothing left.
    /// `None` runs for as long as the reader produces samples.
    pub fn run<F>(&mut self, limit: Option<u64>, mut observer: F) -> RunSummary
    where
        F: FnMut(&CycleOutcome),
    {
        let mut summary = RunSummary::default();

        loop {
            if limit.is_some_and(|l| summary.cycles >= l) {
                break;
            }
            // A closed gate keeps the loop alive even with an empty script.
            if self.link_up && self.reader.exhausted() {
                break;
            }

            let outcome = self.step();
            summary.record(&outcome);
            observer(&outcome);

            let wait = self.delay_after(&outcome);
            if !wait.is_zero() {
                thread::sleep(wait);
            }
        }

        summary
    }
}
