//! Card reader abstraction and a scripted implementation.
//!
//! A script lists one sample per poll:
//! - `0` or `-` → no card in the field
//! - `1` or `+` → card present and its serial negotiates
//! - `?` or `x` → card present but serial negotiation fails
//!
//! `TOKEN*N` repeats a sample N times and `#` starts a comment.

use crate::errors::{AppError, AppResult};

pub trait CardReader {
    /// Is a card currently in the field?
    fn is_card_present(&mut self) -> bool;

    /// True only if a card is present and its serial was fully read.
    fn read_card_serial(&mut self) -> bool;

    /// Halt the card and stop its crypto session so it can be selected again.
    fn release(&mut self);

    /// A finite reader (a script) has nothing left to report.
    fn exhausted(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    Absent,
    Readable,
    Unreadable,
}

impl Sample {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "0" | "-" => Some(Sample::Absent),
            "1" | "+" => Some(Sample::Readable),
            "?" | "x" | "X" => Some(Sample::Unreadable),
            _ => None,
        }
    }
}

/// Samples are kept run-length encoded, so `1*N` costs one entry
/// whatever `N` is.
#[derive(Debug, Default)]
pub struct ScriptedReader {
    runs: Vec<(Sample, usize)>,
    run: usize,
    taken: usize,
    current: Option<Sample>,
    releases: usize,
}

impl ScriptedReader {
    pub fn new(samples: Vec<Sample>) -> Self {
        let mut reader = Self::default();
        for sample in samples {
            reader.push(sample, 1);
        }
        reader
    }

    fn push(&mut self, sample: Sample, times: usize) {
        if times == 0 {
            return;
        }
        match self.runs.last_mut() {
            Some((last, n)) if *last == sample => *n = n.saturating_add(times),
            _ => self.runs.push((sample, times)),
        }
    }

    pub fn parse(script: &str) -> AppResult<Self> {
        let mut reader = Self::default();

        for (idx, line) in script.lines().enumerate() {
            let content = line.split('#').next().unwrap_or("");

            for token in content.split_whitespace() {
                let bad = || AppError::ReaderScript {
                    token: token.to_string(),
                    line: idx + 1,
                };

                let (sample_tok, times) = match token.split_once('*') {
                    Some((t, n)) => (t, n.parse::<usize>().map_err(|_| bad())?),
                    None => (token, 1),
                };

                let sample = Sample::from_token(sample_tok).ok_or_else(bad)?;
                reader.push(sample, times);
            }
        }

        Ok(reader)
    }

    /// How many times the card was released.
    pub fn releases(&self) -> usize {
        self.releases
    }

    /// Samples not yet polled, saturating at `usize::MAX`.
    pub fn remaining(&self) -> usize {
        self.runs[self.run.min(self.runs.len())..]
            .iter()
            .fold(0usize, |acc, (_, n)| acc.saturating_add(*n))
            .saturating_sub(self.taken)
    }

    fn next_sample(&mut self) -> Option<Sample> {
        let (sample, n) = *self.runs.get(self.run)?;
        self.taken += 1;
        if self.taken >= n {
            self.run += 1;
            self.taken = 0;
        }
        Some(sample)
    }
}

impl CardReader for ScriptedReader {
    fn is_card_present(&mut self) -> bool {
        self.current = self.next_sample();
        matches!(self.current, Some(Sample::Readable | Sample::Unreadable))
    }

    fn read_card_serial(&mut self) -> bool {
        matches!(self.current, Some(Sample::Readable))
    }

    fn release(&mut self) {
        self.releases += 1;
    }

    fn exhausted(&self) -> bool {
        self.run >= self.runs.len()
    }
}
