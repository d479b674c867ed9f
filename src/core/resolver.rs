//! Picks the student credited for a card event.
//!
//! The card serial is not mapped to anyone: every arrival draws a student
//! uniformly from `[0, max)`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait StudentResolver {
    /// Raw id for the next arrival; validated by the updater.
    fn resolve(&mut self) -> i64;
}

pub struct RandomResolver {
    rng: StdRng,
    max_students: u32,
}

impl RandomResolver {
    pub fn new(max_students: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self { rng, max_students }
    }
}

impl StudentResolver for RandomResolver {
    fn resolve(&mut self) -> i64 {
        if self.max_students == 0 {
            return 0;
        }
        i64::from(self.rng.random_range(0..self.max_students))
    }
}

/// Always credits the same student.
pub struct FixedResolver(pub i64);

impl StudentResolver for FixedResolver {
    fn resolve(&mut self) -> i64 {
        self.0
    }
}

impl<T: StudentResolver + ?Sized> StudentResolver for Box<T> {
    fn resolve(&mut self) -> i64 {
        (**self).resolve()
    }
}
