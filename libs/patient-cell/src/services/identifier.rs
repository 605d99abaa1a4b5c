// libs/patient-cell/src/services/identifier.rs
use std::collections::HashSet;
use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use shared_config::AppConfig;

use crate::models::IdentifierError;

/// Hands out numeric identifiers from a fixed range.
///
/// Zero is never issued: booking requests use it to mean "most recent patient",
/// so a range starting at 0 is narrowed to start at 1.
///
/// Random probing first; once the probe budget is spent, a linear scan from the
/// bottom of the range finds any value still free.
#[derive(Debug)]
pub struct IdentifierGenerator {
    range: RangeInclusive<u32>,
    max_probes: u32,
    rng: StdRng,
}

impl IdentifierGenerator {
    pub fn new(range: RangeInclusive<u32>, max_probes: u32) -> Self {
        Self {
            range: issuable(range),
            max_probes,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.patient_id_min..=config.patient_id_max,
            config.patient_id_probe_attempts,
        )
    }

    /// Deterministic sequence for tests.
    pub fn with_seed(range: RangeInclusive<u32>, max_probes: u32, seed: u64) -> Self {
        Self {
            range: issuable(range),
            max_probes,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn range(&self) -> &RangeInclusive<u32> {
        &self.range
    }

    pub fn capacity(&self) -> u64 {
        if self.range.is_empty() {
            0
        } else {
            u64::from(*self.range.end() - *self.range.start()) + 1
        }
    }

    pub fn next(&mut self, existing: &HashSet<u32>) -> Result<u32, IdentifierError> {
        let exhausted = IdentifierError::Exhausted {
            min: *self.range.start(),
            max: *self.range.end(),
        };

        let in_use = existing.iter().filter(|id| self.range.contains(*id)).count() as u64;
        if in_use >= self.capacity() {
            return Err(exhausted);
        }

        for _ in 0..self.max_probes {
            let candidate = self.rng.gen_range(self.range.clone());
            if !existing.contains(&candidate) {
                return Ok(candidate);
            }
        }

        warn!(
            "No free identifier after {} random probes ({} of {} in use), scanning range",
            self.max_probes,
            in_use,
            self.capacity()
        );

        let found = self.range.clone().find(|candidate| !existing.contains(candidate));
        debug!("Linear scan produced identifier {:?}", found);
        found.ok_or(exhausted)
    }
}

fn issuable(range: RangeInclusive<u32>) -> RangeInclusive<u32> {
    let (start, end) = range.into_inner();
    if start == 0 {
        warn!("Identifier range starts at 0, issuing from 1 instead");
    }
    start.max(1)..=end
}
