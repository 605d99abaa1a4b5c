use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::time::{TimeOfDay, TimeParseError};

/// Inclusive range of minutes during which a provider takes appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkingInterval {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl WorkingInterval {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, DirectoryError> {
        if start > end {
            return Err(DirectoryError::InvertedInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn contains(&self, t: TimeOfDay) -> bool {
        self.start <= t && t <= self.end
    }

    fn overlaps(&self, other: &WorkingInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provider {
    name: String,
    intervals: Vec<WorkingInterval>,
}

impl Provider {
    /// Intervals are stored sorted by start; overlapping intervals are rejected.
    pub fn new(
        name: impl Into<String>,
        mut intervals: Vec<WorkingInterval>,
    ) -> Result<Self, DirectoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DirectoryError::EmptyProviderName);
        }
        if intervals.is_empty() {
            return Err(DirectoryError::NoIntervals(name));
        }

        intervals.sort_by_key(|interval| interval.start);
        for pair in intervals.windows(2) {
            if pair[0].overlaps(&pair[1]) {
                return Err(DirectoryError::OverlappingIntervals {
                    provider: name,
                    first: pair[0].start,
                    second: pair[1].start,
                });
            }
        }

        Ok(Self { name, intervals })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn intervals(&self) -> &[WorkingInterval] {
        &self.intervals
    }

    pub fn is_working(&self, t: TimeOfDay) -> bool {
        self.intervals.iter().any(|interval| interval.contains(t))
    }
}

/// One provider as written in a roster file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRosterEntry {
    pub name: String,
    pub intervals: Vec<IntervalRosterEntry>,
}

/// Interval endpoints are raw time strings and go through the time parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalRosterEntry {
    pub start: String,
    pub end: String,
}

impl IntervalRosterEntry {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

impl ProviderRosterEntry {
    pub fn new(name: &str, intervals: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            intervals: intervals
                .iter()
                .map(|(start, end)| IntervalRosterEntry::new(start, end))
                .collect(),
        }
    }

    pub fn into_provider(self) -> Result<Provider, DirectoryError> {
        let intervals = self
            .intervals
            .iter()
            .map(|entry| {
                WorkingInterval::new(TimeOfDay::parse(&entry.start)?, TimeOfDay::parse(&entry.end)?)
            })
            .collect::<Result<Vec<_>, DirectoryError>>()?;
        Provider::new(self.name, intervals)
    }
}

/// Schedule the clinic runs with when no roster file is configured.
pub fn default_roster() -> Vec<ProviderRosterEntry> {
    vec![
        ProviderRosterEntry::new("Dr. Owen", &[("9:00", "11:59"), ("13:00", "16:59")]),
        ProviderRosterEntry::new("Dr. Escalona", &[("8:00", "11:59"), ("13:00", "15:59")]),
        ProviderRosterEntry::new("Dr. Crishen", &[("10:00", "13:59")]),
        ProviderRosterEntry::new("Dr. Pizzaro", &[("9:00", "10:59"), ("14:00", "17:59")]),
        ProviderRosterEntry::new("Dr. Punay", &[("8:00", "11:59"), ("12:30", "14:59")]),
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderResponse {
    pub name: String,
    pub intervals: Vec<WorkingInterval>,
}

impl From<&Provider> for ProviderResponse {
    fn from(provider: &Provider) -> Self {
        Self {
            name: provider.name.clone(),
            intervals: provider.intervals.clone(),
        }
    }
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Provider name cannot be empty")]
    EmptyProviderName,

    #[error("Provider {0} has no working intervals")]
    NoIntervals(String),

    #[error("Provider {0} is listed more than once")]
    DuplicateProvider(String),

    #[error("Working interval starts at {start} but ends at {end}")]
    InvertedInterval { start: TimeOfDay, end: TimeOfDay },

    #[error("Provider {provider} has overlapping intervals starting at {first} and {second}")]
    OverlappingIntervals {
        provider: String,
        first: TimeOfDay,
        second: TimeOfDay,
    },

    #[error("Invalid roster time: {0}")]
    InvalidTime(#[from] TimeParseError),

    #[error("Failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse roster file: {0}")]
    Json(#[from] serde_json::Error),
}
