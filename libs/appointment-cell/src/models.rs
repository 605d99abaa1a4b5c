// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use patient_cell::models::PatientError;
use shared_models::error::AppError;
use shared_models::time::{TimeOfDay, TimeParseError, ACCEPTED_TIME_FORMATS};

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A confirmed booking. `provider` is the directory key, never a copy of the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub patient_id: u32,
    pub time: TimeOfDay,
    pub provider: String,
}

impl Appointment {
    pub fn new(patient_id: u32, time: TimeOfDay, provider: impl Into<String>) -> Self {
        Self {
            patient_id,
            time,
            provider: provider.into(),
        }
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patient {} with {} at {}",
            self.patient_id,
            self.provider,
            self.time.to_12_hour_string()
        )
    }
}

/// How the caller picks among the available providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderChoice {
    FirstAvailable,
    /// 1-based position in the candidate list.
    Position(usize),
}

impl From<usize> for ProviderChoice {
    fn from(value: usize) -> Self {
        match value {
            0 => ProviderChoice::FirstAvailable,
            n => ProviderChoice::Position(n),
        }
    }
}

impl ProviderChoice {
    pub fn select<'a>(self, candidates: &[&'a str]) -> Result<&'a str, AppointmentError> {
        let (choice, index) = match self {
            ProviderChoice::FirstAvailable => (0, Some(0)),
            ProviderChoice::Position(n) => (n, n.checked_sub(1)),
        };

        index
            .and_then(|i| candidates.get(i))
            .copied()
            .ok_or(AppointmentError::InvalidSelection {
                choice,
                available: candidates.len(),
            })
    }
}

// ==============================================================================
// REQUEST / RESPONSE DTOs
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    /// Missing or 0 selects the most recently registered patient.
    pub patient_id: Option<u32>,
    pub time: String,
    /// Missing or 0 auto-assigns the first available provider.
    pub provider_choice: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    pub provider: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub time: TimeOfDay,
    pub display_time: String,
    pub providers: Vec<String>,
}

/// Appointment joined with the patient's name for schedule listings.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledAppointment {
    pub patient_id: u32,
    pub patient_name: String,
    pub time: TimeOfDay,
    pub display_time: String,
    pub provider: String,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppointmentError {
    #[error("Invalid appointment time: {0}")]
    InvalidTime(#[from] TimeParseError),

    #[error("There are no doctors available at {time}")]
    NoProviderAvailable { time: TimeOfDay },

    #[error("Invalid doctor selection {choice}: {available} doctors available")]
    InvalidSelection { choice: usize, available: usize },

    #[error("Patient ID {0} not found")]
    PatientNotFound(u32),

    #[error("No patients in the system to select")]
    NoPatients,

    #[error("No appointment with {provider} at {time}")]
    NotFound { provider: String, time: TimeOfDay },

    #[error(transparent)]
    Patient(#[from] PatientError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::InvalidTime(e) => {
                AppError::BadRequest(format!("Invalid time format ({}): {}", e, ACCEPTED_TIME_FORMATS))
            }
            AppointmentError::NoProviderAvailable { .. } => AppError::Conflict(err.to_string()),
            AppointmentError::InvalidSelection { .. } => AppError::BadRequest(err.to_string()),
            AppointmentError::PatientNotFound(_)
            | AppointmentError::NoPatients
            | AppointmentError::NotFound { .. } => AppError::NotFound(err.to_string()),
            AppointmentError::Patient(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_choice_selection() {
        let candidates = ["Dr. Owen", "Dr. Crishen"];
        assert_eq!(ProviderChoice::from(0).select(&candidates), Ok("Dr. Owen"));
        assert_eq!(ProviderChoice::from(2).select(&candidates), Ok("Dr. Crishen"));
        assert_eq!(
            ProviderChoice::from(3).select(&candidates),
            Err(AppointmentError::InvalidSelection { choice: 3, available: 2 })
        );
        assert_eq!(
            ProviderChoice::FirstAvailable.select(&[]),
            Err(AppointmentError::InvalidSelection { choice: 0, available: 0 })
        );
    }

    #[test]
    fn test_error_mapping_to_http() {
        use axum::http::StatusCode;

        let bad_time: AppError = AppointmentError::from(TimeParseError::EmptyInput).into();
        assert_eq!(bad_time.status_code(), StatusCode::BAD_REQUEST);
        assert!(bad_time.to_string().contains("10:30 AM"));

        let full: AppError = AppointmentError::from(PatientError::IdentifierExhausted(
            patient_cell::models::IdentifierError::Exhausted { min: 1000, max: 9999 },
        ))
        .into();
        assert_eq!(full.status_code(), StatusCode::CONFLICT);
        assert!(full.to_string().contains("Cannot create more patient records"));
    }
}
