use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

pub const NO_HISTORY: &str = "No known medical history";
pub const BLANK_HISTORY: &str = "(history provided but left blank)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub contact_number: String,
    pub gender: String,
    pub history: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub gender: String,
    /// `None` means no history to record; `Some("")` means one was declared but left blank.
    pub history: Option<String>,
}

/// Blank strings and a zero age leave the current value in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub contact_number: Option<String>,
    pub gender: Option<String>,
    pub history: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Identifier range {min}..={max} is exhausted")]
    Exhausted { min: u32, max: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatientError {
    #[error("Patient ID {0} not found")]
    NotFound(u32),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Cannot create more patient records: {0}")]
    IdentifierExhausted(#[from] IdentifierError),
}

impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::NotFound(_) => AppError::NotFound(err.to_string()),
            PatientError::ValidationError(msg) => AppError::ValidationError(msg),
            PatientError::IdentifierExhausted(_) => AppError::Conflict(err.to_string()),
        }
    }
}
