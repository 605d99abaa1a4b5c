use std::collections::HashSet;

use tracing::{debug, info};

use crate::models::{
    CreatePatientRequest, Patient, PatientError, UpdatePatientRequest, BLANK_HISTORY, NO_HISTORY,
};
use crate::services::identifier::IdentifierGenerator;

/// Live patient records in registration order.
pub struct PatientRegistry {
    patients: Vec<Patient>,
    ids: IdentifierGenerator,
}

impl PatientRegistry {
    pub fn new(ids: IdentifierGenerator) -> Self {
        Self {
            patients: Vec::new(),
            ids,
        }
    }

    pub fn create_patient(&mut self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        debug!("Creating new patient record for: {}", request.name);

        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(PatientError::ValidationError("Patient name cannot be empty".into()));
        }
        if request.age == 0 {
            return Err(PatientError::ValidationError("Age must be a positive number".into()));
        }

        let history = match request.history {
            None => NO_HISTORY.to_string(),
            Some(h) if h.trim().is_empty() => BLANK_HISTORY.to_string(),
            Some(h) => h,
        };

        let existing = self.registered_ids();
        let id = self.ids.next(&existing)?;
        let patient = Patient {
            id,
            name,
            age: request.age,
            contact_number: request.contact_number,
            gender: request.gender,
            history,
        };

        self.patients.push(patient.clone());
        info!("Patient {} registered with ID {}", patient.name, patient.id);
        Ok(patient)
    }

    pub fn update_patient(
        &mut self,
        patient_id: u32,
        request: UpdatePatientRequest,
    ) -> Result<Patient, PatientError> {
        debug!("Updating patient: {}", patient_id);

        let patient = self
            .patients
            .iter_mut()
            .find(|p| p.id == patient_id)
            .ok_or(PatientError::NotFound(patient_id))?;

        if let Some(name) = non_blank(request.name) {
            patient.name = name;
        }
        if let Some(age) = request.age.filter(|age| *age > 0) {
            patient.age = age;
        }
        if let Some(contact) = non_blank(request.contact_number) {
            patient.contact_number = contact;
        }
        if let Some(gender) = non_blank(request.gender) {
            patient.gender = gender;
        }
        if let Some(history) = non_blank(request.history) {
            patient.history = history;
        }

        info!("Patient {} record updated", patient_id);
        Ok(patient.clone())
    }

    /// Removes the record only; the caller owns cascading to appointments.
    pub fn remove_patient(&mut self, patient_id: u32) -> Result<Patient, PatientError> {
        let index = self
            .patients
            .iter()
            .position(|p| p.id == patient_id)
            .ok_or(PatientError::NotFound(patient_id))?;

        Ok(self.patients.remove(index))
    }

    pub fn get(&self, patient_id: u32) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == patient_id)
    }

    pub fn most_recent(&self) -> Option<&Patient> {
        self.patients.last()
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn registered_ids(&self) -> HashSet<u32> {
        self.patients.iter().map(|p| p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
