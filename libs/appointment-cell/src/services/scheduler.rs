// libs/appointment-cell/src/services/scheduler.rs
use std::sync::Arc;

use tracing::{debug, info, warn};

use doctor_cell::services::ProviderDirectory;
use patient_cell::models::{CreatePatientRequest, Patient, PatientError, UpdatePatientRequest};
use patient_cell::services::{IdentifierGenerator, PatientRegistry};
use shared_models::time::TimeOfDay;

use crate::models::{
    Appointment, AppointmentError, AvailabilityResponse, BookAppointmentRequest, ProviderChoice,
    ScheduledAppointment,
};
use crate::services::book::AppointmentBook;
use crate::services::matching::AvailabilityMatcher;

const UNKNOWN_PATIENT: &str = "Unknown";

/// Everything the clinic desk mutates: patients plus the appointment book,
/// checked against a shared, read-only provider directory.
///
/// Not internally synchronized. Hosts that serve concurrent requests keep it
/// behind a single lock.
pub struct ClinicScheduler {
    directory: Arc<ProviderDirectory>,
    patients: PatientRegistry,
    book: AppointmentBook,
}

impl ClinicScheduler {
    pub fn new(directory: Arc<ProviderDirectory>, ids: IdentifierGenerator) -> Self {
        Self {
            directory,
            patients: PatientRegistry::new(ids),
            book: AppointmentBook::new(),
        }
    }

    pub fn directory(&self) -> &ProviderDirectory {
        &self.directory
    }

    pub fn patients(&self) -> &[Patient] {
        self.patients.patients()
    }

    pub fn patient(&self, patient_id: u32) -> Option<&Patient> {
        self.patients.get(patient_id)
    }

    pub fn book(&self) -> &AppointmentBook {
        &self.book
    }

    pub fn register_patient(&mut self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        self.patients.create_patient(request)
    }

    pub fn update_patient(
        &mut self,
        patient_id: u32,
        request: UpdatePatientRequest,
    ) -> Result<Patient, PatientError> {
        self.patients.update_patient(patient_id, request)
    }

    /// Deletes the patient and every appointment they own.
    pub fn remove_patient(&mut self, patient_id: u32) -> Result<(Patient, usize), PatientError> {
        let patient = self.patients.remove_patient(patient_id)?;
        let cancelled = self.book.remove_by_owner(patient_id);
        info!(
            "Patient {} deleted, {} appointments cancelled",
            patient_id, cancelled
        );
        Ok((patient, cancelled))
    }

    pub fn find_available(&self, raw_time: &str) -> Result<AvailabilityResponse, AppointmentError> {
        let time = TimeOfDay::parse(raw_time)?;
        let providers = AvailabilityMatcher::new(&self.directory)
            .find_available(time, &self.book)
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(AvailabilityResponse {
            time,
            display_time: time.to_12_hour_string(),
            providers,
        })
    }

    pub fn book_appointment(
        &mut self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!(
            "Booking appointment for patient {:?} at {:?}",
            request.patient_id, request.time
        );

        let patient_id = self.resolve_patient(request.patient_id)?;
        let time = TimeOfDay::parse(&request.time)?;

        let candidates = AvailabilityMatcher::new(&self.directory).find_available(time, &self.book);
        if candidates.is_empty() {
            warn!("No doctors available at {} for patient {}", time, patient_id);
            return Err(AppointmentError::NoProviderAvailable { time });
        }

        let choice = ProviderChoice::from(request.provider_choice.unwrap_or(0));
        let provider = choice.select(&candidates)?;

        let appointment = Appointment::new(patient_id, time, provider);
        self.book.insert(appointment.clone());

        info!("Appointment booked: {}", appointment);
        Ok(appointment)
    }

    pub fn cancel_appointment(
        &mut self,
        provider: &str,
        raw_time: &str,
    ) -> Result<Appointment, AppointmentError> {
        let time = TimeOfDay::parse(raw_time)?;
        let appointment = self
            .book
            .cancel(provider, time)
            .ok_or_else(|| AppointmentError::NotFound {
                provider: provider.to_string(),
                time,
            })?;

        info!("Appointment cancelled: {}", appointment);
        Ok(appointment)
    }

    /// Time-ordered schedule with patient names filled in.
    pub fn schedule(&self) -> Vec<ScheduledAppointment> {
        self.book
            .all()
            .iter()
            .map(|appointment| ScheduledAppointment {
                patient_id: appointment.patient_id,
                patient_name: self
                    .patients
                    .get(appointment.patient_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| UNKNOWN_PATIENT.to_string()),
                time: appointment.time,
                display_time: appointment.time.to_12_hour_string(),
                provider: appointment.provider.clone(),
            })
            .collect()
    }

    fn resolve_patient(&self, requested: Option<u32>) -> Result<u32, AppointmentError> {
        match requested {
            None | Some(0) => {
                let patient = self.patients.most_recent().ok_or(AppointmentError::NoPatients)?;
                debug!("Auto-selected patient ID: {}", patient.id);
                Ok(patient.id)
            }
            Some(id) if self.patients.get(id).is_some() => Ok(id),
            Some(id) => Err(AppointmentError::PatientNotFound(id)),
        }
    }
}
