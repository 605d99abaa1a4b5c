use tracing::debug;

use shared_models::time::TimeOfDay;

use crate::models::Appointment;

/// Confirmed appointments, kept in ascending time order.
#[derive(Debug, Clone, Default)]
pub struct AppointmentBook {
    appointments: Vec<Appointment>,
}

impl AppointmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends and re-sorts. `sort_by_key` is stable, so equal times keep
    /// insertion order.
    pub fn insert(&mut self, appointment: Appointment) {
        self.appointments.push(appointment);
        self.appointments.sort_by_key(|a| a.time);
    }

    /// Drops every appointment owned by `patient_id`; returns how many went.
    pub fn remove_by_owner(&mut self, patient_id: u32) -> usize {
        let before = self.appointments.len();
        self.appointments.retain(|a| a.patient_id != patient_id);
        let removed = before - self.appointments.len();
        debug!("Removed {} appointments for patient {}", removed, patient_id);
        removed
    }

    pub fn cancel(&mut self, provider: &str, time: TimeOfDay) -> Option<Appointment> {
        let index = self
            .appointments
            .iter()
            .position(|a| a.provider == provider && a.time == time)?;
        Some(self.appointments.remove(index))
    }

    pub fn is_booked(&self, provider: &str, time: TimeOfDay) -> bool {
        self.appointments
            .iter()
            .any(|a| a.provider == provider && a.time == time)
    }

    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(raw: &str) -> TimeOfDay {
        TimeOfDay::parse(raw).unwrap()
    }

    fn is_sorted(book: &AppointmentBook) -> bool {
        book.all().windows(2).all(|pair| pair[0].time <= pair[1].time)
    }

    #[test]
    fn test_insert_keeps_time_order_for_any_insertion_order() {
        let times = ["15:00", "9:00", "11:30", "9:00", "8:15", "16:45"];

        for rotation in 0..times.len() {
            let mut book = AppointmentBook::new();
            for (i, raw) in times.iter().cycle().skip(rotation).take(times.len()).enumerate() {
                book.insert(Appointment::new(i as u32, t(raw), "Dr. Owen"));
                assert!(is_sorted(&book));
            }
            assert_eq!(book.len(), times.len());
        }
    }

    #[test]
    fn test_equal_times_keep_insertion_order() {
        let mut book = AppointmentBook::new();
        book.insert(Appointment::new(1, t("10:00"), "Dr. Owen"));
        book.insert(Appointment::new(2, t("10:00"), "Dr. Crishen"));
        book.insert(Appointment::new(3, t("9:00"), "Dr. Punay"));
        book.insert(Appointment::new(4, t("10:00"), "Dr. Escalona"));

        let owners: Vec<u32> = book.all().iter().map(|a| a.patient_id).collect();
        assert_eq!(owners, vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_remove_by_owner_counts_and_removes_all() {
        let mut book = AppointmentBook::new();
        book.insert(Appointment::new(1001, t("9:00"), "Dr. Owen"));
        book.insert(Appointment::new(2002, t("10:00"), "Dr. Owen"));
        book.insert(Appointment::new(1001, t("14:00"), "Dr. Pizzaro"));

        assert_eq!(book.remove_by_owner(1001), 2);
        assert!(book.all().iter().all(|a| a.patient_id != 1001));
        assert_eq!(book.len(), 1);

        assert_eq!(book.remove_by_owner(1001), 0);
        assert_eq!(book.remove_by_owner(9999), 0);
    }

    #[test]
    fn test_cancel_removes_single_slot() {
        let mut book = AppointmentBook::new();
        book.insert(Appointment::new(1001, t("9:00"), "Dr. Owen"));
        book.insert(Appointment::new(1002, t("9:00"), "Dr. Punay"));

        let cancelled = book.cancel("Dr. Owen", t("9:00")).unwrap();
        assert_eq!(cancelled.patient_id, 1001);
        assert!(!book.is_booked("Dr. Owen", t("9:00")));
        assert!(book.is_booked("Dr. Punay", t("9:00")));
        assert!(book.cancel("Dr. Owen", t("9:00")).is_none());
    }
}
