// libs/appointment-cell/src/services/matching.rs
use tracing::debug;

use doctor_cell::services::ProviderDirectory;
use shared_models::time::TimeOfDay;

use crate::services::book::AppointmentBook;

/// Finds providers who are on duty and free at an exact minute.
pub struct AvailabilityMatcher<'a> {
    directory: &'a ProviderDirectory,
}

impl<'a> AvailabilityMatcher<'a> {
    pub fn new(directory: &'a ProviderDirectory) -> Self {
        Self { directory }
    }

    /// Candidates come back in directory order, so the first entry is what
    /// "auto-assign" picks. A conflict is the same provider at the same minute;
    /// neighbouring minutes stay bookable. An empty result means nobody is free.
    pub fn find_available(&self, t: TimeOfDay, book: &AppointmentBook) -> Vec<&'a str> {
        let directory = self.directory;
        let available: Vec<&'a str> = directory
            .all_providers()
            .filter(|provider| directory.is_working(provider, t))
            .filter(|provider| !book.is_booked(provider, t))
            .collect();

        debug!("{} providers available at {}", available.len(), t);
        available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Appointment;
    use doctor_cell::models::ProviderRosterEntry;

    fn t(raw: &str) -> TimeOfDay {
        TimeOfDay::parse(raw).unwrap()
    }

    fn owen_and_crishen() -> ProviderDirectory {
        ProviderDirectory::from_roster(vec![
            ProviderRosterEntry::new("Owen", &[("9:00", "12:00"), ("13:00", "17:00")]),
            ProviderRosterEntry::new("Crishen", &[("10:00", "14:00")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_directory_order_and_exact_minute_conflict() {
        let directory = owen_and_crishen();
        let matcher = AvailabilityMatcher::new(&directory);
        let mut book = AppointmentBook::new();

        assert_eq!(matcher.find_available(t("10:00"), &book), vec!["Owen", "Crishen"]);

        book.insert(Appointment::new(1234, t("10:00"), "Owen"));
        assert_eq!(matcher.find_available(t("10:00"), &book), vec!["Crishen"]);
    }

    #[test]
    fn test_adjacent_minutes_are_not_conflicts() {
        let directory = owen_and_crishen();
        let matcher = AvailabilityMatcher::new(&directory);
        let mut book = AppointmentBook::new();
        book.insert(Appointment::new(1234, t("10:00"), "Owen"));

        assert_eq!(matcher.find_available(t("9:59"), &book), vec!["Owen"]);
        assert_eq!(matcher.find_available(t("10:01"), &book), vec!["Owen", "Crishen"]);
    }

    #[test]
    fn test_only_working_providers_are_returned() {
        let directory = owen_and_crishen();
        let matcher = AvailabilityMatcher::new(&directory);
        let book = AppointmentBook::new();

        for minute in (0..24 * 60).step_by(7) {
            let time = t(&format!("{}:{:02}", minute / 60, minute % 60));
            for provider in matcher.find_available(time, &book) {
                assert!(directory.is_working(provider, time));
            }
        }

        assert_eq!(matcher.find_available(t("12:30"), &book), vec!["Crishen"]);
        assert_eq!(matcher.find_available(t("16:00"), &book), vec!["Owen"]);
        assert!(matcher.find_available(t("7:00"), &book).is_empty());
    }

    #[test]
    fn test_bookings_for_unknown_providers_do_not_block() {
        let directory = owen_and_crishen();
        let matcher = AvailabilityMatcher::new(&directory);
        let mut book = AppointmentBook::new();
        book.insert(Appointment::new(1234, t("11:00"), "Someone Else"));

        assert_eq!(matcher.find_available(t("11:00"), &book), vec!["Owen", "Crishen"]);
    }
}
