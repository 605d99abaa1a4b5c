pub mod book;
pub mod matching;
pub mod scheduler;

use std::sync::Arc;
use tokio::sync::RwLock;

pub use book::AppointmentBook;
pub use matching::AvailabilityMatcher;
pub use scheduler::ClinicScheduler;

/// Mutations take the write lock, so they run one at a time.
pub type SharedScheduler = Arc<RwLock<ClinicScheduler>>;

pub fn shared(scheduler: ClinicScheduler) -> SharedScheduler {
    Arc::new(RwLock::new(scheduler))
}
