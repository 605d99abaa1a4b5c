pub mod identifier;
pub mod patient;

pub use identifier::IdentifierGenerator;
pub use patient::PatientRegistry;
