pub mod patient;
pub mod safety;

pub use patient::{Medication, PatientFile, PatientFileResponse, PatientSummary, TimelineEntry};
pub use safety::{DrugConflict, RiskLevel, SafetyResult};
