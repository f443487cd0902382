pub mod diagnoses;
pub mod prescriptions;
