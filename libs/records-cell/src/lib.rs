pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{Diagnosis, DiagnosisStatus, MedicineEntry, Prescription};
pub use router::{diagnosis_routes, prescription_routes};

pub mod api {
    pub use crate::services::diagnoses::DiagnosisService;
    pub use crate::services::prescriptions::PrescriptionService;
}
