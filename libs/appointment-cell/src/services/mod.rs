pub mod appointments;
pub mod lifecycle;
pub mod reporting;
