pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    Appointment, AppointmentStatus, CreateAppointmentRequest, DashboardStats,
    RejectAppointmentRequest, RejectedAppointment, StatusCounts, UpdateAppointmentRequest,
    UpdateStatusRequest,
};

pub use router::{appointment_routes, rejected_appointment_routes};

pub mod api {
    pub use crate::services::appointments::AppointmentService;
}
