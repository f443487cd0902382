pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{CreateLeaveRequest, DoctorLeave, LeaveStatus, LeaveType, UpdateLeaveDatesRequest};
pub use router::leave_routes;

pub mod api {
    pub use crate::services::leaves::LeaveService;
}
