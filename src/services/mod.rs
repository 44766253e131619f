//! Services Layer
//!
//! Business operations composed from repository calls. Each service owns a
//! connection pool and the repositories it was constructed with; multi-step
//! operations run inside one transaction.

pub mod course_service;
pub mod payment_service;
pub mod student_service;
pub mod unit_of_work;

// Re-export for convenience
pub use course_service::CourseService;
pub use payment_service::{PaymentReceipt, PaymentService};
pub use student_service::StudentService;
