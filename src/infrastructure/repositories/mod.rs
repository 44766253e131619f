//! Repository implementations using SeaORM

pub mod course_repository;
pub mod payment_repository;
pub mod student_repository;

pub use course_repository::SeaOrmCourseRepository;
pub use payment_repository::SeaOrmPaymentRepository;
pub use student_repository::SeaOrmStudentRepository;
