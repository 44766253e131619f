//! Composition root: builds repositories and hands them to the services

use sea_orm::DatabaseConnection;

use crate::infrastructure::{
    SeaOrmCourseRepository, SeaOrmPaymentRepository, SeaOrmStudentRepository,
};
use crate::services::{CourseService, PaymentService, StudentService};

/// Application services sharing one connection pool
pub struct AppServices {
    db: DatabaseConnection,
    pub students: StudentService,
    pub courses: CourseService,
    pub payments: PaymentService,
}

impl AppServices {
    /// Create all services with their SeaORM repositories
    pub fn new(db: DatabaseConnection) -> Self {
        let students = StudentService::new(
            db.clone(),
            SeaOrmStudentRepository::new(),
            SeaOrmCourseRepository::new(),
        );
        let courses = CourseService::new(db.clone(), SeaOrmCourseRepository::new());
        let payments = PaymentService::new(
            db.clone(),
            SeaOrmStudentRepository::new(),
            SeaOrmPaymentRepository::new(),
        );

        Self {
            db,
            students,
            courses,
            payments,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
