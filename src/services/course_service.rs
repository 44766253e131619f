//! Course Service - catalogue management

use sea_orm::DatabaseConnection;

use crate::domain::{Course, CourseRepository, DomainError, NewCourse, Validate};
use crate::infrastructure::repositories::SeaOrmCourseRepository;

pub struct CourseService<C = SeaOrmCourseRepository> {
    db: DatabaseConnection,
    courses: C,
}

impl<C: CourseRepository> CourseService<C> {
    pub fn new(db: DatabaseConnection, courses: C) -> Self {
        Self { db, courses }
    }

    pub async fn add_course(&self, input: NewCourse) -> Result<Course, DomainError> {
        input.validate()?;
        let course = self.courses.save(&self.db, input).await?;
        tracing::info!("Added course {}", course);
        Ok(course)
    }

    pub async fn get_course(&self, id: i32) -> Result<Course, DomainError> {
        self.courses
            .find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Course", id))
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>, DomainError> {
        self.courses.find_all(&self.db).await
    }

    /// Deletes a course; enrolled students keep existing with no course.
    pub async fn delete_course(&self, id: i32) -> Result<(), DomainError> {
        self.courses.delete(&self.db, id).await?;
        tracing::info!("Deleted course #{}", id);
        Ok(())
    }
}
