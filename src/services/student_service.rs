//! Student Service - registration, contact details and course enrollment
//!
//! Every multi-step operation runs as one unit of work: the student is loaded,
//! changed and written back through the same transaction.

use sea_orm::{DatabaseConnection, DatabaseTransaction};

use super::unit_of_work::{begin, finish};
use crate::domain::{
    CourseRepository, DomainError, NewStudent, Student, StudentRepository, UpdateStudentInput,
    Validate,
};
use crate::infrastructure::repositories::{SeaOrmCourseRepository, SeaOrmStudentRepository};
use crate::models::student::EnrollmentStatus;

pub struct StudentService<S = SeaOrmStudentRepository, C = SeaOrmCourseRepository> {
    db: DatabaseConnection,
    students: S,
    courses: C,
}

impl<S, C> StudentService<S, C>
where
    S: StudentRepository,
    C: CourseRepository,
{
    pub fn new(db: DatabaseConnection, students: S, courses: C) -> Self {
        Self {
            db,
            students,
            courses,
        }
    }

    /// Registers a student with a zero balance and `ACTIVE` status.
    pub async fn add_student(&self, input: NewStudent) -> Result<Student, DomainError> {
        input.validate()?;
        let student = self.students.save(&self.db, input).await?;
        tracing::info!("Added student #{} ({})", student.id, student.name);
        Ok(student)
    }

    pub async fn get_student(&self, id: i32) -> Result<Student, DomainError> {
        self.students
            .find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Student", id))
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, DomainError> {
        self.students.find_all(&self.db).await
    }

    pub async fn update_student(
        &self,
        id: i32,
        changes: UpdateStudentInput,
    ) -> Result<Student, DomainError> {
        let txn = begin(&self.db).await?;
        let result = self.apply_update(&txn, id, changes).await;
        finish(txn, result).await
    }

    /// Deletes a student. Students with recorded payments cannot be deleted.
    pub async fn delete_student(&self, id: i32) -> Result<(), DomainError> {
        self.students.delete(&self.db, id).await?;
        tracing::info!("Deleted student #{}", id);
        Ok(())
    }

    /// Points a student at a course. Either id missing leaves everything unchanged.
    pub async fn enroll_student(
        &self,
        student_id: i32,
        course_id: i32,
    ) -> Result<Student, DomainError> {
        let txn = begin(&self.db).await?;
        let result = self.apply_enrollment(&txn, student_id, course_id).await;
        finish(txn, result).await
    }

    pub async fn set_enrollment_status(
        &self,
        student_id: i32,
        status: EnrollmentStatus,
    ) -> Result<Student, DomainError> {
        let txn = begin(&self.db).await?;
        let result = self.apply_status(&txn, student_id, status).await;
        finish(txn, result).await
    }

    async fn load(&self, txn: &DatabaseTransaction, id: i32) -> Result<Student, DomainError> {
        self.students
            .find_by_id(txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Student", id))
    }

    async fn apply_update(
        &self,
        txn: &DatabaseTransaction,
        id: i32,
        changes: UpdateStudentInput,
    ) -> Result<Student, DomainError> {
        let mut student = self.load(txn, id).await?;
        changes.apply(&mut student);
        student.validate()?;
        self.students.update(txn, &student).await?;
        tracing::info!("Updated student #{}", id);
        Ok(student)
    }

    async fn apply_status(
        &self,
        txn: &DatabaseTransaction,
        student_id: i32,
        status: EnrollmentStatus,
    ) -> Result<Student, DomainError> {
        let mut student = self.load(txn, student_id).await?;
        student.enrollment_status = status;
        self.students.update(txn, &student).await?;
        tracing::info!("Student #{} is now {}", student_id, status);
        Ok(student)
    }

    async fn apply_enrollment(
        &self,
        txn: &DatabaseTransaction,
        student_id: i32,
        course_id: i32,
    ) -> Result<Student, DomainError> {
        let mut student = self.load(txn, student_id).await?;
        let course = self
            .courses
            .find_by_id(txn, course_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Course", course_id))?;

        tracing::info!(
            "Enrolling student #{} in {}",
            student.id,
            course.course_name
        );
        student.course = Some(course);
        self.students.update(txn, &student).await?;
        Ok(student)
    }
}
