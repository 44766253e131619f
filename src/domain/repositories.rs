//! Repository trait definitions
//!
//! These traits define the contract for data access. Every method takes the
//! connection it runs on, so one repository instance serves both the pool and
//! an open transaction. Implementations live in the infrastructure layer.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use std::fmt;

use super::validation::{
    COURSE_NAME_MAX_LEN, DURATION_MAX_LEN, NAME_MAX_LEN, Validate, normalize_optional,
    validate_email, validate_max_len, validate_non_empty_string, validate_phone,
};
use super::DomainError;
use crate::models::payment::PaymentType;
use crate::models::student::EnrollmentStatus;

/// Course data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub id: i32,
    pub course_name: String,
    pub duration: Option<String>,
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.duration {
            Some(duration) => write!(f, "#{} {} ({})", self.id, self.course_name, duration),
            None => write!(f, "#{} {}", self.id, self.course_name),
        }
    }
}

/// Input for creating a course
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub course_name: String,
    pub duration: Option<String>,
}

impl NewCourse {
    pub fn new(course_name: impl Into<String>, duration: Option<String>) -> Self {
        Self {
            course_name: course_name.into().trim().to_string(),
            duration: normalize_optional(duration),
        }
    }
}

impl Validate for NewCourse {
    fn validate(&self) -> Result<(), DomainError> {
        validate_non_empty_string("course name", &self.course_name)?;
        validate_max_len("course name", &self.course_name, COURSE_NAME_MAX_LEN)?;
        if let Some(duration) = &self.duration {
            validate_max_len("duration", duration, DURATION_MAX_LEN)?;
        }
        Ok(())
    }
}

/// Student data with its course association resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub course: Option<Course>,
    pub balance: Decimal,
    pub enrollment_status: EnrollmentStatus,
}

impl Student {
    pub fn course_id(&self) -> Option<i32> {
        self.course.as_ref().map(|c| c.id)
    }
}

impl Validate for Student {
    fn validate(&self) -> Result<(), DomainError> {
        validate_contact_fields(&self.name, self.email.as_deref(), self.phone.as_deref())?;
        if self.balance < Decimal::ZERO {
            return Err(DomainError::Validation(
                "balance cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} <{}> phone={} course={} balance={} status={}",
            self.id,
            self.name,
            self.email.as_deref().unwrap_or("-"),
            self.phone.as_deref().unwrap_or("-"),
            self.course
                .as_ref()
                .map(|c| c.course_name.as_str())
                .unwrap_or("None"),
            self.balance,
            self.enrollment_status
        )
    }
}

/// Input for creating a student.
///
/// New students always start with a zero balance and `ACTIVE` status.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, email: Option<String>, phone: Option<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: normalize_optional(email),
            phone: normalize_optional(phone),
        }
    }
}

impl Validate for NewStudent {
    fn validate(&self) -> Result<(), DomainError> {
        validate_contact_fields(&self.name, self.email.as_deref(), self.phone.as_deref())
    }
}

/// Input for updating a student's contact details.
///
/// `None` leaves a field untouched; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct UpdateStudentInput {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
}

impl UpdateStudentInput {
    pub fn apply(self, student: &mut Student) {
        if let Some(name) = self.name {
            student.name = name.trim().to_string();
        }
        if let Some(email) = self.email {
            student.email = normalize_optional(email);
        }
        if let Some(phone) = self.phone {
            student.phone = normalize_optional(phone);
        }
    }
}

fn validate_contact_fields(
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<(), DomainError> {
    validate_non_empty_string("name", name)?;
    validate_max_len("name", name, NAME_MAX_LEN)?;
    if let Some(email) = email {
        validate_email(email)?;
    }
    if let Some(phone) = phone {
        validate_phone(phone)?;
    }
    Ok(())
}

/// Payment or refund record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    pub id: i32,
    pub student_id: i32,
    pub amount: Decimal,
    pub payment_date: String,
    pub payment_type: PaymentType,
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} on {}",
            self.id, self.payment_type, self.amount, self.payment_date
        )
    }
}

/// Input for recording a payment
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub student_id: i32,
    pub amount: Decimal,
    pub payment_type: PaymentType,
}

/// Repository trait for Course entity
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert a new course
    async fn save<C>(&self, db: &C, course: NewCourse) -> Result<Course, DomainError>
    where
        C: ConnectionTrait;

    /// Find a course by ID
    async fn find_by_id<C>(&self, db: &C, id: i32) -> Result<Option<Course>, DomainError>
    where
        C: ConnectionTrait;

    /// Find all courses, ordered by ID
    async fn find_all<C>(&self, db: &C) -> Result<Vec<Course>, DomainError>
    where
        C: ConnectionTrait;

    /// Overwrite an existing course
    async fn update<C>(&self, db: &C, course: &Course) -> Result<(), DomainError>
    where
        C: ConnectionTrait;

    /// Delete a course by ID
    async fn delete<C>(&self, db: &C, id: i32) -> Result<(), DomainError>
    where
        C: ConnectionTrait;
}

/// Repository trait for Student entity
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert a new student with default balance and status
    async fn save<C>(&self, db: &C, student: NewStudent) -> Result<Student, DomainError>
    where
        C: ConnectionTrait;

    /// Find a student by ID, course joined in
    async fn find_by_id<C>(&self, db: &C, id: i32) -> Result<Option<Student>, DomainError>
    where
        C: ConnectionTrait;

    /// Find a student by email, course joined in
    async fn find_by_email<C>(&self, db: &C, email: &str) -> Result<Option<Student>, DomainError>
    where
        C: ConnectionTrait;

    /// Find all students, ordered by ID
    async fn find_all<C>(&self, db: &C) -> Result<Vec<Student>, DomainError>
    where
        C: ConnectionTrait;

    /// Overwrite an existing student, including its course reference
    async fn update<C>(&self, db: &C, student: &Student) -> Result<(), DomainError>
    where
        C: ConnectionTrait;

    /// Delete a student by ID
    async fn delete<C>(&self, db: &C, id: i32) -> Result<(), DomainError>
    where
        C: ConnectionTrait;
}

/// Repository trait for Payment entity
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert a new payment stamped with the current time
    async fn save<C>(&self, db: &C, payment: NewPayment) -> Result<Payment, DomainError>
    where
        C: ConnectionTrait;

    /// Find a payment by ID
    async fn find_by_id<C>(&self, db: &C, id: i32) -> Result<Option<Payment>, DomainError>
    where
        C: ConnectionTrait;

    /// Find all payments, ordered by ID
    async fn find_all<C>(&self, db: &C) -> Result<Vec<Payment>, DomainError>
    where
        C: ConnectionTrait;

    /// Payment history of one student, oldest first
    async fn find_by_student<C>(
        &self,
        db: &C,
        student_id: i32,
    ) -> Result<Vec<Payment>, DomainError>
    where
        C: ConnectionTrait;

    /// Overwrite an existing payment
    async fn update<C>(&self, db: &C, payment: &Payment) -> Result<(), DomainError>
    where
        C: ConnectionTrait;

    /// Delete a payment by ID
    async fn delete<C>(&self, db: &C, id: i32) -> Result<(), DomainError>
    where
        C: ConnectionTrait;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_student() -> Student {
        Student {
            id: 1,
            name: "Ada Lovelace".to_string(),
            email: Some("ada@example.com".to_string()),
            phone: None,
            course: None,
            balance: dec!(0),
            enrollment_status: EnrollmentStatus::Active,
        }
    }

    #[test]
    fn test_new_student_normalizes_blank_fields() {
        let input = NewStudent::new("  Ada  ", Some("  ".into()), Some(" 555 ".into()));
        assert_eq!(input.name, "Ada");
        assert_eq!(input.email, None);
        assert_eq!(input.phone.as_deref(), Some("555"));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_new_student_requires_name() {
        let input = NewStudent::new("   ", None, None);
        assert!(matches!(input.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_update_input_applies_only_given_fields() {
        let mut student = sample_student();
        UpdateStudentInput {
            phone: Some(Some("555-0100".into())),
            email: Some(None),
            ..Default::default()
        }
        .apply(&mut student);

        assert_eq!(student.name, "Ada Lovelace");
        assert_eq!(student.email, None);
        assert_eq!(student.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_student_negative_balance_is_invalid() {
        let mut student = sample_student();
        student.balance = dec!(-0.01);
        assert!(matches!(student.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_student_display_without_course() {
        let student = sample_student();
        let shown = student.to_string();
        assert!(shown.contains("course=None"));
        assert!(shown.contains("status=ACTIVE"));
    }
}
