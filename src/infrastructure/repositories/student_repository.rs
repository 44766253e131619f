//! SeaORM implementation of StudentRepository
//!
//! The course association is resolved with an explicit join on every read.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::course_repository;
use crate::domain::money::to_money;
use crate::domain::{DomainError, NewStudent, Student, StudentRepository};
use crate::models::course::{self, Entity as CourseEntity};
use crate::models::student::{self, ActiveModel, EnrollmentStatus, Entity as StudentEntity};

/// SeaORM-based implementation of StudentRepository
#[derive(Debug, Default, Clone, Copy)]
pub struct SeaOrmStudentRepository;

impl SeaOrmStudentRepository {
    pub fn new() -> Self {
        Self
    }
}

fn to_domain(model: student::Model, course: Option<course::Model>) -> Student {
    Student {
        id: model.student_id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        course: course.map(course_repository::to_domain),
        balance: to_money(model.balance),
        enrollment_status: model.enrollment_status,
    }
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn save<C>(&self, db: &C, student: NewStudent) -> Result<Student, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = ActiveModel {
            name: Set(student.name),
            email: Set(student.email),
            phone: Set(student.phone),
            course_id: Set(None),
            balance: Set(Decimal::ZERO),
            enrollment_status: Set(EnrollmentStatus::Active),
            ..Default::default()
        };

        let saved = model.insert(db).await?;
        tracing::debug!("Inserted student #{}", saved.student_id);

        Ok(to_domain(saved, None))
    }

    async fn find_by_id<C>(&self, db: &C, id: i32) -> Result<Option<Student>, DomainError>
    where
        C: ConnectionTrait,
    {
        let row = StudentEntity::find_by_id(id)
            .find_also_related(CourseEntity)
            .one(db)
            .await?;

        Ok(row.map(|(student, course)| to_domain(student, course)))
    }

    async fn find_by_email<C>(&self, db: &C, email: &str) -> Result<Option<Student>, DomainError>
    where
        C: ConnectionTrait,
    {
        let row = StudentEntity::find()
            .filter(student::Column::Email.eq(email))
            .find_also_related(CourseEntity)
            .one(db)
            .await?;

        Ok(row.map(|(student, course)| to_domain(student, course)))
    }

    async fn find_all<C>(&self, db: &C) -> Result<Vec<Student>, DomainError>
    where
        C: ConnectionTrait,
    {
        let rows = StudentEntity::find()
            .order_by_asc(student::Column::StudentId)
            .find_also_related(CourseEntity)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(student, course)| to_domain(student, course))
            .collect())
    }

    async fn update<C>(&self, db: &C, student: &Student) -> Result<(), DomainError>
    where
        C: ConnectionTrait,
    {
        let changes = ActiveModel {
            name: Set(student.name.clone()),
            email: Set(student.email.clone()),
            phone: Set(student.phone.clone()),
            course_id: Set(student.course_id()),
            balance: Set(student.balance),
            enrollment_status: Set(student.enrollment_status),
            ..Default::default()
        };

        let result = StudentEntity::update_many()
            .set(changes)
            .filter(student::Column::StudentId.eq(student.id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Student", student.id));
        }

        Ok(())
    }

    async fn delete<C>(&self, db: &C, id: i32) -> Result<(), DomainError>
    where
        C: ConnectionTrait,
    {
        let result = StudentEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Student", id));
        }

        Ok(())
    }
}
