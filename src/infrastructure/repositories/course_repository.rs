//! SeaORM implementation of CourseRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{Course, CourseRepository, DomainError, NewCourse};
use crate::models::course::{self, ActiveModel, Entity as CourseEntity};

/// SeaORM-based implementation of CourseRepository
#[derive(Debug, Default, Clone, Copy)]
pub struct SeaOrmCourseRepository;

impl SeaOrmCourseRepository {
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn to_domain(model: course::Model) -> Course {
    Course {
        id: model.course_id,
        course_name: model.course_name,
        duration: model.duration,
    }
}

#[async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn save<C>(&self, db: &C, course: NewCourse) -> Result<Course, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = ActiveModel {
            course_name: Set(course.course_name),
            duration: Set(course.duration),
            ..Default::default()
        };

        let saved = model.insert(db).await?;
        Ok(to_domain(saved))
    }

    async fn find_by_id<C>(&self, db: &C, id: i32) -> Result<Option<Course>, DomainError>
    where
        C: ConnectionTrait,
    {
        let course = CourseEntity::find_by_id(id).one(db).await?;
        Ok(course.map(to_domain))
    }

    async fn find_all<C>(&self, db: &C) -> Result<Vec<Course>, DomainError>
    where
        C: ConnectionTrait,
    {
        let courses = CourseEntity::find()
            .order_by_asc(course::Column::CourseId)
            .all(db)
            .await?;

        Ok(courses.into_iter().map(to_domain).collect())
    }

    async fn update<C>(&self, db: &C, course: &Course) -> Result<(), DomainError>
    where
        C: ConnectionTrait,
    {
        let changes = ActiveModel {
            course_name: Set(course.course_name.clone()),
            duration: Set(course.duration.clone()),
            ..Default::default()
        };

        let result = CourseEntity::update_many()
            .set(changes)
            .filter(course::Column::CourseId.eq(course.id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Course", course.id));
        }

        Ok(())
    }

    async fn delete<C>(&self, db: &C, id: i32) -> Result<(), DomainError>
    where
        C: ConnectionTrait,
    {
        let result = CourseEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Course", id));
        }

        Ok(())
    }
}
