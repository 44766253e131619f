use sea_orm::*;

use crate::models::course;

const DEMO_COURSES: [(&str, &str); 3] = [
    ("Computer Science", "4 years"),
    ("Data Analytics", "6 months"),
    ("Web Development", "12 weeks"),
];

/// Inserts the demo course catalogue, skipping names that already exist.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<u32, DbErr> {
    let mut inserted = 0;

    for (name, duration) in DEMO_COURSES {
        let existing = course::Entity::find()
            .filter(course::Column::CourseName.eq(name))
            .one(db)
            .await?;

        if existing.is_some() {
            continue;
        }

        course::ActiveModel {
            course_name: Set(name.to_owned()),
            duration: Set(Some(duration.to_owned())),
            ..Default::default()
        }
        .insert(db)
        .await?;
        inserted += 1;
    }

    Ok(inserted)
}
