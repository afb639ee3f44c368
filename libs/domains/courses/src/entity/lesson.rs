use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the lessons table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub video_url: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Lesson {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            course_id: model.course_id,
            title: model.title,
            description: model.description,
            video_url: model.video_url,
            owner_id: model.owner_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::Lesson> for ActiveModel {
    fn from(lesson: crate::models::Lesson) -> Self {
        ActiveModel {
            id: Set(lesson.id),
            course_id: Set(lesson.course_id),
            title: Set(lesson.title),
            description: Set(lesson.description),
            video_url: Set(lesson.video_url),
            owner_id: Set(lesson.owner_id),
            created_at: Set(lesson.created_at.into()),
            updated_at: Set(lesson.updated_at.into()),
        }
    }
}
