use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the subscriptions table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Subscription {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            course_id: model.course_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::Subscription> for ActiveModel {
    fn from(sub: crate::models::Subscription) -> Self {
        ActiveModel {
            id: Set(sub.id),
            user_id: Set(sub.user_id),
            course_id: Set(sub.course_id),
            created_at: Set(sub.created_at.into()),
        }
    }
}
