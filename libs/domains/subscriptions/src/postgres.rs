use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{SubscriptionError, SubscriptionResult},
    models::Subscription,
    repository::SubscriptionRepository,
};

fn db_error(e: sea_orm::DbErr) -> SubscriptionError {
    SubscriptionError::Internal(format!("Database error: {}", e))
}

/// Postgres-backed implementation of SubscriptionRepository
pub struct PgSubscriptionRepository {
    db: DatabaseConnection,
}

impl PgSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn create(&self, user_id: Uuid, course_id: Uuid) -> SubscriptionResult<Subscription> {
        let duplicate = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .filter(entity::Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(db_error)?
            .is_some();

        if duplicate {
            return Err(SubscriptionError::AlreadySubscribed { user_id, course_id });
        }

        let domain = Subscription::new(user_id, course_id);
        let active_model: entity::ActiveModel = domain.into();
        let model = active_model.insert(&self.db).await.map_err(db_error)?;

        tracing::info!(
            subscription_id = %model.id,
            user_id = %user_id,
            course_id = %course_id,
            "Created subscription"
        );
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> SubscriptionResult<Option<Subscription>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(|m| m.into()))
    }

    async fn list_for_user(&self, user_id: Uuid) -> SubscriptionResult<Vec<Subscription>> {
        let models = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .order_by_desc(entity::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn list_by_course(&self, course_id: Uuid) -> SubscriptionResult<Vec<Subscription>> {
        let models = entity::Entity::find()
            .filter(entity::Column::CourseId.eq(course_id))
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn delete(&self, id: Uuid) -> SubscriptionResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected > 0 {
            tracing::info!(subscription_id = %id, "Deleted subscription");
        }
        Ok(result.rows_affected > 0)
    }
}
