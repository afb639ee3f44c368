use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{PaymentError, PaymentResult},
    models::{Payment, PaymentFilter, SortOrder},
    repository::PaymentRepository,
};

/// Postgres-backed implementation of PaymentRepository
pub struct PgPaymentRepository {
    db: DatabaseConnection,
}

impl PgPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn list(
        &self,
        filter: PaymentFilter,
        scope: Option<Uuid>,
    ) -> PaymentResult<Vec<Payment>> {
        let mut query = entity::Entity::find();

        if let Some(user_id) = scope {
            query = query.filter(entity::Column::UserId.eq(user_id));
        }

        if let Some(course_id) = filter.course_id {
            query = query.filter(entity::Column::CourseId.eq(course_id));
        }

        if let Some(lesson_id) = filter.lesson_id {
            query = query.filter(entity::Column::LessonId.eq(lesson_id));
        }

        if let Some(method) = filter.payment_method {
            query = query.filter(entity::Column::PaymentMethod.eq(method));
        }

        query = match filter.order {
            SortOrder::Asc => query.order_by_asc(entity::Column::PaymentDate),
            SortOrder::Desc => query.order_by_desc(entity::Column::PaymentDate),
        };

        let models = query
            .all(&self.db)
            .await
            .map_err(|e| PaymentError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}
