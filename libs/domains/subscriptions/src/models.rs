use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Subscription entity - a standing request for update emails about a course.
///
/// First-class rows rather than a bare join table, so a subscription has
/// its own id and lifecycle. Unique per (user, course).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Subscription {
    /// Unique identifier
    pub id: Uuid,
    /// Subscribing user
    pub user_id: Uuid,
    /// Course the user wants updates for
    pub course_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a subscription. The subscriber is the acting user.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSubscription {
    pub course_id: Uuid,
}

impl Subscription {
    /// Create a new subscription for `user_id` to `course_id`
    pub fn new(user_id: Uuid, course_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            course_id,
            created_at: Utc::now(),
        }
    }
}
