use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User entity - an email-capable identity on the platform
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Email address notifications are delivered to
    pub email: String,
    /// Display name
    pub name: String,
    /// Staff users bypass ownership scoping
    pub is_staff: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub is_staff: bool,
}

/// The authenticated identity acting on a request.
///
/// Populated from the `x-user-id` / `x-user-staff` headers set by the
/// upstream auth layer and threaded explicitly through services and
/// scoped queries. There is no ambient "current user".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub is_staff: bool,
}

impl Actor {
    pub fn user(user_id: Uuid) -> Self {
        Self {
            user_id,
            is_staff: false,
        }
    }

    pub fn staff(user_id: Uuid) -> Self {
        Self {
            user_id,
            is_staff: true,
        }
    }
}

impl User {
    /// Create a new user from CreateUser DTO
    pub fn new(input: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email: input.email,
            name: input.name,
            is_staff: input.is_staff,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.id,
            is_staff: self.is_staff,
        }
    }
}
