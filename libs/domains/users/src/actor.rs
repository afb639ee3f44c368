//! Request-identity extraction.
//!
//! The API sits behind an auth gateway that verifies credentials and
//! forwards the resolved identity as `x-user-id` and `x-user-staff`
//! headers. Handlers take an [`Actor`] argument to make the acting
//! identity an explicit parameter rather than ambient request state.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_helpers::AppError;
use uuid::Uuid;

use crate::models::Actor;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_STAFF_HEADER: &str = "x-user-staff";

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing authenticated identity".to_string()))?;

        let user_id = Uuid::parse_str(user_id)
            .map_err(|_| AppError::Unauthorized("Malformed user identity".to_string()))?;

        let is_staff = parts
            .headers
            .get(USER_STAFF_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| matches!(v, "1" | "true"))
            .unwrap_or(false);

        Ok(Actor { user_id, is_staff })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    async fn extract(req: Request<()>) -> Result<Actor, AppError> {
        let (mut parts, _) = req.into_parts();
        Actor::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_regular_user() {
        let id = Uuid::now_v7();
        let req = Request::builder()
            .header(USER_ID_HEADER, id.to_string())
            .body(())
            .unwrap();

        let actor = extract(req).await.unwrap();
        assert_eq!(actor.user_id, id);
        assert!(!actor.is_staff);
    }

    #[tokio::test]
    async fn test_extracts_staff_flag() {
        let id = Uuid::now_v7();
        let req = Request::builder()
            .header(USER_ID_HEADER, id.to_string())
            .header(USER_STAFF_HEADER, "true")
            .body(())
            .unwrap();

        let actor = extract(req).await.unwrap();
        assert!(actor.is_staff);
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let req = Request::builder().body(()).unwrap();

        let result = extract(req).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_malformed_identity_is_unauthorized() {
        let req = Request::builder()
            .header(USER_ID_HEADER, "not-a-uuid")
            .body(())
            .unwrap();

        let result = extract(req).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_unknown_staff_value_defaults_to_false() {
        let id = Uuid::now_v7();
        let req = Request::builder()
            .header(USER_ID_HEADER, id.to_string())
            .header(USER_STAFF_HEADER, "yes")
            .body(())
            .unwrap();

        let actor = extract(req).await.unwrap();
        assert!(!actor.is_staff);
    }
}
