use axum::Router;
use domain_courses::PgCourseRepository;
use domain_subscriptions::{PgSubscriptionRepository, SubscriptionService, handlers};
use std::sync::Arc;

pub fn router(state: &crate::state::AppState) -> Router {
    let service = Arc::new(SubscriptionService::new(
        PgSubscriptionRepository::new(state.db.clone()),
        PgCourseRepository::new(state.db.clone()),
    ));
    handlers::router(service)
}
