use axum::Router;

pub mod courses;
pub mod health;
pub mod payments;
pub mod subscriptions;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix is added by the `create_router` helper.
///
/// Takes a reference to AppState and initializes all services. Returns a
/// stateless Router (all sub-routers have state already applied).
pub fn routes(state: &crate::state::AppState) -> Router {
    let (course_router, lesson_router) = courses::routers(state);

    Router::new()
        .nest("/courses", course_router)
        .nest("/lessons", lesson_router)
        .nest("/subscriptions", subscriptions::router(state))
        .nest("/payments", payments::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health
/// checks against the database and Redis.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
