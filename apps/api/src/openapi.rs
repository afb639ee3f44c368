//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the education API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Education API",
        version = "0.1.0",
        description = "Course, lesson, payment and subscription management API"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/courses", api = domain_courses::handlers::CourseApiDoc),
        (path = "/api/lessons", api = domain_courses::handlers::LessonApiDoc),
        (path = "/api/subscriptions", api = domain_subscriptions::handlers::ApiDoc),
        (path = "/api/payments", api = domain_payments::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
