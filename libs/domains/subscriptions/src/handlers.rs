use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::SubscriptionResult;
use crate::models::{CreateSubscription, Subscription};
use crate::repository::SubscriptionRepository;
use crate::service::SubscriptionService;
use domain_courses::repository::CourseRepository;
use domain_users::Actor;

const TAG: &str = "subscriptions";

/// OpenAPI documentation for the Subscriptions API
#[derive(OpenApi)]
#[openapi(
    paths(list_subscriptions, create_subscription, delete_subscription),
    components(
        schemas(Subscription, CreateSubscription),
        responses(
            NotFoundResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Course subscription endpoints")
    )
)]
pub struct ApiDoc;

/// Create the subscription router with all HTTP endpoints
pub fn router<S, C>(service: Arc<SubscriptionService<S, C>>) -> Router
where
    S: SubscriptionRepository + 'static,
    C: CourseRepository + 'static,
{
    Router::new()
        .route("/", get(list_subscriptions).post(create_subscription))
        .route("/{id}", delete(delete_subscription))
        .with_state(service)
}

/// List the actor's subscriptions
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "The actor's subscriptions", body = Vec<Subscription>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_subscriptions<S: SubscriptionRepository, C: CourseRepository>(
    State(service): State<Arc<SubscriptionService<S, C>>>,
    actor: Actor,
) -> SubscriptionResult<Json<Vec<Subscription>>> {
    let subscriptions = service.list_own(actor).await?;
    Ok(Json(subscriptions))
}

/// Subscribe the actor to a course
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateSubscription,
    responses(
        (status = 201, description = "Subscription created successfully", body = Subscription),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_subscription<S: SubscriptionRepository, C: CourseRepository>(
    State(service): State<Arc<SubscriptionService<S, C>>>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<CreateSubscription>,
) -> SubscriptionResult<impl IntoResponse> {
    let subscription = service.subscribe(actor, input).await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

/// Remove a subscription
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Subscription ID")
    ),
    responses(
        (status = 204, description = "Subscription removed"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_subscription<S: SubscriptionRepository, C: CourseRepository>(
    State(service): State<Arc<SubscriptionService<S, C>>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> SubscriptionResult<impl IntoResponse> {
    service.unsubscribe(actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
