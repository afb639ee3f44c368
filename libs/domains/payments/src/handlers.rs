use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use axum_helpers::errors::responses::{InternalServerErrorResponse, UnauthorizedResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::PaymentResult;
use crate::models::{Payment, PaymentFilter, PaymentMethod, SortOrder};
use crate::repository::PaymentRepository;
use crate::service::PaymentService;
use domain_users::Actor;

const TAG: &str = "payments";

/// OpenAPI documentation for the Payments API
#[derive(OpenApi)]
#[openapi(
    paths(list_payments),
    components(
        schemas(Payment, PaymentMethod, SortOrder, PaymentFilter),
        responses(UnauthorizedResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Payment listing endpoints")
    )
)]
pub struct ApiDoc;

/// Create the payment router
pub fn router<R: PaymentRepository + 'static>(service: PaymentService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_payments))
        .with_state(shared_service)
}

/// List payments visible to the actor
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PaymentFilter),
    responses(
        (status = 200, description = "List of payments", body = Vec<Payment>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_payments<R: PaymentRepository>(
    State(service): State<Arc<PaymentService<R>>>,
    actor: Actor,
    Query(filter): Query<PaymentFilter>,
) -> PaymentResult<Json<Vec<Payment>>> {
    let payments = service.list_payments(actor, filter).await?;
    Ok(Json(payments))
}
