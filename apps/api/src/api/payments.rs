use axum::Router;
use domain_payments::{PaymentService, PgPaymentRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let service = PaymentService::new(PgPaymentRepository::new(state.db.clone()));
    handlers::router(service)
}
