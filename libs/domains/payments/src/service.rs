use std::sync::Arc;

use crate::error::PaymentResult;
use crate::models::{Payment, PaymentFilter};
use crate::repository::PaymentRepository;
use domain_users::Actor;

/// Service layer for payment listings.
///
/// Non-staff actors see only their own payments; staff see all.
#[derive(Clone)]
pub struct PaymentService<R: PaymentRepository> {
    repository: Arc<R>,
}

impl<R: PaymentRepository> PaymentService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List payments visible to the actor, filtered and ordered
    pub async fn list_payments(
        &self,
        actor: Actor,
        filter: PaymentFilter,
    ) -> PaymentResult<Vec<Payment>> {
        let scope = if actor.is_staff {
            None
        } else {
            Some(actor.user_id)
        };

        self.repository.list(filter, scope).await
    }
}
