use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::PaymentResult;
use crate::models::{Payment, PaymentFilter, SortOrder};

/// Read-only repository trait for Payment rows.
///
/// `scope` restricts the listing to one paying user; `None` lifts the
/// restriction for staff actors.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// List payments matching the filter, ordered by payment date
    async fn list(&self, filter: PaymentFilter, scope: Option<Uuid>)
    -> PaymentResult<Vec<Payment>>;
}

/// In-memory implementation of PaymentRepository (for development/testing).
/// Rows are seeded through [`InMemoryPaymentRepository::insert`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<HashMap<Uuid, Payment>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a payment row
    pub async fn insert(&self, payment: Payment) {
        self.payments.write().await.insert(payment.id, payment);
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn list(
        &self,
        filter: PaymentFilter,
        scope: Option<Uuid>,
    ) -> PaymentResult<Vec<Payment>> {
        let payments = self.payments.read().await;

        let mut result: Vec<Payment> = payments
            .values()
            .filter(|p| scope.is_none_or(|user_id| p.user_id == user_id))
            .filter(|p| filter.course_id.is_none_or(|c| p.course_id == Some(c)))
            .filter(|p| filter.lesson_id.is_none_or(|l| p.lesson_id == Some(l)))
            .filter(|p| {
                filter
                    .payment_method
                    .is_none_or(|m| p.payment_method == m)
            })
            .cloned()
            .collect();

        match filter.order {
            SortOrder::Asc => result.sort_by(|a, b| a.payment_date.cmp(&b.payment_date)),
            SortOrder::Desc => result.sort_by(|a, b| b.payment_date.cmp(&a.payment_date)),
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;
    use chrono::{Duration, Utc};

    fn payment(user_id: Uuid, method: PaymentMethod, days_ago: i64) -> Payment {
        Payment {
            id: Uuid::now_v7(),
            user_id,
            course_id: Some(Uuid::now_v7()),
            lesson_id: None,
            amount: 49.0,
            payment_method: method,
            payment_date: Utc::now() - Duration::days(days_ago),
        }
    }

    #[tokio::test]
    async fn test_filter_by_payment_method() {
        let repo = InMemoryPaymentRepository::new();
        let user = Uuid::now_v7();

        repo.insert(payment(user, PaymentMethod::Cash, 1)).await;
        repo.insert(payment(user, PaymentMethod::Transfer, 2)).await;

        let filter = PaymentFilter {
            payment_method: Some(PaymentMethod::Cash),
            ..Default::default()
        };
        let result = repo.list(filter, None).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].payment_method, PaymentMethod::Cash);
    }

    #[tokio::test]
    async fn test_order_by_payment_date() {
        let repo = InMemoryPaymentRepository::new();
        let user = Uuid::now_v7();

        repo.insert(payment(user, PaymentMethod::Cash, 3)).await;
        repo.insert(payment(user, PaymentMethod::Cash, 1)).await;
        repo.insert(payment(user, PaymentMethod::Cash, 2)).await;

        let asc = repo
            .list(
                PaymentFilter {
                    order: SortOrder::Asc,
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert!(asc.windows(2).all(|w| w[0].payment_date <= w[1].payment_date));

        let desc = repo.list(PaymentFilter::default(), None).await.unwrap();
        assert!(desc.windows(2).all(|w| w[0].payment_date >= w[1].payment_date));
    }

    #[tokio::test]
    async fn test_scope_restricts_to_one_user() {
        let repo = InMemoryPaymentRepository::new();
        let alice = Uuid::now_v7();
        let bob = Uuid::now_v7();

        repo.insert(payment(alice, PaymentMethod::Cash, 1)).await;
        repo.insert(payment(bob, PaymentMethod::Cash, 1)).await;

        let result = repo
            .list(PaymentFilter::default(), Some(alice))
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].user_id, alice);
    }
}
