use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{SubscriptionError, SubscriptionResult};
use crate::models::Subscription;

/// Repository trait for Subscription persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Subscribe `user_id` to `course_id`; rejects duplicates
    async fn create(&self, user_id: Uuid, course_id: Uuid) -> SubscriptionResult<Subscription>;

    /// Get a subscription by ID
    async fn get_by_id(&self, id: Uuid) -> SubscriptionResult<Option<Subscription>>;

    /// List a user's subscriptions
    async fn list_for_user(&self, user_id: Uuid) -> SubscriptionResult<Vec<Subscription>>;

    /// List all subscriptions to a course. Used by the notification worker
    /// to build the recipient set at execution time.
    async fn list_by_course(&self, course_id: Uuid) -> SubscriptionResult<Vec<Subscription>>;

    /// Delete a subscription by ID; returns false if absent
    async fn delete(&self, id: Uuid) -> SubscriptionResult<bool>;
}

/// In-memory implementation of SubscriptionRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemorySubscriptionRepository {
    subscriptions: Arc<RwLock<HashMap<Uuid, Subscription>>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn create(&self, user_id: Uuid, course_id: Uuid) -> SubscriptionResult<Subscription> {
        let mut subscriptions = self.subscriptions.write().await;

        let duplicate = subscriptions
            .values()
            .any(|s| s.user_id == user_id && s.course_id == course_id);

        if duplicate {
            return Err(SubscriptionError::AlreadySubscribed { user_id, course_id });
        }

        let subscription = Subscription::new(user_id, course_id);
        subscriptions.insert(subscription.id, subscription.clone());

        tracing::info!(
            subscription_id = %subscription.id,
            user_id = %user_id,
            course_id = %course_id,
            "Created subscription"
        );
        Ok(subscription)
    }

    async fn get_by_id(&self, id: Uuid) -> SubscriptionResult<Option<Subscription>> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions.get(&id).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> SubscriptionResult<Vec<Subscription>> {
        let subscriptions = self.subscriptions.read().await;

        let mut result: Vec<Subscription> = subscriptions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn list_by_course(&self, course_id: Uuid) -> SubscriptionResult<Vec<Subscription>> {
        let subscriptions = self.subscriptions.read().await;

        Ok(subscriptions
            .values()
            .filter(|s| s.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> SubscriptionResult<bool> {
        let mut subscriptions = self.subscriptions.write().await;

        if subscriptions.remove(&id).is_some() {
            tracing::info!(subscription_id = %id, "Deleted subscription");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_list_by_course() {
        let repo = InMemorySubscriptionRepository::new();
        let course_id = Uuid::now_v7();

        for _ in 0..3 {
            repo.create(Uuid::now_v7(), course_id).await.unwrap();
        }
        repo.create(Uuid::now_v7(), Uuid::now_v7()).await.unwrap();

        let subs = repo.list_by_course(course_id).await.unwrap();
        assert_eq!(subs.len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_subscription_rejected() {
        let repo = InMemorySubscriptionRepository::new();
        let user_id = Uuid::now_v7();
        let course_id = Uuid::now_v7();

        repo.create(user_id, course_id).await.unwrap();

        let result = repo.create(user_id, course_id).await;
        assert!(matches!(
            result,
            Err(SubscriptionError::AlreadySubscribed { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_allows_resubscription() {
        let repo = InMemorySubscriptionRepository::new();
        let user_id = Uuid::now_v7();
        let course_id = Uuid::now_v7();

        let sub = repo.create(user_id, course_id).await.unwrap();
        assert!(repo.delete(sub.id).await.unwrap());
        assert!(!repo.delete(sub.id).await.unwrap());

        repo.create(user_id, course_id).await.unwrap();
    }
}
