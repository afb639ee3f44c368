use std::sync::Arc;
use uuid::Uuid;

use crate::error::{SubscriptionError, SubscriptionResult};
use crate::models::{CreateSubscription, Subscription};
use crate::repository::SubscriptionRepository;
use domain_courses::repository::CourseRepository;
use domain_users::Actor;

/// Service layer for subscription business logic.
///
/// Subscribing is not ownership-scoped: any authenticated user may follow
/// any existing course, including ones they cannot read. Unsubscribing is
/// restricted to the subscription's own user unless the actor is staff.
#[derive(Clone)]
pub struct SubscriptionService<S: SubscriptionRepository, C: CourseRepository> {
    subscriptions: Arc<S>,
    courses: Arc<C>,
}

impl<S: SubscriptionRepository, C: CourseRepository> SubscriptionService<S, C> {
    pub fn new(subscriptions: S, courses: C) -> Self {
        Self {
            subscriptions: Arc::new(subscriptions),
            courses: Arc::new(courses),
        }
    }

    /// Subscribe the actor to a course
    pub async fn subscribe(
        &self,
        actor: Actor,
        input: CreateSubscription,
    ) -> SubscriptionResult<Subscription> {
        // The course must exist. Visibility is not required; an unscoped
        // lookup is deliberate here.
        self.courses
            .get_by_id(input.course_id, None)
            .await
            .map_err(|e| SubscriptionError::Internal(e.to_string()))?
            .ok_or(SubscriptionError::CourseNotFound(input.course_id))?;

        self.subscriptions
            .create(actor.user_id, input.course_id)
            .await
    }

    /// List the actor's own subscriptions
    pub async fn list_own(&self, actor: Actor) -> SubscriptionResult<Vec<Subscription>> {
        self.subscriptions.list_for_user(actor.user_id).await
    }

    /// Remove a subscription. Own-only unless the actor is staff; foreign
    /// subscriptions are reported as absent.
    pub async fn unsubscribe(&self, actor: Actor, id: Uuid) -> SubscriptionResult<()> {
        let subscription = self
            .subscriptions
            .get_by_id(id)
            .await?
            .ok_or(SubscriptionError::NotFound(id))?;

        if subscription.user_id != actor.user_id && !actor.is_staff {
            return Err(SubscriptionError::NotFound(id));
        }

        let deleted = self.subscriptions.delete(id).await?;
        if !deleted {
            return Err(SubscriptionError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemorySubscriptionRepository;
    use domain_courses::models::CreateCourse;
    use domain_courses::repository::InMemoryCourseRepository;

    async fn service_with_course() -> (
        SubscriptionService<InMemorySubscriptionRepository, InMemoryCourseRepository>,
        Uuid,
    ) {
        let courses = InMemoryCourseRepository::new();
        let course = courses
            .create(
                CreateCourse {
                    title: "Rust 101".to_string(),
                    description: String::new(),
                },
                Uuid::now_v7(),
            )
            .await
            .unwrap();

        let service = SubscriptionService::new(InMemorySubscriptionRepository::new(), courses);
        (service, course.id)
    }

    #[tokio::test]
    async fn test_subscribe_to_existing_course() {
        let (service, course_id) = service_with_course().await;
        let actor = Actor::user(Uuid::now_v7());

        let sub = service
            .subscribe(actor, CreateSubscription { course_id })
            .await
            .unwrap();

        assert_eq!(sub.user_id, actor.user_id);
        assert_eq!(sub.course_id, course_id);
    }

    #[tokio::test]
    async fn test_subscribe_to_missing_course_fails() {
        let (service, _) = service_with_course().await;
        let actor = Actor::user(Uuid::now_v7());

        let result = service
            .subscribe(
                actor,
                CreateSubscription {
                    course_id: Uuid::now_v7(),
                },
            )
            .await;

        assert!(matches!(result, Err(SubscriptionError::CourseNotFound(_))));
    }

    #[tokio::test]
    async fn test_unsubscribe_foreign_subscription_reported_absent() {
        let (service, course_id) = service_with_course().await;
        let subscriber = Actor::user(Uuid::now_v7());
        let stranger = Actor::user(Uuid::now_v7());

        let sub = service
            .subscribe(subscriber, CreateSubscription { course_id })
            .await
            .unwrap();

        let result = service.unsubscribe(stranger, sub.id).await;
        assert!(matches!(result, Err(SubscriptionError::NotFound(_))));

        // The subscriber can still remove their own.
        service.unsubscribe(subscriber, sub.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_staff_can_unsubscribe_anyone() {
        let (service, course_id) = service_with_course().await;
        let subscriber = Actor::user(Uuid::now_v7());
        let staff = Actor::staff(Uuid::now_v7());

        let sub = service
            .subscribe(subscriber, CreateSubscription { course_id })
            .await
            .unwrap();

        service.unsubscribe(staff, sub.id).await.unwrap();
        assert!(service.list_own(subscriber).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_own_only_returns_actor_rows() {
        let (service, course_id) = service_with_course().await;
        let alice = Actor::user(Uuid::now_v7());
        let bob = Actor::user(Uuid::now_v7());

        service
            .subscribe(alice, CreateSubscription { course_id })
            .await
            .unwrap();
        service
            .subscribe(bob, CreateSubscription { course_id })
            .await
            .unwrap();

        let alice_subs = service.list_own(alice).await.unwrap();
        assert_eq!(alice_subs.len(), 1);
        assert_eq!(alice_subs[0].user_id, alice.user_id);
    }
}
