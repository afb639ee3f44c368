//! Fan-out processor for course update jobs.

use crate::job::CourseUpdateJob;
use crate::models::Email;
use crate::provider::EmailProvider;
use async_trait::async_trait;
use domain_courses::{Course, CourseRepository};
use domain_subscriptions::SubscriptionRepository;
use domain_users::UserRepository;
use std::sync::Arc;
use stream_worker::{StreamError, StreamProcessor};
use tracing::{debug, info, warn};

/// Resolves a course's subscribers and emails each one.
///
/// Subscribers are loaded fresh on every job, so repeated updates to a
/// course produce repeated notifications and late subscribers are included.
/// A failed send to one recipient is logged and skipped; it never blocks
/// the rest of the fan-out or fails the job.
pub struct CourseUpdateProcessor<P: EmailProvider> {
    courses: Arc<dyn CourseRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    users: Arc<dyn UserRepository>,
    provider: Arc<P>,
}

impl<P: EmailProvider> CourseUpdateProcessor<P> {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        users: Arc<dyn UserRepository>,
        provider: Arc<P>,
    ) -> Self {
        Self {
            courses,
            subscriptions,
            users,
            provider,
        }
    }

    fn build_email(course: &Course, recipient: &str) -> Email {
        let body = format!(
            "The course \"{}\" has new material. Log in to see what changed.",
            course.title
        );
        Email::new(recipient, &course.title).with_text(body)
    }
}

#[async_trait]
impl<P: EmailProvider> StreamProcessor<CourseUpdateJob> for CourseUpdateProcessor<P> {
    async fn process(&self, job: &CourseUpdateJob) -> Result<(), StreamError> {
        let course = self
            .courses
            .get_by_id(job.course_id, None)
            .await
            .map_err(|e| StreamError::transient(e.to_string()))?
            .ok_or_else(|| {
                StreamError::permanent(format!("course {} no longer exists", job.course_id))
            })?;

        let subscriptions = self
            .subscriptions
            .list_by_course(job.course_id)
            .await
            .map_err(|e| StreamError::transient(e.to_string()))?;

        let mut sent = 0usize;
        let mut skipped = 0usize;

        for subscription in &subscriptions {
            let user = match self.users.get_by_id(subscription.user_id).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    debug!(user_id = %subscription.user_id, "subscriber no longer exists, skipping");
                    skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!(user_id = %subscription.user_id, error = %e, "failed to resolve subscriber, skipping");
                    skipped += 1;
                    continue;
                }
            };

            let email = Self::build_email(&course, &user.email);
            match self.provider.send(&email).await {
                Ok(_) => sent += 1,
                Err(e) => {
                    debug!(to = %user.email, course_id = %course.id, error = %e, "email delivery failed, skipping recipient");
                    skipped += 1;
                }
            }
        }

        info!(
            course_id = %course.id,
            subscribers = subscriptions.len(),
            sent,
            skipped,
            "course update fan-out complete"
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "course_update_processor"
    }

    async fn health_check(&self) -> Result<bool, StreamError> {
        self.provider
            .health_check()
            .await
            .map_err(|e| StreamError::transient(e.to_string()))
    }
}
