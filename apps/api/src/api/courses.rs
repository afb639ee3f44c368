use axum::Router;
use domain_courses::{CourseService, PgCourseRepository, PgLessonRepository, handlers};
use email::{CourseUpdateStream, QueueUpdateNotifier};
use std::sync::Arc;
use stream_worker::StreamProducer;

/// Build the course and lesson routers.
///
/// Both share one service so the nested lesson listing under
/// `/courses/{id}/lessons` can verify course visibility. Writes announce
/// themselves on the course update stream for the notification worker.
pub fn routers(state: &crate::state::AppState) -> (Router, Router) {
    let producer = StreamProducer::from_stream_def::<CourseUpdateStream>(state.redis.clone());
    let notifier = Arc::new(QueueUpdateNotifier::new(producer));

    let service = Arc::new(CourseService::new(
        PgCourseRepository::new(state.db.clone()),
        PgLessonRepository::new(state.db.clone()),
        notifier,
    ));

    (
        handlers::course_router(service.clone()),
        handlers::lesson_router(service),
    )
}
