//! Courses Domain
//!
//! Courses and their lessons, with ownership-scoped access and the
//! mutation-side half of the update notification pipeline.
//!
//! Layering follows the usual shape: handlers call a service, the service
//! applies validation and the ownership policy, repositories persist. The
//! one extra seam is [`UpdateNotifier`]: after every confirmed course or
//! lesson create/update the service announces the owning course's id, and
//! a queue-backed implementation turns that into a deferred fan-out job.
//! The announcement is fire-and-forget; delivery problems never surface
//! through the mutation response.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notifier;
pub mod policy;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CourseError, CourseResult};
pub use models::{
    Course, CourseFilter, CreateCourse, CreateLesson, Lesson, LessonFilter, UpdateCourse,
    UpdateLesson,
};
pub use notifier::{NoopNotifier, RecordingNotifier, UpdateNotifier};
pub use policy::{OwnerScope, owner_scope};
pub use postgres::{PgCourseRepository, PgLessonRepository};
pub use repository::{
    CourseRepository, InMemoryCourseRepository, InMemoryLessonRepository, LessonRepository,
};
pub use service::CourseService;
