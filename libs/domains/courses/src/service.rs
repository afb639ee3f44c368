use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CourseError, CourseResult};
use crate::models::{
    Course, CourseFilter, CreateCourse, CreateLesson, Lesson, LessonFilter, UpdateCourse,
    UpdateLesson,
};
use crate::notifier::UpdateNotifier;
use crate::policy::owner_scope;
use crate::repository::{CourseRepository, LessonRepository};
use domain_users::Actor;

/// Service layer for course and lesson business logic.
///
/// Every mutation runs scoped to the acting user, and every confirmed
/// create/update announces the owning course on the notifier. The
/// announcement happens strictly after the save and its outcome is
/// invisible to the caller.
#[derive(Clone)]
pub struct CourseService<C: CourseRepository, L: LessonRepository> {
    courses: Arc<C>,
    lessons: Arc<L>,
    notifier: Arc<dyn UpdateNotifier>,
}

impl<C: CourseRepository, L: LessonRepository> CourseService<C, L> {
    pub fn new(courses: C, lessons: L, notifier: Arc<dyn UpdateNotifier>) -> Self {
        Self {
            courses: Arc::new(courses),
            lessons: Arc::new(lessons),
            notifier,
        }
    }

    /// Create a course owned by the actor
    pub async fn create_course(&self, actor: Actor, input: CreateCourse) -> CourseResult<Course> {
        input
            .validate()
            .map_err(|e| CourseError::Validation(e.to_string()))?;

        let course = self.courses.create(input, actor.user_id).await?;
        self.notifier.course_updated(course.id).await;
        Ok(course)
    }

    /// Get a course visible to the actor
    pub async fn get_course(&self, actor: Actor, id: Uuid) -> CourseResult<Course> {
        self.courses
            .get_by_id(id, owner_scope(actor))
            .await?
            .ok_or(CourseError::CourseNotFound(id))
    }

    /// List courses visible to the actor
    pub async fn list_courses(
        &self,
        actor: Actor,
        filter: CourseFilter,
    ) -> CourseResult<Vec<Course>> {
        self.courses.list(filter, owner_scope(actor)).await
    }

    /// Update a course visible to the actor
    pub async fn update_course(
        &self,
        actor: Actor,
        id: Uuid,
        input: UpdateCourse,
    ) -> CourseResult<Course> {
        input
            .validate()
            .map_err(|e| CourseError::Validation(e.to_string()))?;

        let course = self.courses.update(id, input, owner_scope(actor)).await?;
        self.notifier.course_updated(course.id).await;
        Ok(course)
    }

    /// Delete a course visible to the actor
    pub async fn delete_course(&self, actor: Actor, id: Uuid) -> CourseResult<()> {
        let deleted = self.courses.delete(id, owner_scope(actor)).await?;

        if !deleted {
            return Err(CourseError::CourseNotFound(id));
        }

        Ok(())
    }

    /// Create a lesson owned by the actor under a course the actor can see
    pub async fn create_lesson(&self, actor: Actor, input: CreateLesson) -> CourseResult<Lesson> {
        input
            .validate()
            .map_err(|e| CourseError::Validation(e.to_string()))?;

        // The parent course must resolve within the actor's scope.
        self.courses
            .get_by_id(input.course_id, owner_scope(actor))
            .await?
            .ok_or(CourseError::CourseNotFound(input.course_id))?;

        let lesson = self.lessons.create(input, actor.user_id).await?;
        self.notifier.course_updated(lesson.course_id).await;
        Ok(lesson)
    }

    /// Get a lesson visible to the actor
    pub async fn get_lesson(&self, actor: Actor, id: Uuid) -> CourseResult<Lesson> {
        self.lessons
            .get_by_id(id, owner_scope(actor))
            .await?
            .ok_or(CourseError::LessonNotFound(id))
    }

    /// List lessons visible to the actor
    pub async fn list_lessons(
        &self,
        actor: Actor,
        filter: LessonFilter,
    ) -> CourseResult<Vec<Lesson>> {
        self.lessons.list(filter, owner_scope(actor)).await
    }

    /// List the lessons of a course the actor can see
    pub async fn list_course_lessons(
        &self,
        actor: Actor,
        course_id: Uuid,
    ) -> CourseResult<Vec<Lesson>> {
        self.courses
            .get_by_id(course_id, owner_scope(actor))
            .await?
            .ok_or(CourseError::CourseNotFound(course_id))?;

        let filter = LessonFilter {
            course_id: Some(course_id),
            ..Default::default()
        };
        self.lessons.list(filter, owner_scope(actor)).await
    }

    /// Update a lesson visible to the actor
    pub async fn update_lesson(
        &self,
        actor: Actor,
        id: Uuid,
        input: UpdateLesson,
    ) -> CourseResult<Lesson> {
        input
            .validate()
            .map_err(|e| CourseError::Validation(e.to_string()))?;

        let lesson = self.lessons.update(id, input, owner_scope(actor)).await?;
        self.notifier.course_updated(lesson.course_id).await;
        Ok(lesson)
    }

    /// Delete a lesson visible to the actor
    pub async fn delete_lesson(&self, actor: Actor, id: Uuid) -> CourseResult<()> {
        let deleted = self.lessons.delete(id, owner_scope(actor)).await?;

        if !deleted {
            return Err(CourseError::LessonNotFound(id));
        }

        Ok(())
    }
}
