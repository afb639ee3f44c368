use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CourseError, CourseResult};
use crate::models::{
    Course, CourseFilter, CreateCourse, CreateLesson, Lesson, LessonFilter, UpdateCourse,
    UpdateLesson,
};
use crate::policy::{OwnerScope, in_scope};

/// Repository trait for Course persistence.
///
/// Read and mutate operations take an [`OwnerScope`]; rows outside the
/// scope are invisible to the call, as if they did not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Create a new course owned by `owner_id`
    async fn create(&self, input: CreateCourse, owner_id: Uuid) -> CourseResult<Course>;

    /// Get a course by ID within the scope
    async fn get_by_id(&self, id: Uuid, scope: OwnerScope) -> CourseResult<Option<Course>>;

    /// List courses within the scope
    async fn list(&self, filter: CourseFilter, scope: OwnerScope) -> CourseResult<Vec<Course>>;

    /// Update a course within the scope
    async fn update(
        &self,
        id: Uuid,
        input: UpdateCourse,
        scope: OwnerScope,
    ) -> CourseResult<Course>;

    /// Delete a course within the scope; returns false if invisible or absent
    async fn delete(&self, id: Uuid, scope: OwnerScope) -> CourseResult<bool>;
}

/// Repository trait for Lesson persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Create a new lesson owned by `owner_id`
    async fn create(&self, input: CreateLesson, owner_id: Uuid) -> CourseResult<Lesson>;

    /// Get a lesson by ID within the scope
    async fn get_by_id(&self, id: Uuid, scope: OwnerScope) -> CourseResult<Option<Lesson>>;

    /// List lessons within the scope
    async fn list(&self, filter: LessonFilter, scope: OwnerScope) -> CourseResult<Vec<Lesson>>;

    /// Update a lesson within the scope
    async fn update(
        &self,
        id: Uuid,
        input: UpdateLesson,
        scope: OwnerScope,
    ) -> CourseResult<Lesson>;

    /// Delete a lesson within the scope; returns false if invisible or absent
    async fn delete(&self, id: Uuid, scope: OwnerScope) -> CourseResult<bool>;
}

/// In-memory implementation of CourseRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCourseRepository {
    courses: Arc<RwLock<HashMap<Uuid, Course>>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn create(&self, input: CreateCourse, owner_id: Uuid) -> CourseResult<Course> {
        let mut courses = self.courses.write().await;

        let course = Course::new(input, owner_id);
        courses.insert(course.id, course.clone());

        tracing::info!(course_id = %course.id, owner_id = %owner_id, "Created course");
        Ok(course)
    }

    async fn get_by_id(&self, id: Uuid, scope: OwnerScope) -> CourseResult<Option<Course>> {
        let courses = self.courses.read().await;
        Ok(courses
            .get(&id)
            .filter(|c| in_scope(scope, c.owner_id))
            .cloned())
    }

    async fn list(&self, filter: CourseFilter, scope: OwnerScope) -> CourseResult<Vec<Course>> {
        let courses = self.courses.read().await;

        let mut result: Vec<Course> = courses
            .values()
            .filter(|c| in_scope(scope, c.owner_id))
            .filter(|c| filter.owner_id.is_none_or(|owner| c.owner_id == owner))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdateCourse,
        scope: OwnerScope,
    ) -> CourseResult<Course> {
        let mut courses = self.courses.write().await;

        let course = courses
            .get_mut(&id)
            .filter(|c| in_scope(scope, c.owner_id))
            .ok_or(CourseError::CourseNotFound(id))?;

        course.apply_update(input);
        let updated = course.clone();

        tracing::info!(course_id = %id, "Updated course");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid, scope: OwnerScope) -> CourseResult<bool> {
        let mut courses = self.courses.write().await;

        let visible = courses
            .get(&id)
            .is_some_and(|c| in_scope(scope, c.owner_id));
        if !visible {
            return Ok(false);
        }

        courses.remove(&id);
        tracing::info!(course_id = %id, "Deleted course");
        Ok(true)
    }
}

/// In-memory implementation of LessonRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryLessonRepository {
    lessons: Arc<RwLock<HashMap<Uuid, Lesson>>>,
}

impl InMemoryLessonRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LessonRepository for InMemoryLessonRepository {
    async fn create(&self, input: CreateLesson, owner_id: Uuid) -> CourseResult<Lesson> {
        let mut lessons = self.lessons.write().await;

        let lesson = Lesson::new(input, owner_id);
        lessons.insert(lesson.id, lesson.clone());

        tracing::info!(lesson_id = %lesson.id, course_id = %lesson.course_id, "Created lesson");
        Ok(lesson)
    }

    async fn get_by_id(&self, id: Uuid, scope: OwnerScope) -> CourseResult<Option<Lesson>> {
        let lessons = self.lessons.read().await;
        Ok(lessons
            .get(&id)
            .filter(|l| in_scope(scope, l.owner_id))
            .cloned())
    }

    async fn list(&self, filter: LessonFilter, scope: OwnerScope) -> CourseResult<Vec<Lesson>> {
        let lessons = self.lessons.read().await;

        let mut result: Vec<Lesson> = lessons
            .values()
            .filter(|l| in_scope(scope, l.owner_id))
            .filter(|l| filter.course_id.is_none_or(|course| l.course_id == course))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdateLesson,
        scope: OwnerScope,
    ) -> CourseResult<Lesson> {
        let mut lessons = self.lessons.write().await;

        let lesson = lessons
            .get_mut(&id)
            .filter(|l| in_scope(scope, l.owner_id))
            .ok_or(CourseError::LessonNotFound(id))?;

        lesson.apply_update(input);
        let updated = lesson.clone();

        tracing::info!(lesson_id = %id, "Updated lesson");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid, scope: OwnerScope) -> CourseResult<bool> {
        let mut lessons = self.lessons.write().await;

        let visible = lessons
            .get(&id)
            .is_some_and(|l| in_scope(scope, l.owner_id));
        if !visible {
            return Ok(false);
        }

        lessons.remove(&id);
        tracing::info!(lesson_id = %id, "Deleted lesson");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course_input(title: &str) -> CreateCourse {
        CreateCourse {
            title: title.to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_course() {
        let repo = InMemoryCourseRepository::new();
        let owner = Uuid::now_v7();

        let course = repo.create(course_input("Rust 101"), owner).await.unwrap();
        assert_eq!(course.owner_id, owner);

        let fetched = repo.get_by_id(course.id, Some(owner)).await.unwrap();
        assert_eq!(fetched.unwrap().title, "Rust 101");
    }

    #[tokio::test]
    async fn test_scoped_get_hides_foreign_course() {
        let repo = InMemoryCourseRepository::new();
        let owner = Uuid::now_v7();
        let stranger = Uuid::now_v7();

        let course = repo.create(course_input("Private"), owner).await.unwrap();

        let fetched = repo.get_by_id(course.id, Some(stranger)).await.unwrap();
        assert!(fetched.is_none());

        let unrestricted = repo.get_by_id(course.id, None).await.unwrap();
        assert!(unrestricted.is_some());
    }

    #[tokio::test]
    async fn test_scoped_delete_leaves_foreign_course() {
        let repo = InMemoryCourseRepository::new();
        let owner = Uuid::now_v7();
        let stranger = Uuid::now_v7();

        let course = repo.create(course_input("Keep me"), owner).await.unwrap();

        let deleted = repo.delete(course.id, Some(stranger)).await.unwrap();
        assert!(!deleted);
        assert!(repo.get_by_id(course.id, None).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_lesson_list_filters_by_course() {
        let repo = InMemoryLessonRepository::new();
        let owner = Uuid::now_v7();
        let course_a = Uuid::now_v7();
        let course_b = Uuid::now_v7();

        for (course_id, title) in [(course_a, "a1"), (course_a, "a2"), (course_b, "b1")] {
            let input = CreateLesson {
                course_id,
                title: title.to_string(),
                description: String::new(),
                video_url: None,
            };
            repo.create(input, owner).await.unwrap();
        }

        let filter = LessonFilter {
            course_id: Some(course_a),
            ..Default::default()
        };
        let lessons = repo.list(filter, None).await.unwrap();
        assert_eq!(lessons.len(), 2);
        assert!(lessons.iter().all(|l| l.course_id == course_a));
    }
}
