use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use uuid::Uuid;

use crate::{
    entity::{course, lesson},
    error::{CourseError, CourseResult},
    models::{
        Course, CourseFilter, CreateCourse, CreateLesson, Lesson, LessonFilter, UpdateCourse,
        UpdateLesson,
    },
    policy::OwnerScope,
    repository::{CourseRepository, LessonRepository},
};

/// Apply the ownership scope to a course query
fn scoped_courses(query: Select<course::Entity>, scope: OwnerScope) -> Select<course::Entity> {
    match scope {
        None => query,
        Some(user_id) => query.filter(course::Column::OwnerId.eq(user_id)),
    }
}

/// Apply the ownership scope to a lesson query
fn scoped_lessons(query: Select<lesson::Entity>, scope: OwnerScope) -> Select<lesson::Entity> {
    match scope {
        None => query,
        Some(user_id) => query.filter(lesson::Column::OwnerId.eq(user_id)),
    }
}

fn db_error(e: sea_orm::DbErr) -> CourseError {
    CourseError::Internal(format!("Database error: {}", e))
}

/// Postgres-backed implementation of CourseRepository
pub struct PgCourseRepository {
    db: DatabaseConnection,
}

impl PgCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn create(&self, input: CreateCourse, owner_id: Uuid) -> CourseResult<Course> {
        let domain = Course::new(input, owner_id);
        let active_model: course::ActiveModel = domain.into();

        let model = active_model.insert(&self.db).await.map_err(db_error)?;

        tracing::info!(course_id = %model.id, owner_id = %owner_id, "Created course");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid, scope: OwnerScope) -> CourseResult<Option<Course>> {
        let query = scoped_courses(course::Entity::find_by_id(id), scope);
        let model = query.one(&self.db).await.map_err(db_error)?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, filter: CourseFilter, scope: OwnerScope) -> CourseResult<Vec<Course>> {
        let mut query = scoped_courses(course::Entity::find(), scope);

        if let Some(owner_id) = filter.owner_id {
            query = query.filter(course::Column::OwnerId.eq(owner_id));
        }

        let models = query
            .order_by_desc(course::Column::CreatedAt)
            .limit(filter.limit as u64)
            .offset(filter.offset as u64)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdateCourse,
        scope: OwnerScope,
    ) -> CourseResult<Course> {
        let model = scoped_courses(course::Entity::find_by_id(id), scope)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or(CourseError::CourseNotFound(id))?;

        let mut domain: Course = model.into();
        domain.apply_update(input);

        let active_model: course::ActiveModel = domain.into();
        let updated = active_model.update(&self.db).await.map_err(db_error)?;

        tracing::info!(course_id = %id, "Updated course");
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid, scope: OwnerScope) -> CourseResult<bool> {
        let visible = scoped_courses(course::Entity::find_by_id(id), scope)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .is_some();

        if !visible {
            return Ok(false);
        }

        let result = course::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected > 0 {
            tracing::info!(course_id = %id, "Deleted course");
        }
        Ok(result.rows_affected > 0)
    }
}

/// Postgres-backed implementation of LessonRepository
pub struct PgLessonRepository {
    db: DatabaseConnection,
}

impl PgLessonRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LessonRepository for PgLessonRepository {
    async fn create(&self, input: CreateLesson, owner_id: Uuid) -> CourseResult<Lesson> {
        let domain = Lesson::new(input, owner_id);
        let active_model: lesson::ActiveModel = domain.into();

        let model = active_model.insert(&self.db).await.map_err(db_error)?;

        tracing::info!(lesson_id = %model.id, course_id = %model.course_id, "Created lesson");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid, scope: OwnerScope) -> CourseResult<Option<Lesson>> {
        let query = scoped_lessons(lesson::Entity::find_by_id(id), scope);
        let model = query.one(&self.db).await.map_err(db_error)?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, filter: LessonFilter, scope: OwnerScope) -> CourseResult<Vec<Lesson>> {
        let mut query = scoped_lessons(lesson::Entity::find(), scope);

        if let Some(course_id) = filter.course_id {
            query = query.filter(lesson::Column::CourseId.eq(course_id));
        }

        let models = query
            .order_by_desc(lesson::Column::CreatedAt)
            .limit(filter.limit as u64)
            .offset(filter.offset as u64)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdateLesson,
        scope: OwnerScope,
    ) -> CourseResult<Lesson> {
        let model = scoped_lessons(lesson::Entity::find_by_id(id), scope)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or(CourseError::LessonNotFound(id))?;

        let mut domain: Lesson = model.into();
        domain.apply_update(input);

        let active_model: lesson::ActiveModel = domain.into();
        let updated = active_model.update(&self.db).await.map_err(db_error)?;

        tracing::info!(lesson_id = %id, "Updated lesson");
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid, scope: OwnerScope) -> CourseResult<bool> {
        let visible = scoped_lessons(lesson::Entity::find_by_id(id), scope)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .is_some();

        if !visible {
            return Ok(false);
        }

        let result = lesson::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected > 0 {
            tracing::info!(lesson_id = %id, "Deleted lesson");
        }
        Ok(result.rows_affected > 0)
    }
}
