use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CourseResult;
use crate::models::{
    Course, CourseFilter, CreateCourse, CreateLesson, Lesson, LessonFilter, UpdateCourse,
    UpdateLesson,
};
use crate::repository::{CourseRepository, LessonRepository};
use crate::service::CourseService;
use domain_users::Actor;

const COURSES_TAG: &str = "courses";
const LESSONS_TAG: &str = "lessons";

/// OpenAPI documentation for the Courses API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_courses,
        create_course,
        get_course,
        update_course,
        delete_course,
        list_course_lessons,
    ),
    components(
        schemas(Course, CreateCourse, UpdateCourse, CourseFilter, Lesson),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = COURSES_TAG, description = "Course management endpoints")
    )
)]
pub struct CourseApiDoc;

/// OpenAPI documentation for the Lessons API
#[derive(OpenApi)]
#[openapi(
    paths(list_lessons, create_lesson, get_lesson, update_lesson, delete_lesson),
    components(
        schemas(Lesson, CreateLesson, UpdateLesson, LessonFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = LESSONS_TAG, description = "Lesson management endpoints")
    )
)]
pub struct LessonApiDoc;

/// Create the course router with all HTTP endpoints
pub fn course_router<C, L>(service: Arc<CourseService<C, L>>) -> Router
where
    C: CourseRepository + 'static,
    L: LessonRepository + 'static,
{
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/{id}/lessons", get(list_course_lessons))
        .with_state(service)
}

/// Create the lesson router with all HTTP endpoints
pub fn lesson_router<C, L>(service: Arc<CourseService<C, L>>) -> Router
where
    C: CourseRepository + 'static,
    L: LessonRepository + 'static,
{
    Router::new()
        .route("/", get(list_lessons).post(create_lesson))
        .route(
            "/{id}",
            get(get_lesson).put(update_lesson).delete(delete_lesson),
        )
        .with_state(service)
}

/// List courses visible to the actor
#[utoipa::path(
    get,
    path = "",
    tag = COURSES_TAG,
    params(CourseFilter),
    responses(
        (status = 200, description = "List of courses", body = Vec<Course>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_courses<C: CourseRepository, L: LessonRepository>(
    State(service): State<Arc<CourseService<C, L>>>,
    actor: Actor,
    Query(filter): Query<CourseFilter>,
) -> CourseResult<Json<Vec<Course>>> {
    let courses = service.list_courses(actor, filter).await?;
    Ok(Json(courses))
}

/// Create a new course owned by the actor
#[utoipa::path(
    post,
    path = "",
    tag = COURSES_TAG,
    request_body = CreateCourse,
    responses(
        (status = 201, description = "Course created successfully", body = Course),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_course<C: CourseRepository, L: LessonRepository>(
    State(service): State<Arc<CourseService<C, L>>>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<CreateCourse>,
) -> CourseResult<impl IntoResponse> {
    let course = service.create_course(actor, input).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Get a course by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = COURSES_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = Course),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_course<C: CourseRepository, L: LessonRepository>(
    State(service): State<Arc<CourseService<C, L>>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> CourseResult<Json<Course>> {
    let course = service.get_course(actor, id).await?;
    Ok(Json(course))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/{id}",
    tag = COURSES_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = UpdateCourse,
    responses(
        (status = 200, description = "Course updated successfully", body = Course),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_course<C: CourseRepository, L: LessonRepository>(
    State(service): State<Arc<CourseService<C, L>>>,
    actor: Actor,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCourse>,
) -> CourseResult<Json<Course>> {
    let course = service.update_course(actor, id, input).await?;
    Ok(Json(course))
}

/// Delete a course
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = COURSES_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Course deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_course<C: CourseRepository, L: LessonRepository>(
    State(service): State<Arc<CourseService<C, L>>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> CourseResult<impl IntoResponse> {
    service.delete_course(actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the lessons of a course
#[utoipa::path(
    get,
    path = "/{id}/lessons",
    tag = COURSES_TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Lessons of the course", body = Vec<Lesson>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_course_lessons<C: CourseRepository, L: LessonRepository>(
    State(service): State<Arc<CourseService<C, L>>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> CourseResult<Json<Vec<Lesson>>> {
    let lessons = service.list_course_lessons(actor, id).await?;
    Ok(Json(lessons))
}

/// List lessons visible to the actor
#[utoipa::path(
    get,
    path = "",
    tag = LESSONS_TAG,
    params(LessonFilter),
    responses(
        (status = 200, description = "List of lessons", body = Vec<Lesson>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_lessons<C: CourseRepository, L: LessonRepository>(
    State(service): State<Arc<CourseService<C, L>>>,
    actor: Actor,
    Query(filter): Query<LessonFilter>,
) -> CourseResult<Json<Vec<Lesson>>> {
    let lessons = service.list_lessons(actor, filter).await?;
    Ok(Json(lessons))
}

/// Create a new lesson under a course the actor can see
#[utoipa::path(
    post,
    path = "",
    tag = LESSONS_TAG,
    request_body = CreateLesson,
    responses(
        (status = 201, description = "Lesson created successfully", body = Lesson),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_lesson<C: CourseRepository, L: LessonRepository>(
    State(service): State<Arc<CourseService<C, L>>>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<CreateLesson>,
) -> CourseResult<impl IntoResponse> {
    let lesson = service.create_lesson(actor, input).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// Get a lesson by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = LESSONS_TAG,
    params(
        ("id" = Uuid, Path, description = "Lesson ID")
    ),
    responses(
        (status = 200, description = "Lesson found", body = Lesson),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_lesson<C: CourseRepository, L: LessonRepository>(
    State(service): State<Arc<CourseService<C, L>>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> CourseResult<Json<Lesson>> {
    let lesson = service.get_lesson(actor, id).await?;
    Ok(Json(lesson))
}

/// Update a lesson
#[utoipa::path(
    put,
    path = "/{id}",
    tag = LESSONS_TAG,
    params(
        ("id" = Uuid, Path, description = "Lesson ID")
    ),
    request_body = UpdateLesson,
    responses(
        (status = 200, description = "Lesson updated successfully", body = Lesson),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_lesson<C: CourseRepository, L: LessonRepository>(
    State(service): State<Arc<CourseService<C, L>>>,
    actor: Actor,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateLesson>,
) -> CourseResult<Json<Lesson>> {
    let lesson = service.update_lesson(actor, id, input).await?;
    Ok(Json(lesson))
}

/// Delete a lesson
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = LESSONS_TAG,
    params(
        ("id" = Uuid, Path, description = "Lesson ID")
    ),
    responses(
        (status = 204, description = "Lesson deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_lesson<C: CourseRepository, L: LessonRepository>(
    State(service): State<Arc<CourseService<C, L>>>,
    actor: Actor,
    UuidPath(id): UuidPath,
) -> CourseResult<impl IntoResponse> {
    service.delete_lesson(actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
