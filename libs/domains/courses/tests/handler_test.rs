//! Handler tests for the Courses domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Identity extraction from gateway headers
//! - Request deserialization and validation
//! - Ownership scoping of reads and writes
//! - HTTP status codes and error responses

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_courses::*;
use domain_users::Actor;
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use test_utils::{TestDataBuilder, assertions::assert_uuid_eq};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn test_app(
    notifier: RecordingNotifier,
) -> (
    Router,
    Arc<CourseService<InMemoryCourseRepository, InMemoryLessonRepository>>,
) {
    let service = Arc::new(CourseService::new(
        InMemoryCourseRepository::new(),
        InMemoryLessonRepository::new(),
        Arc::new(notifier),
    ));
    let app = Router::new()
        .nest("/courses", handlers::course_router(service.clone()))
        .nest("/lessons", handlers::lesson_router(service.clone()));
    (app, service)
}

fn authed(actor: Actor, builder: axum::http::request::Builder) -> axum::http::request::Builder {
    let builder = builder.header("x-user-id", actor.user_id.to_string());
    if actor.is_staff {
        builder.header("x-user-staff", "true")
    } else {
        builder
    }
}

#[tokio::test]
async fn test_create_course_handler_returns_201() {
    let (app, _) = test_app(RecordingNotifier::new());
    let builder = TestDataBuilder::from_test_name("create_course_handler_returns_201");
    let actor = Actor::user(builder.user_id());
    let title = builder.name("course", "main");

    let request = authed(actor, Request::builder().method("POST").uri("/courses"))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "title": title,
                "description": "An introduction"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let course: Course = json_body(response.into_body()).await;
    assert_eq!(course.title, title);
    assert_uuid_eq(course.owner_id, actor.user_id, "course owner");
}

#[tokio::test]
async fn test_create_course_without_identity_returns_401() {
    let (app, _) = test_app(RecordingNotifier::new());

    let request = Request::builder()
        .method("POST")
        .uri("/courses")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({"title": "Anonymous course"})).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_course_handler_validates_input() {
    let (app, _) = test_app(RecordingNotifier::new());
    let actor = Actor::user(Uuid::now_v7());

    // Empty title is invalid
    let request = authed(actor, Request::builder().method("POST").uri("/courses"))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({"title": ""})).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_foreign_course_returns_404() {
    let (app, service) = test_app(RecordingNotifier::new());
    let owner = Actor::user(Uuid::now_v7());
    let stranger = Actor::user(Uuid::now_v7());

    let course = service
        .create_course(
            owner,
            CreateCourse {
                title: "Private".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();

    let request = authed(
        stranger,
        Request::builder()
            .method("GET")
            .uri(format!("/courses/{}", course.id)),
    )
    .body(Body::empty())
    .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_staff_lists_all_courses() {
    let (app, service) = test_app(RecordingNotifier::new());
    let alice = Actor::user(Uuid::now_v7());
    let bob = Actor::user(Uuid::now_v7());
    let staff = Actor::staff(Uuid::now_v7());

    for (actor, title) in [(alice, "Alice's"), (bob, "Bob's")] {
        service
            .create_course(
                actor,
                CreateCourse {
                    title: title.to_string(),
                    description: String::new(),
                },
            )
            .await
            .unwrap();
    }

    let request = authed(alice, Request::builder().method("GET").uri("/courses"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let courses: Vec<Course> = json_body(response.into_body()).await;
    assert_eq!(courses.len(), 1);

    let request = authed(staff, Request::builder().method("GET").uri("/courses"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let courses: Vec<Course> = json_body(response.into_body()).await;
    assert_eq!(courses.len(), 2);
}

#[tokio::test]
async fn test_create_lesson_announces_parent_course_once() {
    let notifier = RecordingNotifier::new();
    let (app, service) = test_app(notifier.clone());
    let actor = Actor::user(Uuid::now_v7());

    let course = service
        .create_course(
            actor,
            CreateCourse {
                title: "Rust 101".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();

    let request = authed(actor, Request::builder().method("POST").uri("/lessons"))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "course_id": course.id,
                "title": "Ownership",
                "description": "Moves and borrows"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let lesson: Lesson = json_body(response.into_body()).await;
    assert_eq!(lesson.course_id, course.id);

    // Course create announced once, lesson create announced once more.
    assert_eq!(notifier.announced().await, vec![course.id, course.id]);
}

#[tokio::test]
async fn test_list_course_lessons() {
    let (app, service) = test_app(RecordingNotifier::new());
    let actor = Actor::user(Uuid::now_v7());

    let course = service
        .create_course(
            actor,
            CreateCourse {
                title: "Rust 101".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();

    for title in ["Ownership", "Borrowing"] {
        service
            .create_lesson(
                actor,
                CreateLesson {
                    course_id: course.id,
                    title: title.to_string(),
                    description: String::new(),
                    video_url: None,
                },
            )
            .await
            .unwrap();
    }

    let request = authed(
        actor,
        Request::builder()
            .method("GET")
            .uri(format!("/courses/{}/lessons", course.id)),
    )
    .body(Body::empty())
    .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let lessons: Vec<Lesson> = json_body(response.into_body()).await;
    assert_eq!(lessons.len(), 2);
    assert!(lessons.iter().all(|l| l.course_id == course.id));
}

#[tokio::test]
async fn test_delete_course_returns_204() {
    let (app, service) = test_app(RecordingNotifier::new());
    let actor = Actor::user(Uuid::now_v7());

    let course = service
        .create_course(
            actor,
            CreateCourse {
                title: "Short lived".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();

    let request = authed(
        actor,
        Request::builder()
            .method("DELETE")
            .uri(format!("/courses/{}", course.id)),
    )
    .body(Body::empty())
    .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
