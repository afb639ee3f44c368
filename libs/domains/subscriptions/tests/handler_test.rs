//! Handler tests for the Subscriptions domain

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_courses::models::CreateCourse;
use domain_courses::repository::{CourseRepository, InMemoryCourseRepository};
use domain_subscriptions::*;
use domain_users::Actor;
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn test_app() -> (Router, Uuid) {
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

    let service = Arc::new(SubscriptionService::new(
        InMemorySubscriptionRepository::new(),
        courses,
    ));
    (handlers::router(service), course.id)
}

fn subscribe_request(actor: Actor, course_id: Uuid) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("x-user-id", actor.user_id.to_string())
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({"course_id": course_id})).unwrap(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_subscribe_returns_201() {
    let (app, course_id) = test_app().await;
    let actor = Actor::user(Uuid::now_v7());

    let response = app.oneshot(subscribe_request(actor, course_id)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let sub: Subscription = json_body(response.into_body()).await;
    assert_eq!(sub.user_id, actor.user_id);
    assert_eq!(sub.course_id, course_id);
}

#[tokio::test]
async fn test_duplicate_subscribe_returns_409() {
    let (app, course_id) = test_app().await;
    let actor = Actor::user(Uuid::now_v7());

    let response = app
        .clone()
        .oneshot(subscribe_request(actor, course_id))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(subscribe_request(actor, course_id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_subscribe_to_missing_course_returns_404() {
    let (app, _) = test_app().await;
    let actor = Actor::user(Uuid::now_v7());

    let response = app
        .oneshot(subscribe_request(actor, Uuid::now_v7()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_returns_own_subscriptions_only() {
    let (app, course_id) = test_app().await;
    let alice = Actor::user(Uuid::now_v7());
    let bob = Actor::user(Uuid::now_v7());

    for actor in [alice, bob] {
        let response = app
            .clone()
            .oneshot(subscribe_request(actor, course_id))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .header("x-user-id", alice.user_id.to_string())
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let subs: Vec<Subscription> = json_body(response.into_body()).await;
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].user_id, alice.user_id);
}

#[tokio::test]
async fn test_unsubscribe_returns_204() {
    let (app, course_id) = test_app().await;
    let actor = Actor::user(Uuid::now_v7());

    let response = app
        .clone()
        .oneshot(subscribe_request(actor, course_id))
        .await
        .unwrap();
    let sub: Subscription = json_body(response.into_body()).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", sub.id))
        .header("x-user-id", actor.user_id.to_string())
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_unsubscribe_foreign_returns_404() {
    let (app, course_id) = test_app().await;
    let subscriber = Actor::user(Uuid::now_v7());
    let stranger = Actor::user(Uuid::now_v7());

    let response = app
        .clone()
        .oneshot(subscribe_request(subscriber, course_id))
        .await
        .unwrap();
    let sub: Subscription = json_body(response.into_body()).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", sub.id))
        .header("x-user-id", stranger.user_id.to_string())
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
