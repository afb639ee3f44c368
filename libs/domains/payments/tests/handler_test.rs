//! Handler tests for the Payments domain
//!
//! Listing is the only operation; these tests cover identity extraction,
//! ownership scoping and query-string filters over HTTP.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use domain_payments::{
    InMemoryPaymentRepository, Payment, PaymentMethod, PaymentService, handlers,
};
use domain_users::Actor;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn payment(user_id: Uuid, method: PaymentMethod, age_hours: i64) -> Payment {
    Payment {
        id: Uuid::now_v7(),
        user_id,
        course_id: Some(Uuid::now_v7()),
        lesson_id: None,
        amount: 49.0,
        payment_method: method,
        payment_date: Utc::now() - Duration::hours(age_hours),
    }
}

async fn test_app(payments: Vec<Payment>) -> Router {
    let repo = InMemoryPaymentRepository::new();
    for p in payments {
        repo.insert(p).await;
    }
    let service = PaymentService::new(repo);
    Router::new().nest("/payments", handlers::router(service))
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
async fn test_list_requires_identity() {
    let app = test_app(vec![]).await;

    let request = Request::builder()
        .method("GET")
        .uri("/payments")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_staff_sees_only_own_payments() {
    let alice = Actor::user(Uuid::now_v7());
    let bob = Actor::user(Uuid::now_v7());
    let app = test_app(vec![
        payment(alice.user_id, PaymentMethod::Cash, 1),
        payment(bob.user_id, PaymentMethod::Transfer, 2),
    ])
    .await;

    let request = authed(alice, Request::builder().method("GET").uri("/payments"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payments: Vec<Payment> = json_body(response.into_body()).await;
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].user_id, alice.user_id);
}

#[tokio::test]
async fn test_staff_sees_all_payments() {
    let alice = Actor::user(Uuid::now_v7());
    let bob = Actor::user(Uuid::now_v7());
    let staff = Actor::staff(Uuid::now_v7());
    let app = test_app(vec![
        payment(alice.user_id, PaymentMethod::Cash, 1),
        payment(bob.user_id, PaymentMethod::Transfer, 2),
    ])
    .await;

    let request = authed(staff, Request::builder().method("GET").uri("/payments"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payments: Vec<Payment> = json_body(response.into_body()).await;
    assert_eq!(payments.len(), 2);
}

#[tokio::test]
async fn test_filter_by_payment_method_and_order() {
    let alice = Actor::user(Uuid::now_v7());
    let app = test_app(vec![
        payment(alice.user_id, PaymentMethod::Cash, 3),
        payment(alice.user_id, PaymentMethod::Cash, 1),
        payment(alice.user_id, PaymentMethod::Transfer, 2),
    ])
    .await;

    let request = authed(
        alice,
        Request::builder()
            .method("GET")
            .uri("/payments?payment_method=cash&order=asc"),
    )
    .body(Body::empty())
    .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payments: Vec<Payment> = json_body(response.into_body()).await;
    assert_eq!(payments.len(), 2);
    assert!(
        payments
            .iter()
            .all(|p| p.payment_method == PaymentMethod::Cash)
    );
    assert!(payments[0].payment_date <= payments[1].payment_date);
}
