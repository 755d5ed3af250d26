//! Integration tests for the API server.

use std::sync::OnceLock;

use api::InMemoryAdapters;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use booking::PaymentMethod;
use common::{NonEmptyString, SimpleType};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> (axum::Router, InMemoryAdapters) {
    let (state, adapters) = api::create_default_state().unwrap();
    (api::create_app(state, get_metrics_handle()), adapters)
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn booking(hour: u32) -> serde_json::Value {
    serde_json::json!({
        "user_id": "user-1",
        "scheduled_time": format!("2030-03-04T{hour:02}:00:00Z"),
        "duration": 60,
        "service": "Annual inspection"
    })
}

async fn schedule(app: &axum::Router, hour: u32) -> String {
    let response = send(app, "POST", "/appointments", Some(booking(hour))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    json["appointment"]["id"].as_str().unwrap().to_string()
}

mod operational {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let (app, _) = setup();

        let response = send(&app, "GET", "/health", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["workflows"], 9);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let (app, _) = setup();
        schedule(&app, 9).await;

        let response = send(&app, "GET", "/metrics", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("workflow_dispatch_total"));
    }
}

mod appointments {
    use super::*;

    #[tokio::test]
    async fn test_schedule_and_get() {
        let (app, _) = setup();
        let id = schedule(&app, 9).await;

        let response = send(&app, "GET", &format!("/appointments/{id}"), None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["id"], id.as_str());
        assert_eq!(json["status"], "Scheduled");
    }

    #[tokio::test]
    async fn test_invalid_booking_lists_every_violation() {
        let (app, _) = setup();

        let response = send(
            &app,
            "POST",
            "/appointments",
            Some(serde_json::json!({
                "user_id": "",
                "scheduled_time": "2030-03-04T09:00:00Z",
                "duration": -5,
                "service": ""
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
        let json = json_body(response).await;
        assert_eq!(json["error"], "precondition");
        assert!(json["messages"].as_array().unwrap().len() >= 3);
    }

    #[tokio::test]
    async fn test_overlapping_booking_is_conflict() {
        let (app, _) = setup();
        schedule(&app, 9).await;

        let response = send(&app, "POST", "/appointments", Some(booking(9))).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_complete_scheduled_is_not_found() {
        let (app, _) = setup();
        let id = schedule(&app, 9).await;

        let response = send(
            &app,
            "POST",
            &format!("/appointments/{id}/complete"),
            Some(serde_json::json!({})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_body(response).await;
        assert!(json["messages"][0].as_str().unwrap().contains("InProgress"));
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let (app, adapters) = setup();
        let id = schedule(&app, 9).await;
        adapters
            .payment_methods
            .add(PaymentMethod::new(
                "pm-1",
                NonEmptyString::of("user-1".to_string()).unwrap(),
            ))
            .await;

        let started = send(&app, "POST", &format!("/appointments/{id}/start"), None).await;
        assert_eq!(started.status(), StatusCode::OK);

        let completed = send(
            &app,
            "POST",
            &format!("/appointments/{id}/complete"),
            Some(serde_json::json!({ "notes": "Replaced filter" })),
        )
        .await;
        assert_eq!(completed.status(), StatusCode::OK);
        let json = json_body(completed).await;
        assert_eq!(json["event"], "AppointmentCompleted");
        assert_eq!(json["appointment"]["notes"], "Replaced filter");

        let paid = send(
            &app,
            "POST",
            &format!("/appointments/{id}/pay"),
            Some(serde_json::json!({ "payment_method_id": "pm-1" })),
        )
        .await;
        assert_eq!(paid.status(), StatusCode::OK);

        let cancelled = send(
            &app,
            "POST",
            &format!("/appointments/{id}/cancel"),
            Some(serde_json::json!({})),
        )
        .await;
        assert_eq!(cancelled.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_invalid_id_format() {
        let (app, _) = setup();

        let response = send(&app, "GET", "/appointments/not-a-uuid", None).await;

        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
    }
}

mod users {
    use super::*;

    fn ada() -> serde_json::Value {
        serde_json::json!({
            "msisdn": "(212) 555-0147",
            "email": "ada@example.com",
            "password": "s3cret"
        })
    }

    #[tokio::test]
    async fn test_register_and_find_by_msisdn() {
        let (app, _) = setup();

        let created = send(&app, "POST", "/users", Some(ada())).await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let json = json_body(created).await;
        assert_eq!(json["msisdn"], "+12125550147");
        assert_eq!(json["role"], "User");
        assert!(json.get("encrypted_password").is_none());

        let found = send(&app, "GET", "/users/msisdn/2125550147", None).await;
        assert_eq!(found.status(), StatusCode::OK);
        assert_eq!(json_body(found).await["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let (app, adapters) = setup();
        send(&app, "POST", "/users", Some(ada())).await;

        let response = send(&app, "POST", "/users", Some(ada())).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(adapters.users.handle_calls().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_msisdn_is_not_found() {
        let (app, _) = setup();

        let response = send(&app, "GET", "/users/msisdn/+447700900123", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_msisdn_is_precondition_failure() {
        let (app, _) = setup();

        let response = send(&app, "GET", "/users/msisdn/12", None).await;

        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
    }
}
