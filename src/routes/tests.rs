//! Tests HTTP del router completo sobre los repositorios en memoria

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Local, NaiveTime, TimeZone};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::build_router;
use crate::cache::ViewNotifier;
use crate::config::EnvironmentConfig;
use crate::repositories::memory::InMemoryStore;
use crate::state::AppState;

fn app() -> Router {
    let store = InMemoryStore::new();
    let state = AppState::new(
        store.repositories(),
        ViewNotifier::without_cache(),
        EnvironmentConfig::default(),
    );
    build_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_full_service_flow() {
    let app = app();

    // cliente con primer carro
    let (status, customer) = send(
        &app,
        Method::POST,
        "/api/customers",
        Some(json!({
            "name": "Ana",
            "phone": "(11) 98765-4321",
            "vehicle_model": "Onix",
            "vehicle_plate": "ABC1234"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let customer_id = customer["id"].as_i64().unwrap();
    let vehicle_id = customer["vehicles"][0]["id"].as_i64().unwrap();

    // agendamiento para mañana a las 09:00
    let tomorrow = Local::now().date_naive() + Duration::days(1);
    let nine = Local
        .from_local_datetime(&tomorrow.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap()))
        .earliest()
        .unwrap();
    let appointment_body = json!({
        "scheduled_at": nine.to_rfc3339(),
        "customer_id": customer_id,
        "vehicle_id": vehicle_id
    });
    let (status, appointment) =
        send(&app, Method::POST, "/api/appointments", Some(appointment_body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let appointment_id = appointment["id"].as_i64().unwrap();

    let (status, conflict) =
        send(&app, Method::POST, "/api/appointments", Some(appointment_body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["code"], "CONFLICT");

    // iniciar servicio (idempotente)
    let start = json!({ "appointment_id": appointment_id });
    let (status, service) = send(&app, Method::POST, "/api/services", Some(start.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(service["status"], "in_progress");
    let service_id = service["id"].as_i64().unwrap();

    let (status, again) = send(&app, Method::POST, "/api/services", Some(start)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["id"].as_i64(), Some(service_id));

    // progreso y conclusión
    let completed_at = nine + Duration::hours(1);
    let (status, done) = send(
        &app,
        Method::PUT,
        &format!("/api/services/{}", service_id),
        Some(json!({
            "status": "completed",
            "checklist": {
                "Lavagem Externa": true,
                "Aspirador": true,
                "Limpeza Interna": false,
                "Pretinho": false,
                "Cera": false
            },
            "photos": ["https://img.example/onix-1.jpg"],
            "price": "80.00",
            "completed_at": completed_at.to_rfc3339()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["status"], "completed");
    assert!(done["completed_at"].is_string());

    // dashboard del día
    let (status, dashboard) = send(
        &app,
        Method::GET,
        &format!("/api/dashboard/full?date={}", tomorrow.format("%Y-%m-%d")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["today"]["count"], 1);
    assert_eq!(dashboard["today"]["revenue"], "80.00");

    // galería
    let (status, assigned) = send(
        &app,
        Method::PATCH,
        &format!("/api/services/{}", service_id),
        Some(json!({ "gallery_id": "a1b2c3d4" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assigned["gallery_id"], "a1b2c3d4");

    let (status, gallery) = send(&app, Method::GET, "/api/gallery/a1b2c3d4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gallery["customer_name"], "Ana");
    assert_eq!(gallery["vehicle_model"], "Onix");
    assert_eq!(gallery["photos"], json!(["https://img.example/onix-1.jpg"]));
    assert!(gallery.get("id").is_none());

    let (status, _) = send(&app, Method::GET, "/api/gallery/naoexiste", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // evaluación única
    let (status, rating) = send(
        &app,
        Method::POST,
        "/api/gallery/a1b2c3d4/rating",
        Some(json!({ "stars": 5, "comment": "Ficou perfeito" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rating["stars"], 5);

    let (status, second) = send(
        &app,
        Method::POST,
        "/api/ratings",
        Some(json!({ "service_id": service_id, "stars": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(second["message"].is_string());

    let (_, ratings) = send(&app, Method::GET, "/api/ratings", None).await;
    assert_eq!(ratings.as_array().unwrap().len(), 1);
    assert_eq!(ratings[0]["stars"], 5);

    // mensaje de entrega
    let (status, share) = send(
        &app,
        Method::POST,
        &format!("/api/services/{}/share", service_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(share["phone"], "5511987654321");
    assert!(share["whatsapp_url"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/5511987654321?text="));
}

#[tokio::test]
async fn test_error_envelopes() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ratings",
        Some(json!({ "service_id": 1, "stars": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::GET, "/api/appointments/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert!(body["message"].is_string());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/notes")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{ nota"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/api/dashboard?date=ontem", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(&app, Method::GET, "/api/history/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_path_ids_use_the_error_envelope() {
    let app = app();

    for uri in ["/api/services/abc", "/api/appointments/1.5", "/api/history/abc?current_service_id=1"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "VALIDATION_ERROR", "{}", uri);
        assert!(body["message"].is_string(), "{}", uri);
    }

    let (status, body) = send(&app, Method::DELETE, "/api/notes/x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
}

#[tokio::test]
async fn test_customer_search_and_appointment_update_endpoints() {
    let app = app();
    let mut vehicles = Vec::new();
    for name in ["Ana", "JOANA", "Bruno"] {
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/customers",
            Some(json!({ "name": name, "vehicle_model": "Onix" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        vehicles.push((created["id"].as_i64().unwrap(), created["vehicles"][0]["id"].as_i64().unwrap()));
    }

    let (status, found) = send(&app, Method::GET, "/api/customers?name=an", None).await;
    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<&str> = found
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Ana", "JOANA"]);

    let (customer_id, vehicle_id) = vehicles[0];
    let body = |at: &str| json!({ "scheduled_at": at, "customer_id": customer_id, "vehicle_id": vehicle_id });
    let (_, first) = send(&app, Method::POST, "/api/appointments", Some(body("2030-05-02T09:00:00-03:00"))).await;
    let (_, second) = send(&app, Method::POST, "/api/appointments", Some(body("2030-05-02T10:00:00-03:00"))).await;
    let first_id = first["id"].as_i64().unwrap();

    let (status, moved) = send(
        &app,
        Method::PUT,
        &format!("/api/appointments/{}", first_id),
        Some(body("2030-05-02T15:00:00-03:00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["scheduled_at"], "2030-05-02T18:00:00Z");

    let (status, conflict) = send(
        &app,
        Method::PUT,
        &format!("/api/appointments/{}", first_id),
        Some(json!({ "scheduled_at": second["scheduled_at"], "customer_id": customer_id, "vehicle_id": vehicle_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["code"], "CONFLICT");

    let (status, _) = send(&app, Method::PUT, "/api/appointments/9999", Some(body("2030-05-03T09:00:00-03:00"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_notes_endpoints() {
    let app = app();

    let (status, note) = send(&app, Method::POST, "/api/notes", Some(json!({ "content": "Ligar para o fornecedor" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = note["id"].as_i64().unwrap();

    let (status, _) = send(&app, Method::POST, "/api/notes", Some(json!({ "content": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/notes/{}", id),
        Some(json!({ "content": "Fornecedor ok" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["content"], "Fornecedor ok");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/notes/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, notes) = send(&app, Method::GET, "/api/notes", None).await;
    assert_eq!(notes, json!([]));
}

#[tokio::test]
async fn test_sign_image_without_secret_is_internal_error() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/sign-image",
        Some(json!({ "paramsToSign": { "timestamp": 1700000000 } })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Erro interno do servidor.");
}
