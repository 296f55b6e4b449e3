use std::sync::Arc;

use assert_matches::assert_matches;
use axum::{
    body::Body,
    extract::{Extension, Path, State},
    http::{Request, StatusCode},
    Json,
};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::handlers::*;
use doctor_cell::models::{CreateDoctorRequest, UpdateDoctorRequest};
use doctor_cell::router::doctor_routes;
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::extractor::JsonBody;
use shared_utils::test_utils::{JwtTestUtils, MockSanityResponses, TestConfig, TestUser};

async fn setup() -> (MockServer, TestConfig, Arc<AppConfig>) {
    let mock_server = MockServer::start().await;
    let test_config = TestConfig::with_store(&mock_server.uri());
    let config = test_config.to_arc();
    (mock_server, test_config, config)
}

fn admin() -> Extension<shared_models::auth::Identity> {
    Extension(TestUser::admin("admin@example.com").to_identity())
}

#[tokio::test]
async fn test_get_all_doctors_resolves_image_urls() {
    let (mock_server, test_config, config) = setup().await;

    let mut with_image = MockSanityResponses::doctor("doctor-1", "Ada Obi", "Cardiology");
    with_image["image"] = json!({ "asset": { "_ref": "image-abc123-474x316-webp" } });

    Mock::given(method("POST"))
        .and(path(test_config.query_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockSanityResponses::query_result(json!([
            with_image,
            MockSanityResponses::doctor("doctor-2", "John Smith", "General"),
        ]))))
        .mount(&mock_server)
        .await;

    let doctors = get_all_doctors(State(config)).await.unwrap().0;

    assert_eq!(doctors.as_array().unwrap().len(), 2);
    assert_eq!(
        doctors[0]["imageUrl"],
        "https://cdn.sanity.io/images/testproj/test/abc123-474x316.webp"
    );
    assert!(doctors[1]["imageUrl"].is_null());
}

#[tokio::test]
async fn test_get_doctor_not_found() {
    let (mock_server, test_config, config) = setup().await;

    Mock::given(method("GET"))
        .and(path(test_config.doc_path("missing")))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockSanityResponses::documents(vec![])))
        .mount(&mock_server)
        .await;

    let result = get_doctor_by_id(State(config), Path("missing".to_string())).await;

    match result.unwrap_err() {
        AppError::NotFound(msg) => assert_eq!(msg, "Doctor not found"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_doctor_rejects_other_document_types() {
    let (mock_server, test_config, config) = setup().await;

    Mock::given(method("GET"))
        .and(path(test_config.doc_path("property-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockSanityResponses::documents(vec![
            MockSanityResponses::property("property-1", "Villa"),
        ])))
        .mount(&mock_server)
        .await;

    let result = get_doctor_by_id(State(config), Path("property-1".to_string())).await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn test_get_doctor_store_failure_is_generic() {
    let (mock_server, test_config, config) = setup().await;

    Mock::given(method("GET"))
        .and(path(test_config.doc_path("doctor-1")))
        .respond_with(ResponseTemplate::new(503).set_body_json(MockSanityResponses::error_response("unavailable")))
        .mount(&mock_server)
        .await;

    let result = get_doctor_by_id(State(config), Path("doctor-1".to_string())).await;

    match result.unwrap_err() {
        AppError::Database(msg) => assert_eq!(msg, "Failed to fetch doctor"),
        other => panic!("Expected Database error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_doctor_requires_names() {
    let (_mock_server, _test_config, config) = setup().await;

    let request = CreateDoctorRequest {
        first_name: Some("John".to_string()),
        last_name: Some("   ".to_string()),
        ..Default::default()
    };

    let result = create_doctor(State(config), admin(), JsonBody(request)).await;

    match result.unwrap_err() {
        AppError::BadRequest(msg) => assert_eq!(msg, "First name and last name are required"),
        other => panic!("Expected BadRequest, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_doctor_with_numbered_slug() {
    let (mock_server, test_config, config) = setup().await;

    Mock::given(method("POST"))
        .and(path(test_config.query_path()))
        .and(body_partial_json(json!({ "params": { "slugPattern": "john-smith*" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockSanityResponses::query_result(json!([
            { "slug": { "current": "john-smith" } }
        ]))))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(test_config.mutate_path()))
        .and(body_partial_json(json!({
            "mutations": [{ "create": {
                "_type": "doctor",
                "name": "John Smith",
                "slug": { "current": "john-smith-2" },
                "specialization": "General",
                "experience": 0,
                "bio": ""
            } }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockSanityResponses::mutation_result(
            "doctor-new",
            "create",
            MockSanityResponses::doctor("doctor-new", "John Smith", "General"),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = CreateDoctorRequest {
        first_name: Some("John".to_string()),
        last_name: Some("Smith".to_string()),
        ..Default::default()
    };

    let (status, Json(doctor)) = create_doctor(State(config), admin(), JsonBody(request)).await.unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(doctor["_id"], "doctor-new");
}

#[tokio::test]
async fn test_update_doctor_not_found() {
    let (mock_server, test_config, config) = setup().await;

    Mock::given(method("GET"))
        .and(path(test_config.doc_path("missing")))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockSanityResponses::documents(vec![])))
        .mount(&mock_server)
        .await;

    let result = update_doctor(
        State(config),
        admin(),
        Path("missing".to_string()),
        JsonBody(UpdateDoctorRequest::default()),
    ).await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn test_update_doctor_merges_name_and_maps_image() {
    let (mock_server, test_config, config) = setup().await;

    let mut existing = MockSanityResponses::doctor("doctor-1", "John Smith", "General");
    existing["firstName"] = json!("John");
    existing["lastName"] = json!("Smith");

    Mock::given(method("GET"))
        .and(path(test_config.doc_path("doctor-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockSanityResponses::documents(vec![existing])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(test_config.mutate_path()))
        .and(body_partial_json(json!({
            "mutations": [{ "patch": { "id": "doctor-1", "set": {
                "name": "John Doe",
                "lastName": "Doe",
                "imageUrl": "https://img.example.com/john.png"
            } } }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockSanityResponses::mutation_result(
            "doctor-1",
            "update",
            MockSanityResponses::doctor("doctor-1", "John Doe", "General"),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = UpdateDoctorRequest {
        last_name: Some("Doe".to_string()),
        image: Some("https://img.example.com/john.png".to_string()),
        ..Default::default()
    };

    let doctor = update_doctor(State(config), admin(), Path("doctor-1".to_string()), JsonBody(request))
        .await
        .unwrap()
        .0;

    assert_eq!(doctor["name"], "John Doe");
}

#[tokio::test]
async fn test_delete_doctor() {
    let (mock_server, test_config, config) = setup().await;

    Mock::given(method("GET"))
        .and(path(test_config.doc_path("doctor-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockSanityResponses::documents(vec![
            MockSanityResponses::doctor("doctor-1", "John Smith", "General"),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(test_config.mutate_path()))
        .and(body_string_contains("\"delete\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockSanityResponses::mutation_result(
            "doctor-1",
            "delete",
            json!(null),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = delete_doctor(State(config), admin(), Path("doctor-1".to_string()))
        .await
        .unwrap()
        .0;

    assert_eq!(response["message"], "Doctor deleted successfully");
}

#[tokio::test]
async fn test_search_requires_two_characters() {
    let (_mock_server, _test_config, config) = setup().await;

    let result = search_doctors(State(config), Path(" a ".to_string())).await;

    assert_matches!(result, Err(AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_specialization_without_matches_is_not_found() {
    let (mock_server, test_config, config) = setup().await;

    Mock::given(method("POST"))
        .and(path(test_config.query_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockSanityResponses::query_result(json!([]))))
        .mount(&mock_server)
        .await;

    let result = get_doctors_by_specialization(State(config), Path("Dermatology".to_string())).await;

    match result.unwrap_err() {
        AppError::NotFound(msg) => assert_eq!(msg, "No doctors found for this specialization"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_admin_routes_require_token_and_role() {
    let (_mock_server, _test_config, config) = setup().await;
    let patient_token = JwtTestUtils::create_test_token(
        &TestUser::patient("patient@example.com"),
        &config.jwt_secret,
        None,
    );

    let no_token = doctor_routes(config.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"firstName":"John","lastName":"Smith"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(no_token.status(), StatusCode::UNAUTHORIZED);

    let wrong_role = doctor_routes(config)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/doctor-1")
                .header("authorization", format!("Bearer {}", patient_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(wrong_role.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_public_lookup_needs_no_token() {
    let (mock_server, test_config, config) = setup().await;

    Mock::given(method("GET"))
        .and(path(test_config.doc_path("doctor-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockSanityResponses::documents(vec![
            MockSanityResponses::doctor("doctor-1", "John Smith", "General"),
        ])))
        .mount(&mock_server)
        .await;

    let response = doctor_routes(config)
        .oneshot(Request::builder().uri("/doctor-1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
