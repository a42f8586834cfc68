//! End-to-end tests for the JSON API, driving the router directly.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use molvista_web::router::build_router;
use molvista_web::state::AppState;

fn app() -> Router {
    build_router(AppState::new().expect("embedded registry should load"))
}

fn generate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate_3d")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_known_compound_succeeds() {
    let response = app()
        .oneshot(generate_request(r#"{"compound": "methane"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["formula"], "CH4");
    assert_eq!(body["name"], "Methane");
    let model = body["model"].as_str().unwrap();
    assert!(!model.is_empty());
    assert!(model.contains("V2000"));
    assert!(model.contains("M  END"));
}

#[tokio::test]
async fn test_lookup_normalizes_case_and_whitespace() {
    let response = app()
        .oneshot(generate_request(r#"{"compound": "  MetHane \n"}"#))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["formula"], "CH4");
}

#[tokio::test]
async fn test_unknown_compound_is_not_found() {
    let response = app()
        .oneshot(generate_request(r#"{"compound": "unobtainium"}"#))
        .await
        .unwrap();
    // Failures still report HTTP 200; callers inspect the success flag.
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Compound not found.");
    assert!(body.get("model").is_none());
}

#[tokio::test]
async fn test_empty_and_missing_compound_field() {
    for payload in [r#"{"compound": ""}"#, r#"{}"#, r#"{"compound": "   "}"#] {
        let response = app().oneshot(generate_request(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], false, "payload: {payload}");
        assert_eq!(body["message"], "Compound not found.");
    }
}

#[tokio::test]
async fn test_malformed_body_is_not_found_not_422() {
    let response = app()
        .oneshot(generate_request("this is not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_repeated_lookups_are_idempotent() {
    let mut metadata = Vec::new();
    for _ in 0..2 {
        let response = app()
            .oneshot(generate_request(r#"{"compound": "aspirin"}"#))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        metadata.push((
            body["name"].clone(),
            body["formula"].clone(),
            body["description"].clone(),
        ));
    }
    assert_eq!(metadata[0], metadata[1]);
}

#[tokio::test]
async fn test_duplicate_ferrocene_key_serves_one_record() {
    let response = app()
        .oneshot(generate_request(r#"{"compound": "ferrocene"}"#))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["formula"], "C10H10Fe");
}

#[tokio::test]
async fn test_compound_listing() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/compounds")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let list = body.as_array().unwrap();
    assert!(list.iter().any(|c| c["key"] == "methane"));
    // The duplicated ferrocene entry appears exactly once.
    let ferrocenes = list.iter().filter(|c| c["key"] == "ferrocene").count();
    assert_eq!(ferrocenes, 1);
}

#[tokio::test]
async fn test_viewer_page_serves_html() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Molvista"));
    assert!(html.contains("generate_3d"));
}
