// End-to-end router tests with a mocked Gemini upstream

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use mockito::Matcher;
use serde_json::Value;
use tower::ServiceExt;
use trilingo::config::AppConfig;
use trilingo::content::ProjectStore;
use trilingo::gemini::GeminiClient;
use trilingo::lang::Language;
use trilingo::server::create_router;

const GENERATE_PATH: &str = "/models/gemini-1.5-flash:generateContent";

fn test_config(upstream: &str, data_path: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.gemini.api_base_url = upstream.trim_end_matches('/').to_string();
    config.gemini.api_key = "test-key".to_string();
    config.gemini.timeout_seconds = 5;
    config.content.data_path = data_path.to_string();
    config
}

fn test_router(upstream: &str, data_path: &str) -> axum::Router {
    let config = test_config(upstream, data_path);
    let gemini_client = GeminiClient::new(&config.gemini, &config.performance).unwrap();
    let projects = ProjectStore::new(data_path);
    create_router(config, gemini_client, projects).unwrap()
}

/// Mounts a successful generateContent reply carrying `text`.
async fn mock_upstream_text(server: &mut mockito::ServerGuard, text: &str) -> mockito::Mock {
    let body = serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    });
    server
        .mock("POST", GENERATE_PATH)
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

async fn post_json(router: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn write_project_data(dir: &tempfile::TempDir) -> String {
    let path = dir.path().join("projects.json");
    let data = serde_json::json!([
        {
            "id": "clean-water",
            "title": {"en": "Clean Water Initiative", "si": "පිරිසිදු ජල ව්‍යාපෘතිය", "ta": ""},
            "summary": {"en": "Wells for dry-zone villages"},
            "category": "infrastructure",
            "status": "active",
            "featured": true,
            "priority": 1,
            "main_image": "/img/water-main.jpg",
            "gallery_images": ["/img/water-1.jpg"],
            "tags": ["water", "health"],
            "published": true
        },
        {
            "id": "draft-project",
            "title": {"en": "Unreviewed Draft"},
            "published": false
        },
        {
            "id": "school-kits",
            "title": {"en": "School Kits"},
            "summary": {"en": "Supplies for rural students"},
            "category": "education",
            "main_image": "",
            "gallery_images": ["/img/kits-1.jpg", "/img/kits-2.jpg"],
            "published": true
        }
    ]);
    std::fs::write(&path, data.to_string()).unwrap();
    path.to_string_lossy().to_string()
}

#[tokio::test]
async fn test_health_reports_healthy_with_data_file() {
    let server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_project_data(&dir);
    let router = test_router(&server.url(), &data_path);

    let (status, body) = get_json(router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["gemini_api"]["status"], "ok");
    assert_eq!(body["checks"]["content_data"]["status"], "ok");
}

#[tokio::test]
async fn test_health_degrades_without_data_file() {
    let server = mockito::Server::new_async().await;
    let router = test_router(&server.url(), "/nonexistent/projects.json");

    let (status, body) = get_json(router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["content_data"]["status"], "warning");
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_counters() {
    let server = mockito::Server::new_async().await;
    let router = test_router(&server.url(), "unused.json");

    let request = Request::builder()
        .method("GET")
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("requests_total"));
}

#[tokio::test]
async fn test_translate_single_success() {
    let mut server = mockito::Server::new_async().await;
    let upstream = mock_upstream_text(&mut server, "ආයුබෝවන්").await;
    let router = test_router(&server.url(), "unused.json");

    let (status, body) = post_json(
        router,
        "/api/translate",
        r#"{"text":"Welcome","targetLang":"si"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["translation"], "ආයුබෝවන්");
    assert_eq!(body["originalLang"], "en");
    assert_eq!(body["targetLang"], "si");

    upstream.assert_async().await;
}

#[tokio::test]
async fn test_translate_batch_success() {
    let mut server = mockito::Server::new_async().await;
    let upstream = mock_upstream_text(&mut server, "ආයුබෝවන් ||| අපි ගැන").await;
    let router = test_router(&server.url(), "unused.json");

    let (status, body) = post_json(
        router,
        "/api/translate",
        r#"{"texts":["Welcome","About Us"],"targetLang":"si"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["translations"],
        serde_json::json!(["ආයුබෝවන්", "අපි ගැන"])
    );

    upstream.assert_async().await;
}

#[tokio::test]
async fn test_translate_rejects_missing_fields() {
    let server = mockito::Server::new_async().await;
    let router = test_router(&server.url(), "unused.json");

    for body in [
        r#"{}"#,
        r#"{"targetLang":"si"}"#,
        r#"{"text":"Welcome"}"#,
        r#"{"texts":[],"targetLang":"si"}"#,
    ] {
        let (status, json) = post_json(router.clone(), "/api/translate", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Missing text or targetLang");
    }
}

#[tokio::test]
async fn test_translate_batch_count_mismatch_is_bad_gateway() {
    let mut server = mockito::Server::new_async().await;
    let upstream = mock_upstream_text(&mut server, "only one segment").await;
    let router = test_router(&server.url(), "unused.json");

    let (status, body) = post_json(
        router,
        "/api/translate",
        r#"{"texts":["Welcome","About Us"],"targetLang":"si"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Translation failed. Please try again.");

    upstream.assert_async().await;
}

#[tokio::test]
async fn test_chat_success_echoes_declared_language() {
    let mut server = mockito::Server::new_async().await;
    let upstream = mock_upstream_text(&mut server, "අපි ප්‍රජා සංවිධානයක්.").await;
    let router = test_router(&server.url(), "unused.json");

    let (status, body) = post_json(
        router,
        "/api/chat",
        r#"{"message":"ඔබ මොනවද කරන්නේ?","language":"si"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["response"], "අපි ප්‍රජා සංවිධානයක්.");
    assert_eq!(body["language"], "si");

    upstream.assert_async().await;
}

#[tokio::test]
async fn test_chat_rejects_missing_message() {
    let server = mockito::Server::new_async().await;
    let router = test_router(&server.url(), "unused.json");

    for body in [r#"{}"#, r#"{"message":""}"#, r#"{"language":"ta"}"#] {
        let (status, json) = post_json(router.clone(), "/api/chat", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Missing message");
    }
}

#[tokio::test]
async fn test_chat_upstream_failure_returns_localized_apology() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("POST", GENERATE_PATH)
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(500)
        .with_body(r#"{"error":{"message":"internal"}}"#)
        .create_async()
        .await;
    let router = test_router(&server.url(), "unused.json");

    let (status, body) = post_json(
        router,
        "/api/chat",
        r#"{"message":"hello","language":"ta"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Service temporarily unavailable");
    assert_eq!(
        body["response"],
        Language::Ta.fallback_message("hello@example.org").as_str()
    );

    upstream.assert_async().await;
}

#[tokio::test]
async fn test_chat_blocked_prompt_falls_back() {
    let mut server = mockito::Server::new_async().await;
    // Safety-blocked prompts answer 200 with no candidates
    let upstream = server
        .mock("POST", GENERATE_PATH)
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[],"promptFeedback":{"blockReason":"SAFETY"}}"#)
        .create_async()
        .await;
    let router = test_router(&server.url(), "unused.json");

    let (status, body) = post_json(router, "/api/chat", r#"{"message":"hello"}"#).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["response"],
        Language::En.fallback_message("hello@example.org").as_str()
    );

    upstream.assert_async().await;
}

#[tokio::test]
async fn test_chat_rejects_get_requests() {
    let server = mockito::Server::new_async().await;
    let router = test_router(&server.url(), "unused.json");

    let request = Request::builder()
        .method("GET")
        .uri("/api/chat")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_projects_route_serves_published_only() {
    let server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_project_data(&dir);
    let router = test_router(&server.url(), &data_path);

    let (status, body) = get_json(router, "/api/projects").await;
    assert_eq!(status, StatusCode::OK);

    let projects = body.as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["id"], "clean-water");
    assert_eq!(projects[1]["id"], "school-kits");
    assert_eq!(projects[0]["title"]["en"], "Clean Water Initiative");
}

#[tokio::test]
async fn test_project_detail_and_unknown_id() {
    let server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_project_data(&dir);
    let router = test_router(&server.url(), &data_path);

    let (status, body) = get_json(router.clone(), "/api/projects/clean-water").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "clean-water");
    assert_eq!(body["category"], "infrastructure");

    // Unpublished projects are invisible, same as unknown ids
    for id in ["draft-project", "no-such-project"] {
        let (status, body) = get_json(router.clone(), &format!("/api/projects/{}", id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Not found");
    }
}

#[tokio::test]
async fn test_gallery_flattens_published_project_images() {
    let server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_project_data(&dir);
    let router = test_router(&server.url(), &data_path);

    let (status, body) = get_json(router, "/api/gallery").await;
    assert_eq!(status, StatusCode::OK);

    let items = body.as_array().unwrap();
    // clean-water: main image plus one gallery image; school-kits: two
    // gallery images, empty main image skipped
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["url"], "/img/water-main.jpg");
    assert_eq!(items[0]["projectId"], "clean-water");
    assert_eq!(items[0]["title"], "Clean Water Initiative");
    assert_eq!(items[2]["url"], "/img/kits-1.jpg");
    assert_eq!(items[2]["category"], "education");
}

#[tokio::test]
async fn test_oversized_bodies_are_rejected() {
    let server = mockito::Server::new_async().await;
    let router = test_router(&server.url(), "unused.json");

    let huge = format!(
        r#"{{"text":"{}","targetLang":"si"}}"#,
        "x".repeat(300 * 1024)
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/translate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(huge))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_cors_preflight_is_open() {
    let server = mockito::Server::new_async().await;
    let router = test_router(&server.url(), "unused.json");

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/chat")
        .header(header::ORIGIN, "https://example.org")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
}
