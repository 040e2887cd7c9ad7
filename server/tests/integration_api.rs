use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use screener_core::EngineConfig;
use screener_server::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(token: Option<&str>) -> Router {
    build_router(AppState::new(EngineConfig::default(), token.map(str::to_string)))
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn seed(app: &Router) {
    let docs = json!([
        { "name": "alice", "text": "python developer with 3 years experience" },
        { "name": "bob", "text": "java architect 10+ years" },
    ]);
    let (status, body) = call(app, post_json("/documents", docs)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ids"], json!([0, 1]));
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let app = app(None);
    seed(&app).await;

    let (status, body) = call(&app, get("/search?q=python%203%20years&k=5")).await;
    assert_eq!(status, StatusCode::OK);
    let arr = body["results"].as_array().unwrap();
    assert!(!arr.is_empty());
    assert_eq!(arr[0]["rank"], 1);
    assert_eq!(arr[0]["name"], "alice");
    assert_eq!(arr[0]["matched_skills"], json!(["python"]));
    assert_eq!(arr[0]["experience"], "Mid-level (3-5 years)");
}

#[tokio::test]
async fn blank_search_is_empty() {
    let app = app(None);
    seed(&app).await;
    let (status, body) = call(&app, get("/search?q=%20%20")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_hits"], 0);
}

#[tokio::test]
async fn job_description_is_used_when_keywords_blank() {
    let app = app(None);
    seed(&app).await;
    let (_, body) = call(&app, get("/search?q=&jd=senior%20java%20architect")).await;
    assert_eq!(body["query"], "senior java architect");
    assert_eq!(body["results"][0]["name"], "bob");
}

#[tokio::test]
async fn analytics_reflect_corpus_changes() {
    let app = app(None);
    seed(&app).await;
    let (_, snap) = call(&app, get("/analytics")).await;
    assert_eq!(snap["total_documents"], 2);
    assert_eq!(snap["avg_skills_per_document"], 1.0);

    let (status, _) = call(&app, Request::delete("/documents/1").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, snap) = call(&app, get("/analytics")).await;
    assert_eq!(snap["total_documents"], 1);

    let (status, _) = call(&app, Request::delete("/documents").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, snap) = call(&app, get("/analytics")).await;
    assert_eq!(snap["total_documents"], 0);
    assert_eq!(snap["avg_skills_per_document"], 0.0);
}

#[tokio::test]
async fn document_lookup() {
    let app = app(None);
    seed(&app).await;
    let (status, doc) = call(&app, get("/documents/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["name"], "bob");
    assert_eq!(doc["experience"], "Senior (10+ years)");
    assert_eq!(doc["text"], "java architect 10+ years");

    let (status, _) = call(&app, get("/documents/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_names_are_rejected() {
    let app = app(None);
    let (status, _) = call(&app, post_json("/documents", json!({ "name": " ", "text": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, list) = call(&app, get("/documents")).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn mutations_require_token_when_configured() {
    let app = app(Some("secret"));
    let body = json!({ "name": "carol", "text": "go" });
    let (status, _) = call(&app, post_json("/documents", body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = Request::post("/documents")
        .header("content-type", "application/json")
        .header("X-ADMIN-TOKEN", "secret")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, _) = call(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn extract_endpoint() {
    let app = app(None);
    let (status, f) = call(&app, post_json("/extract", json!({ "text": "Senior engineer with 7+ years experience" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(f["experience"], "Senior (7+ years)");
    assert_eq!(f["skills"], json!([]));
}
