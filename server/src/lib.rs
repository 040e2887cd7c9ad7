use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use parking_lot::RwLock;
use screener_core::ranker::rank;
use screener_core::{
    extract_features_with, summarize, AnalyticsSnapshot, Corpus, DocId, EngineConfig, Features, MatchResult,
    Query as SearchText, ScreenError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const MAX_K: usize = 100;

type ApiResult<T> = Result<T, (StatusCode, String)>;

#[derive(Deserialize)]
pub struct SearchParams {
    /// Keyword query
    pub q: Option<String>,
    /// Job description, used when `q` is blank
    pub jd: Option<String>,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub rank: usize,
    #[serde(flatten)]
    pub result: MatchResult,
}

#[derive(Deserialize)]
pub struct NewDocument {
    pub name: String,
    pub text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum NewDocuments {
    One(NewDocument),
    Many(Vec<NewDocument>),
}

#[derive(Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Clone)]
pub struct AppState {
    /// Single writer: ingestion, removal and clear take the write lock.
    pub corpus: Arc<RwLock<Corpus>>,
    pub config: Arc<EngineConfig>,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(config: EngineConfig, admin_token: Option<String>) -> Self {
        Self { corpus: Arc::new(RwLock::new(Corpus::new())), config: Arc::new(config), admin_token }
    }
}

/// Build the router with `ADMIN_TOKEN` and `CORS_ALLOW_ORIGIN` taken from the environment.
pub fn build_app(config: EngineConfig) -> Router {
    let admin_token = std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());
    build_router(AppState::new(config, admin_token))
}

pub fn build_router(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/documents", get(list_documents).post(add_documents).delete(clear_documents))
        .route("/documents/:doc_id", get(get_document).delete(remove_document))
        .route("/search", get(search_handler))
        .route("/analytics", get(analytics_handler))
        .route("/extract", post(extract_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let Some(query) = SearchText::from_inputs(params.q.as_deref(), params.jd.as_deref()) else {
        return Json(SearchResponse { query: String::new(), took_s: 0.0, total_hits: 0, results: vec![] });
    };

    let ranked = {
        let corpus = state.corpus.read();
        rank(&*corpus, &query.text, &state.config)
    };
    let total_hits = ranked.len();
    let k = params.k.clamp(1, MAX_K);
    let results = ranked
        .into_iter()
        .take(k)
        .enumerate()
        .map(|(i, result)| SearchHit { rank: i + 1, result })
        .collect();

    let elapsed = start.elapsed();
    tracing::info!(total_hits, took_s = elapsed.as_secs_f64(), "search");
    Json(SearchResponse { query: query.text, took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn analytics_handler(State(state): State<AppState>) -> Json<AnalyticsSnapshot> {
    let corpus = state.corpus.read();
    Json(summarize(&*corpus))
}

pub async fn extract_handler(State(state): State<AppState>, Json(req): Json<ExtractRequest>) -> Json<Features> {
    Json(extract_features_with(&state.config, &req.text))
}

pub async fn list_documents(State(state): State<AppState>) -> Json<serde_json::Value> {
    let corpus = state.corpus.read();
    Json(serde_json::json!({ "total": corpus.len(), "documents": corpus.documents() }))
}

pub async fn get_document(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> ApiResult<Json<serde_json::Value>> {
    let corpus = state.corpus.read();
    let doc = corpus.get(doc_id).ok_or_else(|| not_found(doc_id))?;
    let mut obj = serde_json::to_value(doc).map_err(internal)?;
    obj["text"] = serde_json::Value::String(doc.raw_text().to_string());
    Ok(Json(obj))
}

async fn add_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<NewDocuments>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    authorize(&state, &headers)?;
    let batch = match body {
        NewDocuments::One(d) => vec![d],
        NewDocuments::Many(ds) => ds,
    };
    let ids = {
        let mut corpus = state.corpus.write();
        corpus
            .add_batch(batch.into_iter().map(|d| (d.name, d.text)), &state.config)
            .map_err(screen_error)?
    };
    tracing::info!(added = ids.len(), "documents ingested");
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "ids": ids }))))
}

async fn remove_document(State(state): State<AppState>, headers: HeaderMap, Path(doc_id): Path<DocId>) -> ApiResult<StatusCode> {
    authorize(&state, &headers)?;
    state.corpus.write().remove(doc_id).map_err(screen_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_documents(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<StatusCode> {
    authorize(&state, &headers)?;
    state.corpus.write().clear();
    tracing::info!("corpus cleared");
    Ok(StatusCode::NO_CONTENT)
}

/// Mutations are open unless an admin token is configured.
fn authorize(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    let Some(required) = &state.admin_token else { return Ok(()) };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}

fn screen_error(err: ScreenError) -> (StatusCode, String) {
    match err {
        ScreenError::DocumentNotFound(id) => not_found(id),
        ScreenError::InvalidArgument(_) | ScreenError::InvalidPattern(_) => (StatusCode::BAD_REQUEST, err.to_string()),
    }
}

fn not_found(doc_id: DocId) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("document {doc_id} not found"))
}

fn internal(err: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
