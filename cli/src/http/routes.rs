//! HTTP路由handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::Uri,
    middleware,
    routing::get,
    Json, Router,
};
use chrono::Local;
use reel_core::api::{MoviePatch, MovieQuery, MovieRecord, NewMovie, SortKey};

use crate::http::{
    error::HttpServerError,
    middleware::track_stats,
    models::{Envelope, HealthResponse, ListParams},
    state::AppState,
};

type ApiResult<T> = Result<Envelope<T>, HttpServerError>;

/// 创建所有路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler).fallback(method_not_allowed))
        .route("/health", get(health_handler).fallback(method_not_allowed))
        .route("/test", get(test_handler).fallback(method_not_allowed))
        .route("/time", get(time_handler).fallback(method_not_allowed))
        .route("/hello", get(hello_handler).fallback(method_not_allowed))
        .route(
            "/hello/:id",
            get(hello_id_handler).fallback(method_not_allowed),
        )
        .route(
            "/movies",
            get(list_movies_handler)
                .post(create_movie_handler)
                .fallback(method_not_allowed),
        )
        .route(
            "/movies/search",
            get(search_movies_handler).fallback(method_not_allowed),
        )
        .route(
            "/movies/:id",
            get(get_movie_handler)
                .put(update_movie_handler)
                .delete(delete_movie_handler)
                .fallback(method_not_allowed),
        )
        .fallback(fallback_handler)
        .layer(middleware::from_fn_with_state(state.clone(), track_stats))
        .with_state(state)
}

/// 路径中的 id 不是数字时同样视为不存在
fn parse_id(raw: &str) -> Result<u64, HttpServerError> {
    raw.parse::<u64>()
        .map_err(|_| HttpServerError::NotFound(format!("the movie {raw} does not exist")))
}

/// GET /
async fn root_handler() -> &'static str {
    "OK!"
}

/// GET /health - 健康检查
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let (uptime_seconds, requests_handled) = state.snapshot();

    Json(HealthResponse {
        status: "healthy".into(),
        session_id: state.session_id.clone(),
        uptime_seconds,
        requests_handled,
        timestamp: Local::now().to_rfc3339(),
    })
}

/// GET /test
async fn test_handler() -> Envelope<()> {
    Envelope::message("ok")
}

/// GET /time - 当前本地时间 HH:MM
async fn time_handler() -> Envelope<()> {
    Envelope::message(Local::now().format("%H:%M").to_string())
}

/// GET /hello
async fn hello_handler() -> Envelope<()> {
    Envelope::message("Hello!")
}

/// GET /hello/:id
async fn hello_id_handler(Path(id): Path<String>) -> Envelope<()> {
    Envelope::message(format!("Hello, {id}"))
}

/// GET /movies?sort=date|rating|title - 列表（可排序）
async fn list_movies_handler(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Vec<MovieRecord>> {
    let Query(params) = params?;

    let movies = match params.sort.as_deref() {
        None => state.movies.list().await,
        Some(key) => state.movies.sorted(key.parse::<SortKey>()?).await,
    };
    Ok(Envelope::ok(movies))
}

/// GET /movies/search?q=&year=&min_rating= - 搜索
async fn search_movies_handler(
    State(state): State<AppState>,
    query: Result<Query<MovieQuery>, QueryRejection>,
) -> ApiResult<Vec<MovieRecord>> {
    let Query(query) = query?;
    let movies = state.movies.search(&query).await?;
    Ok(Envelope::ok(movies))
}

/// GET /movies/:id
async fn get_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MovieRecord> {
    let movie = state.movies.get(parse_id(&id)?).await?;
    Ok(Envelope::ok(movie))
}

/// POST /movies - 创建
async fn create_movie_handler(
    State(state): State<AppState>,
    body: Result<Json<NewMovie>, JsonRejection>,
) -> ApiResult<MovieRecord> {
    let Json(movie) = body?;
    let created = state.movies.create(movie).await?;
    Ok(Envelope::ok(created))
}

/// PUT /movies/:id - 更新
async fn update_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<MoviePatch>, JsonRejection>,
) -> ApiResult<MovieRecord> {
    let id = parse_id(&id)?;
    let Json(patch) = body?;
    let updated = state.movies.update(id, patch).await?;
    Ok(Envelope::ok(updated))
}

/// DELETE /movies/:id - 删除
async fn delete_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MovieRecord> {
    let removed = state.movies.delete(parse_id(&id)?).await?;
    Ok(Envelope::ok(removed))
}

async fn method_not_allowed() -> HttpServerError {
    HttpServerError::MethodNotAllowed
}

async fn fallback_handler(uri: Uri) -> HttpServerError {
    HttpServerError::NotFound(format!("route not found: {}", uri.path()))
}
