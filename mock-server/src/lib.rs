use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub msg: String,
}

#[derive(Deserialize)]
pub struct SlowParams {
    #[serde(default)]
    pub ms: u64,
}

pub fn app() -> Router {
    Router::new()
        .route("/success", get(success))
        .route("/success/empty", get(success_empty))
        .route("/error", get(error))
        .route("/error/empty", get(error_empty))
        .route("/error/malformed", get(error_malformed))
        .route("/status/{code}", get(status))
        .route("/slow", get(slow))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn sample_item() -> Item {
    Item {
        id: 1,
        name: "sample".to_string(),
    }
}

async fn success() -> Json<Item> {
    Json(sample_item())
}

async fn success_empty() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn error() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError {
            msg: "nf".to_string(),
        }),
    )
}

async fn error_empty() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn error_malformed() -> impl IntoResponse {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        [(header::CONTENT_TYPE, "text/html")],
        "<html>oops</html>",
    )
}

/// Reply with an arbitrary status: an `Item` for 2xx, an `ApiError` otherwise.
async fn status(Path(code): Path<u16>) -> Result<Response, StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    if status.is_informational() {
        return Err(StatusCode::BAD_REQUEST);
    }
    if status.is_success() {
        return Ok((status, Json(sample_item())).into_response());
    }
    let body = ApiError {
        msg: format!("status {code}"),
    };
    Ok((status, Json(body)).into_response())
}

async fn slow(Query(params): Query<SlowParams>) -> Json<Item> {
    tokio::time::sleep(Duration::from_millis(params.ms)).await;
    Json(sample_item())
}
