use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, ApiError, Item};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- success ---

#[tokio::test]
async fn success_returns_item() {
    let resp = app().oneshot(get("/success")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let item: Item = body_json(resp).await;
    assert_eq!(item.id, 1);
    assert_eq!(item.name, "sample");
}

#[tokio::test]
async fn success_empty_returns_204_without_body() {
    let resp = app().oneshot(get("/success/empty")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}

// --- error ---

#[tokio::test]
async fn error_returns_404_with_json_body() {
    let resp = app().oneshot(get("/error")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err: ApiError = body_json(resp).await;
    assert_eq!(err.msg, "nf");
}

#[tokio::test]
async fn error_empty_returns_500_without_body() {
    let resp = app().oneshot(get("/error/empty")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn error_malformed_returns_html() {
    let resp = app().oneshot(get("/error/malformed")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/html");
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<ApiError>(&bytes).is_err());
}

// --- status ---

#[tokio::test]
async fn status_echoes_error_code() {
    for code in [400u16, 401, 403, 409, 503] {
        let resp = app().oneshot(get(&format!("/status/{code}"))).await.unwrap();

        assert_eq!(resp.status().as_u16(), code);
        let err: ApiError = body_json(resp).await;
        assert_eq!(err.msg, format!("status {code}"));
    }
}

#[tokio::test]
async fn status_2xx_returns_item() {
    let resp = app().oneshot(get("/status/201")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let item: Item = body_json(resp).await;
    assert_eq!(item.id, 1);
}

#[tokio::test]
async fn status_rejects_invalid_code() {
    let resp = app().oneshot(get("/status/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app().oneshot(get("/status/100")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- slow ---

#[tokio::test]
async fn slow_waits_then_succeeds() {
    let started = std::time::Instant::now();
    let resp = app().oneshot(get("/slow?ms=50")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(started.elapsed() >= std::time::Duration::from_millis(50));
    let item: Item = body_json(resp).await;
    assert_eq!(item.name, "sample");
}

#[tokio::test]
async fn unknown_route_is_404_without_json() {
    let resp = app().oneshot(get("/nope")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}
