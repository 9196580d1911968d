use std::time::Instant;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
    BoxError,
};
use tower::timeout::error::Elapsed;
use tracing::{error, info};

pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        %path,
        %request_id,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request served"
    );
    response
}

pub async fn handle_timeout(err: BoxError) -> (StatusCode, &'static str) {
    if err.is::<Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request Timeout")
    } else {
        error!("unhandled middleware error: {err}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}
