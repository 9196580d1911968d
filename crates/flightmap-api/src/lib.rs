pub mod config;
mod middleware;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, routing::get, Router};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
};

pub use config::Config;
pub use state::AppState;

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    let app = Router::new()
        .route("/route", get(routes::get_route))
        .route("/route/", get(routes::get_route))
        .with_state(state);
    with_middleware(app, request_timeout)
}

/// Wraps `routes` in the service-wide middleware: request ids, request
/// logging, panic recovery and the request timeout.
pub fn with_middleware(routes: Router, request_timeout: Duration) -> Router {
    routes.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(axum::middleware::from_fn(middleware::log_requests))
            .layer(CatchPanicLayer::new())
            .layer(HandleErrorLayer::new(middleware::handle_timeout))
            .layer(TimeoutLayer::new(request_timeout)),
    )
}
