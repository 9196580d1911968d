use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
};
use flightmap_parser::Connection;
use serde::Deserialize;
use tracing::{debug, error};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

type Payload = ([(header::HeaderName, &'static str); 1], Vec<u8>);

/// `GET /route?origin=..&destination=..`
///
/// Both parameters are required. The full connection list is returned
/// whatever their values are; no filtering is applied.
pub async fn get_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Payload, (StatusCode, &'static str)> {
    let (Some(origin), Some(destination)) = (
        present(query.origin.as_deref()),
        present(query.destination.as_deref()),
    ) else {
        return Err((StatusCode::BAD_REQUEST, "Bad Request"));
    };

    let connections = state.store().connections();
    debug!(origin, destination, count = connections.len(), "serving connections");

    let payload = encode_connections(connections).map_err(|err| {
        error!("failed to encode connections: {err}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    })?;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        payload,
    ))
}

/// Binary transport encoding of the connection list.
pub fn encode_connections(connections: &[Connection]) -> Result<Vec<u8>, bincode::Error> {
    bincode::serialize(connections)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
