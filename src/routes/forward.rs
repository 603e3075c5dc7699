//! Provider forwarding handler
//!
//! Binds one [`ProxyInstance`] to the catch-all routes under its path
//! prefix.

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Request, State},
    http::{HeaderMap, Method},
    response::Response,
};

use crate::{error::AppError, proxy::ProxyInstance};

/// Forward an inbound request to this route's provider upstream.
pub async fn forward(
    State(instance): State<Arc<ProxyInstance>>,
    OriginalUri(uri): OriginalUri,
    method: Method,
    headers: HeaderMap,
    request: Request,
) -> Result<Response, AppError> {
    instance
        .forward(method, &uri, headers, request.into_body())
        .await
}
