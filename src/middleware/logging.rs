use axum::{extract::Request, middleware::Next, response::Response};

/// Log each request with the status it was answered with
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    tracing::debug!(method = %method, uri = %uri, "Incoming request");

    let response = next.run(request).await;
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status,
            "Request failed"
        );
    } else {
        tracing::debug!(
            method = %method,
            uri = %uri,
            status = %status,
            "Request completed"
        );
    }

    response
}
