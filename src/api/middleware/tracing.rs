//! HTTP request/response tracing middleware.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing::{Span, error, info, info_span};

type MakeSpan = fn(&Request<Body>) -> Span;
type OnResponse = fn(&Response<Body>, Duration, &Span);
type OnFailure = fn(ServerErrorsFailureClass, Duration, &Span);

/// Creates a tracing middleware for HTTP requests.
///
/// The span records method and path only. Query strings are left out since
/// `/v1/shorten/find?url=...` carries full target URLs.
///
/// ```text
/// INFO request{method=POST path=/v1/shorten}: response status=201 latency_ms=4
/// INFO request{method=GET path=/47DEQpj8}: response status=307 latency_ms=2
/// ```
pub fn layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    MakeSpan,
    tower_http::trace::DefaultOnRequest,
    OnResponse,
    tower_http::trace::DefaultOnBodyChunk,
    tower_http::trace::DefaultOnEos,
    OnFailure,
> {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeSpan)
        .on_response(on_response as OnResponse)
        .on_failure(on_failure as OnFailure)
}

fn make_span(request: &Request<Body>) -> Span {
    info_span!(
        "request",
        method = %request.method(),
        path = request.uri().path(),
    )
}

fn on_response(response: &Response<Body>, latency: Duration, _span: &Span) {
    info!(
        status = response.status().as_u16(),
        latency_ms = latency.as_millis() as u64,
        "response"
    );
}

fn on_failure(failure: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    error!(
        classification = %failure,
        latency_ms = latency.as_millis() as u64,
        "request failed"
    );
}
