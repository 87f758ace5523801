//! Echo handler served by the demo binary.
//!
//! Replies with the request line followed by the request body. Two knobs make
//! it useful for exercising the request logger:
//! - `x-delay-ms: <n>` sleeps between the request line and the body
//! - path `/panic` panics after writing the request line

use std::time::Duration;

use async_trait::async_trait;
use axum::body::{self, Body};
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Request, StatusCode};

use crate::http::handler::Handler;
use crate::http::response::ResponseWriter;

/// Header selecting an artificial delay in milliseconds.
pub const X_DELAY_MS: &str = "x-delay-ms";

const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, Default)]
pub struct EchoHandler;

#[async_trait]
impl Handler for EchoHandler {
    async fn serve(&self, req: Request<Body>, res: &mut dyn ResponseWriter) {
        let delay = req
            .headers()
            .get(X_DELAY_MS)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis);
        let line = format!("{} {}\n", req.method(), req.uri());
        let panics = req.uri().path() == "/panic";

        let body = match body::to_bytes(req.into_body(), MAX_BODY_BYTES).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to read request body");
                res.write_status(StatusCode::PAYLOAD_TOO_LARGE);
                return;
            }
        };

        res.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
        res.write_status(StatusCode::OK);
        if res.write_all(line.as_bytes()).is_err() {
            return;
        }

        if panics {
            panic!("echo handler asked to panic");
        }

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Err(e) = res.write_all(&body) {
            tracing::debug!(error = %e, "Failed to write response body");
        }
    }
}
