//! HTTP server setup.
//!
//! # Responsibilities
//! - Adapt a [`Handler`] to a tower `Service` axum can route to
//! - Wire up middleware (request ID, panic catching)
//! - Bind server to listener and shut down gracefully

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use axum::Router;
use futures_util::future::BoxFuture;
use http::Request;
use tokio::net::TcpListener;
use tower::Service;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};

use crate::http::handler::Handler;
use crate::http::request::UuidRequestId;
use crate::http::response::BufferedResponse;
use crate::lifecycle::Shutdown;

/// Tower service running a [`Handler`] against a fresh [`BufferedResponse`].
pub struct HandlerService<H> {
    handler: Arc<H>,
}

impl<H: Handler> HandlerService<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

impl<H> Clone for HandlerService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H: Handler> Service<Request<Body>> for HandlerService<H> {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        Box::pin(async move {
            let mut res = BufferedResponse::new();
            handler.serve(req, &mut res).await;
            Ok(res.into_response())
        })
    }
}

/// HTTP server serving a single handler.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new<H: Handler>(handler: H) -> Self {
        Self {
            router: Self::build_router(handler),
        }
    }

    /// Build the axum router with all middleware layers.
    ///
    /// Panics that escape the handler become 500 responses here.
    fn build_router<H: Handler>(handler: H) -> Router {
        Router::new()
            .fallback_service(HandlerService::new(handler))
            .layer(CatchPanicLayer::new())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: Shutdown,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
