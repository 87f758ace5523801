//! Request handlers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use http::Request;

use crate::http::response::ResponseWriter;

/// Serves one request by writing to `res`.
///
/// Handlers report failure by panicking; whether the panic is caught is up to
/// the layers wrapped around them.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    async fn serve(&self, req: Request<Body>, res: &mut dyn ResponseWriter);
}

#[async_trait]
impl<H: Handler + ?Sized> Handler for Arc<H> {
    async fn serve(&self, req: Request<Body>, res: &mut dyn ResponseWriter) {
        (**self).serve(req, res).await
    }
}

#[async_trait]
impl<H: Handler + ?Sized> Handler for Box<H> {
    async fn serve(&self, req: Request<Body>, res: &mut dyn ResponseWriter) {
        (**self).serve(req, res).await
    }
}
