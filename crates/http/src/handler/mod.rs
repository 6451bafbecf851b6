//! The seam between the connection loop and request routing.
//!
//! A [`Handler`] turns one framed [`Request`] into a [`RouteResult`]. An `Err`
//! returned by a handler is answered with `500 Internal Server Error` by the
//! connection; it never closes the connection by itself.

use async_trait::async_trait;
use std::error::Error;
use std::future::Future;

use crate::protocol::{Request, RouteResult};

#[async_trait]
pub trait Handler: Send + Sync {
    type Error: Into<Box<dyn Error + Send + Sync>> + Send;

    async fn call(&self, req: Request) -> Result<RouteResult, Self::Error>;
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<Err, F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Err: Into<Box<dyn Error + Send + Sync>> + Send + 'static,
    Fut: Future<Output = Result<RouteResult, Err>> + Send + 'static,
{
    type Error = Err;

    async fn call(&self, req: Request) -> Result<RouteResult, Self::Error> {
        (self.f)(req).await
    }
}

pub fn make_handler<F, Err, Ret>(f: F) -> HandlerFn<F>
where
    Err: Into<Box<dyn Error + Send + Sync>>,
    Ret: Future<Output = Result<RouteResult, Err>>,
    F: Fn(Request) -> Ret,
{
    HandlerFn { f }
}
