use std::task::{Context, Poll};

use axum::http::{Request, Response, StatusCode};
use futures::future::BoxFuture;
use tower::{Layer, Service};

use super::interceptor::{Handled, LoggingInterceptor};
use crate::error::InterceptError;

/// Tower layer that dumps HTTP traffic through a [`LoggingInterceptor`].
///
/// The wrapped service's error type becomes [`InterceptError`]; put an
/// `axum::error_handling::HandleErrorLayer` above it when mounting on a router.
#[derive(Clone, Debug)]
pub struct TrafficDumpLayer {
    interceptor: LoggingInterceptor,
}

impl TrafficDumpLayer {
    pub fn new(interceptor: LoggingInterceptor) -> Self {
        Self { interceptor }
    }
}

impl<S> Layer<S> for TrafficDumpLayer {
    type Service = TrafficDumpService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TrafficDumpService {
            inner,
            interceptor: self.interceptor.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TrafficDumpService<S> {
    inner: S,
    interceptor: LoggingInterceptor,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for TrafficDumpService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::error::Error + Send + Sync + 'static,
    ReqBody: Send + 'static,
    ResBody: Default + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = InterceptError<S::Error>;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(InterceptError::Pipeline)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        // The clone may not be ready; keep the one that was polled.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let interceptor = self.interceptor.clone();

        Box::pin(async move {
            let handled = interceptor
                .handle(request, move |request| inner.call(request))
                .await?;
            let response = match handled {
                Handled::Completed(response) => response,
                Handled::Suppressed => {
                    let mut response = Response::new(ResBody::default());
                    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                    response
                }
            };
            Ok::<_, InterceptError<S::Error>>(response)
        })
    }
}
