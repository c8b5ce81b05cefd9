//! The dump-around-the-pipeline orchestration, independent of any HTTP stack.

use std::error::Error;
use std::future::Future;
use std::sync::Arc;

use crate::config::InterceptorConfig;
use crate::dump::{format_request, format_response, RequestLine};
use crate::error::InterceptError;
use crate::sink::LogSink;
use crate::variant::VariantRegistry;
use crate::view::{HostResponse, RequestView};

/// Request paths with these suffixes are passed through without dumps.
pub const STATIC_EXTENSIONS: &[&str] = &[".css", ".js", ".ico", ".jpg", ".png"];

pub fn is_static_asset(path: &str) -> bool {
    STATIC_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// What became of the pipeline call.
#[derive(Debug)]
pub enum Handled<Res> {
    Completed(Res),
    /// The pipeline failed and the failure was logged and contained.
    Suppressed,
}

impl<Res> Handled<Res> {
    pub fn into_response(self) -> Option<Res> {
        match self {
            Handled::Completed(res) => Some(res),
            Handled::Suppressed => None,
        }
    }
}

/// Dumps requests and responses around a pipeline when debug logging is on.
///
/// Cheap to clone; every clone shares the same config, registry and sink.
#[derive(Clone)]
pub struct LoggingInterceptor {
    config: Arc<InterceptorConfig>,
    registry: Arc<VariantRegistry>,
    sink: Arc<dyn LogSink>,
}

impl LoggingInterceptor {
    pub fn new(config: InterceptorConfig, sink: Arc<dyn LogSink>) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(VariantRegistry::with_defaults()),
            sink,
        }
    }

    pub fn with_registry(mut self, registry: VariantRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn config(&self) -> &InterceptorConfig {
        &self.config
    }

    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    /// Runs `next` with `request`, dumping both sides when debug logging is on.
    ///
    /// With debug logging off, or for static assets, `next` runs untouched and
    /// its error comes back as [`InterceptError::Pipeline`] whatever the policy.
    /// Otherwise failures of `next` or of the response dump go through the
    /// `catch_exceptions` policy.
    pub async fn handle<Req, Res, E, F, Fut>(
        &self,
        mut request: Req,
        next: F,
    ) -> Result<Handled<Res>, InterceptError<E>>
    where
        Req: RequestView,
        Res: HostResponse,
        E: Error + Send + Sync + 'static,
        F: FnOnce(Req) -> Fut,
        Fut: Future<Output = Result<Res, E>>,
    {
        if !self.sink.is_debug_active() || is_static_asset(request.request_uri()) {
            return next(request)
                .await
                .map(Handled::Completed)
                .map_err(InterceptError::Pipeline);
        }

        if let Some(encoding) = self.config.character_encoding() {
            if request.character_encoding().is_none() {
                request.set_character_encoding(encoding);
            }
        }

        self.sink.debug(&format_request(&self.config, &request));
        let line = RequestLine::of(&request);

        let response = match self.contain(next(request).await.map_err(InterceptError::Pipeline))? {
            Some(response) => response,
            None => return Ok(Handled::Suppressed),
        };

        let variant = self.registry.resolve(&response);
        let dump = format_response(&self.config, &line, &response, &variant)
            .map_err(InterceptError::Extraction);
        if let Some(dump) = self.contain(dump)? {
            self.sink.debug(&dump);
        }

        Ok(Handled::Completed(response))
    }

    /// Applies the `catch_exceptions` policy to one fallible step.
    ///
    /// `Ok(None)` means the step failed and the failure was reported to the sink.
    fn contain<T, E>(&self, result: Result<T, InterceptError<E>>) -> Result<Option<T>, InterceptError<E>>
    where
        E: Error + Send + Sync + 'static,
    {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if self.config.catch_exceptions() => {
                let message = match &err {
                    InterceptError::Pipeline(_) => "pipeline failed while dumping traffic",
                    InterceptError::Extraction(_) => "response dump skipped",
                };
                self.sink.error(message, &err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

impl std::fmt::Debug for LoggingInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingInterceptor")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
