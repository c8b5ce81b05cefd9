//! Debug dumps of HTTP traffic around a request pipeline.
//!
//! [`LoggingInterceptor`] renders every request and the response the pipeline
//! produced into [`LogLine`]s and hands them to a [`LogSink`]. With debug
//! logging off nothing is rendered. [`TrafficDumpLayer`] mounts the
//! interceptor as a tower layer.

use std::sync::Arc;

pub mod config;
pub mod dump;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod sink;
pub mod variant;
pub mod view;

pub use crate::config::{AppConfig, InterceptorConfig};
pub use crate::dump::{format_request, format_response, format_value, LogLine, RequestLine, NO_VALUE};
pub use crate::error::{ExtractionError, InterceptError};
pub use crate::middleware::{Handled, LoggingInterceptor, TrafficDumpLayer, TrafficDumpService};
pub use crate::sink::{LogSink, MemorySink, TracingSink};
pub use crate::variant::{Variant, VariantRegistry, VariantStrategy};
pub use crate::view::{HostResponse, RequestView, ResponseView};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}
