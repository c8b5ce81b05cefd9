pub mod interceptor;
pub mod logging;

pub use interceptor::{is_static_asset, Handled, LoggingInterceptor, STATIC_EXTENSIONS};
pub use logging::{TrafficDumpLayer, TrafficDumpService};
