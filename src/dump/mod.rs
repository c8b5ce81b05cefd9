//! Textual request and response dumps.
//!
//! # Format
//! ```text
//! (name)
//!     REQUEST: <request type>
//!     > Method=[GET]
//!     ...
//!     HEADER
//!     > accept=[*/*]
//!
//! (name)
//!     RESPONSE for /path?query
//!     < Status=[200]
//!     ...
//! ```
//! Every block starts with a newline. Absent values render as [`NO_VALUE`],
//! present ones in brackets.

use std::fmt;

pub mod request;
pub mod response;
pub mod value;

pub use request::format_request;
pub use response::format_response;
pub use value::{format_value, NO_VALUE};

use crate::view::RequestView;
use value::DumpValue;

/// One finished dump, handed to the log sink as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine(String);

impl LogLine {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LogLine {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The part of a request the response dump is correlated by.
///
/// Captured before the request is handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub uri: String,
    pub query: Option<String>,
}

impl RequestLine {
    pub fn of<R: RequestView + ?Sized>(request: &R) -> Self {
        Self {
            uri: request.request_uri().to_string(),
            query: request.query_string().map(str::to_string),
        }
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        Ok(())
    }
}

/// Writes `\n\t<marker> label=value`.
pub(crate) fn write_field<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    marker: char,
    label: &str,
    value: Option<T>,
) -> fmt::Result {
    write!(f, "\n\t{} {}={}", marker, label, DumpValue(value))
}

/// Writes a section title followed by one field per entry.
pub(crate) fn write_section<'v>(
    f: &mut fmt::Formatter<'_>,
    marker: char,
    title: &str,
    entries: impl IntoIterator<Item = (&'v str, Option<&'v str>)>,
) -> fmt::Result {
    write!(f, "\n\t{}", title)?;
    for (name, value) in entries {
        write_field(f, marker, name, value)?;
    }
    Ok(())
}
