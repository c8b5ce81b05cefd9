use std::fmt;

use super::{write_field, write_section, LogLine, RequestLine};
use crate::config::InterceptorConfig;
use crate::error::ExtractionError;
use crate::variant::Variant;
use crate::view::{HostResponse, ResponseView};

/// Renders the response dump for `response` using the resolved `variant`.
///
/// An unsupported variant yields a one-line notice rather than an error.
/// Extraction failures of a known variant are returned, never papered over.
pub fn format_response(
    config: &InterceptorConfig,
    request: &RequestLine,
    response: &dyn HostResponse,
    variant: &Variant<'_>,
) -> Result<LogLine, ExtractionError> {
    let body = match variant {
        Variant::Known(strategy) => {
            let view = strategy.extract(response)?;
            Body::Known(Snapshot::capture(&*view))
        }
        Variant::Unsupported(implementation) => Body::Unsupported(implementation),
    };

    Ok(LogLine(
        ResponseDump {
            name: config.name(),
            request,
            body,
        }
        .to_string(),
    ))
}

struct ResponseDump<'a> {
    name: &'a str,
    request: &'a RequestLine,
    body: Body<'a>,
}

enum Body<'a> {
    Known(Snapshot),
    Unsupported(&'a str),
}

/// Values read out of a view before rendering.
struct Snapshot {
    status: u16,
    message: Option<String>,
    content_type: Option<String>,
    character_encoding: Option<String>,
    locale: Option<String>,
    headers: Vec<(String, Vec<String>)>,
}

impl Snapshot {
    fn capture(view: &dyn ResponseView) -> Self {
        Self {
            status: view.status(),
            message: view.message().map(str::to_string),
            content_type: view.content_type().map(str::to_string),
            character_encoding: view.character_encoding().map(str::to_string),
            locale: view.locale().map(str::to_string),
            headers: logical_headers(view),
        }
    }
}

impl fmt::Display for ResponseDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n({})", self.name)?;
        write!(f, "\n\tRESPONSE for {}", self.request)?;

        let snapshot = match &self.body {
            Body::Unsupported(implementation) => {
                return write!(
                    f,
                    "\n\tResponse logging not supported for response type [{}]",
                    implementation
                );
            }
            Body::Known(snapshot) => snapshot,
        };

        write_field(f, '<', "Status", Some(snapshot.status))?;
        write_field(f, '<', "Message", snapshot.message.as_deref())?;
        write_field(f, '<', "ContentType", snapshot.content_type.as_deref())?;
        write_field(f, '<', "CharacterEncoding", snapshot.character_encoding.as_deref())?;
        write_field(f, '<', "Locale", snapshot.locale.as_deref())?;
        write_section(
            f,
            '<',
            "HEADER",
            snapshot.headers.iter().flat_map(|(name, values)| {
                values
                    .iter()
                    .map(move |value| (name.as_str(), Some(value.as_str())))
            }),
        )
    }
}

/// Collapses the view's headers into one entry per logical name.
///
/// Names match case-insensitively and keep the casing seen first. Stored pairs
/// are used when the view has them; otherwise each distinct name is looked up
/// once through `header_values`.
fn logical_headers(view: &dyn ResponseView) -> Vec<(String, Vec<String>)> {
    let mut headers: Vec<(String, Vec<String>)> = Vec::new();

    if let Some(pairs) = view.header_pairs() {
        for (name, value) in pairs {
            match headers
                .iter_mut()
                .find(|(seen, _)| seen.eq_ignore_ascii_case(&name))
            {
                Some((_, values)) => values.push(value),
                None => headers.push((name, vec![value])),
            }
        }
        return headers;
    }

    for name in view.header_names() {
        if !headers.iter().any(|(seen, _)| seen.eq_ignore_ascii_case(&name)) {
            let values = view.header_values(&name);
            headers.push((name, values));
        }
    }
    headers
}
