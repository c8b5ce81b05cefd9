use std::fmt;

use super::{write_field, write_section, LogLine};
use crate::config::InterceptorConfig;
use crate::view::RequestView;

/// Renders the request dump.
///
/// Fields appear in a fixed order; the session section is only present when
/// the request already has a session.
pub fn format_request<R: RequestView + ?Sized>(config: &InterceptorConfig, request: &R) -> LogLine {
    LogLine(
        RequestDump {
            name: config.name(),
            request,
        }
        .to_string(),
    )
}

struct RequestDump<'a, R: ?Sized> {
    name: &'a str,
    request: &'a R,
}

impl<R: RequestView + ?Sized> fmt::Display for RequestDump<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.request;

        write!(f, "\n({})", self.name)?;
        write!(f, "\n\tREQUEST: {}", r.implementation())?;
        write_field(f, '>', "Method", Some(r.method()))?;
        write_field(f, '>', "PathInfo", r.path_info())?;
        write_field(f, '>', "PathTranslated", r.path_translated())?;
        write_field(f, '>', "QueryString", r.query_string())?;
        write_field(f, '>', "RequestURI", Some(r.request_uri()))?;
        write_field(f, '>', "ServletPath", Some(r.servlet_path()))?;
        write_field(f, '>', "ContentType", r.content_type())?;
        write_field(f, '>', "CharacterEncoding", r.character_encoding())?;
        write_field(f, '>', "Scheme", Some(r.scheme()))?;
        write_field(f, '>', "ServerName", r.server_name())?;
        write_field(f, '>', "ServerPort", Some(r.server_port()))?;
        write_field(f, '>', "RemoteUser", r.remote_user())?;

        let headers = r.headers();
        write_section(
            f,
            '>',
            "HEADER",
            headers.iter().map(|(n, v)| (n.as_str(), Some(v.as_str()))),
        )?;

        let parameters = r.parameters();
        write_section(
            f,
            '>',
            "PARAMETERS",
            parameters.iter().map(|(n, v)| (n.as_str(), Some(v.as_str()))),
        )?;

        let attributes = r.attributes();
        write_section(
            f,
            '>',
            "ATTRIBUTES",
            attributes.iter().map(|(n, v)| (n.as_str(), v.as_deref())),
        )?;

        if let Some(session) = r.session_attributes() {
            write_section(
                f,
                '>',
                "ATTRIBUTES (SESSION)",
                session.iter().map(|(n, v)| (n.as_str(), v.as_deref())),
            )?;
        }
        Ok(())
    }
}
