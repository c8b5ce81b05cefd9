//! Read-only views over host requests and responses.
//!
//! # Data Flow
//! ```text
//! host request  → RequestView   → dump::request
//! host response → HostResponse  → VariantRegistry::resolve
//!                               → VariantStrategy::extract → ResponseView → dump::response
//! ```
//!
//! # Design Decisions
//! - Views borrow from the host objects for a single invocation only
//! - `RequestView::set_character_encoding` is the only mutation the dump performs
//! - Responses are opaque (`HostResponse`) until a variant adapter recognises them

use std::any::Any;

#[cfg(test)]
pub(crate) mod fixture;
pub mod http;

pub use self::http::{Attributes, CharacterEncoding, HttpHead, RemoteUser, Session};

/// Capability set the request dump reads from.
pub trait RequestView {
    /// Concrete type of the host request. Diagnostic only.
    fn implementation(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn method(&self) -> &str;
    fn path_info(&self) -> Option<&str>;
    fn path_translated(&self) -> Option<&str>;
    fn query_string(&self) -> Option<&str>;
    fn request_uri(&self) -> &str;
    fn servlet_path(&self) -> &str;

    /// `None` also when the host cannot expose the value as text, e.g. an
    /// `http` header holding non-ASCII bytes. [`RequestView::headers`] still
    /// lists such a header, decoded lossily.
    fn content_type(&self) -> Option<&str>;

    /// Same text rule as [`RequestView::content_type`].
    fn character_encoding(&self) -> Option<&str>;
    fn set_character_encoding(&mut self, encoding: &str);
    fn scheme(&self) -> &str;
    fn server_name(&self) -> Option<&str>;
    fn server_port(&self) -> u16;
    fn remote_user(&self) -> Option<&str>;

    /// One entry per header value, in the container's order.
    fn headers(&self) -> Vec<(String, String)>;

    /// One entry per parameter value; values of the same name are adjacent.
    fn parameters(&self) -> Vec<(String, String)>;

    fn attributes(&self) -> Vec<(String, Option<String>)>;

    /// Attributes of the current session, `None` when no session exists.
    ///
    /// Implementations must only probe for a session, never create one.
    fn session_attributes(&self) -> Option<Vec<(String, Option<String>)>>;
}

/// Capability set the response dump reads from, produced by a variant adapter.
pub trait ResponseView {
    fn status(&self) -> u16;
    fn message(&self) -> Option<&str>;
    fn content_type(&self) -> Option<&str>;
    fn character_encoding(&self) -> Option<&str>;

    /// Canonical language tag, e.g. `en-US`.
    fn locale(&self) -> Option<&str>;

    /// Stored `(name, value)` pairs, when the host can enumerate them directly.
    fn header_pairs(&self) -> Option<Vec<(String, String)>> {
        None
    }

    /// Header names as the host reports them; may repeat or differ in case.
    fn header_names(&self) -> Vec<String>;

    /// Values the host returns for `name`, in stored order.
    fn header_values(&self, name: &str) -> Vec<String>;
}

/// The opaque response object handed back by the pipeline.
pub trait HostResponse: Any + Send {
    /// Identity used to pick a variant. Defaults to the Rust type name.
    fn implementation(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn as_any(&self) -> &dyn Any;

    /// Status and headers when this is an `http::Response`, whatever its body.
    fn http_head(&self) -> Option<HttpHead<'_>> {
        None
    }
}

/// Extracts the `charset` parameter from a media type.
pub(crate) fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}
