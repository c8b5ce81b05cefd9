//! `http` crate adapters and the request extensions they read.
//!
//! Handlers and upstream middleware expose request state the dump should show
//! by inserting these extension types; the dump itself only reads them.

use axum::extract::OriginalUri;
use axum::http::{header, HeaderMap, Request, Response, StatusCode};
use std::any::Any;

use super::{charset_param, HostResponse, RequestView};

/// Named request attributes, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, Option<String>)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing an existing value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, Some(value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn to_vec(&self) -> Vec<(String, Option<String>)> {
        self.entries.clone()
    }
}

/// An established session. Its absence from the extensions means "no session".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub attributes: Attributes,
}

impl Session {
    pub fn new(attributes: Attributes) -> Self {
        Self { attributes }
    }
}

/// Authenticated principal name, set by an auth layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUser(pub String);

/// Character encoding assigned to the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterEncoding(pub String);

impl<B> RequestView for Request<B> {
    fn method(&self) -> &str {
        Request::method(self).as_str()
    }

    fn path_info(&self) -> Option<&str> {
        nest_prefix(self).map(|_| self.uri().path())
    }

    fn path_translated(&self) -> Option<&str> {
        None
    }

    fn query_string(&self) -> Option<&str> {
        self.uri().query()
    }

    fn request_uri(&self) -> &str {
        self.extensions()
            .get::<OriginalUri>()
            .map(|original| original.0.path())
            .unwrap_or_else(|| self.uri().path())
    }

    fn servlet_path(&self) -> &str {
        nest_prefix(self).unwrap_or_else(|| self.uri().path())
    }

    fn content_type(&self) -> Option<&str> {
        Request::headers(self)
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    fn character_encoding(&self) -> Option<&str> {
        match self.extensions().get::<CharacterEncoding>() {
            Some(assigned) => Some(assigned.0.as_str()),
            None => RequestView::content_type(self).and_then(charset_param),
        }
    }

    fn set_character_encoding(&mut self, encoding: &str) {
        self.extensions_mut()
            .insert(CharacterEncoding(encoding.to_string()));
    }

    fn scheme(&self) -> &str {
        self.uri().scheme_str().unwrap_or("http")
    }

    fn server_name(&self) -> Option<&str> {
        server_authority(self).map(|(name, _)| name)
    }

    fn server_port(&self) -> u16 {
        server_authority(self)
            .and_then(|(_, port)| port)
            .unwrap_or_else(|| match RequestView::scheme(self) {
                "https" => 443,
                _ => 80,
            })
    }

    fn remote_user(&self) -> Option<&str> {
        self.extensions()
            .get::<RemoteUser>()
            .map(|user| user.0.as_str())
    }

    fn headers(&self) -> Vec<(String, String)> {
        let map = Request::headers(self);
        map.keys()
            .flat_map(|name| {
                map.get_all(name).iter().map(move |value| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
            })
            .collect()
    }

    fn parameters(&self) -> Vec<(String, String)> {
        let Some(query) = self.uri().query() else {
            return Vec::new();
        };
        group_by_name(
            url::form_urlencoded::parse(query.as_bytes())
                .map(|(name, value)| (name.into_owned(), value.into_owned())),
        )
    }

    fn attributes(&self) -> Vec<(String, Option<String>)> {
        self.extensions()
            .get::<Attributes>()
            .map(Attributes::to_vec)
            .unwrap_or_default()
    }

    fn session_attributes(&self) -> Option<Vec<(String, Option<String>)>> {
        self.extensions()
            .get::<Session>()
            .map(|session| session.attributes.to_vec())
    }
}

/// The body-independent part of an `http::Response`.
#[derive(Debug, Clone, Copy)]
pub struct HttpHead<'a> {
    pub status: StatusCode,
    pub headers: &'a HeaderMap,
}

impl<B: Send + 'static> HostResponse for Response<B> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn http_head(&self) -> Option<HttpHead<'_>> {
        Some(HttpHead {
            status: self.status(),
            headers: self.headers(),
        })
    }
}

/// Path prefix a nesting router stripped before this layer ran.
fn nest_prefix<B>(request: &Request<B>) -> Option<&str> {
    let original = request.extensions().get::<OriginalUri>()?.0.path();
    let current = request.uri().path();
    if original.len() > current.len() && original.ends_with(current) {
        Some(&original[..original.len() - current.len()])
    } else {
        None
    }
}

/// Host and explicit port, both taken from the URI authority when there is
/// one and from the `Host` header otherwise.
fn server_authority<B>(request: &Request<B>) -> Option<(&str, Option<u16>)> {
    if let Some(host) = request.uri().host() {
        return Some((host, request.uri().port_u16()));
    }
    Request::headers(request)
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(split_host_port)
}

fn split_host_port(authority: &str) -> (&str, Option<u16>) {
    if authority.starts_with('[') {
        // IPv6 literal
        return match authority.find(']') {
            Some(end) => {
                let port = authority[end + 1..]
                    .strip_prefix(':')
                    .and_then(|p| p.parse().ok());
                (&authority[..=end], port)
            }
            None => (authority, None),
        };
    }
    match authority.rsplit_once(':') {
        Some((host, port)) => match port.parse() {
            Ok(port) => (host, Some(port)),
            Err(_) => (authority, None),
        },
        None => (authority, None),
    }
}

/// Groups pairs by first occurrence of their name, keeping value order.
fn group_by_name(pairs: impl Iterator<Item = (String, String)>) -> Vec<(String, String)> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for (name, value) in pairs {
        match grouped.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => grouped.push((name, vec![value])),
        }
    }
    grouped
        .into_iter()
        .flat_map(|(name, values)| values.into_iter().map(move |v| (name.clone(), v)))
        .collect()
}
