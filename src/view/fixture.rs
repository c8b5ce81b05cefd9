//! Hand-built request for exercising the dump without an HTTP stack.

use super::RequestView;

#[derive(Debug, Clone, Default)]
pub(crate) struct StubRequest {
    pub method: String,
    pub path_info: Option<String>,
    pub query: Option<String>,
    pub uri: String,
    pub servlet_path: String,
    pub content_type: Option<String>,
    pub encoding: Option<String>,
    pub encoding_assignments: usize,
    pub server_name: Option<String>,
    pub server_port: u16,
    pub headers: Vec<(String, String)>,
    pub parameters: Vec<(String, String)>,
    pub attributes: Vec<(String, Option<String>)>,
    pub session: Option<Vec<(String, Option<String>)>>,
}

impl StubRequest {
    pub fn get(uri: &str) -> Self {
        Self {
            method: "GET".to_string(),
            uri: uri.to_string(),
            servlet_path: uri.to_string(),
            server_name: Some("localhost".to_string()),
            server_port: 8080,
            ..Self::default()
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

impl RequestView for StubRequest {
    fn implementation(&self) -> &str {
        "StubRequest"
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn path_info(&self) -> Option<&str> {
        self.path_info.as_deref()
    }

    fn path_translated(&self) -> Option<&str> {
        None
    }

    fn query_string(&self) -> Option<&str> {
        self.query.as_deref()
    }

    fn request_uri(&self) -> &str {
        &self.uri
    }

    fn servlet_path(&self) -> &str {
        &self.servlet_path
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn character_encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    fn set_character_encoding(&mut self, encoding: &str) {
        self.encoding = Some(encoding.to_string());
        self.encoding_assignments += 1;
    }

    fn scheme(&self) -> &str {
        "http"
    }

    fn server_name(&self) -> Option<&str> {
        self.server_name.as_deref()
    }

    fn server_port(&self) -> u16 {
        self.server_port
    }

    fn remote_user(&self) -> Option<&str> {
        None
    }

    fn headers(&self) -> Vec<(String, String)> {
        self.headers.clone()
    }

    fn parameters(&self) -> Vec<(String, String)> {
        self.parameters.clone()
    }

    fn attributes(&self) -> Vec<(String, Option<String>)> {
        self.attributes.clone()
    }

    fn session_attributes(&self) -> Option<Vec<(String, Option<String>)>> {
        self.session.clone()
    }
}
