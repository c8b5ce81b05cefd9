//! Responses whose headers live in one flat array of alternating names and
//! values, as produced by CGI-style bridges that buffer raw header lines.

use std::any::Any;

use super::VariantStrategy;
use crate::error::ExtractionError;
use crate::view::{HostResponse, ResponseView};

/// Response state of a bridged backend.
///
/// `headers` holds `name, value, name, value, ...`; only the first
/// `header_count` slots are in use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatHeaderResponse {
    pub status: u16,
    pub status_message: Option<String>,
    pub content_type: Option<String>,
    pub character_encoding: Option<String>,
    pub locale: Option<String>,
    pub headers: Vec<String>,
    pub header_count: usize,
}

impl FlatHeaderResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Appends a header, keeping `header_count` in step.
    pub fn push_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.truncate(self.header_count);
        self.headers.push(name.into());
        self.headers.push(value.into());
        self.header_count += 2;
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_header(name, value);
        self
    }
}

impl HostResponse for FlatHeaderResponse {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct FlatHeaderVariant;

impl VariantStrategy for FlatHeaderVariant {
    fn name(&self) -> &str {
        "flat-headers"
    }

    fn matches(&self, implementation: &str) -> bool {
        implementation == std::any::type_name::<FlatHeaderResponse>()
    }

    fn extract<'a>(
        &self,
        response: &'a dyn HostResponse,
    ) -> Result<Box<dyn ResponseView + 'a>, ExtractionError> {
        let response = response
            .as_any()
            .downcast_ref::<FlatHeaderResponse>()
            .ok_or_else(|| ExtractionError::UnexpectedShape {
                variant: self.name().to_string(),
                implementation: response.implementation().to_string(),
            })?;

        let malformed = |reason: String| ExtractionError::MalformedHeaders {
            variant: self.name().to_string(),
            reason,
        };
        if response.header_count % 2 != 0 {
            return Err(malformed(format!(
                "odd slot count {}",
                response.header_count
            )));
        }
        if response.header_count > response.headers.len() {
            return Err(malformed(format!(
                "slot count {} exceeds {} stored slots",
                response.header_count,
                response.headers.len()
            )));
        }

        Ok(Box::new(FlatHeaderView(response)))
    }
}

struct FlatHeaderView<'a>(&'a FlatHeaderResponse);

impl FlatHeaderView<'_> {
    fn slots(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.headers[..self.0.header_count]
            .chunks_exact(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

impl ResponseView for FlatHeaderView<'_> {
    fn status(&self) -> u16 {
        self.0.status
    }

    fn message(&self) -> Option<&str> {
        self.0.status_message.as_deref()
    }

    fn content_type(&self) -> Option<&str> {
        self.0.content_type.as_deref()
    }

    fn character_encoding(&self) -> Option<&str> {
        self.0.character_encoding.as_deref()
    }

    fn locale(&self) -> Option<&str> {
        self.0.locale.as_deref()
    }

    fn header_pairs(&self) -> Option<Vec<(String, String)>> {
        Some(
            self.slots()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        )
    }

    fn header_names(&self) -> Vec<String> {
        self.slots().map(|(name, _)| name.to_string()).collect()
    }

    fn header_values(&self, name: &str) -> Vec<String> {
        self.slots()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.to_string())
            .collect()
    }
}
