//! Responses backed by a name-indexed header table that cannot be iterated as
//! pairs: callers get the list of names and look values up one name at a time.

use std::any::Any;

use super::VariantStrategy;
use crate::error::ExtractionError;
use crate::view::{HostResponse, ResponseView};

/// Response state of an embedded runtime with a name-indexed header table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedHeaderResponse {
    pub status: u16,
    pub message: Option<String>,
    pub content_type: Option<String>,
    pub character_encoding: Option<String>,
    pub locale: Option<String>,
    entries: Vec<(String, String)>,
}

impl NamedHeaderResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_header(name, value);
        self
    }

    /// Every stored name, once per stored entry, in the casing it was added with.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Values stored under `name`, compared case-insensitively.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

impl HostResponse for NamedHeaderResponse {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct NamedHeaderVariant;

impl VariantStrategy for NamedHeaderVariant {
    fn name(&self) -> &str {
        "named-headers"
    }

    fn matches(&self, implementation: &str) -> bool {
        implementation == std::any::type_name::<NamedHeaderResponse>()
    }

    fn extract<'a>(
        &self,
        response: &'a dyn HostResponse,
    ) -> Result<Box<dyn ResponseView + 'a>, ExtractionError> {
        response
            .as_any()
            .downcast_ref::<NamedHeaderResponse>()
            .map(|named| Box::new(NamedHeaderView(named)) as Box<dyn ResponseView + 'a>)
            .ok_or_else(|| ExtractionError::UnexpectedShape {
                variant: self.name().to_string(),
                implementation: response.implementation().to_string(),
            })
    }
}

struct NamedHeaderView<'a>(&'a NamedHeaderResponse);

impl ResponseView for NamedHeaderView<'_> {
    fn status(&self) -> u16 {
        self.0.status
    }

    fn message(&self) -> Option<&str> {
        self.0.message.as_deref()
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

    fn header_names(&self) -> Vec<String> {
        self.0.names().into_iter().map(str::to_string).collect()
    }

    fn header_values(&self, name: &str) -> Vec<String> {
        self.0.values(name).into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_repeat_and_values_ignore_case() {
        let response = NamedHeaderResponse::new(200)
            .with_header("X", "1")
            .with_header("x", "2")
            .with_header("Cache-Control", "no-store");

        assert_eq!(response.names(), ["X", "x", "Cache-Control"]);
        assert_eq!(response.values("X"), ["1", "2"]);
        assert_eq!(response.values("cache-control"), ["no-store"]);
    }

    #[test]
    fn view_offers_no_pairs() {
        let response = NamedHeaderResponse::new(200).with_header("A", "1");
        let view = NamedHeaderVariant.extract(&response).unwrap();

        assert!(view.header_pairs().is_none());
        assert_eq!(view.header_names(), ["A"]);
        assert_eq!(view.header_values("a"), ["1"]);
    }
}
