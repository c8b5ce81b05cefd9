//! Response variant resolution.
//!
//! A pipeline may hand back responses from different runtimes, each storing
//! its final status and headers differently. Every supported representation
//! gets one [`VariantStrategy`] that recognises it by the identity the response
//! reports and turns it into a [`ResponseView`].
//!
//! # Design Decisions
//! - Dispatch never changes when a runtime is added; register another strategy
//! - Resolution is repeated for every response, nothing is cached
//! - An unrecognised identity is not an error, it resolves to [`Variant::Unsupported`]

use tracing::trace;

use crate::error::ExtractionError;
use crate::view::{HostResponse, ResponseView};

pub mod flat;
pub mod http;
pub mod named;

pub use flat::{FlatHeaderResponse, FlatHeaderVariant};
pub use http::HttpVariant;
pub use named::{NamedHeaderResponse, NamedHeaderVariant};

/// Extraction strategy for one runtime's response representation.
pub trait VariantStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// Whether this strategy handles responses reporting `implementation`.
    fn matches(&self, implementation: &str) -> bool;

    /// Reads the concrete representation behind `response`.
    ///
    /// Fails when the response claims an identity this strategy matched but is
    /// not laid out the way the strategy expects.
    fn extract<'a>(
        &self,
        response: &'a dyn HostResponse,
    ) -> Result<Box<dyn ResponseView + 'a>, ExtractionError>;
}

/// Outcome of resolving a response against the registry.
pub enum Variant<'r> {
    Known(&'r dyn VariantStrategy),
    Unsupported(String),
}

impl<'r> Variant<'r> {
    pub fn name(&self) -> &str {
        match self {
            Variant::Known(strategy) => strategy.name(),
            Variant::Unsupported(_) => "unsupported",
        }
    }

    pub fn known(&self) -> Option<&'r dyn VariantStrategy> {
        match self {
            Variant::Known(strategy) => Some(*strategy),
            Variant::Unsupported(_) => None,
        }
    }
}

impl std::fmt::Debug for Variant<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Known(strategy) => f.debug_tuple("Known").field(&strategy.name()).finish(),
            Variant::Unsupported(identity) => f.debug_tuple("Unsupported").field(identity).finish(),
        }
    }
}

/// Ordered set of known strategies; the first match wins.
pub struct VariantRegistry {
    strategies: Vec<Box<dyn VariantStrategy>>,
}

impl VariantRegistry {
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// `http::Response` with any body, flat header arrays and name-indexed
    /// header tables.
    pub fn with_defaults() -> Self {
        Self::empty()
            .register(HttpVariant)
            .register(FlatHeaderVariant)
            .register(NamedHeaderVariant)
    }

    pub fn register(mut self, strategy: impl VariantStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn resolve(&self, response: &dyn HostResponse) -> Variant<'_> {
        let implementation = response.implementation();
        match self
            .strategies
            .iter()
            .find(|strategy| strategy.matches(implementation))
        {
            Some(strategy) => {
                trace!(variant = strategy.name(), implementation, "Resolved response variant");
                Variant::Known(strategy.as_ref())
            }
            None => {
                trace!(implementation, "No response variant registered");
                Variant::Unsupported(implementation.to_string())
            }
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strategies.iter().map(|s| s.name())
    }
}

impl Default for VariantRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for VariantRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Response;
    use std::any::Any;

    struct Unknown;

    impl HostResponse for Unknown {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn defaults_resolve_each_builtin_runtime() {
        let registry = VariantRegistry::with_defaults();

        let http = Response::new(Body::empty());
        assert_eq!(registry.resolve(&http).name(), "http");

        let flat = FlatHeaderResponse::new(200);
        assert_eq!(registry.resolve(&flat).name(), "flat-headers");

        let named = NamedHeaderResponse::new(200);
        assert_eq!(registry.resolve(&named).name(), "named-headers");
    }

    #[test]
    fn unknown_identity_is_unsupported() {
        let registry = VariantRegistry::with_defaults();

        match registry.resolve(&Unknown) {
            Variant::Unsupported(identity) => assert!(identity.ends_with("Unknown")),
            other => panic!("expected unsupported, got {:?}", other),
        }
    }

    #[test]
    fn every_http_body_type_resolves_to_http() {
        let registry = VariantRegistry::with_defaults();

        let text = Response::new(String::from("hello"));
        assert_eq!(registry.resolve(&text).name(), "http");

        let bytes = Response::new(Vec::<u8>::new());
        assert_eq!(registry.resolve(&bytes).name(), "http");
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let registry = VariantRegistry::empty();
        assert_eq!(registry.names().count(), 0);
        assert!(matches!(
            registry.resolve(&FlatHeaderResponse::new(204)),
            Variant::Unsupported(_)
        ));
    }

    #[test]
    fn registration_order_is_kept() {
        let names: Vec<_> = VariantRegistry::default().names().map(str::to_string).collect();
        assert_eq!(names, ["http", "flat-headers", "named-headers"]);
    }
}
