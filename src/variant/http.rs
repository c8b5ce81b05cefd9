//! `http::Response<B>`, the response type of hyper, axum and tower-http stacks.

use axum::http::{header, Response};
use std::any::type_name;

use super::VariantStrategy;
use crate::error::ExtractionError;
use crate::view::{charset_param, HostResponse, HttpHead, ResponseView};

/// Strategy for `http::Response<B>` with any body type.
///
/// Layers such as `TraceLayer` or compression change the body type, so the
/// identity is matched on the `Response<` prefix and the status and headers are
/// read through [`HostResponse::http_head`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpVariant;

impl HttpVariant {
    fn identity_prefix() -> &'static str {
        let generic = type_name::<Response<()>>();
        match generic.find('<') {
            Some(open) => &generic[..=open],
            None => generic,
        }
    }
}

impl VariantStrategy for HttpVariant {
    fn name(&self) -> &str {
        "http"
    }

    fn matches(&self, implementation: &str) -> bool {
        implementation.starts_with(Self::identity_prefix())
    }

    fn extract<'a>(
        &self,
        response: &'a dyn HostResponse,
    ) -> Result<Box<dyn ResponseView + 'a>, ExtractionError> {
        let head = response
            .http_head()
            .ok_or_else(|| ExtractionError::UnexpectedShape {
                variant: self.name().to_string(),
                implementation: response.implementation().to_string(),
            })?;
        Ok(Box::new(HttpResponseView(head)))
    }
}

struct HttpResponseView<'a>(HttpHead<'a>);

impl HttpResponseView<'_> {
    fn header_str(&self, name: header::HeaderName) -> Option<&str> {
        self.0.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl ResponseView for HttpResponseView<'_> {
    fn status(&self) -> u16 {
        self.0.status.as_u16()
    }

    fn message(&self) -> Option<&str> {
        self.0.status.canonical_reason()
    }

    fn content_type(&self) -> Option<&str> {
        self.header_str(header::CONTENT_TYPE)
    }

    fn character_encoding(&self) -> Option<&str> {
        self.content_type().and_then(charset_param)
    }

    fn locale(&self) -> Option<&str> {
        self.header_str(header::CONTENT_LANGUAGE)
    }

    fn header_pairs(&self) -> Option<Vec<(String, String)>> {
        Some(
            self.0
                .headers
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect(),
        )
    }

    fn header_names(&self) -> Vec<String> {
        self.0
            .headers
            .keys()
            .map(|name| name.as_str().to_string())
            .collect()
    }

    fn header_values(&self, name: &str) -> Vec<String> {
        self.0
            .headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use std::any::Any;

    struct Impostor;

    impl HostResponse for Impostor {
        fn implementation(&self) -> &str {
            type_name::<Response<Body>>()
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn reads_status_and_metadata() {
        let response = Response::builder()
            .status(StatusCode::NOT_FOUND)
            .header("content-type", "text/html; charset=utf-8")
            .header("content-language", "en-GB")
            .body(Body::empty())
            .unwrap();

        let strategy = HttpVariant;
        let view = strategy.extract(&response).unwrap();

        assert_eq!(view.status(), 404);
        assert_eq!(view.message(), Some("Not Found"));
        assert_eq!(view.content_type(), Some("text/html; charset=utf-8"));
        assert_eq!(view.character_encoding(), Some("utf-8"));
        assert_eq!(view.locale(), Some("en-GB"));
    }

    #[test]
    fn header_pairs_keep_every_value() {
        let response = Response::builder()
            .header("set-cookie", "a=1")
            .header("vary", "accept")
            .header("set-cookie", "b=2")
            .body(Body::empty())
            .unwrap();

        let strategy = HttpVariant;
        let view = strategy.extract(&response).unwrap();
        let pairs = view.header_pairs().unwrap();

        assert_eq!(pairs.len(), 3);
        assert_eq!(view.header_values("set-cookie"), ["a=1", "b=2"]);
    }

    #[test]
    fn any_body_type_is_read() {
        let response = Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/orders/9")
            .body(String::from("created"))
            .unwrap();

        assert!(HttpVariant.matches(response.implementation()));
        let view = HttpVariant.extract(&response).unwrap();
        assert_eq!(view.status(), 201);
        assert_eq!(view.header_values("location"), ["/orders/9"]);
    }

    #[test]
    fn other_identities_do_not_match() {
        assert!(!HttpVariant.matches("http::request::Request<axum_core::body::Body>"));
        assert!(!HttpVariant.matches(type_name::<crate::variant::FlatHeaderResponse>()));
    }

    #[test]
    fn impostor_identity_fails_extraction() {
        let strategy = HttpVariant;
        assert!(strategy.matches(Impostor.implementation()));

        let err = match strategy.extract(&Impostor) {
            Err(err) => err,
            Ok(_) => panic!("impostor must not extract"),
        };
        assert!(matches!(err, ExtractionError::UnexpectedShape { .. }));
    }
}
