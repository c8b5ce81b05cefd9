use axum::{
    extract::Query,
    http::{HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};
use tracing::warn;

/// Echoes the query parameters back, once in the body and once as
/// `x-echo-<name>` headers (repeated for repeated names).
pub async fn echo(Query(params): Query<Vec<(String, String)>>) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    for (name, value) in &params {
        let header = HeaderName::try_from(format!("x-echo-{}", name.to_ascii_lowercase()));
        match (header, HeaderValue::from_str(value)) {
            (Ok(header), Ok(value)) => {
                headers.append(header, value);
            }
            _ => warn!(name = %name, "Parameter cannot be echoed as a header"),
        }
    }

    let body: Value = json!({
        "parameters": params
            .iter()
            .map(|(name, value)| json!({ "name": name, "value": value }))
            .collect::<Vec<_>>(),
    });
    (headers, Json(body))
}
