//! Rendering of single dump values.

use std::fmt;

/// Rendered in place of an absent value.
pub const NO_VALUE: &str = "<null>";

/// Renders `value` as a dump token.
///
/// Present values are wrapped in `[` `]` so the literal text `<null>` can never
/// be confused with an absent value.
pub fn format_value<T: fmt::Display>(value: Option<T>) -> String {
    DumpValue(value).to_string()
}

/// `Display` adapter used when writing straight into a dump buffer.
pub(crate) struct DumpValue<T>(pub Option<T>);

impl<T: fmt::Display> fmt::Display for DumpValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "[{}]", value),
            None => f.write_str(NO_VALUE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_renders_sentinel() {
        assert_eq!(format_value::<&str>(None), "<null>");
    }

    #[test]
    fn present_values_are_wrapped() {
        assert_eq!(format_value(Some("GET")), "[GET]");
        assert_eq!(format_value(Some(8080)), "[8080]");
        assert_eq!(format_value(Some("")), "[]");
    }

    #[test]
    fn literal_sentinel_text_stays_distinguishable() {
        assert_eq!(format_value(Some(NO_VALUE)), "[<null>]");
        assert_ne!(format_value(Some(NO_VALUE)), format_value::<&str>(None));
    }
}
