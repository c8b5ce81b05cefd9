use thiserror::Error;

/// A known response variant could not read the representation it expects.
///
/// This is fatal to the response dump it occurred in. Whether it reaches the
/// host is decided by the interceptor's `catch_exceptions` policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("variant `{variant}` matched `{implementation}` but its concrete representation differs")]
    UnexpectedShape {
        variant: String,
        implementation: String,
    },

    #[error("variant `{variant}` found malformed header storage: {reason}")]
    MalformedHeaders { variant: String, reason: String },
}

/// Failure surfaced by [`LoggingInterceptor::handle`](crate::LoggingInterceptor::handle).
#[derive(Debug, Error)]
pub enum InterceptError<E> {
    /// The wrapped pipeline failed. Display and `source()` are the original error's.
    #[error(transparent)]
    Pipeline(E),

    #[error("response dump failed")]
    Extraction(#[from] ExtractionError),
}

impl<E> InterceptError<E> {
    /// Returns the pipeline's own error, if that is what failed.
    pub fn into_pipeline(self) -> Option<E> {
        match self {
            InterceptError::Pipeline(e) => Some(e),
            InterceptError::Extraction(_) => None,
        }
    }

    pub fn is_pipeline(&self) -> bool {
        matches!(self, InterceptError::Pipeline(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn pipeline_error_is_transparent() {
        let inner = io::Error::new(io::ErrorKind::Other, "backend exploded");
        let err: InterceptError<io::Error> = InterceptError::Pipeline(inner);

        assert_eq!(err.to_string(), "backend exploded");
        assert!(err.is_pipeline());
        let original = err.into_pipeline().unwrap();
        assert_eq!(original.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn extraction_error_keeps_its_source() {
        let err: InterceptError<io::Error> = ExtractionError::MalformedHeaders {
            variant: "flat-headers".to_string(),
            reason: "odd slot count 3".to_string(),
        }
        .into();

        assert!(!err.is_pipeline());
        assert_eq!(err.to_string(), "response dump failed");
        assert!(err.source().unwrap().to_string().contains("odd slot count 3"));
        assert!(err.into_pipeline().is_none());
    }
}
