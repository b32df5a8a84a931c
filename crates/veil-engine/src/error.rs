use std::error::Error as StdError;
use thiserror::Error;

use veil_core::CoreError;

/// Call-ending failures of the minimization engine.
///
/// Credential problems are deliberately absent: they degrade the policy
/// to deny-all instead of failing the call, so minimization is always
/// attempted with best-effort protection.
#[derive(Debug, Error)]
pub enum CallError<E: StdError + 'static> {
    /// The downstream handler failed. The original error is carried
    /// unchanged as the source; no minimization was attempted.
    #[error("downstream handler failed")]
    Handler(#[source] E),

    /// The handler returned something the engine cannot walk. Failing
    /// here is what keeps unexamined data off the wire.
    #[error("response is not a structured message")]
    UnsupportedResponse,

    /// A field write failed inside the walk.
    #[error("field mutation failed")]
    Internal(#[from] CoreError),
}

pub type CallResult<T, E> = Result<T, CallError<E>>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct FakeHandlerError;

    impl fmt::Display for FakeHandlerError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "boom")
        }
    }

    impl StdError for FakeHandlerError {}

    #[test]
    fn test_handler_error_preserves_source() {
        let err: CallError<FakeHandlerError> = CallError::Handler(FakeHandlerError);
        let source = err.source().expect("handler error must carry a source");
        assert_eq!(source.to_string(), "boom");
    }

    #[test]
    fn test_display_messages() {
        let unsupported: CallError<FakeHandlerError> = CallError::UnsupportedResponse;
        assert!(unsupported.to_string().contains("structured message"));
    }
}
