use super::Error;

/// Error when a query cannot be planned.
///
/// This occurs when:
/// - A lookup path continues through a translated field into a further
///   relation (`title__author`)
/// - A field name or lookup is unknown to the model
/// - A `select_related` argument names translations ambiguously
///
/// Raised while the query is being built, never degraded silently.
#[derive(Debug)]
pub(super) struct UnsupportedQueryError {
    message: Box<str>,
}

impl std::error::Error for UnsupportedQueryError {}

impl core::fmt::Display for UnsupportedQueryError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported query: {}", self.message)
    }
}

impl Error {
    /// Creates an unsupported query error.
    pub fn unsupported_query(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedQuery(UnsupportedQueryError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported query error.
    pub fn is_unsupported_query(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnsupportedQuery(_)))
    }
}
