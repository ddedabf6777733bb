use super::Error;

/// Error when a caller locks or queries a language code that is not
/// configured.
#[derive(Debug)]
pub(super) struct InvalidLanguageError {
    code: Box<str>,
}

impl std::error::Error for InvalidLanguageError {}

impl core::fmt::Display for InvalidLanguageError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid language: `{}` is not configured", self.code)
    }
}

impl Error {
    /// Creates an invalid language error for `code`.
    pub fn invalid_language(code: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidLanguage(InvalidLanguageError {
            code: code.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid language error.
    pub fn is_invalid_language(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidLanguage(_)))
    }
}
