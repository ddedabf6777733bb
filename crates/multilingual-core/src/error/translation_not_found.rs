use super::Error;

/// Error when an API that promises a translation row finds none for the
/// requested language (and no fallback applied).
///
/// Proxy reads never raise this; they return `None` instead.
#[derive(Debug)]
pub(super) struct TranslationNotFoundError {
    model: Box<str>,
    language: Box<str>,
}

impl std::error::Error for TranslationNotFoundError {}

impl core::fmt::Display for TranslationNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "translation not found: model={} language={}",
            self.model, self.language
        )
    }
}

impl Error {
    /// Creates a translation-not-found error.
    pub fn translation_not_found(model: impl Into<String>, language: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TranslationNotFound(
            TranslationNotFoundError {
                model: model.into().into(),
                language: language.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a translation-not-found error.
    pub fn is_translation_not_found(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::TranslationNotFound(_)))
    }
}
