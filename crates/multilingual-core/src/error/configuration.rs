use super::Error;

/// Error when the language setup or a model declaration is invalid.
///
/// This occurs when:
/// - The settings-level default language is not one of the configured languages
/// - No languages are configured, or a code is configured twice
/// - A model with translated fields declares a record manager that is not
///   multilingual-aware
///
/// These errors are raised while building the registry or registering models,
/// never at query time.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    message: Box<str>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Configuration(_)))
    }
}
