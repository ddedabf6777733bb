use super::LanguageCode;
use crate::{Error, Result};

use serde::Deserialize;

/// Language configuration, usually loaded once at startup.
///
/// ```
/// # use multilingual_core::LanguageSettings;
/// let settings = LanguageSettings::new("cs")
///     .language("cs", "Čeština")
///     .language("en", "English");
///
/// assert_eq!(settings.default_language().unwrap(), "cs");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageSettings {
    /// Configured languages, in order.
    pub languages: Vec<LanguageEntry>,

    /// Settings-level default language code.
    pub default: LanguageCode,

    /// Codes of right-to-left languages.
    #[serde(default)]
    pub bidi: Vec<LanguageCode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageEntry {
    pub code: LanguageCode,

    /// Human readable name. Defaults to the code.
    #[serde(default)]
    pub name: Option<String>,
}

impl LanguageSettings {
    pub fn new(default: impl Into<LanguageCode>) -> LanguageSettings {
        LanguageSettings {
            languages: vec![],
            default: default.into(),
            bidi: vec![],
        }
    }

    pub fn language(mut self, code: impl Into<LanguageCode>, name: impl Into<String>) -> Self {
        self.languages.push(LanguageEntry {
            code: code.into(),
            name: Some(name.into()),
        });
        self
    }

    pub fn bidi(mut self, code: impl Into<LanguageCode>) -> Self {
        self.bidi.push(code.into());
        self
    }

    /// Returns the settings-level default language.
    ///
    /// Fails with a configuration error when the default is not one of the
    /// configured languages.
    pub fn default_language(&self) -> Result<LanguageCode> {
        if !self.languages.iter().any(|entry| entry.code == self.default) {
            return Err(Error::configuration(format!(
                "default language `{}` is not one of the configured languages; \
                 set one of them as default or add `{}` to the languages",
                self.default, self.default
            )));
        }

        Ok(self.default.clone())
    }
}
