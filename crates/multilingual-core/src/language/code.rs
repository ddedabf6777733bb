use serde::Deserialize;
use std::{borrow::Borrow, fmt, sync::Arc};

/// A language code such as `cs`, `en` or `en-us`.
///
/// Codes are normalized to lowercase. Cloning is cheap.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "String")]
pub struct LanguageCode(Arc<str>);

impl LanguageCode {
    pub fn new(code: impl AsRef<str>) -> LanguageCode {
        LanguageCode(code.as_ref().trim().to_ascii_lowercase().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary subtag when the code has a region or variant (`en` for
    /// `en-us`), `None` otherwise.
    pub fn base(&self) -> Option<&str> {
        self.0
            .split_once(['-', '_'])
            .map(|(base, _)| base)
            .filter(|base| !base.is_empty())
    }

    /// The code in a form usable inside identifiers (`en_us`).
    pub fn sanitized(&self) -> String {
        self.0.replace('-', "_")
    }
}

impl From<String> for LanguageCode {
    fn from(value: String) -> Self {
        LanguageCode::new(value)
    }
}

impl From<&str> for LanguageCode {
    fn from(value: &str) -> Self {
        LanguageCode::new(value)
    }
}

impl From<&LanguageCode> for LanguageCode {
    fn from(value: &LanguageCode) -> Self {
        value.clone()
    }
}

impl Borrow<str> for LanguageCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
