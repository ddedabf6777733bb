use super::{context::with_context, LanguageCode, LanguageSettings};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// The language registry.
///
/// Holds the ordered set of configured languages and the settings-level
/// default. Cloning is cheap; all clones share the same data.
#[derive(Debug, Clone)]
pub struct Languages {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    entries: IndexMap<LanguageCode, LanguageInfo>,
    default: LanguageCode,
}

#[derive(Debug, Clone)]
pub struct LanguageInfo {
    pub name: String,
    pub bidi: bool,
}

impl Languages {
    /// Builds the registry, failing fast on an invalid setup.
    pub fn from_settings(settings: &LanguageSettings) -> Result<Languages> {
        if settings.languages.is_empty() {
            return Err(Error::configuration("no languages are configured"));
        }

        let mut entries = IndexMap::with_capacity(settings.languages.len());

        for entry in &settings.languages {
            let info = LanguageInfo {
                name: entry
                    .name
                    .clone()
                    .unwrap_or_else(|| entry.code.to_string()),
                bidi: settings.bidi.contains(&entry.code),
            };

            // Sanitized codes name proxies and join aliases
            if let Some(other) = entries
                .keys()
                .find(|code: &&LanguageCode| code.sanitized() == entry.code.sanitized())
            {
                return Err(Error::configuration(format!(
                    "language `{}` is configured more than once (as `{}`)",
                    entry.code, other
                )));
            }

            entries.insert(entry.code.clone(), info);
        }

        let default = settings.default_language()?;

        Ok(Languages {
            inner: Arc::new(Inner { entries, default }),
        })
    }

    /// Configured language codes, in configuration order.
    pub fn configured(&self) -> impl ExactSizeIterator<Item = &LanguageCode> + '_ {
        self.inner.entries.keys()
    }

    pub fn is_configured(&self, code: &str) -> bool {
        self.inner.entries.contains_key(code)
    }

    /// Returns the configured code equal to `code`, if any.
    pub fn get(&self, code: &str) -> Option<&LanguageCode> {
        self.inner
            .entries
            .get_key_value(code)
            .map(|(code, _)| code)
    }

    /// Returns the configured code or an invalid language error.
    pub fn validate(&self, code: &str) -> Result<LanguageCode> {
        let code = LanguageCode::new(code);
        match self.get(code.as_str()) {
            Some(code) => Ok(code.clone()),
            None => Err(Error::invalid_language(code.as_str())),
        }
    }

    /// Settings-level default language.
    pub fn default_language(&self) -> &LanguageCode {
        &self.inner.default
    }

    pub fn language_name(&self, code: &str) -> Option<&str> {
        self.inner.entries.get(code).map(|info| &info.name[..])
    }

    pub fn is_bidi(&self, code: &str) -> bool {
        self.inner
            .entries
            .get(code)
            .map(|info| info.bidi)
            .unwrap_or(false)
    }

    /// Position of `code` in the configuration order.
    pub fn position(&self, code: &str) -> Option<usize> {
        self.inner.entries.get_index_of(code)
    }

    /// Maps any code to a configured one: the code itself when configured,
    /// else its primary subtag when that is configured, else the default.
    pub fn resolve(&self, code: &str) -> LanguageCode {
        let code = LanguageCode::new(code);

        if let Some(code) = self.get(code.as_str()) {
            return code.clone();
        }

        code.base()
            .and_then(|base| self.get(base))
            .unwrap_or(&self.inner.default)
            .clone()
    }

    /// The language used by unsuffixed ("current") accesses.
    ///
    /// The language lock if one is set, else the caller's locale mapped
    /// through [`Languages::resolve`], else the default.
    pub fn active_language(&self) -> LanguageCode {
        let (lock, locale) = with_context(|cx| (cx.lock.clone(), cx.locale.clone()));

        if let Some(code) = lock {
            return code;
        }

        match locale {
            Some(locale) => self.resolve(&locale),
            None => self.inner.default.clone(),
        }
    }

    /// Languages consulted, in order, when `code` has no value.
    ///
    /// Empty while a language lock is set. Otherwise the primary subtag (if
    /// different and configured) followed by the default (if different).
    pub fn fallback_chain(&self, code: &LanguageCode) -> Vec<LanguageCode> {
        if self.locked().is_some() {
            return vec![];
        }

        let mut chain = Vec::with_capacity(2);

        if let Some(base) = code.base().and_then(|base| self.get(base)) {
            if base != code {
                chain.push(base.clone());
            }
        }

        let default = &self.inner.default;
        if default != code && !chain.contains(default) {
            chain.push(default.clone());
        }

        chain
    }
}
