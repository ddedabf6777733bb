use super::Translation;

use multilingual_core::{schema::TranslationModel, LanguageCode};

use indexmap::IndexMap;

/// Per-record cache of translation rows, keyed by language.
///
/// An entry is either a row or an explicit absence. Absent entries are never
/// looked up again for the same record instance.
#[derive(Debug, Clone, Default)]
pub struct TranslationCache {
    entries: IndexMap<LanguageCode, Option<Translation>>,
}

impl TranslationCache {
    /// `None` when `code` is not cached; `Some(None)` when it is cached as
    /// absent.
    pub fn get(&self, code: &str) -> Option<Option<&Translation>> {
        self.entries.get(code).map(Option::as_ref)
    }

    pub fn is_cached(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn is_absent(&self, code: &str) -> bool {
        matches!(self.entries.get(code), Some(None))
    }

    /// Languages with a row in the cache.
    pub fn languages(&self) -> impl Iterator<Item = &LanguageCode> + '_ {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_some())
            .map(|(code, _)| code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn fill(&mut self, code: LanguageCode, translation: Option<Translation>) {
        self.entries.insert(code, translation);
    }

    pub(crate) fn get_mut(&mut self, code: &str) -> Option<&mut Translation> {
        self.entries.get_mut(code)?.as_mut()
    }

    /// Returns the cached row for `code`, creating an empty in-memory one when
    /// there is none or the language is cached as absent.
    pub(crate) fn get_or_create(
        &mut self,
        code: &LanguageCode,
        model: &TranslationModel,
    ) -> &mut Translation {
        let entry = self.entries.entry(code.clone()).or_insert(None);

        entry.get_or_insert_with(|| {
            tracing::debug!(model = %model.name, language = %code, "translation created in memory");
            Translation::new(code.clone(), model)
        })
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut Translation> + '_ {
        self.entries.values_mut().filter_map(Option::as_mut)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
