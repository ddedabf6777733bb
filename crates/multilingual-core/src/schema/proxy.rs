use crate::{
    language::{LanguageCode, FALLBACK_SUFFIX},
    Error, Languages, Result,
};

use indexmap::IndexMap;

/// Identifies one proxy accessor: a translated field, a language (or the
/// active one) and whether fallback is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyKey {
    pub field: String,

    /// `None` targets the active language
    pub language: Option<LanguageCode>,

    pub fallback: bool,
}

/// A named accessor exposing one [`ProxyKey`] on owner records.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyField {
    /// `title`, `title_en`, `title_any`, `title_en_any`, ...
    pub name: String,

    pub key: ProxyKey,
}

impl ProxyField {
    pub fn field(&self) -> &str {
        &self.key.field
    }

    pub fn fallback(&self) -> bool {
        self.key.fallback
    }

    /// The effective language: the proxy's own or the active one.
    pub fn language(&self, languages: &Languages) -> LanguageCode {
        match &self.key.language {
            Some(code) => code.clone(),
            None => languages.active_language(),
        }
    }

    /// Like [`ProxyField::language`], with `current` standing in for the
    /// active language when given.
    pub fn language_or(&self, current: Option<&LanguageCode>, languages: &Languages) -> LanguageCode {
        match (&self.key.language, current) {
            (Some(code), _) => code.clone(),
            (None, Some(code)) => code.clone(),
            (None, None) => languages.active_language(),
        }
    }
}

/// The accessor table of a model, built once at registration.
#[derive(Debug, Default)]
pub struct ProxyTable {
    by_name: IndexMap<String, ProxyField>,
}

impl ProxyTable {
    /// Generates `<field>`, `<field>_any`, `<field>_<lang>` and
    /// `<field>_<lang>_any` for each translated field.
    ///
    /// Fails when two accessors end up with the same name, e.g. for
    /// translated fields `name` and `name_any`.
    pub(crate) fn build<'a>(
        fields: impl IntoIterator<Item = &'a str>,
        languages: &Languages,
    ) -> Result<ProxyTable> {
        let mut table = ProxyTable::default();

        for field in fields {
            table.insert(field, None, false)?;
            table.insert(field, None, true)?;

            for code in languages.configured() {
                table.insert(field, Some(code.clone()), false)?;
                table.insert(field, Some(code.clone()), true)?;
            }
        }

        Ok(table)
    }

    fn insert(
        &mut self,
        field: &str,
        language: Option<LanguageCode>,
        fallback: bool,
    ) -> Result<()> {
        let mut name = field.to_string();

        if let Some(code) = &language {
            name.push('_');
            name.push_str(&code.sanitized());
        }

        if fallback {
            name.push('_');
            name.push_str(FALLBACK_SUFFIX);
        }

        if let Some(existing) = self.by_name.get(&name) {
            return Err(Error::configuration(format!(
                "accessor `{name}` of translated field `{field}` collides with an accessor \
                 of translated field `{}`",
                existing.field()
            )));
        }

        let proxy = ProxyField {
            name: name.clone(),
            key: ProxyKey {
                field: field.to_string(),
                language,
                fallback,
            },
        };

        self.by_name.insert(name, proxy);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ProxyField> {
        self.by_name.get(name)
    }

    pub fn find(&self, key: &ProxyKey) -> Option<&ProxyField> {
        self.by_name.values().find(|proxy| &proxy.key == key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProxyField> + '_ {
        self.by_name.values()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
