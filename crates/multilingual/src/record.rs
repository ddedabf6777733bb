//! Owner records: language-independent values, proxy accessors over the
//! translation rows and the save protocol.

mod cache;
pub use cache::TranslationCache;

mod save;

mod translation;
pub use translation::Translation;

use crate::{err, Db, Error, Result};

use multilingual_core::{
    schema::{Model, TranslationModel},
    stmt::{Expr, Select, SelectItem, Value},
    LanguageCode, Languages,
};

use std::sync::Arc;

/// An instance of an owner model.
#[derive(Debug, Clone)]
pub struct Record {
    model: Arc<Model>,
    languages: Languages,

    /// Aligned with the model's fields; the primary key comes first
    values: Vec<Value>,

    cache: TranslationCache,
}

impl Record {
    pub(crate) fn new(model: Arc<Model>, languages: Languages) -> Record {
        let values = vec![Value::Null; model.fields.len()];
        Record {
            model,
            languages,
            values,
            cache: TranslationCache::default(),
        }
    }

    /// Builds a record from a row aligned with the model's fields.
    pub(crate) fn from_row(
        model: Arc<Model>,
        languages: Languages,
        row: impl IntoIterator<Item = Value>,
    ) -> Result<Record> {
        let values = model
            .fields
            .iter()
            .zip(row)
            .map(|(field, value)| value.cast(field.ty))
            .collect::<Result<Vec<_>>>()?;

        Ok(Record {
            model,
            languages,
            values,
            cache: TranslationCache::default(),
        })
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Primary key, set once the record is saved.
    pub fn id(&self) -> Option<i64> {
        self.values[0].as_i64()
    }

    pub fn is_persisted(&self) -> bool {
        self.id().is_some()
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub(crate) fn cache_mut(&mut self) -> &mut TranslationCache {
        &mut self.cache
    }

    /// Value of a language-independent field.
    pub fn field(&self, name: &str) -> Result<&Value> {
        let index = self.field_index(name)?;
        Ok(&self.values[index])
    }

    /// Sets a language-independent field.
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let index = self.field_index(name)?;
        let field = &self.model.fields[index];
        let value = value.into();

        if field.primary_key {
            return Err(err!("primary key `{}` of `{}` is read-only", name, self.model.name));
        }

        if !value.is_a(field.ty) {
            return Err(err!(
                "cannot assign {value:?} to field `{}` of type {:?}",
                name,
                field.ty
            ));
        }

        self.values[index] = value;
        Ok(())
    }

    /// Reads a field or a proxy accessor by name.
    ///
    /// Missing translations read as [`Value::Null`].
    pub async fn get(&mut self, db: &Db, name: &str) -> Result<Value> {
        if self.model.field(name).is_some() {
            return self.field(name).cloned();
        }

        let Some(proxy) = self.model.proxy(name).cloned() else {
            return Err(self.unknown_field(name));
        };

        let language = proxy.key.language.as_ref().map(LanguageCode::as_str);
        let value = self
            .read(db, proxy.field(), language, proxy.fallback())
            .await?;

        Ok(value.unwrap_or_default())
    }

    /// Writes a field or a proxy accessor by name.
    ///
    /// Fallback accessors (`title_any`) write to the language they would
    /// read first.
    pub async fn set(&mut self, db: &Db, name: &str, value: impl Into<Value>) -> Result<()> {
        if self.model.field(name).is_some() {
            return self.set_field(name, value);
        }

        let Some(proxy) = self.model.proxy(name).cloned() else {
            return Err(self.unknown_field(name));
        };

        let language = proxy.key.language.as_ref().map(LanguageCode::as_str);
        self.write(db, proxy.field(), language, value).await
    }

    /// Reads translated `field` in `language`, or the active language when
    /// `None`.
    ///
    /// Without `fallback` only that language's row is consulted. With it,
    /// the fallback chain is walked until a non-null value is found.
    pub async fn read(
        &mut self,
        db: &Db,
        field: &str,
        language: Option<&str>,
        fallback: bool,
    ) -> Result<Option<Value>> {
        let model = self.model.clone();
        self.translated_field(&model, field)?;

        let language = self.resolve_language(language)?;

        // Resolved before any store access so one read sees one context
        let chain = self.fallback_chain(&language, fallback);

        for code in std::iter::once(language).chain(chain) {
            if let Some(value) = self.lookup(db, &code, field).await? {
                return Ok(Some(value));
            }
        }

        Ok(None)
    }

    /// Sets translated `field` in `language`, or the active language when
    /// `None`.
    ///
    /// The row is created in memory if needed and persisted by the next
    /// [`Record::save`].
    pub async fn write(
        &mut self,
        db: &Db,
        field: &str,
        language: Option<&str>,
        value: impl Into<Value>,
    ) -> Result<()> {
        let model = self.model.clone();
        let translation_model = self.translated_field(&model, field)?;
        let ty = translation_model
            .translated_field(field)
            .map(|field| field.ty)
            .ok_or_else(|| self.unknown_field(field))?;

        let value = value.into();
        if !value.is_a(ty) {
            return Err(err!(
                "cannot assign {value:?} to translated field `{field}` of type {ty:?}"
            ));
        }

        let language = self.resolve_language(language)?;

        // An existing row must be updated rather than shadowed by a new one
        self.cached_or_load(db, &language).await?;

        self.cache
            .get_or_create(&language, translation_model)
            .set(field, value)
    }

    /// Returns the translation row for `language`, or the active language
    /// when `None`.
    ///
    /// With `fallback`, the first language of the fallback chain that has a
    /// row is used. With `can_create`, an empty row is created in memory for
    /// the requested language when nothing is found. Otherwise a missing row
    /// is a translation-not-found error.
    pub async fn translation(
        &mut self,
        db: &Db,
        language: Option<&str>,
        fallback: bool,
        can_create: bool,
    ) -> Result<&mut Translation> {
        let model = self.model.clone();
        let translation_model = self.translation_model(&model)?;
        let language = self.resolve_language(language)?;
        let chain = self.fallback_chain(&language, fallback);

        let mut found = None;

        for code in std::iter::once(language.clone()).chain(chain) {
            if self.cached_or_load(db, &code).await?.is_some() {
                found = Some(code);
                break;
            }
        }

        let code = match found {
            Some(code) => code,
            None if can_create => {
                self.cache.get_or_create(&language, translation_model);
                language
            }
            None => {
                return Err(Error::translation_not_found(
                    &model.name,
                    language.as_str(),
                ))
            }
        };

        self.cache
            .get_mut(code.as_str())
            .ok_or_else(|| Error::translation_not_found(&model.name, code.as_str()))
    }

    /// Cached or stored value of `field` in `code`, ignoring nulls.
    async fn lookup(&mut self, db: &Db, code: &LanguageCode, field: &str) -> Result<Option<Value>> {
        let translation = self.cached_or_load(db, code).await?;

        Ok(translation
            .and_then(|translation| translation.get(field))
            .filter(|value| !value.is_null())
            .cloned())
    }

    /// The cached row for `code`, loading it on a cache miss.
    ///
    /// A record that was never saved cannot have stored rows, so nothing is
    /// loaded for it.
    async fn cached_or_load(
        &mut self,
        db: &Db,
        code: &LanguageCode,
    ) -> Result<Option<&Translation>> {
        if !self.cache.is_cached(code.as_str()) {
            let Some(id) = self.id() else {
                return Ok(None);
            };

            tracing::debug!(
                model = %self.model.name,
                id,
                language = %code,
                "translation cache miss"
            );

            let translation = self.fetch_translation(db, id, code).await?;
            self.cache.fill(code.clone(), translation);
        }

        Ok(self.cache.get(code.as_str()).flatten())
    }

    async fn fetch_translation(
        &self,
        db: &Db,
        id: i64,
        code: &LanguageCode,
    ) -> Result<Option<Translation>> {
        let model = self.translation_model(&self.model)?;

        let mut select = Select::new(&model.table);
        let alias = select.alias.clone();

        select.returning.push(SelectItem {
            expr: Expr::column(&alias, TranslationModel::ID),
            alias: None,
        });
        for field in model.translated_fields() {
            select.returning.push(SelectItem {
                expr: Expr::column(&alias, &field.name),
                alias: None,
            });
        }

        select.add_filter(Expr::eq(
            Expr::column(&alias, TranslationModel::MASTER_ID),
            Expr::value(id),
        ));
        select.add_filter(Expr::eq(
            Expr::column(&alias, TranslationModel::LANGUAGE_CODE),
            Expr::value(code.as_str()),
        ));

        let mut rows = db.exec(select.into()).await?.into_values().into_iter();

        let Some(row) = rows.next() else {
            return Ok(None);
        };

        let mut row = row.into_iter();
        let translation_id = row
            .next()
            .and_then(|value| value.as_i64())
            .ok_or_else(|| err!("translation row without an id"))?;

        Translation::loaded(translation_id, code.clone(), id, model, row).map(Some)
    }

    /// The requested language validated against the registry, or the active
    /// language.
    fn resolve_language(&self, language: Option<&str>) -> Result<LanguageCode> {
        match language {
            Some(code) => self.languages.validate(code),
            None => Ok(self.languages.active_language()),
        }
    }

    fn fallback_chain(&self, language: &LanguageCode, fallback: bool) -> Vec<LanguageCode> {
        if fallback {
            self.languages.fallback_chain(language)
        } else {
            vec![]
        }
    }

    fn translation_model<'a>(&self, model: &'a Model) -> Result<&'a TranslationModel> {
        model
            .translation
            .as_ref()
            .ok_or_else(|| err!("model `{}` has no translated fields", model.name))
    }

    fn translated_field<'a>(&self, model: &'a Model, field: &str) -> Result<&'a TranslationModel> {
        let translation_model = self.translation_model(model)?;

        if translation_model.translated_field(field).is_none() {
            return Err(self.unknown_field(field));
        }

        Ok(translation_model)
    }

    fn field_index(&self, name: &str) -> Result<usize> {
        self.model
            .fields
            .iter()
            .position(|field| field.name == name)
            .ok_or_else(|| self.unknown_field(name))
    }

    fn unknown_field(&self, name: &str) -> Error {
        err!("model `{}` has no field `{}`", self.model.name, name)
    }

    pub(crate) fn values(&self) -> &[Value] {
        &self.values
    }

    pub(crate) fn set_id(&mut self, id: Option<i64>) {
        self.values[0] = id.into();
    }
}
