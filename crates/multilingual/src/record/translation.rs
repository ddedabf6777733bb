use crate::{err, Result};

use multilingual_core::{
    schema::TranslationModel,
    stmt::Value,
    LanguageCode,
};

use indexmap::IndexMap;

/// One language's values for one owner record.
///
/// A row with every translated value unset is still a row: it exists in the
/// store and is distinct from a language that was never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    id: Option<i64>,
    language: LanguageCode,
    master_id: Option<i64>,
    values: IndexMap<String, Value>,
    dirty: bool,
}

impl Translation {
    /// A new in-memory row. It is inserted on the owner's next save.
    pub(crate) fn new(language: LanguageCode, model: &TranslationModel) -> Translation {
        Translation {
            id: None,
            language,
            master_id: None,
            values: model
                .translated_fields()
                .iter()
                .map(|field| (field.name.clone(), Value::Null))
                .collect(),
            dirty: false,
        }
    }

    /// A row read from the store. `values` are aligned with the model's
    /// translated fields.
    pub(crate) fn loaded(
        id: i64,
        language: LanguageCode,
        master_id: i64,
        model: &TranslationModel,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Translation> {
        let values = model
            .translated_fields()
            .iter()
            .zip(values)
            .map(|(field, value)| Ok((field.name.clone(), value.cast(field.ty)?)))
            .collect::<Result<_>>()?;

        Ok(Translation {
            id: Some(id),
            language,
            master_id: Some(master_id),
            values,
            dirty: false,
        })
    }

    /// Identity, set once the row is persisted.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    pub fn master_id(&self) -> Option<i64> {
        self.master_id
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.values.iter().map(|(name, value)| (&name[..], value))
    }

    /// Returns `true` if a value changed since the row was loaded or saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub(crate) fn set(&mut self, field: &str, value: Value) -> Result<()> {
        let Some(slot) = self.values.get_mut(field) else {
            return Err(err!("translation has no field `{field}`"));
        };

        *slot = value;
        self.dirty = true;
        Ok(())
    }

    pub(crate) fn persisted(&mut self, id: i64, master_id: i64) {
        self.id = Some(id);
        self.master_id = Some(master_id);
        self.dirty = false;
    }

    pub(crate) fn set_master_id(&mut self, master_id: i64) {
        self.master_id = Some(master_id);
    }
}
