use super::Field;

/// The companion model storing one row per (owner, language).
#[derive(Debug)]
pub struct TranslationModel {
    /// `<Owner>Translation`
    pub name: String,

    pub table: String,

    /// Name of the owner's reverse relation, used by `select_related`
    pub related_name: String,

    /// `id`, `language_code` and `master_id` followed by the translated fields
    pub fields: Vec<Field>,

    /// Always contains `(language_code, master_id)` plus the per-language
    /// constraints promoted from the owner's declaration
    pub unique_together: Vec<Vec<String>>,
}

impl TranslationModel {
    pub const ID: &'static str = "id";
    pub const LANGUAGE_CODE: &'static str = "language_code";
    pub const MASTER_ID: &'static str = "master_id";

    /// Number of bookkeeping columns preceding the translated ones.
    pub(crate) const NUM_SYSTEM_FIELDS: usize = 3;

    pub fn translated_fields(&self) -> &[Field] {
        &self.fields[Self::NUM_SYSTEM_FIELDS..]
    }

    pub fn translated_field(&self, name: &str) -> Option<&Field> {
        self.translated_fields().iter().find(|field| field.name == name)
    }

    pub fn is_system_field(name: &str) -> bool {
        matches!(name, Self::ID | Self::LANGUAGE_CODE | Self::MASTER_ID)
    }
}
