use super::{Field, ProxyField, ProxyTable, TranslationModel};

/// An owner model: language-independent fields plus, optionally, a companion
/// translation model and the proxy accessors generated for it.
#[derive(Debug)]
pub struct Model {
    /// Uniquely identifies the model within the schema
    pub id: ModelId,

    /// Name of the model
    pub name: String,

    pub table: String,

    /// Language-independent fields. The first one is the primary key.
    pub fields: Vec<Field>,

    /// Composite unique constraints over language-independent fields
    pub unique_together: Vec<Vec<String>>,

    /// Set when the model declares translated fields
    pub translation: Option<TranslationModel>,

    /// Proxy accessors, empty when the model has no translated fields
    pub proxies: ProxyTable,

    pub manager: Manager,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ModelId(pub usize);

/// The record manager a model declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Manager {
    /// The built-in multilingual manager
    #[default]
    Multilingual,

    /// A custom manager. Only multilingual-aware managers may be declared by
    /// models with translated fields.
    Custom { name: String, multilingual: bool },
}

impl Model {
    pub fn primary_key(&self) -> &Field {
        &self.fields[0]
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn is_multilingual(&self) -> bool {
        self.translation.is_some()
    }

    pub fn proxy(&self, name: &str) -> Option<&ProxyField> {
        self.proxies.get(name)
    }
}
