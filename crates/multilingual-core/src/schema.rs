mod builder;
pub use builder::{Builder, ModelBuilder};

mod field;
pub use field::Field;

mod model;
pub use model::{Manager, Model, ModelId};

mod proxy;
pub use proxy::{ProxyField, ProxyKey, ProxyTable};

mod translation;
pub use translation::TranslationModel;

use crate::{Error, Languages, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// Registered models and the language registry they were built against.
#[derive(Debug)]
pub struct Schema {
    pub languages: Languages,

    models: IndexMap<String, Arc<Model>>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns the model registered under `name`.
    pub fn model(&self, name: &str) -> Result<&Arc<Model>> {
        self.models
            .get(name)
            .ok_or_else(|| Error::configuration(format!("model `{name}` is not registered")))
    }

    pub fn model_by_id(&self, id: ModelId) -> &Arc<Model> {
        &self.models[id.0]
    }

    pub fn models(&self) -> impl ExactSizeIterator<Item = &Arc<Model>> + '_ {
        self.models.values()
    }

    /// The translation model registered as canonical for `model`, if the
    /// model declares translated fields.
    pub fn translation_model(&self, model: &str) -> Option<&TranslationModel> {
        self.models.get(model)?.translation.as_ref()
    }
}
