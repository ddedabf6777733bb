mod model;
pub use model::ModelBuilder;

use super::{ModelId, Schema};
use crate::{Error, Languages, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// Collects model declarations and builds a [`Schema`].
#[derive(Debug, Default)]
pub struct Builder {
    models: Vec<ModelBuilder>,

    /// Prefix prepended to every table name
    table_name_prefix: Option<String>,
}

impl Builder {
    pub fn register(&mut self, model: ModelBuilder) -> &mut Self {
        self.models.push(model);
        self
    }

    /// Set the table name prefix for all tables
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    pub fn build(&self, languages: Languages) -> Result<Schema> {
        let mut models = IndexMap::with_capacity(self.models.len());

        for (index, builder) in self.models.iter().enumerate() {
            let model = builder.build(
                ModelId(index),
                &languages,
                self.table_name_prefix.as_deref(),
            )?;

            if models.contains_key(&model.name) {
                return Err(Error::configuration(format!(
                    "model `{}` is registered more than once",
                    model.name
                )));
            }

            tracing::debug!(
                model = %model.name,
                table = %model.table,
                translated = model.translation.is_some(),
                "registered model"
            );

            models.insert(model.name.clone(), Arc::new(model));
        }

        Ok(Schema { languages, models })
    }
}
