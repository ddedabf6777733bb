use super::{Connect, Db, Shared};
use crate::{Error, Result};

use multilingual_core::{
    schema::{self, ModelBuilder},
    Driver, LanguageSettings, Languages, Schema,
};

use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct Builder {
    languages: Option<LanguageSettings>,

    /// Schema builder
    core: schema::Builder,
}

impl Builder {
    /// Configured languages. Required.
    pub fn languages(&mut self, settings: LanguageSettings) -> &mut Self {
        self.languages = Some(settings);
        self
    }

    pub fn register(&mut self, model: ModelBuilder) -> &mut Self {
        self.core.register(model);
        self
    }

    /// Set the table name prefix for all tables
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.core.table_name_prefix(prefix);
        self
    }

    /// Validates the language settings and builds the schema.
    pub fn build_schema(&self) -> Result<Schema> {
        let Some(settings) = &self.languages else {
            return Err(Error::configuration("no language settings were given"));
        };

        let languages = Languages::from_settings(settings)?;
        self.core.build(languages)
    }

    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?).await
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let schema = self.build_schema()?;
        let connection = driver.connect().await?;

        tracing::debug!(url = %driver.url(), "connected");

        Ok(Db {
            shared: Arc::new(Shared {
                schema: Arc::new(schema),
                driver: Box::new(driver),
                connection: Mutex::new(connection),
            }),
        })
    }
}
