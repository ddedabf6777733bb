mod builder;
pub use builder::Builder;

mod connect;
pub use connect::Connect;

use crate::{Query, Record, Result};

use multilingual_core::{
    driver::{Operation, Response, Transaction},
    schema::Model,
    stmt::{CreateTable, Statement},
    Connection, Driver, Languages, Schema,
};

use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared state between all `Db` clones.
struct Shared {
    schema: Arc<Schema>,
    driver: Box<dyn Driver>,

    /// Operations of one save run sequentially on this connection
    connection: Mutex<Box<dyn Connection>>,
}

/// A database handle. Cloning is cheap; clones share one connection.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The record manager of `model`.
    pub fn query(&self, model: &str) -> Result<Query> {
        let model = self.schema().model(model)?.clone();
        Ok(Query::new(self.clone(), model))
    }

    /// A new, unsaved record of `model`.
    pub fn new_record(&self, model: &str) -> Result<Record> {
        let model = self.schema().model(model)?.clone();
        Ok(Record::new(model, self.languages().clone()))
    }

    /// Execute a statement
    pub async fn exec(&self, stmt: Statement) -> Result<Response> {
        self.exec_op(stmt.into()).await
    }

    async fn exec_op(&self, op: Operation) -> Result<Response> {
        let mut connection = self.shared.connection.lock().await;
        connection.exec(op).await
    }

    pub async fn begin(&self) -> Result<()> {
        self.exec_op(Transaction::Start.into()).await?;
        Ok(())
    }

    pub async fn commit(&self) -> Result<()> {
        self.exec_op(Transaction::Commit.into()).await?;
        Ok(())
    }

    pub async fn rollback(&self) -> Result<()> {
        self.exec_op(Transaction::Rollback.into()).await?;
        Ok(())
    }

    /// Creates the owner and translation tables of every registered model.
    pub async fn push_schema(&self) -> Result<()> {
        for model in self.schema().models() {
            self.create_tables(model).await?;
        }
        Ok(())
    }

    async fn create_tables(&self, model: &Model) -> Result<()> {
        tracing::debug!(model = %model.name, table = %model.table, "creating tables");

        self.exec(CreateTable::for_model(model).into()).await?;

        if let Some(stmt) = CreateTable::for_translation(model) {
            self.exec(stmt.into()).await?;
        }

        Ok(())
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.shared.schema
    }

    pub fn languages(&self) -> &Languages {
        &self.shared.schema.languages
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("driver", &self.shared.driver.url())
            .field("models", &self.shared.schema.models().len())
            .finish()
    }
}
