pub mod db;
pub use db::Db;

mod query;
pub use query::Query;

pub mod record;
pub use record::{Record, Translation};

pub use multilingual_core::{
    bail, err,
    language::{self, activate, deactivate, scope, LanguageCode, LanguageSettings, Languages},
    schema::{self, Field, Manager, ModelBuilder},
    stmt::{self, Value},
    Error, Result,
};
