use crate::{exec_log::ExecLog, logging_driver::LoggingDriver};
use multilingual::{
    db::Builder,
    stmt::{Expr, Select, SelectItem},
    Db, Field, LanguageSettings, ModelBuilder, Record,
};
use multilingual_driver_sqlite::Sqlite;

/// Czech, English, American English and French; Czech is the default.
pub fn languages() -> LanguageSettings {
    LanguageSettings::new("cs")
        .language("cs", "Čeština")
        .language("en", "English")
        .language("en-us", "American English")
        .language("fr", "Français")
}

/// An owner with one plain field and two translated ones.
pub fn article() -> ModelBuilder {
    ModelBuilder::new("Article")
        .field(Field::string("slug").unique())
        .field(Field::bool("published"))
        .translated(Field::string("title").nullable().unique())
        .translated(Field::string("body").nullable())
}

/// An owner without translated fields.
pub fn tag() -> ModelBuilder {
    ModelBuilder::new("Tag").field(Field::string("name"))
}

/// A database under test and the log of what was sent to it.
#[derive(Debug)]
pub struct DbTest {
    pub db: Db,
    pub log: ExecLog,
}

impl DbTest {
    /// Connects `builder` to a fresh in-memory SQLite database, creates the
    /// tables and clears the log.
    pub async fn setup(mut builder: Builder) -> DbTest {
        init_tracing();

        let driver = LoggingDriver::new(Box::new(Sqlite::in_memory()));
        let log = ExecLog::new(driver.ops_log_handle());

        let db = builder.build(driver).await.unwrap();
        db.push_schema().await.unwrap();
        log.clear();

        DbTest { db, log }
    }
}

/// Installs a subscriber honoring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Saves an article with the given `(language, title)` pairs.
pub async fn create_article(db: &Db, slug: &str, titles: &[(&str, &str)]) -> Record {
    let mut record = db.new_record("Article").unwrap();
    record.set_field("slug", slug).unwrap();
    record.set_field("published", true).unwrap();

    for (language, title) in titles {
        record
            .write(db, "title", Some(language), *title)
            .await
            .unwrap();
    }

    record.save(db).await.unwrap();
    record
}

/// Number of rows in the article translation table.
pub async fn translation_rows(db: &Db) -> usize {
    let mut select = Select::new("article_translation");
    select.returning.push(SelectItem {
        expr: Expr::column("article_translation", "id"),
        alias: None,
    });

    db.exec(select.into()).await.unwrap().into_values().len()
}
