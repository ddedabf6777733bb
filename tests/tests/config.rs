use multilingual::{Db, Field, LanguageSettings, Manager, ModelBuilder};
use multilingual_driver_sqlite::Sqlite;
use tests::{
    models,
    setup::{article, tag},
    DbTest,
};

#[tokio::test]
async fn default_language_must_be_configured() {
    let mut builder = Db::builder();
    builder
        .languages(
            LanguageSettings::new("pl")
                .language("cs", "Čeština")
                .language("en", "English"),
        )
        .register(article());

    let err = builder.build(Sqlite::in_memory()).await.unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("`pl`"));
}

#[tokio::test]
async fn language_settings_are_required() {
    let mut builder = Db::builder();
    builder.register(article());

    let err = builder.build(Sqlite::in_memory()).await.unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn settings_from_json() {
    let settings: LanguageSettings = serde_json::from_str(
        r#"{
            "languages": [
                { "code": "en", "name": "English" },
                { "code": "ar", "name": "العربية" }
            ],
            "default": "en",
            "bidi": ["ar"]
        }"#,
    )
    .unwrap();

    let mut builder = Db::builder();
    builder.languages(settings).register(article());
    let db = builder.connect("sqlite::memory:").await.unwrap();

    let languages = db.languages();
    assert_eq!(languages.default_language(), "en");
    assert!(languages.is_bidi("ar"));
    assert_eq!(languages.language_name("ar"), Some("العربية"));

    let model = db.schema().model("Article").unwrap();
    assert!(model.proxy("title_ar_any").is_some());
    assert!(model.proxy("title_cs").is_none());
}

#[tokio::test]
async fn unsupported_scheme() {
    let mut builder = models!(article());
    let err = builder.connect("postgres://localhost/app").await.unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn translated_models_need_a_multilingual_manager() {
    let builder = models!(article().manager(Manager::Custom {
        name: "PublishedManager".to_string(),
        multilingual: false,
    }));
    assert!(builder.build_schema().unwrap_err().is_configuration());

    let builder = models!(article().manager(Manager::Custom {
        name: "PublishedManager".to_string(),
        multilingual: true,
    }));
    assert!(builder.build_schema().is_ok());

    // Models without translations may use any manager
    let mut builder = models!(tag().manager(Manager::Custom {
        name: "TagManager".to_string(),
        multilingual: false,
    }));
    assert!(builder.build(Sqlite::in_memory()).await.is_ok());
}

#[tokio::test]
async fn models_without_translations_work_unchanged() {
    let test = DbTest::setup(models!(article(), tag())).await;
    let db = &test.db;

    let tags = db.query("Tag").unwrap();
    tags.create([("name", "rust".into())]).await.unwrap();

    let tag = tags.clone().filter("name", "rust").get().await.unwrap();
    assert_eq!(tag.field("name").unwrap(), "rust");
    assert!(tag.model().proxies.is_empty());
    assert!(db.schema().translation_model("Tag").is_none());

    let err = tags.filter("name_en", "rust").all().await.unwrap_err();
    assert!(err.is_unsupported_query());
}

#[tokio::test]
async fn table_prefix_applies_to_translation_tables() {
    let mut builder = models!(ModelBuilder::new("Page").translated(Field::string("title")));
    builder.table_name_prefix("cms_");
    let schema = builder.build_schema().unwrap();

    let translation = schema.translation_model("Page").unwrap();
    assert_eq!(schema.model("Page").unwrap().table, "cms_page");
    assert_eq!(translation.table, "cms_page_translation");
    assert_eq!(translation.name, "PageTranslation");
}

#[tokio::test]
async fn push_schema_creates_both_tables() {
    let test = DbTest::setup(models!(article())).await;

    test.db.push_schema().await.unwrap();

    let sql = test.log.sql();
    assert_eq!(sql.len(), 2);
    assert!(sql[0].starts_with(r#"CREATE TABLE IF NOT EXISTS "article" ("#));
    assert!(sql[1].starts_with(r#"CREATE TABLE IF NOT EXISTS "article_translation" ("#));
    assert!(sql[1].contains(r#"UNIQUE ("title", "language_code")"#));
    assert!(sql[1].contains(r#"UNIQUE ("language_code", "master_id")"#));
    assert!(sql[1].contains("ON DELETE CASCADE"));
}
