use multilingual::{language, Value};
use tests::{
    models,
    setup::{article, create_article},
    DbTest,
};

#[tokio::test]
async fn eager_load_fills_the_cache() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    create_article(db, "first", &[("cs", "Ahoj"), ("en", "Hello")]).await;
    create_article(db, "second", &[("cs", "Nazdar")]).await;
    test.log.clear();

    let mut records = db
        .query("Article")
        .unwrap()
        .select_related("translations_cs")
        .select_related("translations_en")
        .order_by("slug")
        .all()
        .await
        .unwrap();
    assert_eq!(test.log.queries(), 1);
    assert_eq!(test.log.last_sql().unwrap().matches("LEFT JOIN").count(), 2);

    let [first, second] = &mut records[..] else {
        panic!("expected two records");
    };

    assert_eq!(first.get(db, "title_cs").await.unwrap(), "Ahoj");
    assert_eq!(first.get(db, "title_en").await.unwrap(), "Hello");
    assert_eq!(second.get(db, "title_cs").await.unwrap(), "Nazdar");
    assert_eq!(second.get(db, "body_cs").await.unwrap(), Value::Null);

    // Missing rows were cached as absent
    assert!(second.cache().is_absent("en"));
    assert_eq!(second.get(db, "title_en").await.unwrap(), Value::Null);
    assert_eq!(second.get(db, "title_en_any").await.unwrap(), "Nazdar");

    assert_eq!(test.log.queries(), 1);

    let translation = first.cache().get("en").flatten().unwrap();
    assert_eq!(translation.master_id(), first.id());
    assert!(!translation.is_new());
}

#[tokio::test]
async fn eager_load_shares_the_filter_join() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    create_article(db, "first", &[("cs", "Ahoj"), ("en", "Hello")]).await;
    test.log.clear();

    let records = db
        .query("Article")
        .unwrap()
        .filter("title_en", "Hello")
        .select_related("translations_en")
        .all()
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(test.log.last_sql().unwrap().matches("LEFT JOIN").count(), 1);
    assert!(records[0].cache().is_cached("en"));
    assert!(!records[0].cache().is_cached("cs"));
}

#[tokio::test]
async fn unsuffixed_relation_uses_active_language() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    create_article(db, "first", &[("cs", "Ahoj"), ("en", "Hello")]).await;

    language::scope(async {
        language::activate("en");

        let record = db
            .query("Article")
            .unwrap()
            .select_related("translations")
            .get()
            .await
            .unwrap();

        assert_eq!(record.cache().languages().collect::<Vec<_>>(), ["en"]);
    })
    .await;
}

#[tokio::test]
async fn unknown_relations_are_rejected() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    let err = db
        .query("Article")
        .unwrap()
        .select_related("comments")
        .all()
        .await
        .unwrap_err();
    assert!(err.is_unsupported_query());

    let err = db
        .query("Article")
        .unwrap()
        .select_related("translations_pl")
        .all()
        .await
        .unwrap_err();
    assert!(err.is_invalid_language());
}
