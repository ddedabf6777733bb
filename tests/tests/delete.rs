use tests::{
    models,
    setup::{article, create_article, translation_rows},
    DbTest,
};

#[tokio::test]
async fn deleting_a_record_removes_its_translations() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    let mut record = create_article(db, "first", &[("cs", "Ahoj"), ("en", "Hello")]).await;
    create_article(db, "second", &[("cs", "Nazdar")]).await;
    test.log.clear();

    record.delete(db).await.unwrap();

    assert_eq!(
        test.log.written_tables(),
        ["article_translation", "article"]
    );
    assert!(!record.is_persisted());
    assert!(record.cache().is_empty());
    assert_eq!(translation_rows(db).await, 1);
    assert_eq!(db.query("Article").unwrap().count().await.unwrap(), 1);

    assert!(record.delete(db).await.is_err());
}

#[tokio::test]
async fn query_delete_leaves_no_orphans() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    create_article(db, "first", &[("cs", "Ahoj"), ("en", "Hello")]).await;
    create_article(db, "second", &[("cs", "Nazdar")]).await;
    create_article(db, "third", &[("en", "Hi")]).await;

    let deleted = db
        .query("Article")
        .unwrap()
        .filter("title_en__isnull", false)
        .delete()
        .await
        .unwrap();

    assert_eq!(deleted, 2);
    assert_eq!(translation_rows(db).await, 1);

    let remaining = db.query("Article").unwrap().get().await.unwrap();
    assert_eq!(remaining.field("slug").unwrap(), "second");

    let deleted = db
        .query("Article")
        .unwrap()
        .filter("title_fr", "Salut")
        .delete()
        .await
        .unwrap();
    assert_eq!(deleted, 0);
}
