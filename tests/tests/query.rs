use multilingual::{language, Db, Value};
use tests::{
    models,
    setup::{article, create_article},
    DbTest,
};

/// `first`: cs + en, `second`: cs only, `third`: en only.
async fn seed(db: &Db) {
    create_article(db, "first", &[("cs", "Ahoj"), ("en", "Hello")]).await;
    create_article(db, "second", &[("cs", "Nazdar")]).await;
    create_article(db, "third", &[("en", "Hi")]).await;
}

async fn slugs(query: multilingual::Query) -> Vec<String> {
    query
        .values_list(&["slug"])
        .await
        .unwrap()
        .into_iter()
        .map(|row| row[0].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn filters_in_two_languages_use_two_joins() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;
    seed(db).await;
    test.log.clear();

    let records = db
        .query("Article")
        .unwrap()
        .filter("title_cs", "Ahoj")
        .filter("title_en", "Hello")
        .all()
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field("slug").unwrap(), "first");

    let sql = test.log.last_sql().unwrap();
    assert_eq!(sql.matches("LEFT JOIN").count(), 2);
    assert!(sql.contains(r#""article_translation" AS "article_translation_cs""#));
    assert!(sql.contains(r#""article_translation" AS "article_translation_en""#));

    // A conflicting pair in one language matches nothing
    let count = db
        .query("Article")
        .unwrap()
        .filter("title_en", "Hello")
        .filter("title_en", "Hi")
        .count()
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn references_to_one_language_share_a_join() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;
    seed(db).await;
    test.log.clear();

    let slugs = slugs(
        db.query("Article")
            .unwrap()
            .filter("title_cs__startswith", "Ah")
            .filter("title_cs__contains", "ho")
            .order_by("title_cs"),
    )
    .await;

    assert_eq!(slugs, ["first"]);
    assert_eq!(test.log.last_sql().unwrap().matches("LEFT JOIN").count(), 1);
}

#[tokio::test]
async fn exclude_keeps_records_without_the_translation() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;
    seed(db).await;

    let query = db
        .query("Article")
        .unwrap()
        .exclude("title_en", "Hello")
        .order_by("slug");
    assert_eq!(slugs(query).await, ["second", "third"]);

    let query = db
        .query("Article")
        .unwrap()
        .exclude("title_en__isnull", true)
        .order_by("slug");
    assert_eq!(slugs(query).await, ["first", "third"]);
}

#[tokio::test]
async fn unsuffixed_names_use_active_language() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;
    seed(db).await;

    language::scope(async {
        let query = db.query("Article").unwrap().filter("title", "Hello");
        assert_eq!(query.count().await.unwrap(), 0);

        language::activate("en");
        assert_eq!(slugs(query.clone()).await, ["first"]);

        // Pinned language overrides the active one
        let query = db
            .query("Article")
            .unwrap()
            .for_language("cs")
            .filter("title", "Nazdar");
        assert_eq!(slugs(query).await, ["second"]);
    })
    .await;
}

#[tokio::test]
async fn fallback_names_coalesce_over_the_chain() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;
    seed(db).await;
    test.log.clear();

    let rows = db
        .query("Article")
        .unwrap()
        .for_language("en")
        .order_by("slug")
        .values(&["slug", "title_any"])
        .await
        .unwrap();

    let titles: Vec<_> = rows.iter().map(|row| row["title_any"].clone()).collect();
    assert_eq!(
        titles,
        [
            Value::from("Hello"),
            Value::from("Nazdar"),
            Value::from("Hi"),
        ]
    );

    let sql = test.log.last_sql().unwrap();
    assert!(sql.contains(
        r#"COALESCE("article_translation_en"."title", "article_translation_cs"."title")"#
    ));

    let count = db
        .query("Article")
        .unwrap()
        .filter("title_fr_any", "Nazdar")
        .count()
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn order_by_translated_field() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;
    seed(db).await;

    let query = db.query("Article").unwrap().order_by("-title_en");
    assert_eq!(slugs(query).await, ["third", "first", "second"]);

    let query = db
        .query("Article")
        .unwrap()
        .filter("title_en__isnull", false)
        .order_by("title_en")
        .limit(1);
    assert_eq!(slugs(query).await, ["first"]);
}

#[tokio::test]
async fn values_list_mixes_owner_and_translated_fields() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;
    seed(db).await;

    let rows = db
        .query("Article")
        .unwrap()
        .order_by("pk")
        .values_list(&["slug", "published", "title_cs", "title_en"])
        .await
        .unwrap();

    assert_eq!(
        rows,
        vec![
            vec![
                Value::from("first"),
                Value::Bool(true),
                Value::from("Ahoj"),
                Value::from("Hello"),
            ],
            vec![
                Value::from("second"),
                Value::Bool(true),
                Value::from("Nazdar"),
                Value::Null,
            ],
            vec![
                Value::from("third"),
                Value::Bool(true),
                Value::Null,
                Value::from("Hi"),
            ],
        ]
    );
}

#[tokio::test]
async fn count_and_exists() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;
    seed(db).await;

    let articles = db.query("Article").unwrap();
    assert_eq!(articles.count().await.unwrap(), 3);
    assert_eq!(articles.clone().limit(1).count().await.unwrap(), 3);
    assert!(articles.clone().filter("title_cs", "Nazdar").exists().await.unwrap());
    assert!(!articles.filter("title_fr__isnull", false).exists().await.unwrap());
}

#[tokio::test]
async fn get_requires_exactly_one_match() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;
    seed(db).await;

    let err = db
        .query("Article")
        .unwrap()
        .filter("title_fr", "Salut")
        .get()
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());

    let err = db
        .query("Article")
        .unwrap()
        .filter("title_en__isnull", false)
        .get()
        .await
        .unwrap_err();
    assert!(err.is_too_many_records());

    let record = db
        .query("Article")
        .unwrap()
        .filter("title_en__startswith", "Hel")
        .get()
        .await
        .unwrap();
    assert_eq!(record.field("slug").unwrap(), "first");
}

#[tokio::test]
async fn pattern_lookups_match_literally() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;
    seed(db).await;
    create_article(db, "percent", &[("cs", "100% Ahoj")]).await;

    let query = db
        .query("Article")
        .unwrap()
        .filter("title_cs__contains", "%")
        .order_by("slug");
    assert_eq!(slugs(query).await, ["percent"]);

    let query = db
        .query("Article")
        .unwrap()
        .filter("title_cs__contains", "Ahoj")
        .order_by("slug");
    assert_eq!(slugs(query).await, ["first", "percent"]);

    let query = db.query("Article").unwrap().filter("title_cs__startswith", "_");
    assert!(slugs(query).await.is_empty());
}

#[tokio::test]
async fn filter_in() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;
    seed(db).await;

    let query = db
        .query("Article")
        .unwrap()
        .filter_in("title_en", ["Hello", "Hi", "Salut"])
        .order_by("slug");
    assert_eq!(slugs(query).await, ["first", "third"]);

    let query = db
        .query("Article")
        .unwrap()
        .filter_in("title_en", Vec::<&str>::new());
    assert!(slugs(query).await.is_empty());

    // `in` needs a list
    let err = db
        .query("Article")
        .unwrap()
        .filter("title_en__in", "Hello")
        .all()
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Article.filter(title_en__in)"));
}

#[tokio::test]
async fn traversal_through_translated_field_is_unsupported() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;
    seed(db).await;
    test.log.clear();

    let err = db
        .query("Article")
        .unwrap()
        .filter("title_en__author__name", "Jane")
        .all()
        .await
        .unwrap_err();
    assert!(err.is_unsupported_query());

    let err = db
        .query("Article")
        .unwrap()
        .order_by("title__author")
        .all()
        .await
        .unwrap_err();
    assert!(err.is_unsupported_query());

    // Nothing reaches the store
    assert!(test.log.is_empty());
}

#[tokio::test]
async fn unknown_names_and_languages_fail_before_io() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;
    seed(db).await;
    test.log.clear();

    let err = db
        .query("Article")
        .unwrap()
        .filter("title_pl", "Cześć")
        .all()
        .await
        .unwrap_err();
    assert!(err.is_unsupported_query());

    let err = db
        .query("Article")
        .unwrap()
        .for_language("pl")
        .filter("title", "Cześć")
        .all()
        .await
        .unwrap_err();
    assert!(err.is_invalid_language());

    assert!(db.query("Comment").unwrap_err().is_configuration());
    assert!(test.log.is_empty());
}

#[tokio::test]
async fn compiled_sql_for_two_languages() {
    use pretty_assertions::assert_eq;

    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    db.query("Article")
        .unwrap()
        .filter("title_cs", "Ahoj")
        .exclude("title_en", "Hello")
        .all()
        .await
        .unwrap();

    assert_eq!(
        test.log.last_sql().unwrap(),
        "SELECT \"article\".\"id\", \"article\".\"slug\", \"article\".\"published\" \
         FROM \"article\" \
         LEFT JOIN \"article_translation\" AS \"article_translation_cs\" \
         ON (\"article\".\"id\" = \"article_translation_cs\".\"master_id\" \
         AND \"article_translation_cs\".\"language_code\" = ?1) \
         LEFT JOIN \"article_translation\" AS \"article_translation_en\" \
         ON (\"article\".\"id\" = \"article_translation_en\".\"master_id\" \
         AND \"article_translation_en\".\"language_code\" = ?2) \
         WHERE (\"article_translation_cs\".\"title\" = ?3 \
         AND NOT ((\"article_translation_en\".\"title\" = ?4 \
         AND \"article_translation_en\".\"title\" IS NOT NULL)));"
    );
}

#[tokio::test]
async fn pk_alias_in_projections() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;
    seed(db).await;

    let rows = db
        .query("Article")
        .unwrap()
        .filter("title_cs__isnull", false)
        .order_by("-pk")
        .values(&["pk", "published"])
        .await
        .unwrap();

    let ids: Vec<_> = rows.iter().map(|row| row["pk"].clone()).collect();
    assert_eq!(ids, [Value::I64(2), Value::I64(1)]);
    assert!(rows.iter().all(|row| row["published"] == Value::Bool(true)));
}
