use multilingual::{language, Value};
use tests::{
    models,
    setup::{article, create_article},
    DbTest,
};

#[tokio::test]
async fn language_proxies_round_trip() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    let mut record = db.new_record("Article").unwrap();
    record.set_field("slug", "greeting").unwrap();
    record.set_field("published", true).unwrap();
    record.set(db, "title_cs", "Ahoj").await.unwrap();
    record.set(db, "title_en", "Hi").await.unwrap();
    record.save(db).await.unwrap();

    let mut loaded = db
        .query("Article")
        .unwrap()
        .filter("slug", "greeting")
        .get()
        .await
        .unwrap();

    assert_eq!(loaded.get(db, "title_cs").await.unwrap(), "Ahoj");
    assert_eq!(loaded.get(db, "title_en").await.unwrap(), "Hi");
    assert_eq!(loaded.get(db, "title_fr").await.unwrap(), Value::Null);
    assert_eq!(loaded.get(db, "slug").await.unwrap(), "greeting");
    assert_eq!(loaded.get(db, "published").await.unwrap(), Value::Bool(true));
}

#[tokio::test]
async fn language_proxy_never_falls_back() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    let mut record = create_article(db, "greeting", &[("cs", "Ahoj"), ("en", "Hi")]).await;

    assert_eq!(record.get(db, "title_en_us").await.unwrap(), Value::Null);
    assert_eq!(record.get(db, "title_fr").await.unwrap(), Value::Null);

    // en-us -> en -> cs
    assert_eq!(record.get(db, "title_en_us_any").await.unwrap(), "Hi");
    assert_eq!(record.get(db, "title_fr_any").await.unwrap(), "Ahoj");
}

#[tokio::test]
async fn fallback_skips_null_values() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    let mut record = create_article(db, "greeting", &[("cs", "Ahoj")]).await;
    record.write(db, "title", Some("en"), Value::Null).await.unwrap();
    record.write(db, "body", Some("en"), "Body").await.unwrap();
    record.save(db).await.unwrap();

    let mut loaded = db.query("Article").unwrap().get().await.unwrap();

    assert!(loaded.cache().is_empty());
    assert_eq!(loaded.get(db, "title_en").await.unwrap(), Value::Null);
    assert_eq!(loaded.get(db, "title_en_any").await.unwrap(), "Ahoj");
    assert_eq!(loaded.get(db, "body_en_any").await.unwrap(), "Body");
}

#[tokio::test]
async fn current_proxy_follows_active_language() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    language::scope(async {
        let mut record = create_article(db, "greeting", &[("cs", "Ahoj"), ("en", "Hi")]).await;

        assert_eq!(record.get(db, "title").await.unwrap(), "Ahoj");

        language::activate("en");
        assert_eq!(record.get(db, "title").await.unwrap(), "Hi");

        // Regional variants resolve to their configured base language
        language::activate("en-GB");
        assert_eq!(record.get(db, "title").await.unwrap(), "Hi");

        language::activate("fr");
        assert_eq!(record.get(db, "title").await.unwrap(), Value::Null);
        assert_eq!(record.get(db, "title_any").await.unwrap(), "Ahoj");

        // Unconfigured locales map to the default
        language::activate("de");
        assert_eq!(record.get(db, "title").await.unwrap(), "Ahoj");

        language::deactivate();
        assert_eq!(record.get(db, "title").await.unwrap(), "Ahoj");
    })
    .await;
}

#[tokio::test]
async fn current_proxy_writes_to_active_language() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    language::scope(async {
        language::activate("fr");

        let mut record = create_article(db, "greeting", &[]).await;
        record.set(db, "title", "Salut").await.unwrap();
        record.save(db).await.unwrap();

        language::deactivate();

        let mut loaded = db.query("Article").unwrap().get().await.unwrap();
        assert_eq!(loaded.get(db, "title_fr").await.unwrap(), "Salut");
        assert_eq!(loaded.get(db, "title").await.unwrap(), Value::Null);
    })
    .await;
}

#[tokio::test]
async fn lock_pins_language_and_disables_fallback() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    language::scope(async {
        let mut record = create_article(db, "greeting", &[("cs", "Ahoj"), ("en", "Hi")]).await;
        let languages = db.languages();

        language::activate("cs");
        languages.lock("en").unwrap();
        assert_eq!(record.get(db, "title").await.unwrap(), "Hi");

        // Last lock wins
        languages.lock("fr").unwrap();
        assert_eq!(record.get(db, "title").await.unwrap(), Value::Null);
        assert_eq!(record.get(db, "title_any").await.unwrap(), Value::Null);
        assert_eq!(record.get(db, "title_fr_any").await.unwrap(), Value::Null);

        languages.release();
        assert_eq!(record.get(db, "title").await.unwrap(), "Ahoj");
        assert_eq!(record.get(db, "title_fr_any").await.unwrap(), "Ahoj");

        {
            let _guard = languages.lock_scoped("en").unwrap();
            assert_eq!(record.get(db, "title").await.unwrap(), "Hi");
        }
        assert_eq!(languages.locked(), None);
    })
    .await;
}

#[tokio::test]
async fn locks_do_not_leak_between_scopes() {
    let test = DbTest::setup(models!(article())).await;
    let db = test.db.clone();

    language::scope(async {
        db.languages().lock("fr").unwrap();
        assert!(db.languages().locked().is_some());
    })
    .await;

    language::scope(async {
        assert_eq!(db.languages().locked(), None);
        assert_eq!(db.languages().active_language(), "cs");
    })
    .await;
}

#[tokio::test]
async fn unconfigured_language_is_rejected() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    let mut record = create_article(db, "greeting", &[("cs", "Ahoj")]).await;
    test.log.clear();

    let err = record.read(db, "title", Some("pl"), false).await.unwrap_err();
    assert!(err.is_invalid_language());

    let err = record.write(db, "title", Some("pl"), "Cześć").await.unwrap_err();
    assert!(err.is_invalid_language());

    let err = db.languages().lock("pl").unwrap_err();
    assert!(err.is_invalid_language());

    assert!(test.log.is_empty());
}

#[tokio::test]
async fn unknown_fields_and_type_mismatches() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    let mut record = db.new_record("Article").unwrap();

    assert!(record.get(db, "subtitle_en").await.is_err());
    assert!(record.set(db, "title_en", 42).await.is_err());
    assert!(record.set_field("published", "yes").is_err());
    assert!(record.set_field("id", 7).is_err());
}

#[tokio::test]
async fn translation_access() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    let mut record = create_article(db, "greeting", &[("cs", "Ahoj"), ("en", "Hi")]).await;

    let translation = record.translation(db, Some("en"), false, false).await.unwrap();
    assert_eq!(translation.language(), "en");
    assert_eq!(translation.get("title"), Some(&Value::from("Hi")));
    assert!(!translation.is_new());

    let err = record
        .translation(db, Some("fr"), false, false)
        .await
        .unwrap_err();
    assert!(err.is_translation_not_found());

    let translation = record.translation(db, Some("fr"), true, false).await.unwrap();
    assert_eq!(translation.language(), "cs");

    let translation = record.translation(db, Some("fr"), false, true).await.unwrap();
    assert_eq!(translation.language(), "fr");
    assert!(translation.is_new());
    assert_eq!(translation.get("title"), Some(&Value::Null));
}

#[tokio::test]
async fn reads_are_cached() {
    let test = DbTest::setup(models!(article())).await;
    let db = &test.db;

    create_article(db, "greeting", &[("cs", "Ahoj")]).await;
    let mut record = db.query("Article").unwrap().get().await.unwrap();
    test.log.clear();

    assert_eq!(record.get(db, "title_cs").await.unwrap(), "Ahoj");
    assert_eq!(record.get(db, "body_cs").await.unwrap(), Value::Null);
    assert_eq!(test.log.queries(), 1);

    // Missing rows are cached as absent
    assert_eq!(record.get(db, "title_fr").await.unwrap(), Value::Null);
    assert_eq!(record.get(db, "title_fr").await.unwrap(), Value::Null);
    assert_eq!(test.log.queries(), 2);
    assert!(record.cache().is_absent("fr"));
    assert!(!record.cache().is_cached("en"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn locks_follow_tasks_across_workers() {
    let test = DbTest::setup(models!(article())).await;
    let db = test.db.clone();

    create_article(&db, "greeting", &[("cs", "Ahoj"), ("en", "Hi")]).await;

    let tasks: Vec<_> = [("en", "Hi"), ("fr", ""), ("cs", "Ahoj")]
        .into_iter()
        .map(|(code, expect)| {
            let db = db.clone();
            tokio::spawn(language::scope(async move {
                db.languages().lock(code).unwrap();

                let mut record = db.query("Article").unwrap().get().await.unwrap();
                for _ in 0..5 {
                    tokio::task::yield_now().await;
                    let title = record.get(&db, "title_any").await.unwrap();
                    let expect = if expect.is_empty() { Value::Null } else { Value::from(expect) };
                    assert_eq!(title, expect);
                    assert_eq!(db.languages().active_language(), code);
                }
            }))
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }
}
