use manga_catalog::{
    db::{MangaFilter, Store, error::DatabaseError},
    error::Error,
    model::{MangaUpdate, NewManga},
};

use crate::{fake_new_manga, spawn_postgres_store};

#[tokio::test]
async fn favorite_twice_should_conflict() {
    let Some(store) = spawn_postgres_store().await else {
        return;
    };
    let manga = store.create_manga(&fake_new_manga("Action")).await.unwrap();

    store.add_favorite(3, manga.id).await.unwrap();
    let result = store.add_favorite(3, manga.id).await;
    assert!(matches!(
        result,
        Err(Error::Database(DatabaseError::Conflict))
    ));

    // Another user can still favorite the same manga.
    store.add_favorite(4, manga.id).await.unwrap();

    assert_eq!(store.list_favorite_manga(3).await.unwrap(), vec![manga]);
}

#[tokio::test]
async fn favorite_and_comment_on_missing_manga_should_be_not_found() {
    let Some(store) = spawn_postgres_store().await else {
        return;
    };

    let result = store.add_favorite(3, 999_999).await;
    assert!(matches!(
        result,
        Err(Error::Database(DatabaseError::NotFound))
    ));

    let result = store.add_comment(999_999, 3, "hello").await;
    assert!(matches!(
        result,
        Err(Error::Database(DatabaseError::NotFound))
    ));
}

#[tokio::test]
async fn comments_should_be_listed_newest_first() {
    let Some(store) = spawn_postgres_store().await else {
        return;
    };
    let manga = store.create_manga(&fake_new_manga("Action")).await.unwrap();

    let first = store.add_comment(manga.id, 1, "first").await.unwrap();
    let second = store.add_comment(manga.id, 2, "second").await.unwrap();
    assert_eq!(first.manga_id, manga.id);
    assert_eq!(second.user_id, 2);

    let texts: Vec<String> = store
        .list_comments(manga.id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.text)
        .collect();
    assert_eq!(texts, vec!["second", "first"]);

    assert!(store.list_comments(999_999).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_should_keep_fields_that_are_not_provided() {
    let Some(store) = spawn_postgres_store().await else {
        return;
    };
    let manga = store
        .create_manga(&NewManga {
            title: "Naruto".to_string(),
            description: "Ninja story".to_string(),
            genre: "Action".to_string(),
            cover: None,
        })
        .await
        .unwrap();
    assert_eq!(manga.cover, None);

    let update = MangaUpdate {
        genre: Some("Shonen".to_string()),
        cover: Some("naruto.jpg".to_string()),
        ..Default::default()
    };
    let updated = store.update_manga(manga.id, &update).await.unwrap();

    assert_eq!(updated.title, "Naruto");
    assert_eq!(updated.description, "Ninja story");
    assert_eq!(updated.genre, "Shonen");
    assert_eq!(updated.cover.as_deref(), Some("naruto.jpg"));
    assert_eq!(store.get_manga(manga.id).await.unwrap(), updated);

    let result = store.update_manga(999_999, &update).await;
    assert!(matches!(
        result,
        Err(Error::Database(DatabaseError::NotFound))
    ));
}

#[tokio::test]
async fn delete_should_cascade_and_report_missing_rows() {
    let Some(store) = spawn_postgres_store().await else {
        return;
    };
    let manga = store.create_manga(&fake_new_manga("Action")).await.unwrap();
    store.add_comment(manga.id, 1, "hello").await.unwrap();
    store.add_favorite(1, manga.id).await.unwrap();

    store.delete_manga(manga.id).await.unwrap();

    assert!(matches!(
        store.get_manga(manga.id).await,
        Err(Error::Database(DatabaseError::NotFound))
    ));
    assert!(store.list_comments(manga.id).await.unwrap().is_empty());
    assert!(store.list_favorite_manga(1).await.unwrap().is_empty());

    assert!(matches!(
        store.delete_manga(manga.id).await,
        Err(Error::Database(DatabaseError::NotFound))
    ));
}

#[tokio::test]
async fn list_should_page_and_filter_by_genre() {
    let Some(store) = spawn_postgres_store().await else {
        return;
    };
    for _ in 0..3 {
        store.create_manga(&fake_new_manga("Action")).await.unwrap();
    }
    store.create_manga(&fake_new_manga("Drama")).await.unwrap();

    let filter = MangaFilter {
        genre: Some("Action".to_string()),
        limit: 2,
        offset: 2,
    };
    let (page, total) = store.list_manga(&filter).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(total, 3);
    assert_eq!(page[0].genre, "Action");

    let filter = MangaFilter {
        genre: None,
        limit: i64::MAX,
        offset: i64::MAX,
    };
    let (page, total) = store.list_manga(&filter).await.unwrap();
    assert!(page.is_empty());
    assert_eq!(total, 4);

    assert_eq!(
        store.distinct_genres().await.unwrap(),
        vec!["Action".to_string(), "Drama".to_string()]
    );

    let stats = store.genre_counts().await.unwrap();
    assert_eq!(stats.get("Action"), Some(&3));
    assert_eq!(stats.get("Drama"), Some(&1));
}
