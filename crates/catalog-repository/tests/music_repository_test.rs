//! Integration tests for MySqlMusicRepository.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker; run with `cargo test -- --ignored`.

mod common;

use catalog_core::{CatalogError, MusicFilter, MusicSearchCriteria, NewMusic, PageRequest, Sort};
use catalog_repository::MusicRepository;
use common::{create_author, create_music, TestDatabase};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_returns_author_name() {
    let db = TestDatabase::new().await;
    let john = create_author(&db.authors(), "John Lennon", "john@x.com").await;

    let saved = create_music(&db.musics(), "Imagine", 180, Some("Rock"), john.id).await;

    assert_eq!(saved.music.name, "Imagine");
    assert_eq!(saved.music.duration_seconds, 180);
    assert_eq!(saved.music.genre.as_deref(), Some("Rock"));
    assert_eq!(saved.author_name, "John Lennon");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_name_unique_per_author_only() {
    let db = TestDatabase::new().await;
    let repo = db.musics();
    let john = create_author(&db.authors(), "John Lennon", "john@x.com").await;
    let paul = create_author(&db.authors(), "Paul McCartney", "paul@x.com").await;

    create_music(&repo, "Help", 140, None, john.id).await;
    create_music(&repo, "Help", 140, None, paul.id).await;

    assert!(repo.exists_by_name_and_author("Help", john.id, None).await.unwrap());

    let err = repo
        .save(&NewMusic {
            name: "Help".to_string(),
            duration_seconds: 140,
            genre: None,
            author_id: john.id,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::BusinessRule(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_exists_by_name_and_author_can_exclude_self() {
    let db = TestDatabase::new().await;
    let repo = db.musics();
    let john = create_author(&db.authors(), "John Lennon", "john@x.com").await;
    let help = create_music(&repo, "Help", 140, None, john.id).await;

    assert!(!repo
        .exists_by_name_and_author("Help", john.id, Some(help.music.id))
        .await
        .unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_search_duration_range_is_inclusive() {
    let db = TestDatabase::new().await;
    let repo = db.musics();
    let john = create_author(&db.authors(), "John Lennon", "john@x.com").await;

    for (name, duration) in [("a", 59), ("b", 60), ("c", 180), ("d", 300), ("e", 301)] {
        create_music(&repo, name, duration, None, john.id).await;
    }

    let criteria = MusicSearchCriteria {
        min_duration: Some(60),
        max_duration: Some(300),
        ..Default::default()
    };
    let page = repo
        .search(&MusicFilter::from_criteria(&criteria), &PageRequest::first())
        .await
        .unwrap();

    let names: Vec<_> = page.content.iter().map(|m| m.music.name.as_str()).collect();
    assert_eq!(names, vec!["b", "c", "d"]);
    assert_eq!(page.total_elements, 3);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_search_name_and_genre_ignore_case() {
    let db = TestDatabase::new().await;
    let repo = db.musics();
    let john = create_author(&db.authors(), "John Lennon", "john@x.com").await;
    create_music(&repo, "Imagine", 180, Some("Rock"), john.id).await;
    create_music(&repo, "Oh My Love", 170, Some("Ballad"), john.id).await;
    create_music(&repo, "100% Pure", 170, Some("rock"), john.id).await;

    let by_name = MusicSearchCriteria {
        name: Some("MAG".to_string()),
        ..Default::default()
    };
    let page = repo
        .search(&MusicFilter::from_criteria(&by_name), &PageRequest::first())
        .await
        .unwrap();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].music.name, "Imagine");

    let by_genre = MusicSearchCriteria {
        genre: Some("ROCK".to_string()),
        ..Default::default()
    };
    let page = repo
        .search(&MusicFilter::from_criteria(&by_genre), &PageRequest::first())
        .await
        .unwrap();
    assert_eq!(page.total_elements, 2);

    let literal_percent = MusicSearchCriteria {
        name: Some("0%".to_string()),
        ..Default::default()
    };
    let page = repo
        .search(&MusicFilter::from_criteria(&literal_percent), &PageRequest::first())
        .await
        .unwrap();
    assert_eq!(page.total_elements, 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unfiltered_search_equals_listing() {
    let db = TestDatabase::new().await;
    let repo = db.musics();
    let john = create_author(&db.authors(), "John Lennon", "john@x.com").await;
    for name in ["Imagine", "Mother", "Woman"] {
        create_music(&repo, name, 200, None, john.id).await;
    }

    let page = PageRequest::new(0, 2).with_sort(Sort::desc("name"));
    let listed = repo.find_all(&page).await.unwrap();
    let searched = repo
        .search(&MusicFilter::from_criteria(&MusicSearchCriteria::default()), &page)
        .await
        .unwrap();

    assert_eq!(listed, searched);
    assert_eq!(listed.total_pages, 2);
    assert_eq!(listed.content[0].music.name, "Woman");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_by_author_and_update_reassigns() {
    let db = TestDatabase::new().await;
    let repo = db.musics();
    let john = create_author(&db.authors(), "John Lennon", "john@x.com").await;
    let yoko = create_author(&db.authors(), "Yoko Ono", "yoko@x.com").await;
    let song = create_music(&repo, "Oh Yoko", 260, None, john.id).await;

    let mut music = song.music;
    music.author_id = yoko.id;
    let updated = repo.update(&music).await.unwrap();
    assert_eq!(updated.author_name, "Yoko Ono");

    let johns = repo.find_by_author(john.id, &PageRequest::first()).await.unwrap();
    assert!(johns.is_empty());
    let yokos = repo.find_by_author(yoko.id, &PageRequest::first()).await.unwrap();
    assert_eq!(yokos.len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unknown_sort_property_is_rejected() {
    let db = TestDatabase::new().await;
    let err = db
        .musics()
        .find_all(&PageRequest::first().with_sort(Sort::asc("email")))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}
