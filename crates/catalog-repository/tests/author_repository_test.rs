//! Integration tests for MySqlAuthorRepository.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker; run with `cargo test -- --ignored`.

mod common;

use catalog_core::{AuthorId, CatalogError, NewAuthor, PageRequest, Sort};
use catalog_repository::{AuthorRepository, MusicRepository};
use common::{create_author, create_music, TestDatabase};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_and_find_by_id() {
    let db = TestDatabase::new().await;
    let repo = db.authors();

    let saved = create_author(&repo, "John Lennon", "john@x.com").await;
    assert_eq!(saved.name, "John Lennon");

    let found = repo
        .find_by_id(saved.id)
        .await
        .expect("Query failed")
        .expect("Author not found");
    assert_eq!(found, saved);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_by_id_not_found() {
    let db = TestDatabase::new().await;
    let result = db.authors().find_by_id(AuthorId(999)).await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_email_lookup_ignores_case() {
    let db = TestDatabase::new().await;
    let repo = db.authors();
    create_author(&repo, "John Lennon", "john@x.com").await;

    assert!(repo.exists_by_email("JOHN@X.COM").await.unwrap());
    assert!(!repo.exists_by_email("paul@x.com").await.unwrap());
    assert!(repo.exists_by_email("John@x.com").await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_email_violates_unique_constraint() {
    let db = TestDatabase::new().await;
    let repo = db.authors();
    create_author(&repo, "John Lennon", "john@x.com").await;

    let err = repo
        .save(&NewAuthor {
            name: "Impostor".to_string(),
            email: "john@x.com".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::BusinessRule(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_with_musics() {
    let db = TestDatabase::new().await;
    let authors = db.authors();
    let musics = db.musics();

    let john = create_author(&authors, "John Lennon", "john@x.com").await;
    create_music(&musics, "Imagine", 180, Some("Rock"), john.id).await;
    create_music(&musics, "Jealous Guy", 254, None, john.id).await;

    let aggregate = authors
        .find_with_musics(john.id)
        .await
        .unwrap()
        .expect("Author not found");

    assert_eq!(aggregate.author.id, john.id);
    let names: Vec<_> = aggregate.musics.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Imagine", "Jealous Guy"]);
    assert_eq!(authors.count_musics(john.id).await.unwrap(), 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_all_sorted_by_name_with_counts() {
    let db = TestDatabase::new().await;
    let authors = db.authors();
    let musics = db.musics();

    let ringo = create_author(&authors, "Ringo Starr", "ringo@x.com").await;
    create_author(&authors, "George Harrison", "george@x.com").await;
    create_music(&musics, "Photograph", 240, Some("Pop"), ringo.id).await;

    let page = authors.find_all(&PageRequest::first()).await.unwrap();
    assert_eq!(page.total_elements, 2);
    assert_eq!(page.content[0].author.name, "George Harrison");
    assert_eq!(page.content[0].music_count, 0);
    assert_eq!(page.content[1].author.name, "Ringo Starr");
    assert_eq!(page.content[1].music_count, 1);

    let desc = authors
        .find_all(&PageRequest::first().with_sort(Sort::desc("name")))
        .await
        .unwrap();
    assert_eq!(desc.content[0].author.name, "Ringo Starr");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update() {
    let db = TestDatabase::new().await;
    let repo = db.authors();
    let mut author = create_author(&repo, "John", "john@x.com").await;

    author.apply_update("John Lennon".to_string(), "lennon@x.com".to_string());
    let updated = repo.update(&author).await.unwrap();

    assert_eq!(updated.name, "John Lennon");
    assert_eq!(updated.email, "lennon@x.com");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_cascades_to_musics() {
    let db = TestDatabase::new().await;
    let authors = db.authors();
    let musics = db.musics();

    let john = create_author(&authors, "John Lennon", "john@x.com").await;
    let imagine = create_music(&musics, "Imagine", 180, Some("Rock"), john.id).await;

    assert!(authors.delete(john.id).await.unwrap());
    assert!(!authors.delete(john.id).await.unwrap());
    assert!(musics.find_by_id(imagine.music.id).await.unwrap().is_none());
}
