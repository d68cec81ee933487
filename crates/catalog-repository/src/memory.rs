//! In-memory repositories.
//!
//! Both repositories share one [`InMemoryCatalog`] store and enforce the same
//! constraints as the MySQL schema: unique author email (ignoring case),
//! unique music name per author, the author foreign key and the cascade on
//! author deletion. Searches evaluate [`MusicFilter`] in memory.

use crate::sort::{self, AUTHOR_COLUMNS, MUSIC_COLUMNS};
use crate::traits::{AuthorRepository, MusicRepository};
use async_trait::async_trait;
use catalog_core::{
    Author, AuthorId, AuthorWithMusicCount, AuthorWithMusics, CatalogError, CatalogResult, Music,
    MusicFilter, MusicId, MusicWithAuthor, NewAuthor, NewMusic, Page, PageRequest, SortDirection,
};
use chrono::Utc;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct Store {
    authors: BTreeMap<AuthorId, Author>,
    musics: BTreeMap<MusicId, Music>,
    next_author_id: i64,
    next_music_id: i64,
}

impl Store {
    fn email_taken(&self, email: &str, excluding: Option<AuthorId>) -> bool {
        self.authors
            .values()
            .any(|a| Some(a.id) != excluding && a.has_email(email))
    }

    fn name_taken(&self, name: &str, author_id: AuthorId, excluding: Option<MusicId>) -> bool {
        self.musics.values().any(|m| {
            Some(m.id) != excluding && m.author_id == author_id && m.name.eq_ignore_ascii_case(name)
        })
    }

    fn music_count(&self, id: AuthorId) -> u64 {
        self.musics.values().filter(|m| m.author_id == id).count() as u64
    }

    fn with_author(&self, music: &Music) -> CatalogResult<MusicWithAuthor> {
        let author = self.authors.get(&music.author_id).ok_or_else(|| {
            CatalogError::internal(format!("Music {} has no author", music.id))
        })?;
        Ok(MusicWithAuthor {
            music: music.clone(),
            author_name: author.name.clone(),
        })
    }
}

/// Shared store behind the in-memory repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    store: Arc<RwLock<Store>>,
    aggregate_reads: Arc<AtomicUsize>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Author repository over this store.
    #[must_use]
    pub fn authors(&self) -> InMemoryAuthorRepository {
        InMemoryAuthorRepository {
            catalog: self.clone(),
        }
    }

    /// Music repository over this store.
    #[must_use]
    pub fn musics(&self) -> InMemoryMusicRepository {
        InMemoryMusicRepository {
            catalog: self.clone(),
        }
    }

    /// Number of times an author-with-musics aggregate was loaded.
    #[must_use]
    pub fn aggregate_reads(&self) -> usize {
        self.aggregate_reads.load(AtomicOrdering::SeqCst)
    }
}

fn duplicate(what: &str) -> CatalogError {
    CatalogError::business_rule(format!("Duplicate entry violates unique constraint on {what}"))
}

fn paginate<T>(items: Vec<T>, page: &PageRequest) -> CatalogResult<Page<T>> {
    let offset = usize::try_from(page.offset()?).unwrap_or(usize::MAX);
    let total = items.len() as u64;
    let content = items
        .into_iter()
        .skip(offset)
        .take(page.limit())
        .collect();
    Ok(Page::new(content, page.page, page.size, total))
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

// Text comparisons ignore case, as the MySQL default collation does.
fn author_ordering(property: &str) -> fn(&Author, &Author) -> Ordering {
    match property {
        "name" => |a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        "email" => |a, b| a.email.to_lowercase().cmp(&b.email.to_lowercase()),
        "createdAt" => |a, b| a.created_at.cmp(&b.created_at),
        "updatedAt" => |a, b| a.updated_at.cmp(&b.updated_at),
        _ => |a, b| a.id.cmp(&b.id),
    }
}

fn music_ordering(property: &str) -> fn(&Music, &Music) -> Ordering {
    match property {
        "name" => |a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        "durationSeconds" => |a, b| a.duration_seconds.cmp(&b.duration_seconds),
        "genre" => |a, b| {
            let lower = |m: &Music| m.genre.as_deref().map(str::to_lowercase);
            lower(a).cmp(&lower(b))
        },
        "createdAt" => |a, b| a.created_at.cmp(&b.created_at),
        "updatedAt" => |a, b| a.updated_at.cmp(&b.updated_at),
        _ => |a, b| a.id.cmp(&b.id),
    }
}

/// In-memory author repository.
#[derive(Debug, Clone)]
pub struct InMemoryAuthorRepository {
    catalog: InMemoryCatalog,
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn find_by_id(&self, id: AuthorId) -> CatalogResult<Option<Author>> {
        Ok(self.catalog.store.read().authors.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: AuthorId) -> CatalogResult<bool> {
        Ok(self.catalog.store.read().authors.contains_key(&id))
    }

    async fn exists_by_email(&self, email: &str) -> CatalogResult<bool> {
        Ok(self.catalog.store.read().email_taken(email, None))
    }

    async fn find_with_musics(&self, id: AuthorId) -> CatalogResult<Option<AuthorWithMusics>> {
        debug!("Loading author with musics: {}", id);
        self.catalog.aggregate_reads.fetch_add(1, AtomicOrdering::SeqCst);

        let store = self.catalog.store.read();
        Ok(store.authors.get(&id).map(|author| AuthorWithMusics {
            author: author.clone(),
            musics: store
                .musics
                .values()
                .filter(|m| m.author_id == id)
                .cloned()
                .collect(),
        }))
    }

    async fn count_musics(&self, id: AuthorId) -> CatalogResult<u64> {
        Ok(self.catalog.store.read().music_count(id))
    }

    async fn find_all(&self, page: &PageRequest) -> CatalogResult<Page<AuthorWithMusicCount>> {
        sort::order_by(&page.sort, AUTHOR_COLUMNS)?;
        let compare = author_ordering(&page.sort.property);

        let store = self.catalog.store.read();
        let mut authors: Vec<&Author> = store.authors.values().collect();
        authors.sort_by(|a, b| {
            directed(compare(a, b), page.sort.direction).then_with(|| a.id.cmp(&b.id))
        });

        let rows = authors
            .into_iter()
            .map(|author| AuthorWithMusicCount {
                author: author.clone(),
                music_count: store.music_count(author.id),
            })
            .collect();
        paginate(rows, page)
    }

    async fn save(&self, author: &NewAuthor) -> CatalogResult<Author> {
        let mut store = self.catalog.store.write();
        if store.email_taken(&author.email, None) {
            return Err(duplicate("authors.email"));
        }

        store.next_author_id += 1;
        let now = Utc::now();
        let saved = Author {
            id: AuthorId(store.next_author_id),
            name: author.name.clone(),
            email: author.email.clone(),
            created_at: now,
            updated_at: now,
        };
        store.authors.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, author: &Author) -> CatalogResult<Author> {
        let mut store = self.catalog.store.write();
        if !store.authors.contains_key(&author.id) {
            return Err(CatalogError::not_found("Author", author.id));
        }
        if store.email_taken(&author.email, Some(author.id)) {
            return Err(duplicate("authors.email"));
        }

        store.authors.insert(author.id, author.clone());
        Ok(author.clone())
    }

    async fn delete(&self, id: AuthorId) -> CatalogResult<bool> {
        let mut store = self.catalog.store.write();
        if store.authors.remove(&id).is_none() {
            return Ok(false);
        }
        store.musics.retain(|_, m| m.author_id != id);
        Ok(true)
    }
}

/// In-memory music repository.
#[derive(Debug, Clone)]
pub struct InMemoryMusicRepository {
    catalog: InMemoryCatalog,
}

#[async_trait]
impl MusicRepository for InMemoryMusicRepository {
    async fn find_by_id(&self, id: MusicId) -> CatalogResult<Option<Music>> {
        Ok(self.catalog.store.read().musics.get(&id).cloned())
    }

    async fn find_with_author(&self, id: MusicId) -> CatalogResult<Option<MusicWithAuthor>> {
        let store = self.catalog.store.read();
        store
            .musics
            .get(&id)
            .map(|music| store.with_author(music))
            .transpose()
    }

    async fn exists_by_name_and_author(
        &self,
        name: &str,
        author_id: AuthorId,
        excluding: Option<MusicId>,
    ) -> CatalogResult<bool> {
        Ok(self.catalog.store.read().name_taken(name, author_id, excluding))
    }

    async fn find_all(&self, page: &PageRequest) -> CatalogResult<Page<MusicWithAuthor>> {
        self.search(&MusicFilter::unrestricted(), page).await
    }

    async fn search(
        &self,
        filter: &MusicFilter,
        page: &PageRequest,
    ) -> CatalogResult<Page<MusicWithAuthor>> {
        sort::order_by(&page.sort, MUSIC_COLUMNS)?;
        let compare = music_ordering(&page.sort.property);

        let store = self.catalog.store.read();
        let mut musics: Vec<&Music> = store.musics.values().filter(|m| filter.matches(m)).collect();
        musics.sort_by(|a, b| {
            directed(compare(a, b), page.sort.direction).then_with(|| a.id.cmp(&b.id))
        });

        let rows = musics
            .into_iter()
            .map(|music| store.with_author(music))
            .collect::<CatalogResult<Vec<_>>>()?;
        paginate(rows, page)
    }

    async fn find_by_author(
        &self,
        author_id: AuthorId,
        page: &PageRequest,
    ) -> CatalogResult<Page<MusicWithAuthor>> {
        self.search(&MusicFilter::unrestricted().and_author(author_id), page)
            .await
    }

    async fn save(&self, music: &NewMusic) -> CatalogResult<MusicWithAuthor> {
        let mut store = self.catalog.store.write();
        if !store.authors.contains_key(&music.author_id) {
            return Err(CatalogError::Database(format!(
                "Foreign key violation: author {} does not exist",
                music.author_id
            )));
        }
        if store.name_taken(&music.name, music.author_id, None) {
            return Err(duplicate("musics(name, author_id)"));
        }

        store.next_music_id += 1;
        let now = Utc::now();
        let saved = Music {
            id: MusicId(store.next_music_id),
            name: music.name.clone(),
            duration_seconds: music.duration_seconds,
            genre: music.genre.clone(),
            author_id: music.author_id,
            created_at: now,
            updated_at: now,
        };
        store.musics.insert(saved.id, saved.clone());
        store.with_author(&saved)
    }

    async fn update(&self, music: &Music) -> CatalogResult<MusicWithAuthor> {
        let mut store = self.catalog.store.write();
        if !store.musics.contains_key(&music.id) {
            return Err(CatalogError::not_found("Music", music.id));
        }
        if !store.authors.contains_key(&music.author_id) {
            return Err(CatalogError::Database(format!(
                "Foreign key violation: author {} does not exist",
                music.author_id
            )));
        }
        if store.name_taken(&music.name, music.author_id, Some(music.id)) {
            return Err(duplicate("musics(name, author_id)"));
        }

        store.musics.insert(music.id, music.clone());
        store.with_author(music)
    }

    async fn delete(&self, id: MusicId) -> CatalogResult<bool> {
        Ok(self.catalog.store.write().musics.remove(&id).is_some())
    }
}
