//! In-memory post store - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Post, PostId};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

struct Store {
    rows: BTreeMap<PostId, Post>,
    last_id: PostId,
}

/// In-memory post repository using a BTreeMap keyed by id behind an async RwLock.
///
/// Ids start at 1 and are never handed out twice, even after deletes.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let row = store.rows.get_mut(&post.id).ok_or(RepoError::NotFound)?;

        // Author and creation time belong to the stored row.
        row.title = post.title;
        row.text = post.text;
        row.updated_at = post.updated_at;

        Ok(row.clone())
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        match store.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let post = post.into_post(store.last_id);
        store.rows.insert(post.id, post.clone());
        tracing::debug!(post_id = post.id, "Stored post in memory");

        Ok(post)
    }

    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.rows.values().rev().cloned().collect())
    }
}
