//! Post request handler - maps each blog operation onto one store call and one view.

use std::sync::Arc;

use crate::domain::{NewPost, Post, PostForm, PostId, Principal};
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, PostRepository, Route, Template, View, ViewContext};

/// Whether a request may change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    /// GET, HEAD, OPTIONS - read or render only.
    Safe,
    /// POST and friends - triggers the state change.
    Mutating,
}

impl RequestMethod {
    pub fn from_verb(verb: &str) -> Self {
        match verb.to_ascii_uppercase().as_str() {
            "GET" | "HEAD" | "OPTIONS" => RequestMethod::Safe,
            _ => RequestMethod::Mutating,
        }
    }
}

/// Handles the five post operations against a [`PostRepository`].
#[derive(Clone)]
pub struct PostHandler {
    posts: Arc<dyn PostRepository>,
}

impl PostHandler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// All posts, newest first.
    pub async fn list(&self) -> Result<View, DomainError> {
        let posts = self.posts.list_newest_first().await?;
        Ok(View::render(Template::PostList, ViewContext::Posts(posts)))
    }

    pub async fn detail(&self, id: PostId) -> Result<View, DomainError> {
        let post = self.fetch(id).await?;
        Ok(View::render(Template::PostDetail, ViewContext::Post(post)))
    }

    /// Safe: show the empty form. Mutating: store a post authored by `principal`
    /// and go back to the list.
    pub async fn create(
        &self,
        method: RequestMethod,
        principal: Option<&Principal>,
        form: PostForm,
    ) -> Result<View, DomainError> {
        if method == RequestMethod::Safe {
            return Ok(View::render(Template::PostCreate, ViewContext::Empty));
        }

        let (title, text) = form.require()?;
        let author = principal.ok_or(DomainError::Unauthorized)?;
        let post = self.posts.create(NewPost::new(author, title, text)).await?;
        tracing::info!(post_id = post.id, author = %post.author, "Post created");

        Ok(View::Redirect(Route::PostList))
    }

    /// Only the mutating method deletes; a safe request is left unhandled.
    pub async fn delete(&self, id: PostId, method: RequestMethod) -> Result<View, DomainError> {
        if method == RequestMethod::Safe {
            return Ok(View::Unhandled);
        }

        let post = self.fetch(id).await?;
        self.posts.delete(post.id).await.map_err(|e| not_found(e, id))?;
        tracing::info!(post_id = id, "Post deleted");

        Ok(View::Redirect(Route::PostList))
    }

    /// Safe: show the form filled with the current values. Mutating: overwrite
    /// title and text, then show the post.
    pub async fn edit(
        &self,
        id: PostId,
        method: RequestMethod,
        form: PostForm,
    ) -> Result<View, DomainError> {
        if method == RequestMethod::Safe {
            let post = self.fetch(id).await?;
            return Ok(View::render(Template::PostEdit, ViewContext::Post(post)));
        }

        let (title, text) = form.require()?;
        let mut post = self.fetch(id).await?;
        post.revise(title, text);
        let post = self.posts.update(post).await.map_err(|e| not_found(e, id))?;
        tracing::info!(post_id = post.id, "Post edited");

        Ok(View::Redirect(Route::PostDetail(post.id)))
    }

    async fn fetch(&self, id: PostId) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })
    }
}

/// A row that vanished between lookup and write is still a missing post.
fn not_found(err: RepoError, id: PostId) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::NotFound {
            entity_type: "Post",
            id,
        },
        other => DomainError::Repository(other),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct FakePosts {
        rows: Mutex<BTreeMap<PostId, Post>>,
        last_id: Mutex<PostId>,
        /// Rows are found but gone by the time they are written, as with a
        /// concurrent delete.
        vanishing: bool,
    }

    #[async_trait]
    impl BaseRepository<Post, PostId> for FakePosts {
        async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
            Ok(self.rows.lock().await.get(&id).cloned())
        }

        async fn update(&self, post: Post) -> Result<Post, RepoError> {
            if self.vanishing {
                return Err(RepoError::NotFound);
            }
            let mut rows = self.rows.lock().await;
            let row = rows.get_mut(&post.id).ok_or(RepoError::NotFound)?;
            *row = post.clone();
            Ok(post)
        }

        async fn delete(&self, id: PostId) -> Result<(), RepoError> {
            if self.vanishing {
                return Err(RepoError::NotFound);
            }
            self.rows
                .lock()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl PostRepository for FakePosts {
        async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
            let mut last_id = self.last_id.lock().await;
            *last_id += 1;
            let post = post.into_post(*last_id);
            self.rows.lock().await.insert(post.id, post.clone());
            Ok(post)
        }

        async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
            Ok(self.rows.lock().await.values().rev().cloned().collect())
        }
    }

    fn handler() -> PostHandler {
        PostHandler::new(Arc::new(FakePosts::default()))
    }

    fn alice() -> Principal {
        Principal::new("alice")
    }

    async fn detail_post(handler: &PostHandler, id: PostId) -> Result<Post, DomainError> {
        match handler.detail(id).await? {
            View::Render {
                template: Template::PostDetail,
                context: ViewContext::Post(post),
            } => Ok(post),
            other => panic!("unexpected view: {other:?}"),
        }
    }

    async fn listed_ids(handler: &PostHandler) -> Vec<PostId> {
        match handler.list().await.unwrap() {
            View::Render {
                template: Template::PostList,
                context: ViewContext::Posts(posts),
            } => posts.iter().map(|p| p.id).collect(),
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_empty() {
        assert!(listed_ids(&handler()).await.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let handler = handler();
        for i in 0..5 {
            handler
                .create(
                    RequestMethod::Mutating,
                    Some(&alice()),
                    PostForm::new(format!("post {i}"), ""),
                )
                .await
                .unwrap();
        }

        assert_eq!(listed_ids(&handler).await, vec![5, 4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn test_create_form_has_no_side_effects() {
        let handler = handler();

        let view = handler
            .create(RequestMethod::Safe, None, PostForm::default())
            .await
            .unwrap();

        assert_eq!(view, View::render(Template::PostCreate, ViewContext::Empty));
        assert!(listed_ids(&handler).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_then_detail() {
        let handler = handler();

        let view = handler
            .create(
                RequestMethod::Mutating,
                Some(&alice()),
                PostForm::new("Hello", "World"),
            )
            .await
            .unwrap();
        assert_eq!(view, View::Redirect(Route::PostList));

        let post = detail_post(&handler, 1).await.unwrap();
        assert_eq!(post.id, 1);
        assert_eq!(post.title, "Hello");
        assert_eq!(post.text, "World");
        assert_eq!(post.author, "alice");
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let handler = handler();
        let form = PostForm {
            title: None,
            text: Some("World".into()),
        };

        let err = handler
            .create(RequestMethod::Mutating, Some(&alice()), form)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::MissingField("title")));
        assert!(listed_ids(&handler).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_principal() {
        let handler = handler();

        let err = handler
            .create(RequestMethod::Mutating, None, PostForm::new("Hello", "World"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Unauthorized));
    }

    #[tokio::test]
    async fn test_detail_missing_post() {
        let err = handler().detail(42).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 42, .. }));
    }

    #[tokio::test]
    async fn test_edit_keeps_id_and_author() {
        let handler = handler();
        handler
            .create(
                RequestMethod::Mutating,
                Some(&alice()),
                PostForm::new("Hello", "World"),
            )
            .await
            .unwrap();

        let view = handler
            .edit(1, RequestMethod::Mutating, PostForm::new("Hi", "There"))
            .await
            .unwrap();
        assert_eq!(view, View::Redirect(Route::PostDetail(1)));

        let post = detail_post(&handler, 1).await.unwrap();
        assert_eq!(post.id, 1);
        assert_eq!(post.title, "Hi");
        assert_eq!(post.text, "There");
        assert_eq!(post.author, "alice");
    }

    #[tokio::test]
    async fn test_edit_form_is_prefilled() {
        let handler = handler();
        handler
            .create(
                RequestMethod::Mutating,
                Some(&alice()),
                PostForm::new("Hello", "World"),
            )
            .await
            .unwrap();

        match handler
            .edit(1, RequestMethod::Safe, PostForm::default())
            .await
            .unwrap()
        {
            View::Render {
                template: Template::PostEdit,
                context: ViewContext::Post(post),
            } => {
                assert_eq!(post.title, "Hello");
                assert_eq!(post.text, "World");
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_edit_missing_post() {
        let err = handler()
            .edit(9, RequestMethod::Mutating, PostForm::new("Hi", "There"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 9, .. }));
    }

    #[tokio::test]
    async fn test_post_removed_before_write_is_not_found() {
        let posts = FakePosts {
            vanishing: true,
            ..FakePosts::default()
        };
        posts
            .create(NewPost::new(&alice(), "Hello".into(), "World".into()))
            .await
            .unwrap();
        let handler = PostHandler::new(Arc::new(posts));

        let err = handler
            .edit(1, RequestMethod::Mutating, PostForm::new("Hi", "There"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 1, .. }));

        let err = handler.delete(1, RequestMethod::Mutating).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 1, .. }));
    }

    #[tokio::test]
    async fn test_delete_then_detail_fails() {
        let handler = handler();
        handler
            .create(
                RequestMethod::Mutating,
                Some(&alice()),
                PostForm::new("Hello", "World"),
            )
            .await
            .unwrap();

        let view = handler.delete(1, RequestMethod::Mutating).await.unwrap();
        assert_eq!(view, View::Redirect(Route::PostList));

        assert!(listed_ids(&handler).await.is_empty());
        let err = detail_post(&handler, 1).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 1, .. }));
    }

    #[tokio::test]
    async fn test_safe_delete_keeps_post() {
        let handler = handler();
        handler
            .create(
                RequestMethod::Mutating,
                Some(&alice()),
                PostForm::new("Hello", "World"),
            )
            .await
            .unwrap();

        let view = handler.delete(1, RequestMethod::Safe).await.unwrap();

        assert_eq!(view, View::Unhandled);
        assert_eq!(listed_ids(&handler).await, vec![1]);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let handler = handler();
        for _ in 0..2 {
            handler
                .create(RequestMethod::Mutating, Some(&alice()), PostForm::new("", ""))
                .await
                .unwrap();
        }
        handler.delete(2, RequestMethod::Mutating).await.unwrap();
        handler
            .create(RequestMethod::Mutating, Some(&alice()), PostForm::new("", ""))
            .await
            .unwrap();

        assert_eq!(listed_ids(&handler).await, vec![3, 1]);
    }

    #[test]
    fn test_request_method_from_verb() {
        assert_eq!(RequestMethod::from_verb("GET"), RequestMethod::Safe);
        assert_eq!(RequestMethod::from_verb("head"), RequestMethod::Safe);
        assert_eq!(RequestMethod::from_verb("POST"), RequestMethod::Mutating);
        assert_eq!(RequestMethod::from_verb("DELETE"), RequestMethod::Mutating);
    }
}
