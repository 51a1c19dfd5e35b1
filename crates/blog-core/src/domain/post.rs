use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Principal;
use crate::error::DomainError;

/// Store-assigned post identifier. Increases with every insert and is never reused.
pub type PostId = i64;

/// Post entity - a blog article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    /// Username of the principal that created the post. Never changes.
    pub author: String,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Replace title and text, leaving identity and authorship untouched.
    pub fn revise(&mut self, title: String, text: String) {
        self.title = title;
        self.text = text;
        self.updated_at = Utc::now();
    }
}

/// A post that has not been persisted yet, so it has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub author: String,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    /// Create a new post authored by `author`.
    pub fn new(author: &Principal, title: String, text: String) -> Self {
        Self {
            author: author.username.clone(),
            title,
            text,
            created_at: Utc::now(),
        }
    }

    /// Attach the id handed out by the store.
    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            author: self.author,
            title: self.title,
            text: self.text,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Submitted create/edit form. Fields are optional so that a missing field
/// surfaces as `DomainError::MissingField` instead of a decoding failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    pub title: Option<String>,
    pub text: Option<String>,
}

impl PostForm {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            text: Some(text.into()),
        }
    }

    /// Take `(title, text)`, failing on the first absent field.
    /// Empty strings are accepted.
    pub fn require(self) -> Result<(String, String), DomainError> {
        let title = self.title.ok_or(DomainError::MissingField("title"))?;
        let text = self.text.ok_or(DomainError::MissingField("text"))?;
        Ok((title, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_takes_author_from_principal() {
        let alice = Principal::new("alice");
        let post = NewPost::new(&alice, "Hello".into(), "World".into()).into_post(7);

        assert_eq!(post.id, 7);
        assert_eq!(post.author, "alice");
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_revise_keeps_identity() {
        let alice = Principal::new("alice");
        let mut post = NewPost::new(&alice, "Hello".into(), "World".into()).into_post(1);
        let created_at = post.created_at;

        post.revise("Hi".into(), "There".into());

        assert_eq!(post.id, 1);
        assert_eq!(post.author, "alice");
        assert_eq!(post.title, "Hi");
        assert_eq!(post.text, "There");
        assert_eq!(post.created_at, created_at);
        assert!(post.updated_at >= created_at);
    }

    #[test]
    fn test_form_require_accepts_empty_strings() {
        let (title, text) = PostForm::new("", "").require().unwrap();
        assert!(title.is_empty());
        assert!(text.is_empty());
    }

    #[test]
    fn test_form_require_reports_missing_field() {
        let form = PostForm {
            title: Some("Hello".into()),
            text: None,
        };

        let err = form.require().unwrap_err();
        assert!(matches!(err, DomainError::MissingField("text")));
    }
}
