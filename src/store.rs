//! Content store boundary.
//!
//! The translator only ever talks to [`ArticleStore`]; the CMS-backed
//! implementation lives with the host application. [`MemoryStore`]
//! covers the CLI and tests.

use std::collections::HashMap;

use thiserror::Error;

use crate::article::{Article, ArticleId};

/// Metadata keys the workflow persists per article.
pub mod meta_keys {
    pub const TRANSLATION: &str = "translation";
    pub const TRANSLATED_TITLE: &str = "translated_title";
    pub const TRANSLATED_AT: &str = "translated_at";
    pub const STATUS: &str = "status";
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("article {0} not found")]
    NotFound(ArticleId),

    #[error("entry {0} is not a translatable post")]
    WrongKind(ArticleId),
}

/// What the workflow requires of the content store.
///
/// A missing or wrong-kind identifier is an error value, never a panic.
pub trait ArticleStore {
    fn article(&self, id: ArticleId) -> Result<Article, StoreError>;

    fn set_meta(&mut self, id: ArticleId, key: &str, value: &str);

    fn meta(&self, id: ArticleId, key: &str) -> Option<String>;

    fn delete_meta(&mut self, id: ArticleId, key: &str);
}

/// Content kinds a store entry can have. Only posts are translatable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Post,
    Page,
}

#[derive(Debug, Clone)]
struct Entry {
    article: Article,
    kind: ContentKind,
}

/// HashMap-backed store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<ArticleId, Entry>,
    meta: HashMap<(ArticleId, String), String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn insert_post(&mut self, id: ArticleId, title: &str, body_html: &str) {
        self.insert(id, title, body_html, ContentKind::Post);
    }

    pub fn insert_page(&mut self, id: ArticleId, title: &str, body_html: &str) {
        self.insert(id, title, body_html, ContentKind::Page);
    }

    fn insert(&mut self, id: ArticleId, title: &str, body_html: &str, kind: ContentKind) {
        self.entries.insert(
            id,
            Entry {
                article: Article {
                    id,
                    title: title.to_string(),
                    body_html: body_html.to_string(),
                },
                kind,
            },
        );
    }

    /// Remove an article and every piece of metadata attached to it.
    pub fn delete_article(&mut self, id: ArticleId) {
        self.entries.remove(&id);
        self.meta.retain(|(meta_id, _), _| *meta_id != id);
    }
}

impl ArticleStore for MemoryStore {
    fn article(&self, id: ArticleId) -> Result<Article, StoreError> {
        let entry = self.entries.get(&id).ok_or(StoreError::NotFound(id))?;

        if entry.kind != ContentKind::Post {
            return Err(StoreError::WrongKind(id));
        }

        Ok(entry.article.clone())
    }

    fn set_meta(&mut self, id: ArticleId, key: &str, value: &str) {
        self.meta.insert((id, key.to_string()), value.to_string());
    }

    fn meta(&self, id: ArticleId, key: &str) -> Option<String> {
        self.meta.get(&(id, key.to_string())).cloned()
    }

    fn delete_meta(&mut self, id: ArticleId, key: &str) {
        self.meta.remove(&(id, key.to_string()));
    }
}
