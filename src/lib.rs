//! Move WordPress articles to Medium: prepare the HTML, translate it
//! from German to English with Claude, and hand over Markdown ready to
//! paste.
//!
//! The pipeline runs in three stages. [`html::normalize`] rewrites
//! block-editor markup into the small HTML subset Medium accepts and
//! [`html::sanitize`] enforces that subset; [`translation::Translator`]
//! sends the prepared HTML through the Anthropic Messages API and
//! persists the result next to the article; [`markdown::to_markdown`]
//! renders the stored translation for Medium's editor.
//!
//! Articles and their translation metadata live behind the
//! [`store::ArticleStore`] trait. [`store::MemoryStore`] is the bundled
//! implementation; anything that can look up an article by id and hold
//! a few string fields per article can take its place.

pub mod article;
pub mod html;
pub mod markdown;
pub mod settings;
pub mod store;
pub mod translation;

pub use article::{Article, ArticleId, ArticleStatus, TranslationArtifact};
pub use settings::Settings;
pub use store::{ArticleStore, MemoryStore, StoreError};
pub use translation::{
    AnthropicClient, TranslateError, TranslateResult, TranslationOutcome, Translator,
};
