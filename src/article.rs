//! Articles, translation artifacts, and the status lifecycle.

use chrono::{SecondsFormat, Utc};

/// Identifier of an article in the content store.
pub type ArticleId = u64;

/// A content item as the store hands it out. The original title and
/// body are never mutated by this crate.
#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub body_html: String,
}

/// The persisted result of a successful translation or manual save.
///
/// `translated_html` is always sanitized before it gets here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationArtifact {
    pub translated_title: String,
    pub translated_html: String,
    pub translated_at: String,
}

impl TranslationArtifact {
    /// Build an artifact stamped with the current time (RFC 3339, UTC).
    pub fn new(translated_title: String, translated_html: String) -> Self {
        TranslationArtifact {
            translated_title,
            translated_html,
            translated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Where an article stands in the translate-review-copy workflow.
///
/// `Pending` is a deliberate on-disk marker: it is written before the
/// provider call goes out, so an interrupted run stays visible instead
/// of silently looking untranslated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleStatus {
    #[default]
    None,
    Pending,
    Translated,
    Copied,
}

impl ArticleStatus {
    /// The value persisted in article metadata. `None` is the absence
    /// of the meta entry, hence the empty string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::None => "",
            ArticleStatus::Pending => "pending",
            ArticleStatus::Translated => "translated",
            ArticleStatus::Copied => "copied",
        }
    }

    /// Inverse of [`as_str`](Self::as_str); unknown values read as `None`.
    pub fn parse(value: &str) -> ArticleStatus {
        match value {
            "pending" => ArticleStatus::Pending,
            "translated" => ArticleStatus::Translated,
            "copied" => ArticleStatus::Copied,
            _ => ArticleStatus::None,
        }
    }

    /// Human-readable label for list and status displays.
    pub fn label(&self) -> &'static str {
        match self {
            ArticleStatus::None => "Not translated",
            ArticleStatus::Pending => "Pending",
            ArticleStatus::Translated => "Translated",
            ArticleStatus::Copied => "Copied",
        }
    }

    /// Whether the workflow permits moving from `self` to `next`.
    ///
    /// Pending re-entry from `Pending` is allowed: duplicate submissions
    /// are a documented race the core does not lock against.
    pub fn can_transition_to(self, next: ArticleStatus) -> bool {
        matches!(
            (self, next),
            (ArticleStatus::None, ArticleStatus::Pending)
                | (ArticleStatus::Pending, ArticleStatus::Pending)
                | (ArticleStatus::Pending, ArticleStatus::Translated)
                | (ArticleStatus::Pending, ArticleStatus::None)
                | (ArticleStatus::Translated, ArticleStatus::Pending)
                | (ArticleStatus::Translated, ArticleStatus::Copied)
                | (ArticleStatus::Copied, ArticleStatus::Pending)
                | (ArticleStatus::Copied, ArticleStatus::Copied)
        )
    }
}
