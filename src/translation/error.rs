//! Error taxonomy for the translation workflow.
//!
//! Raw provider detail stays inside [`TranslateError`] for logging;
//! anything shown to a person goes through [`TranslateError::user_message`],
//! which maps every failure to one fixed sentence.

use thiserror::Error;

use crate::article::ArticleStatus;
use crate::settings::SettingsError;
use crate::store::StoreError;
use crate::translation::provider::{ProviderError, ProviderErrorKind};

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("post not found")]
    PostNotFound,

    #[error("no stored translation")]
    NoTranslation,

    #[error("invalid post id")]
    InvalidId,

    #[error("post has no content")]
    EmptyContent,

    #[error("no API key configured")]
    CredentialMissing,

    #[error("provider request failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("AI response was empty or unparseable")]
    EmptyAiResponse,

    #[error("status cannot change from {from:?} to {to:?}")]
    InvalidTransition {
        from: ArticleStatus,
        to: ArticleStatus,
    },

    #[error("configuration error: {0}")]
    Config(#[from] SettingsError),
}

pub type TranslateResult<T> = Result<T, TranslateError>;

impl From<StoreError> for TranslateError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(_) => TranslateError::PostNotFound,
            StoreError::WrongKind(_) => TranslateError::InvalidId,
        }
    }
}

impl TranslateError {
    /// The one sentence a user gets to see for this failure.
    ///
    /// Provider messages never pass through here verbatim; they are
    /// logged where the error is handled and replaced by the fixed
    /// wording below.
    pub fn user_message(&self) -> &'static str {
        match self {
            TranslateError::PostNotFound => "Post not found.",
            TranslateError::NoTranslation => {
                "No translation available. Please translate the post first."
            }
            TranslateError::InvalidId => "Invalid post ID.",
            TranslateError::EmptyContent => "Post has no content.",
            TranslateError::CredentialMissing => {
                "No API key configured. Please add your Anthropic API key in Settings."
            }
            TranslateError::Provider(provider_error) => match provider_error.kind {
                ProviderErrorKind::Auth => {
                    "The AI provider rejected the API key. Please check your credentials."
                }
                ProviderErrorKind::Permission => {
                    "The API key does not have permission for this model."
                }
                ProviderErrorKind::RateLimit => {
                    "The AI provider is rate limiting requests. Please try again in a moment."
                }
                ProviderErrorKind::BadRequest => {
                    "The translation request was rejected as invalid."
                }
                ProviderErrorKind::NotFound => "The selected AI model is not available.",
                ProviderErrorKind::Conflict => {
                    "The AI provider reported a conflict. Please try again."
                }
                ProviderErrorKind::Unprocessable => {
                    "The AI provider could not process the request."
                }
                ProviderErrorKind::ServerError => {
                    "The AI provider is currently unavailable. Please try again later."
                }
                ProviderErrorKind::Timeout => {
                    "The translation request timed out. Please try again."
                }
                ProviderErrorKind::Connection => {
                    "Could not reach the AI provider. Please check your connection."
                }
                ProviderErrorKind::Unknown => {
                    "Translation failed due to an unexpected provider error."
                }
            },
            TranslateError::EmptyAiResponse => "AI returned an empty response.",
            TranslateError::InvalidTransition { .. } => {
                "Action not allowed in the current translation state."
            }
            TranslateError::Config(_) => {
                "The translation settings are invalid. Please review the configuration."
            }
        }
    }
}
