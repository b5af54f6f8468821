//! Machine translation of articles through the Anthropic Messages API.
//!
//! [`translator::Translator`] drives the whole workflow; [`provider`]
//! holds the HTTP client behind the [`provider::TextGenerator`] trait,
//! [`prompt`] builds and parses the marker format, and [`models`]
//! caches the provider's model catalog.

pub mod error;
pub mod models;
pub mod prompt;
pub mod provider;
pub mod translator;

pub use error::{TranslateError, TranslateResult};
pub use models::{ModelCache, ModelCatalog};
pub use provider::{
    AnthropicClient, GenerationRequest, ModelInfo, ProviderError, ProviderErrorKind, TextGenerator,
};
pub use translator::{TranslationOutcome, Translator};
