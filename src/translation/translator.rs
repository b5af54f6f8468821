//! The translation workflow: load an article, prepare its HTML, call
//! the provider, persist the result, and keep the status meta honest.
//!
//! Status handling is deliberate: `Pending` is written before the
//! provider call is dispatched, and every failure after that point
//! reverts it to untranslated. Nothing is ever left at `Pending` by a
//! completed call.

use crate::article::{Article, ArticleId, ArticleStatus, TranslationArtifact};
use crate::html::{normalize, sanitize, strip_all_tags};
use crate::markdown::to_markdown;
use crate::settings::constants::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::settings::Settings;
use crate::store::{meta_keys, ArticleStore};
use crate::translation::error::{TranslateError, TranslateResult};
use crate::translation::models::{ModelCache, ModelCatalog};
use crate::translation::prompt::{build_system_prompt, build_user_prompt, parse_response};
use crate::translation::provider::{GenerationRequest, ProviderErrorKind, TextGenerator};

/// What a successful translation produced, including the model that
/// actually ran (which may differ from the configured one after a
/// catalog fallback).
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    pub artifact: TranslationArtifact,
    pub model: String,
}

pub struct Translator<S, P> {
    store: S,
    provider: P,
    settings: Settings,
    model_cache: ModelCache,
}

impl<S: ArticleStore, P: TextGenerator> Translator<S, P> {
    pub fn new(store: S, provider: P, settings: Settings) -> Self {
        Translator::with_model_cache(store, provider, settings, ModelCache::new())
    }

    /// Constructor taking an explicit cache, for callers that need a
    /// different TTL.
    pub fn with_model_cache(
        store: S,
        provider: P,
        settings: Settings,
        model_cache: ModelCache,
    ) -> Self {
        Translator {
            store,
            provider,
            settings,
            model_cache,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Translate one article and persist the result.
    ///
    /// Preconditions (existence, non-empty content, credential) are
    /// checked before any state changes. `Pending` is set before the
    /// provider call; failure afterwards reverts it.
    pub fn translate(&mut self, id: ArticleId) -> TranslateResult<TranslationOutcome> {
        let article = self.store.article(id)?;

        let prepared = normalize(&article.body_html);
        if strip_all_tags(&prepared).trim().is_empty() {
            return Err(TranslateError::EmptyContent);
        }

        if !self.settings.has_api_key() {
            return Err(TranslateError::CredentialMissing);
        }

        self.set_status(id, ArticleStatus::Pending)?;

        match self.run_generation(&article, &prepared) {
            Ok(outcome) => {
                tracing::info!(article = id, model = %outcome.model, "translation stored");
                Ok(outcome)
            }
            Err(error) => {
                tracing::warn!(article = id, error = %error, "translation failed, reverting status");
                self.clear_status(id);
                Err(error)
            }
        }
    }

    /// Persist a manually edited translation. The HTML is re-sanitized
    /// and the title tag-stripped no matter what the caller sends; the
    /// status is left untouched.
    pub fn save_edited(&mut self, id: ArticleId, title: &str, html: &str) -> TranslateResult<()> {
        self.store.article(id)?;

        let clean_title = strip_all_tags(title).trim().to_string();
        let clean_html = sanitize(html);
        let artifact = TranslationArtifact::new(clean_title, clean_html);
        self.persist_artifact(id, &artifact);
        Ok(())
    }

    /// Render the stored translation as Markdown with the title as a
    /// top-level heading. Read-only.
    pub fn copy_markdown(&self, id: ArticleId) -> TranslateResult<String> {
        let artifact = self.artifact(id)?;
        let body = to_markdown(&artifact.translated_html);
        Ok(format!("# {}\n\n{}", artifact.translated_title, body))
    }

    /// Confirm the translation was copied out. Only valid once a
    /// translation exists; re-confirming is a no-op.
    pub fn mark_copied(&mut self, id: ArticleId) -> TranslateResult<()> {
        self.store.article(id)?;
        self.set_status(id, ArticleStatus::Copied)
    }

    /// The stored translation for an article.
    pub fn artifact(&self, id: ArticleId) -> TranslateResult<TranslationArtifact> {
        self.store.article(id)?;

        let translated_html = self
            .store
            .meta(id, meta_keys::TRANSLATION)
            .ok_or(TranslateError::NoTranslation)?;
        let translated_title = self
            .store
            .meta(id, meta_keys::TRANSLATED_TITLE)
            .unwrap_or_default();
        let translated_at = self
            .store
            .meta(id, meta_keys::TRANSLATED_AT)
            .unwrap_or_default();

        Ok(TranslationArtifact {
            translated_title,
            translated_html,
            translated_at,
        })
    }

    pub fn status(&self, id: ArticleId) -> TranslateResult<ArticleStatus> {
        self.store.article(id)?;
        Ok(self.status_of(id))
    }

    /// Live credential probe: lists models with the configured key and
    /// reports how many are visible. Does not touch the cache.
    pub fn validate_key(&self) -> TranslateResult<usize> {
        if !self.settings.has_api_key() {
            return Err(TranslateError::CredentialMissing);
        }
        let catalog = self.provider.list_models()?;
        Ok(catalog.len())
    }

    /// Cached read of the model catalog, fetching on miss or expiry.
    pub fn models(&mut self) -> TranslateResult<ModelCatalog> {
        if let Some(catalog) = self.model_cache.get() {
            return Ok(catalog.clone());
        }
        self.refresh_models()
    }

    /// Drop the cached catalog and fetch a fresh one.
    pub fn refresh_models(&mut self) -> TranslateResult<ModelCatalog> {
        self.model_cache.invalidate();
        let catalog = self.provider.list_models()?;
        self.model_cache.put(catalog.clone());
        Ok(catalog)
    }

    fn run_generation(
        &mut self,
        article: &Article,
        prepared_html: &str,
    ) -> TranslateResult<TranslationOutcome> {
        let model = self.resolve_model();
        let system = build_system_prompt(&self.settings.system_prompt);
        let user_content = build_user_prompt(&article.title, prepared_html);

        let raw = self.generate_with_retry(&model, system, user_content)?;

        let parsed = parse_response(&raw);
        let translated_title = strip_all_tags(&parsed.title).trim().to_string();
        let translated_html = sanitize(&parsed.content);
        if translated_title.is_empty() || strip_all_tags(&translated_html).trim().is_empty() {
            return Err(TranslateError::EmptyAiResponse);
        }

        let artifact = TranslationArtifact::new(translated_title, translated_html);
        self.persist_artifact(article.id, &artifact);
        self.set_status(article.id, ArticleStatus::Translated)?;

        Ok(TranslationOutcome { artifact, model })
    }

    fn generate_with_retry(
        &self,
        model: &str,
        system: String,
        user_content: String,
    ) -> TranslateResult<String> {
        let request = GenerationRequest {
            model: model.to_string(),
            system,
            user_content,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        match self.provider.generate(&request) {
            Ok(text) => Ok(text),
            Err(error) if error.kind == ProviderErrorKind::BadRequest => {
                tracing::warn!(
                    error = %error,
                    "generation rejected, retrying once with default parameters"
                );
                let retry = GenerationRequest {
                    max_tokens: DEFAULT_MAX_TOKENS,
                    temperature: DEFAULT_TEMPERATURE,
                    ..request
                };
                Ok(self.provider.generate(&retry)?)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Pick the model to call: the configured id when the catalog knows
    /// it, otherwise the first cataloged model (persisted back into the
    /// settings). When no catalog can be fetched the configured id is
    /// used as-is and the generation call surfaces any real problem.
    fn resolve_model(&mut self) -> String {
        let cached_hit = self
            .model_cache
            .get()
            .map(|catalog| catalog.iter().any(|model| model.id == self.settings.model));

        match cached_hit {
            Some(true) => self.settings.model.clone(),
            Some(false) => {
                self.model_cache.invalidate();
                self.resolve_from_fresh_catalog()
            }
            None => self.resolve_from_fresh_catalog(),
        }
    }

    fn resolve_from_fresh_catalog(&mut self) -> String {
        let catalog = match self.provider.list_models() {
            Ok(catalog) => catalog,
            Err(error) => {
                tracing::warn!(error = %error, "model listing failed, keeping configured model");
                return self.settings.model.clone();
            }
        };
        self.model_cache.put(catalog.clone());

        if catalog.iter().any(|model| model.id == self.settings.model) {
            return self.settings.model.clone();
        }

        match catalog.first() {
            Some(first) => {
                tracing::info!(
                    configured = %self.settings.model,
                    fallback = %first.id,
                    "configured model not in catalog, falling back"
                );
                self.settings.model = first.id.clone();
                self.settings.model.clone()
            }
            None => self.settings.model.clone(),
        }
    }

    fn persist_artifact(&mut self, id: ArticleId, artifact: &TranslationArtifact) {
        self.store
            .set_meta(id, meta_keys::TRANSLATION, &artifact.translated_html);
        self.store
            .set_meta(id, meta_keys::TRANSLATED_TITLE, &artifact.translated_title);
        self.store
            .set_meta(id, meta_keys::TRANSLATED_AT, &artifact.translated_at);
    }

    fn status_of(&self, id: ArticleId) -> ArticleStatus {
        self.store
            .meta(id, meta_keys::STATUS)
            .map(|raw| ArticleStatus::parse(&raw))
            .unwrap_or_default()
    }

    fn set_status(&mut self, id: ArticleId, next: ArticleStatus) -> TranslateResult<()> {
        let current = self.status_of(id);
        if !current.can_transition_to(next) {
            return Err(TranslateError::InvalidTransition {
                from: current,
                to: next,
            });
        }
        if next == ArticleStatus::None {
            self.store.delete_meta(id, meta_keys::STATUS);
        } else {
            self.store.set_meta(id, meta_keys::STATUS, next.as_str());
        }
        Ok(())
    }

    fn clear_status(&mut self, id: ArticleId) {
        self.store.delete_meta(id, meta_keys::STATUS);
    }
}
