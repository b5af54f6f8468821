//! Shared fixtures: a scripted stand-in for the AI provider plus
//! settings and response helpers.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use mediumpress::translation::{
    GenerationRequest, ModelInfo, ProviderError, ProviderErrorKind, TextGenerator,
};
use mediumpress::Settings;

pub const TEST_MODEL: &str = "claude-test-1";

pub fn test_settings() -> Settings {
    Settings {
        api_key: "test-key".to_string(),
        model: TEST_MODEL.to_string(),
        ..Settings::default()
    }
}

pub fn model(id: &str) -> ModelInfo {
    ModelInfo {
        id: id.to_string(),
        display_name: String::new(),
    }
}

pub fn marker_response(title: &str, html: &str) -> String {
    format!("TITLE: {title}\n\nCONTENT:\n{html}")
}

pub fn provider_error(kind: ProviderErrorKind) -> ProviderError {
    ProviderError {
        kind,
        message: format!("scripted {kind}"),
    }
}

/// Everything the scripted generator was asked to do, shared with the
/// test through an `Rc` so it stays readable after the generator moves
/// into the translator.
#[derive(Default)]
pub struct CallLog {
    pub requests: Vec<GenerationRequest>,
    pub listing_calls: usize,
}

/// A [`TextGenerator`] that replays scripted responses. Unscripted
/// calls fall back to a benign canned translation and a catalog that
/// contains [`TEST_MODEL`].
pub struct ScriptedGenerator {
    responses: RefCell<VecDeque<Result<String, ProviderError>>>,
    catalogs: RefCell<VecDeque<Result<Vec<ModelInfo>, ProviderError>>>,
    log: Rc<RefCell<CallLog>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        ScriptedGenerator {
            responses: RefCell::new(VecDeque::new()),
            catalogs: RefCell::new(VecDeque::new()),
            log: Rc::new(RefCell::new(CallLog::default())),
        }
    }

    /// Queue the next `generate` result.
    pub fn respond(self, response: Result<String, ProviderError>) -> Self {
        self.responses.borrow_mut().push_back(response);
        self
    }

    /// Queue the next `list_models` result.
    pub fn catalog(self, catalog: Result<Vec<ModelInfo>, ProviderError>) -> Self {
        self.catalogs.borrow_mut().push_back(catalog);
        self
    }

    pub fn log(&self) -> Rc<RefCell<CallLog>> {
        Rc::clone(&self.log)
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        self.log.borrow_mut().requests.push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(marker_response("Translated Title", "<p>Translated body.</p>")))
    }

    fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError> {
        self.log.borrow_mut().listing_calls += 1;
        self.catalogs
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![model(TEST_MODEL), model("claude-test-2")]))
    }
}
