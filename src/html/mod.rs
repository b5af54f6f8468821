//! HTML preparation: DOM plumbing, the Medium tag whitelist, and the
//! block-markup normalizer that feeds it.

pub mod dom;
pub mod normalizer;
pub mod sanitizer;

pub use normalizer::normalize;
pub use sanitizer::{sanitize, strip_all_tags, MEDIUM_TAGS};
