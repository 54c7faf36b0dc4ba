//! Honeypot core - the pure pieces of the engagement engine.
//!
//! Every function here is a pure function of the transcript it is given:
//! - scam classification by priority-ordered keyword tables
//! - intelligence extraction (account numbers, payment IDs, links)
//! - persona and canned reply lookup

pub mod classifier;
pub mod extraction;
pub mod persona;

pub use classifier::{classify, KeywordRule, ScamClassifier, DEFAULT_RULES};
pub use extraction::extract;
pub use persona::{reply_for, PersonaReply, PERSONA_REPLIES};

pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
