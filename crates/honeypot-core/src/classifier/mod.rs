//! Keyword-based scam classification.
//!
//! Classification is a case-insensitive substring scan of the full
//! transcript against priority-ordered keyword tables. The first table with
//! any hit wins; no table hit yields [`ScamCategory::Unknown`]. Nothing is
//! cached between calls, so a transcript is always classified from scratch.

use honeypot_protocol::ScamCategory;

/// One row of the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub category: ScamCategory,
    /// Lowercase keywords; matched as substrings, not whole words.
    pub keywords: &'static [&'static str],
}

/// Built-in table, highest priority first.
pub const DEFAULT_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: ScamCategory::BankFraud,
        keywords: &["bank", "account", "upi", "otp", "verify"],
    },
    KeywordRule {
        category: ScamCategory::JobScam,
        keywords: &["job", "hr", "interview", "salary", "offer"],
    },
    KeywordRule {
        category: ScamCategory::CryptoScam,
        keywords: &["crypto", "bitcoin", "investment", "trading"],
    },
];

/// Scam classifier over an immutable, priority-ordered rule table.
#[derive(Debug, Clone)]
pub struct ScamClassifier {
    rules: &'static [KeywordRule],
}

impl Default for ScamClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_RULES)
    }
}

impl ScamClassifier {
    pub fn new(rules: &'static [KeywordRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [KeywordRule] {
        self.rules
    }

    /// Classify a transcript.
    pub fn classify(&self, text: &str) -> ScamCategory {
        let lowered = text.to_lowercase();
        self.winning_rule(&lowered)
            .map_or(ScamCategory::Unknown, |rule| rule.category)
    }

    /// Keywords of the winning rule that occur in `text`. Empty when the
    /// transcript classifies as unknown.
    pub fn matched_keywords(&self, text: &str) -> Vec<&'static str> {
        let lowered = text.to_lowercase();
        self.winning_rule(&lowered)
            .map(|rule| {
                rule.keywords
                    .iter()
                    .copied()
                    .filter(|keyword| lowered.contains(keyword))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn winning_rule(&self, lowered: &str) -> Option<&'static KeywordRule> {
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| lowered.contains(keyword)))
    }
}

/// Classify with the built-in table.
pub fn classify(text: &str) -> ScamCategory {
    ScamClassifier::default().classify(text)
}
