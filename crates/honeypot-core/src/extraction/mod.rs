//! Intelligence extraction from raw conversation text.
//!
//! Three independent pattern scans run over the same text. Patterns are
//! deliberately loose: the payment ID scan also picks up ordinary
//! email-like tokens.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use honeypot_protocol::ExtractedIntelligence;
use regex::Regex;

/// 9-18 digit runs standing alone between word boundaries.
static BANK_ACCOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{9,18}\b").expect("bank account pattern is valid"));

/// `handle@provider` tokens with a letters-only provider.
static UPI_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[a-zA-Z0-9._-]+@[a-zA-Z]+\b").expect("upi id pattern is valid")
});

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("link pattern is valid"));

/// Extract every artifact from `text`, collapsing duplicates.
pub fn extract(text: &str) -> ExtractedIntelligence {
    let intelligence = ExtractedIntelligence {
        bank_accounts: find_all(&BANK_ACCOUNT_PATTERN, text),
        upi_ids: find_all(&UPI_ID_PATTERN, text),
        phishing_links: find_all(&LINK_PATTERN, text),
    };

    if !intelligence.is_empty() {
        tracing::trace!(
            bank_accounts = intelligence.bank_accounts.len(),
            upi_ids = intelligence.upi_ids.len(),
            phishing_links = intelligence.phishing_links.len(),
            "artifacts extracted"
        );
    }

    intelligence
}

fn find_all(pattern: &Regex, text: &str) -> BTreeSet<String> {
    pattern
        .find_iter(text)
        .map(|found| found.as_str().to_string())
        .collect()
}
