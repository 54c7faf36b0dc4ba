//! Honeypot protocol types and validation logic.
//!
//! This crate implements:
//! - scam categories and the victim personas bound to them
//! - the extracted intelligence envelope
//! - the engagement request/response objects exchanged with the gateway

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Static availability message served by `GET /honeypot`.
pub const SERVICE_STATUS_MESSAGE: &str =
    "Honeypot API is live. Use POST /honeypot to send messages.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScamCategory {
    BankFraud,
    JobScam,
    CryptoScam,
    Unknown,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown scam category: {0}")]
pub struct CategoryParseError(pub String);

impl ScamCategory {
    /// Every category, in classification priority order.
    pub const ALL: [ScamCategory; 4] = [
        ScamCategory::BankFraud,
        ScamCategory::JobScam,
        ScamCategory::CryptoScam,
        ScamCategory::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScamCategory::BankFraud => "BANK_FRAUD",
            ScamCategory::JobScam => "JOB_SCAM",
            ScamCategory::CryptoScam => "CRYPTO_SCAM",
            ScamCategory::Unknown => "UNKNOWN",
        }
    }

    /// True for every category other than `Unknown`.
    pub fn is_scam(&self) -> bool {
        !matches!(self, ScamCategory::Unknown)
    }
}

impl std::fmt::Display for ScamCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ScamCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Fictitious victim identity played back to the scammer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    ConfusedSalariedUser,
    DesperateFinalYearStudent,
    CuriousTechNewbie,
    NormalUser,
}

impl Persona {
    pub fn for_category(category: ScamCategory) -> Self {
        match category {
            ScamCategory::BankFraud => Persona::ConfusedSalariedUser,
            ScamCategory::JobScam => Persona::DesperateFinalYearStudent,
            ScamCategory::CryptoScam => Persona::CuriousTechNewbie,
            ScamCategory::Unknown => Persona::NormalUser,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::ConfusedSalariedUser => "confused_salaried_user",
            Persona::DesperateFinalYearStudent => "desperate_final_year_student",
            Persona::CuriousTechNewbie => "curious_tech_newbie",
            Persona::NormalUser => "normal_user",
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Artifacts pulled out of a transcript. Each field is a set; an absent
/// artifact kind is an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedIntelligence {
    pub bank_accounts: BTreeSet<String>,
    pub upi_ids: BTreeSet<String>,
    pub phishing_links: BTreeSet<String>,
}

impl ExtractedIntelligence {
    pub fn is_empty(&self) -> bool {
        self.artifact_count() == 0
    }

    pub fn artifact_count(&self) -> usize {
        self.bank_accounts.len() + self.upi_ids.len() + self.phishing_links.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementStatus {
    Active,
    Monitoring,
}

impl EngagementStatus {
    pub fn for_category(category: ScamCategory) -> Self {
        if category.is_scam() {
            EngagementStatus::Active
        } else {
            EngagementStatus::Monitoring
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementStatus::Active => "active",
            EngagementStatus::Monitoring => "monitoring",
        }
    }
}

impl std::fmt::Display for EngagementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived view of a conversation's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementState {
    pub turns: usize,
    pub status: EngagementStatus,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
}

/// Inbound scammer message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementRequest {
    pub conversation_id: String,
    pub message: String,
}

impl EngagementRequest {
    pub fn new(conversation_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            message: message.into(),
        }
    }

    /// Both fields must be non-empty. Whitespace is content: a message of
    /// spaces is a valid, if uninformative, turn.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.conversation_id.is_empty() {
            return Err(ProtocolError::EmptyField("conversation_id"));
        }
        if self.message.is_empty() {
            return Err(ProtocolError::EmptyField("message"));
        }
        Ok(())
    }
}

/// Result of one engagement turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementResponse {
    pub conversation_id: String,
    pub scam_detected: bool,
    pub scam_type: ScamCategory,
    pub persona: Persona,
    pub engagement: EngagementState,
    pub extracted_intelligence: ExtractedIntelligence,
    pub reply_to_scammer: String,
}

/// Read view of a tracked conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTranscript {
    pub conversation_id: String,
    pub turns: usize,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
}

impl Default for ServiceStatus {
    fn default() -> Self {
        Self {
            status: SERVICE_STATUS_MESSAGE.to_string(),
        }
    }
}
