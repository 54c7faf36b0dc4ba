//! Persona replies played back to the scammer.

use honeypot_protocol::{Persona, ScamCategory};

/// A persona together with its fixed in-character reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonaReply {
    pub category: ScamCategory,
    pub persona: Persona,
    pub reply: &'static str,
}

/// One row per category, in `ScamCategory::ALL` order.
pub const PERSONA_REPLIES: [PersonaReply; 4] = [
    PersonaReply {
        category: ScamCategory::BankFraud,
        persona: Persona::ConfusedSalariedUser,
        reply: "Sir, I don’t understand these bank things. My salary just came. Will money go away?",
    },
    PersonaReply {
        category: ScamCategory::JobScam,
        persona: Persona::DesperateFinalYearStudent,
        reply: "Please help me. I really need this job. What documents should I send first?",
    },
    PersonaReply {
        category: ScamCategory::CryptoScam,
        persona: Persona::CuriousTechNewbie,
        reply: "I am new to crypto. Is this safe? My friend lost money before.",
    },
    PersonaReply {
        category: ScamCategory::Unknown,
        persona: Persona::NormalUser,
        reply: "Okay",
    },
];

/// Look up the persona and reply for a category.
pub const fn reply_for(category: ScamCategory) -> PersonaReply {
    let row = match category {
        ScamCategory::BankFraud => 0,
        ScamCategory::JobScam => 1,
        ScamCategory::CryptoScam => 2,
        ScamCategory::Unknown => 3,
    };
    PERSONA_REPLIES[row]
}
