//! Engagement engine
//!
//! Each inbound message runs the same pipeline: append to the conversation,
//! join the full history into one transcript, then classify, extract and
//! pick a persona from that transcript. Classification and extraction are
//! recomputed from the whole transcript on every turn, so a category can
//! change as new text arrives and there is no stickiness.

use std::sync::Arc;

use honeypot_core::{extract, reply_for, ScamClassifier};
use honeypot_protocol::{
    ConversationTranscript, EngagementResponse, EngagementState, EngagementStatus,
};

use crate::error::ContextResult;
use crate::store::ConversationStore;

/// Composes the store, classifier, extractor and persona table.
pub struct EngagementEngine {
    store: Arc<dyn ConversationStore>,
    classifier: ScamClassifier,
}

impl EngagementEngine {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self::with_classifier(store, ScamClassifier::default())
    }

    pub fn with_classifier(store: Arc<dyn ConversationStore>, classifier: ScamClassifier) -> Self {
        Self { store, classifier }
    }

    pub fn store(&self) -> &Arc<dyn ConversationStore> {
        &self.store
    }

    /// Record `message` and build the response for this turn.
    pub async fn handle(
        &self,
        conversation_id: &str,
        message: String,
    ) -> ContextResult<EngagementResponse> {
        let conversation = self.store.append(conversation_id, message).await?;
        let transcript = conversation.transcript();

        let scam_type = self.classifier.classify(&transcript);
        let extracted_intelligence = extract(&transcript);
        let persona = reply_for(scam_type);
        let engagement = EngagementState {
            turns: conversation.turns(),
            status: EngagementStatus::for_category(scam_type),
        };

        tracing::debug!(
            conversation_id,
            turns = engagement.turns,
            scam_type = %scam_type,
            keywords = ?self.classifier.matched_keywords(&transcript),
            artifacts = extracted_intelligence.artifact_count(),
            "engagement turn handled"
        );

        Ok(EngagementResponse {
            conversation_id: conversation_id.to_string(),
            scam_detected: scam_type.is_scam(),
            scam_type,
            persona: persona.persona,
            engagement,
            extracted_intelligence,
            reply_to_scammer: persona.reply.to_string(),
        })
    }

    /// Read view of a conversation's history.
    pub async fn transcript(&self, conversation_id: &str) -> ContextResult<ConversationTranscript> {
        let conversation = self.store.get(conversation_id).await?;
        Ok(conversation.to_transcript())
    }
}
