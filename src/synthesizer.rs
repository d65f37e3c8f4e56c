//! Answer synthesis: compose the grounded prompt, call the model, record the
//! turn.

use std::sync::Arc;

use tracing::{error, info};

use crate::document::SearchResult;
use crate::error::Result;
use crate::memory::{ConversationMemory, ConversationTurn};
use crate::model::ChatModel;
use crate::prompt;

/// A synthesized answer with the retrieval results it was grounded in.
#[derive(Debug, Clone)]
pub struct Answer {
    /// The model's answer text.
    pub answer: String,
    /// The retrieved chunks supplied as context, descending similarity.
    pub sources: Vec<SearchResult>,
}

/// Composes the grounding prompt and invokes a [`ChatModel`].
///
/// On success the (question, answer) turn is appended to the supplied
/// [`ConversationMemory`]; on failure the memory is left untouched, so a
/// failed exchange never pollutes later prompts.
pub struct AnswerSynthesizer {
    model: Arc<dyn ChatModel>,
}

impl AnswerSynthesizer {
    /// Create a synthesizer over the given model.
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Answer `question` from `retrieved` context and prior `history`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Model`](crate::error::ChatError::Model) (or
    /// whatever the backend surfaces) if the completion call fails. The
    /// memory is not modified in that case.
    pub async fn answer(
        &self,
        question: &str,
        retrieved: Vec<SearchResult>,
        history: &mut ConversationMemory,
    ) -> Result<Answer> {
        let messages = prompt::build_messages(&retrieved, history, question);

        let answer = self.model.complete(&messages).await.map_err(|e| {
            error!(error = %e, "answer synthesis failed");
            e
        })?;

        history.push(ConversationTurn {
            question: question.to_string(),
            answer: answer.clone(),
        });

        info!(source_count = retrieved.len(), history_len = history.len(), "synthesized answer");

        Ok(Answer { answer, sources: retrieved })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::ChatError;
    use crate::model::ChatMessage;

    struct CannedModel(String);

    #[async_trait]
    impl ChatModel for CannedModel {
        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
            Err(ChatError::Model {
                provider: "test".to_string(),
                message: "boom".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn success_appends_exactly_one_turn() {
        let synthesizer = AnswerSynthesizer::new(Arc::new(CannedModel("May 1st.".to_string())));
        let mut memory = ConversationMemory::new();

        let answer =
            synthesizer.answer("When is the deadline?", Vec::new(), &mut memory).await.unwrap();

        assert_eq!(answer.answer, "May 1st.");
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.turns()[0].question, "When is the deadline?");
        assert_eq!(memory.turns()[0].answer, "May 1st.");
    }

    #[tokio::test]
    async fn failure_leaves_memory_unmodified() {
        let synthesizer = AnswerSynthesizer::new(Arc::new(FailingModel));
        let mut memory = ConversationMemory::new();

        let result = synthesizer.answer("q?", Vec::new(), &mut memory).await;

        assert!(result.is_err());
        assert!(memory.is_empty());
    }
}
