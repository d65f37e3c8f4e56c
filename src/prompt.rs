//! The grounding prompt template.
//!
//! This is the one fixed, authored artifact of the pipeline: the persona, the
//! context-only restriction, and the refusal sentinel. Tests check the
//! sentinel verbatim; rewording it is a breaking change.

use crate::document::SearchResult;
use crate::memory::ConversationMemory;
use crate::model::ChatMessage;

/// The exact refusal string the model is instructed to emit when the supplied
/// context does not contain the answer.
pub const REFUSAL: &str = "I'm not sure based on the provided information.";

/// The fixed system prompt: persona, context-only policy, refusal
/// instruction, and a step-by-step reasoning request for complex questions.
pub fn system_prompt() -> String {
    format!(
        "You are an AI academic assistant. Your job is to help students by answering \
their questions based ONLY on the provided context documents. Do not use any outside \
knowledge.\n\
\n\
Instructions:\n\
- If the context contains the answer, provide a detailed academic-style explanation.\n\
- If the answer is not in the context, say \"{REFUSAL}\"\n\
- Be concise, clear, and do not fabricate facts.\n\
- Think step-by-step and explain your reasoning if helpful."
    )
}

/// Interpolate the retrieved context and the raw question into the final
/// user message.
pub fn user_prompt(context: &str, question: &str) -> String {
    format!("Context:\n{context}\n\nQuestion:\n{question}\n\nHelpful Answer:")
}

/// Assemble the full message list for one exchange: system prompt, prior
/// dialogue turns, then the grounded question.
///
/// The context is the concatenation of retrieved chunk texts (blank-line
/// separated, descending similarity order). An empty retrieval produces an
/// empty context block; the system prompt's refusal instruction then applies.
pub fn build_messages(
    retrieved: &[SearchResult],
    history: &ConversationMemory,
    question: &str,
) -> Vec<ChatMessage> {
    let context =
        retrieved.iter().map(|r| r.chunk.text.as_str()).collect::<Vec<_>>().join("\n\n");

    let mut messages = Vec::with_capacity(history.len() * 2 + 2);
    messages.push(ChatMessage::system(system_prompt()));
    messages.extend(history.to_messages());
    messages.push(ChatMessage::user(user_prompt(&context, question)));
    messages
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::document::Chunk;
    use crate::memory::ConversationTurn;
    use crate::model::Role;

    fn result(text: &str) -> SearchResult {
        SearchResult {
            chunk: Chunk {
                id: "c1".to_string(),
                text: text.to_string(),
                embedding: vec![1.0],
                metadata: HashMap::new(),
                document_id: "doc_1".to_string(),
            },
            score: 1.0,
        }
    }

    #[test]
    fn system_prompt_carries_verbatim_refusal_sentinel() {
        assert!(system_prompt().contains(REFUSAL));
    }

    #[test]
    fn empty_retrieval_still_requests_refusal() {
        let messages = build_messages(&[], &ConversationMemory::new(), "anything?");
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains(REFUSAL));
    }

    #[test]
    fn context_and_question_are_interpolated() {
        let retrieved = vec![result("The capstone deadline is May 1st.")];
        let messages =
            build_messages(&retrieved, &ConversationMemory::new(), "When is the deadline?");

        let last = messages.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert!(last.content.contains("The capstone deadline is May 1st."));
        assert!(last.content.contains("When is the deadline?"));
    }

    #[test]
    fn history_appears_as_structured_turns_between_system_and_question() {
        let mut history = ConversationMemory::new();
        history.push(ConversationTurn {
            question: "first q".to_string(),
            answer: "first a".to_string(),
        });

        let messages = build_messages(&[], &history, "second q?");
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "first q");
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].content, "first a");
        // History never leaks into the prompt body
        assert!(!messages[3].content.contains("first q"));
    }

    #[test]
    fn chunks_join_in_retrieval_order() {
        let retrieved = vec![result("alpha"), result("beta")];
        let messages = build_messages(&retrieved, &ConversationMemory::new(), "q");
        let body = &messages.last().unwrap().content;
        assert!(body.find("alpha").unwrap() < body.find("beta").unwrap());
    }
}
