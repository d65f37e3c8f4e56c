//! Conversation memory: an ordered, append-only log of dialogue turns.

use serde::{Deserialize, Serialize};

use crate::model::ChatMessage;

/// One completed (question, answer) exchange. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// The user's question.
    pub question: String,
    /// The assistant's answer.
    pub answer: String,
}

/// An ordered sequence of [`ConversationTurn`]s for one session.
///
/// Insertion order is significant: turns are replayed in order as structured
/// dialogue messages when composing the next prompt. By default the memory
/// grows without bound for the lifetime of the session; construct with
/// [`with_window`](ConversationMemory::with_window) to keep only the most
/// recent turns and stay inside model context limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationMemory {
    turns: Vec<ConversationTurn>,
    window: Option<usize>,
}

impl ConversationMemory {
    /// Create an unbounded memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory that retains at most `window` recent turns.
    ///
    /// `window` must be greater than zero;
    /// [`ChatConfig`](crate::config::ChatConfig) validation enforces this for
    /// configured sessions.
    pub fn with_window(window: usize) -> Self {
        Self { turns: Vec::new(), window: Some(window) }
    }

    /// Append a completed turn, evicting the oldest turn if a window is set.
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
        if let Some(window) = self.window {
            while self.turns.len() > window {
                self.turns.remove(0);
            }
        }
    }

    /// The retained turns, oldest first.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Number of retained turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turns are retained.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Render the history as alternating user/assistant messages.
    ///
    /// Prior turns are supplied to the model as structured dialogue turns,
    /// not concatenated into the prompt body.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.turns.len() * 2);
        for turn in &self.turns {
            messages.push(ChatMessage::user(&turn.question));
            messages.push(ChatMessage::assistant(&turn.answer));
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn turn(q: &str, a: &str) -> ConversationTurn {
        ConversationTurn { question: q.to_string(), answer: a.to_string() }
    }

    #[test]
    fn unbounded_memory_keeps_everything_in_order() {
        let mut memory = ConversationMemory::new();
        for i in 0..10 {
            memory.push(turn(&format!("q{i}"), &format!("a{i}")));
        }
        assert_eq!(memory.len(), 10);
        assert_eq!(memory.turns()[0].question, "q0");
        assert_eq!(memory.turns()[9].answer, "a9");
    }

    #[test]
    fn window_evicts_oldest_turns() {
        let mut memory = ConversationMemory::with_window(2);
        memory.push(turn("q0", "a0"));
        memory.push(turn("q1", "a1"));
        memory.push(turn("q2", "a2"));

        assert_eq!(memory.len(), 2);
        assert_eq!(memory.turns()[0].question, "q1");
        assert_eq!(memory.turns()[1].question, "q2");
    }

    #[test]
    fn messages_alternate_user_and_assistant() {
        let mut memory = ConversationMemory::new();
        memory.push(turn("what is RAG?", "retrieval-augmented generation"));

        let messages = memory.to_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "what is RAG?");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "retrieval-augmented generation");
    }
}
