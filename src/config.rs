//! Configuration for the chat pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};

/// Configuration parameters for the chat pipeline and session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of top results to return from vector search.
    pub top_k: usize,
    /// Whether the moderation gate allows input when the classification
    /// service is unreachable.
    ///
    /// Defaults to `true` (fail-open): availability is preferred over safety
    /// when the service errors. Set to `false` for fail-closed behavior. This
    /// is a deliberate, documented tradeoff; changing the default would change
    /// observable behavior for existing deployments.
    pub fail_open_moderation: bool,
    /// Maximum number of conversation turns retained in memory.
    ///
    /// `None` (the default) keeps the full history, which grows without bound
    /// within a session and will eventually exceed model context limits. Set
    /// a window to evict the oldest turns instead.
    pub history_window: Option<usize>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 100,
            top_k: 4,
            fail_open_moderation: true,
            history_window: None,
        }
    }
}

impl ChatConfig {
    /// Create a new builder for constructing a [`ChatConfig`].
    pub fn builder() -> ChatConfigBuilder {
        ChatConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`ChatConfig`].
#[derive(Debug, Clone, Default)]
pub struct ChatConfigBuilder {
    config: ChatConfig,
}

impl ChatConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of top results to return from vector search.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set whether the moderation gate fails open when the service errors.
    pub fn fail_open_moderation(mut self, fail_open: bool) -> Self {
        self.config.fail_open_moderation = fail_open;
        self
    }

    /// Set a sliding window limit on retained conversation turns.
    pub fn history_window(mut self, turns: usize) -> Self {
        self.config.history_window = Some(turns);
        self
    }

    /// Build the [`ChatConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] if:
    /// - `chunk_overlap >= chunk_size` (splitting would not terminate)
    /// - `top_k == 0`
    /// - `history_window == Some(0)`
    pub fn build(self) -> Result<ChatConfig> {
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(ChatError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.top_k == 0 {
            return Err(ChatError::Config("top_k must be greater than zero".to_string()));
        }
        if self.config.history_window == Some(0) {
            return Err(ChatError::Config(
                "history_window must be greater than zero when set".to_string(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_policy() {
        let config = ChatConfig::default();
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.chunk_overlap, 100);
        assert_eq!(config.top_k, 4);
        assert!(config.fail_open_moderation);
        assert_eq!(config.history_window, None);
    }

    #[test]
    fn rejects_overlap_not_less_than_chunk_size() {
        let err = ChatConfig::builder().chunk_size(100).chunk_overlap(100).build();
        assert!(matches!(err, Err(ChatError::Config(_))));
    }

    #[test]
    fn rejects_zero_top_k() {
        let err = ChatConfig::builder().top_k(0).build();
        assert!(matches!(err, Err(ChatError::Config(_))));
    }

    #[test]
    fn rejects_zero_history_window() {
        let err = ChatConfig::builder().history_window(0).build();
        assert!(matches!(err, Err(ChatError::Config(_))));
    }
}
