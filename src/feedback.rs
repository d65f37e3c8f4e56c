//! Feedback capture: append-only, human-readable vote records.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::error::{ChatError, Result};

/// A thumbs-up or thumbs-down vote on one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    /// The answer was helpful.
    Up,
    /// The answer was not helpful.
    Down,
}

impl Vote {
    fn as_str(self) -> &'static str {
        match self {
            Vote::Up => "up",
            Vote::Down => "down",
        }
    }
}

/// Appends one human-readable record per vote to a log file.
///
/// Records are never overwritten or deleted; duplicate votes simply append
/// duplicate records. The file is write-only from this system's point of
/// view — analysis happens externally.
pub struct FeedbackRecorder {
    path: PathBuf,
}

impl FeedbackRecorder {
    /// Create a recorder appending to the given file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Append one (question, answer, vote) record.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Feedback`] if the file cannot be opened or
    /// written. Callers on the chat path should log and continue rather than
    /// fail the turn.
    pub async fn record(&self, question: &str, answer: &str, vote: Vote) -> Result<()> {
        let entry = format!(
            "QUESTION: {question}\nANSWER: {answer}\nFEEDBACK: {vote}\n{rule}\n",
            vote = vote.as_str(),
            rule = "-".repeat(40),
        );

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                ChatError::Feedback(format!("failed to open '{}': {e}", self.path.display()))
            })?;

        file.write_all(entry.as_bytes()).await.map_err(|e| {
            ChatError::Feedback(format!("failed to write '{}': {e}", self.path.display()))
        })?;

        info!(vote = vote.as_str(), "recorded feedback");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn record_appends_one_readable_block() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback_log.txt");
        let recorder = FeedbackRecorder::new(&path);

        recorder.record("When is the deadline?", "May 1st.", Vote::Down).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("QUESTION: When is the deadline?"));
        assert!(contents.contains("ANSWER: May 1st."));
        assert!(contents.contains("FEEDBACK: down"));
        assert_eq!(contents.matches("QUESTION:").count(), 1);
    }

    #[tokio::test]
    async fn duplicate_votes_append_duplicate_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback_log.txt");
        let recorder = FeedbackRecorder::new(&path);

        recorder.record("q", "a", Vote::Up).await.unwrap();
        recorder.record("q", "a", Vote::Up).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("FEEDBACK: up").count(), 2);
    }

    #[tokio::test]
    async fn unwritable_path_surfaces_feedback_error() {
        let recorder = FeedbackRecorder::new("/nonexistent-dir/feedback_log.txt");
        let err = recorder.record("q", "a", Vote::Down).await;
        assert!(matches!(err, Err(ChatError::Feedback(_))));
    }
}
