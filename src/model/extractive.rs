//! Deterministic lead-sentence model.
//!
//! Keeps the opening sentences of the input up to the requested word budget. It needs no
//! runtime, which makes it useful for offline deployments and for exercising the pipeline.

use super::{ModelError, ModelRequest, SummarizationModel};
use async_trait::async_trait;

/// Summarizes by keeping the leading sentences that fit in `max_length` words.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtractiveModel;

impl ExtractiveModel {
    /// Construct the model.
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SummarizationModel for ExtractiveModel {
    async fn summarize(&self, request: ModelRequest) -> Result<String, ModelError> {
        Ok(lead_summary(&request.text, request.max_length))
    }

    fn name(&self) -> &str {
        "extractive"
    }
}

/// Keep whole leading sentences within `max_words`; truncate the first one if it alone overflows.
fn lead_summary(text: &str, max_words: usize) -> String {
    let mut kept: Vec<&str> = Vec::new();

    for sentence in sentences(text) {
        if kept.len() + sentence.len() > max_words {
            break;
        }
        kept.extend(sentence);
    }

    if kept.is_empty() {
        kept = text.split_whitespace().take(max_words).collect();
    }

    kept.join(" ")
}

fn sentences(text: &str) -> Vec<Vec<&str>> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();

    for word in text.split_whitespace() {
        current.push(word);
        if word.ends_with(['.', '!', '?']) {
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_leading_sentences_within_budget() {
        let model = ExtractiveModel::new();
        let summary = model
            .summarize(ModelRequest::new(
                "One two three. Four five six. Seven eight nine.",
                7,
                1,
            ))
            .await
            .expect("summary");
        assert_eq!(summary, "One two three. Four five six.");
    }

    #[test]
    fn truncates_oversized_first_sentence() {
        assert_eq!(lead_summary("a b c d e f", 3), "a b c");
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        assert_eq!(lead_summary("   ", 10), "");
    }
}
