//! Sentence-aligned chunking under a word budget.
//!
//! Sentences are approximated by splitting on the literal `". "` delimiter. This mis-segments
//! abbreviations, decimals followed by a space, and non-English punctuation; it is kept as-is so
//! that chunk boundaries stay stable across releases.
//!
//! Chunks are built greedily: a sentence joins the current chunk only while the combined word
//! count stays strictly below the budget. A sentence that does not fit starts the next chunk, so
//! no sentence is ever split and a single oversized sentence becomes a chunk on its own.

/// Delimiter used to approximate sentence boundaries.
pub const SENTENCE_DELIMITER: &str = ". ";

/// Count whitespace-delimited words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split text into sentence-like segments on [`SENTENCE_DELIMITER`].
///
/// The delimiter is consumed. Text without a delimiter yields a single segment.
pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(SENTENCE_DELIMITER)
}

/// Partition `text` into ordered, sentence-aligned chunks under `max_chunk_words`.
///
/// Every returned chunk is trimmed and non-empty. Each chunk holds fewer than `max_chunk_words`
/// words unless it consists of a single sentence that alone meets or exceeds the budget.
pub fn chunk_text(text: &str, max_chunk_words: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_words = 0usize;

    for sentence in split_sentences(text) {
        let sentence_words = word_count(sentence);
        if current_words + sentence_words < max_chunk_words {
            current.push(' ');
            current.push_str(sentence);
            current_words += sentence_words;
        } else {
            push_chunk(&mut chunks, &current);
            current = sentence.to_string();
            current_words = sentence_words;
        }
    }
    push_chunk(&mut chunks, &current);

    chunks
}

// An overshooting first sentence closes an empty chunk; those never reach the model.
fn push_chunk(chunks: &mut Vec<String>, chunk: &str) {
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
