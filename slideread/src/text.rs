//! Text chunking for speech synthesis.

/// Input length limit of the synthesis backend, in characters.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 4096;

/// A chunk of text ready for synthesis, tagged with its ordinal position.
#[derive(Debug, Clone)]
pub struct TextChunk {
    /// Position of this chunk within the document
    pub index: usize,
    /// The exact payload sent to the synthesis backend
    pub text: String,
}

/// Split text into whitespace-delimited words and pack them into chunks.
///
/// Each word costs its length plus one separator; when adding a word would
/// push the running length past `max_chars`, the current chunk is closed
/// (words joined by single spaces) and a new one starts with that word.
/// Words are never split: a single word longer than `max_chars` is emitted
/// whole as its own chunk.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let cost = word.len() + 1;
        if current_len + cost > max_chars && !current.is_empty() {
            chunks.push(current.join(" "));
            current.clear();
            current_len = 0;
        }
        current.push(word);
        current_len += cost;
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

/// Chunk a document's text into ordered, index-tagged chunks.
pub fn chunk_document(text: &str, max_chars: usize) -> Vec<TextChunk> {
    chunk_text(text, max_chars)
        .into_iter()
        .enumerate()
        .map(|(index, text)| TextChunk { index, text })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_chunk_short_text() {
        let chunks = chunk_text("Hello world", 4096);
        assert_eq!(chunks, vec!["Hello world"]);
    }

    #[test]
    fn test_chunk_splits_on_word_boundary() {
        // "alpha beta" serializes to 10 chars, "gamma" starts a new chunk
        let chunks = chunk_text("alpha beta gamma", 11);
        assert_eq!(chunks, vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn test_chunk_empty_text() {
        assert!(chunk_text("", 4096).is_empty());
    }

    #[test]
    fn test_chunk_whitespace_only() {
        assert!(chunk_text("   \n\n   ", 4096).is_empty());
    }

    #[test]
    fn test_oversized_word_emitted_whole() {
        let chunks = chunk_text("hi incomprehensibilities on", 5);
        assert_eq!(chunks, vec!["hi", "incomprehensibilities", "on"]);
    }

    #[test]
    fn test_collapses_internal_whitespace() {
        let chunks = chunk_text("one\n\ttwo   three", 4096);
        assert_eq!(chunks, vec!["one two three"]);
    }

    #[test]
    fn test_chunk_document_indices() {
        let chunks = chunk_document("alpha beta gamma delta", 11);
        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    proptest! {
        #[test]
        fn prop_rejoined_chunks_preserve_words(
            text in "[ a-zA-Z0-9]{0,200}",
            max_chars in 1usize..64,
        ) {
            let chunks = chunk_text(&text, max_chars);
            let rejoined = chunks.join(" ");
            let original: Vec<&str> = text.split_whitespace().collect();
            let recovered: Vec<&str> = rejoined.split_whitespace().collect();
            prop_assert_eq!(original, recovered);
        }

        #[test]
        fn prop_chunks_respect_max_length(
            text in "[ a-z]{0,200}",
            max_chars in 1usize..64,
        ) {
            for chunk in chunk_text(&text, max_chars) {
                let single_word = !chunk.contains(' ');
                prop_assert!(chunk.len() <= max_chars || single_word);
            }
        }

        #[test]
        fn prop_chunking_is_idempotent(
            text in "[ a-z]{0,200}",
            max_chars in 1usize..64,
        ) {
            let chunks = chunk_text(&text, max_chars);
            let rechunked = chunk_text(&chunks.join(" "), max_chars);
            prop_assert_eq!(chunks, rechunked);
        }
    }
}
