//! Resume Chunker — overlapping fixed-size character windows over resume text.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// A window of resume text. `start` is the offset of its first character
/// (in chars, not bytes) within the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: usize,
    pub start: usize,
    pub text: String,
}

/// Splits `text` into windows of up to `chunk_size` characters, each starting
/// `chunk_size - overlap` characters after the previous one.
///
/// The step is clamped to at least 1 so an overlap ≥ chunk size can never stall the
/// loop. Windows are cut on char boundaries, never inside a multi-byte character.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
    let chunk_size = chunk_size.max(1);
    let step = chunk_size.saturating_sub(overlap).max(1);

    // Byte offset of every char boundary, plus the end of the text.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = boundaries.len() - 1;

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < char_len {
        let end = (start + chunk_size).min(char_len);
        chunks.push(Chunk {
            id: chunks.len(),
            start,
            text: text[boundaries[start]..boundaries[end]].to_string(),
        });
        start += step;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_text(len: usize) -> String {
        "abcdefghijklmnopqrstuvwxyz0123456789 "
            .chars()
            .cycle()
            .take(len)
            .collect()
    }

    #[test]
    fn test_chunk_ids_and_offsets_follow_step() {
        let text = sample_text(2500);
        let chunks = chunk_text(&text, 1000, 200);

        let ids: Vec<usize> = chunks.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);

        for chunk in &chunks {
            assert_eq!(chunk.start, 800 * chunk.id);
            let expected: String = text.chars().skip(chunk.start).take(800).collect();
            assert!(chunk.text.starts_with(&expected));
        }
        assert_eq!(chunks[0].text.chars().count(), 1000);
        assert_eq!(chunks[3].text.chars().count(), 100);
    }

    #[test]
    fn test_chunks_cover_every_character() {
        let text = sample_text(2500);
        let chunks = chunk_text(&text, 1000, 200);

        let mut covered = vec![false; 2500];
        for chunk in &chunks {
            for offset in chunk.start..chunk.start + chunk.text.chars().count() {
                covered[offset] = true;
            }
        }
        assert!(covered.iter().all(|&c| c));
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let text = sample_text(3000);
        let chunks = chunk_text(&text, 1000, 200);
        for pair in chunks.windows(2) {
            let tail: String = pair[0].text.chars().skip(800).collect();
            assert!(pair[1].text.starts_with(&tail));
        }
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(chunk_text("", 1000, 200).is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = chunk_text("Rust engineer", 1000, 200);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Rust engineer");
    }

    #[test]
    fn test_overlap_not_smaller_than_size_still_advances() {
        let chunks = chunk_text("abcdef", 2, 5);
        assert_eq!(chunks.len(), 6);
        assert_eq!(chunks[5].text, "f");
    }

    #[test]
    fn test_multibyte_text_is_cut_on_char_boundaries() {
        let text = "é".repeat(25);
        let chunks = chunk_text(&text, 10, 2);
        assert!(chunks.iter().all(|c| c.text.chars().all(|ch| ch == 'é')));
        assert_eq!(chunks[0].text.chars().count(), 10);
        assert_eq!(chunks[1].start, 8);
    }
}
