//! Chunk Ranker + Diversifier — relevance-ordered, non-redundant resume windows.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::chunker::Chunk;
use crate::matching::similarity::token_set_ratio;

pub const DEFAULT_TOP_K: usize = 6;
/// Accepted chunk ids must differ by more than this from every other accepted id.
pub const DEFAULT_MIN_GAP: usize = 1;

/// A chunk with its 0–100 relevance to the job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: u32,
}

/// Scores every chunk against `jd_text` (case-insensitive token-set ratio) and sorts
/// descending by score, ties by ascending chunk id.
pub fn rank_chunks(chunks: Vec<Chunk>, jd_text: &str) -> Vec<ScoredChunk> {
    let jd_lower = jd_text.to_lowercase();

    let mut scored: Vec<ScoredChunk> = chunks
        .into_iter()
        .map(|chunk| {
            let score = token_set_ratio(&chunk.text.to_lowercase(), &jd_lower);
            ScoredChunk { chunk, score }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.chunk.id.cmp(&b.chunk.id))
    });
    scored
}

/// Greedy top-k selection that skips chunks adjacent to an already accepted one.
///
/// `ranked` must already be sorted best-first. A chunk is accepted only if its id is
/// more than `min_gap` away from every accepted id. If fewer than `k` pass, the rest is
/// backfilled from `ranked` in order, skipping ids already selected.
pub fn diversify(ranked: &[ScoredChunk], k: usize, min_gap: usize) -> Vec<ScoredChunk> {
    let mut selected: Vec<ScoredChunk> = Vec::with_capacity(k.min(ranked.len()));
    let mut selected_ids: HashSet<usize> = HashSet::new();

    for candidate in ranked {
        if selected.len() >= k {
            break;
        }
        let id = candidate.chunk.id;
        if selected_ids.iter().all(|&other| id.abs_diff(other) > min_gap) {
            selected_ids.insert(id);
            selected.push(candidate.clone());
        }
    }

    // Backfill
    for candidate in ranked {
        if selected.len() >= k {
            break;
        }
        if selected_ids.insert(candidate.chunk.id) {
            selected.push(candidate.clone());
        }
    }

    selected
}
