//! Snippet Assembler — labels selected resume windows with the skills they evidence.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::matching::ranker::ScoredChunk;
use crate::matching::resume_matcher::MatchResult;

/// Label used when a snippet evidences no specific matched skill.
pub const GENERAL_RELEVANCE_LABEL: &str = "general relevance";

/// A resume excerpt handed to prompt construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub chunk_id: usize,
    pub text: String,
    pub score: u32, // 0 – 100
    /// Sorted, deduplicated. Empty means general relevance.
    pub skills: Vec<String>,
}

impl Snippet {
    pub fn label(&self) -> String {
        if self.skills.is_empty() {
            GENERAL_RELEVANCE_LABEL.to_string()
        } else {
            self.skills.join(", ")
        }
    }

    /// Evidence block as it appears in the cover letter prompt.
    pub fn render(&self) -> String {
        format!("Skill: {}\nContext: {}", self.label(), self.text.trim())
    }
}

/// Builds one snippet per selected chunk, preserving order.
///
/// A skill is attached to a chunk when either its matched resume term or the skill
/// name itself occurs in the chunk (case-insensitive).
pub fn assemble_snippets(selected: Vec<ScoredChunk>, match_result: &MatchResult) -> Vec<Snippet> {
    selected
        .into_iter()
        .map(|scored| {
            let lowered = scored.chunk.text.to_lowercase();
            let skills: BTreeSet<String> = match_result
                .matched
                .iter()
                .filter(|m| {
                    lowered.contains(&m.resume_term.to_lowercase())
                        || lowered.contains(&m.skill.to_lowercase())
                })
                .map(|m| m.skill.clone())
                .collect();

            Snippet {
                chunk_id: scored.chunk.id,
                text: scored.chunk.text,
                score: scored.score,
                skills: skills.into_iter().collect(),
            }
        })
        .collect()
}
