//! Resume Matcher — pairs each JD skill with its best evidence token in the resume.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::similarity::token_set_ratio;
use crate::matching::tokenizer::tokenize;

/// Minimum token-set ratio for a resume token to count as evidence of a skill.
pub const RESUME_MATCH_THRESHOLD: u32 = 78;

/// One accepted (skill, resume term, score) pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub resume_term: String,
    pub score: u32, // 0 – 100
}

/// All accepted pairings for a JD/resume pair. Each skill appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: Vec<SkillMatch>,
}

impl MatchResult {
    /// Names of the matched skills, sorted.
    pub fn matched_skills(&self) -> Vec<String> {
        let mut skills: Vec<String> = self.matched.iter().map(|m| m.skill.clone()).collect();
        skills.sort();
        skills
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Finds, for every skill, the resume token with the highest token-set ratio and keeps
/// the pairing when it reaches `threshold`.
///
/// Skills and tokens are scanned in sorted order and only a strictly better score
/// replaces the current best, so ties resolve to the lexicographically smallest token.
pub fn match_skills_to_resume(
    skills: &BTreeSet<String>,
    resume_text: &str,
    threshold: u32,
) -> MatchResult {
    let resume_tokens: BTreeSet<String> = tokenize(resume_text).into_iter().collect();
    if resume_tokens.is_empty() {
        return MatchResult::default();
    }

    let mut matched = Vec::new();
    for skill in skills {
        let Some((term, score)) = best_token(skill, &resume_tokens) else {
            continue;
        };
        if score >= threshold {
            matched.push(SkillMatch {
                skill: skill.clone(),
                resume_term: term.to_string(),
                score,
            });
        }
    }

    debug!(
        "Matched {}/{} skills against {} resume tokens",
        matched.len(),
        skills.len(),
        resume_tokens.len()
    );
    MatchResult { matched }
}

fn best_token<'a>(skill: &str, tokens: &'a BTreeSet<String>) -> Option<(&'a str, u32)> {
    let mut best: Option<(&str, u32)> = None;
    for token in tokens {
        let score = token_set_ratio(skill, token);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((token, score));
            if score == 100 {
                break;
            }
        }
    }
    best
}
