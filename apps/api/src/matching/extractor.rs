//! Skill Extractor — finds canonical skills mentioned in a job description.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::matching::similarity::partial_ratio;
use crate::matching::tokenizer::{ngrams, tokenize};
use crate::matching::vocabulary::SkillVocabulary;

/// Minimum partial ratio for a fuzzy skill hit in JD text.
pub const JD_SKILL_THRESHOLD: u32 = 88;

/// Extracts the canonical skills present in `jd_text`.
///
/// Terms are the unigrams, bigrams and trigrams of the tokenized text, with aliases
/// resolved. A skill is accepted when it is one of the terms, or when its best partial
/// ratio against any term reaches `threshold`.
pub fn extract_skills(
    jd_text: &str,
    vocabulary: &SkillVocabulary,
    threshold: u32,
) -> BTreeSet<String> {
    let terms = normalized_terms(jd_text, vocabulary);
    if terms.is_empty() {
        return BTreeSet::new();
    }

    let skills: BTreeSet<String> = vocabulary
        .skills()
        .filter(|skill| terms.contains(*skill) || best_partial_score(skill, &terms) >= threshold)
        .map(str::to_string)
        .collect();

    debug!(
        "Extracted {} skills from {} JD terms",
        skills.len(),
        terms.len()
    );
    skills
}

/// Unigrams ∪ bigrams ∪ trigrams with every term passed through alias resolution.
fn normalized_terms(text: &str, vocabulary: &SkillVocabulary) -> HashSet<String> {
    let tokens = tokenize(text);
    let bigrams = ngrams(&tokens, 2);
    let trigrams = ngrams(&tokens, 3);

    tokens
        .iter()
        .chain(bigrams.iter())
        .chain(trigrams.iter())
        .map(|term| vocabulary.resolve(term).to_string())
        .collect()
}

fn best_partial_score(skill: &str, terms: &HashSet<String>) -> u32 {
    let mut best = 0;
    for term in terms {
        best = best.max(partial_ratio(skill, term));
        if best == 100 {
            break;
        }
    }
    best
}
