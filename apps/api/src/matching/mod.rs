//! Skill matching pipeline.
//!
//! JD text → skills → resume evidence → ranked, diversified resume snippets.
//! Pure and synchronous: no I/O, no LLM calls, no shared mutable state.

pub mod chunker;
pub mod extractor;
pub mod ranker;
pub mod resume_matcher;
pub mod similarity;
pub mod snippets;
pub mod tokenizer;
pub mod vocabulary;

use std::collections::BTreeSet;

use tracing::debug;

use crate::matching::chunker::{chunk_text, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::matching::extractor::{extract_skills, JD_SKILL_THRESHOLD};
use crate::matching::ranker::{diversify, rank_chunks, DEFAULT_MIN_GAP, DEFAULT_TOP_K};
use crate::matching::resume_matcher::{match_skills_to_resume, MatchResult, RESUME_MATCH_THRESHOLD};
use crate::matching::snippets::{assemble_snippets, Snippet};
use crate::matching::vocabulary::SkillVocabulary;

/// Tunable policy for the matching pipeline. Changing any of these is a policy decision.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    pub jd_skill_threshold: u32,
    pub resume_match_threshold: u32,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub min_gap: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            jd_skill_threshold: JD_SKILL_THRESHOLD,
            resume_match_threshold: RESUME_MATCH_THRESHOLD,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            top_k: DEFAULT_TOP_K,
            min_gap: DEFAULT_MIN_GAP,
        }
    }
}

/// Entry point for the pipeline. Holds the immutable vocabulary and config; shared
/// across requests behind an `Arc` in `AppState`.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    vocabulary: SkillVocabulary,
    config: MatchingConfig,
}

impl SkillMatcher {
    pub fn new(vocabulary: SkillVocabulary, config: MatchingConfig) -> Self {
        Self { vocabulary, config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Canonical skills mentioned in the job description.
    pub fn extract_skills(&self, jd_text: &str) -> BTreeSet<String> {
        extract_skills(jd_text, &self.vocabulary, self.config.jd_skill_threshold)
    }

    /// Best resume evidence for each skill, dropping skills without any.
    pub fn match_skills_to_resume(
        &self,
        skills: &BTreeSet<String>,
        resume_text: &str,
    ) -> MatchResult {
        match_skills_to_resume(skills, resume_text, self.config.resume_match_threshold)
    }

    /// Chunks the resume, ranks chunks against the JD, picks a diverse top-k and labels
    /// each with the matched skills it contains.
    pub fn select_snippets(
        &self,
        match_result: &MatchResult,
        resume_text: &str,
        jd_text: &str,
        top_k: usize,
    ) -> Vec<Snippet> {
        let chunks = chunk_text(resume_text, self.config.chunk_size, self.config.chunk_overlap);
        let chunk_count = chunks.len();
        let ranked = rank_chunks(chunks, jd_text);
        let selected = diversify(&ranked, top_k, self.config.min_gap);

        debug!(
            "Selected {}/{} resume chunks (top_k={})",
            selected.len(),
            chunk_count,
            top_k
        );
        assemble_snippets(selected, match_result)
    }
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new(SkillVocabulary::builtin(), MatchingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "Looking for a Python developer with AWS and Docker experience, React a plus.";
    const RESUME: &str = "...built APIs in Python and deployed containers with Docker on AWS...";

    fn long_resume(len: usize) -> String {
        let paragraph = "Built Python services deployed with Docker on AWS. \
            Led a migration of batch jobs to Airflow. Mentored four engineers. \
            Wrote internal tooling for release management and on-call rotations. ";
        paragraph.chars().cycle().take(len).collect()
    }

    #[test]
    fn test_end_to_end_extract_and_match() {
        let matcher = SkillMatcher::default();
        let skills = matcher.extract_skills(JD);
        for expected in ["python", "aws", "docker", "react"] {
            assert!(skills.contains(expected), "missing {expected}");
        }

        let result = matcher.match_skills_to_resume(&skills, RESUME);
        let matched = result.matched_skills();
        for expected in ["python", "docker", "aws"] {
            assert!(matched.iter().any(|s| s == expected), "missing {expected}");
        }
        assert!(!matched.iter().any(|s| s == "react"));
        assert!(result.matched.iter().all(|m| m.score >= 78));
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let matcher = SkillMatcher::default();
        let first = matcher.match_skills_to_resume(&matcher.extract_skills(JD), RESUME);
        let second = matcher.match_skills_to_resume(&matcher.extract_skills(JD), RESUME);
        assert_eq!(first, second);
    }

    #[test]
    fn test_five_thousand_char_resume_yields_six_snippets() {
        let matcher = SkillMatcher::default();
        let resume = long_resume(5000);
        let result = matcher.match_skills_to_resume(&matcher.extract_skills(JD), &resume);
        let snippets = matcher.select_snippets(&result, &resume, JD, 6);

        assert_eq!(snippets.len(), 6);
        assert!(snippets.iter().all(|s| s.score <= 100));
        let ids: BTreeSet<usize> = snippets.iter().map(|s| s.chunk_id).collect();
        assert_eq!(ids.len(), 6, "snippet chunks must be distinct");
    }

    #[test]
    fn test_snippets_carry_matched_skills() {
        let matcher = SkillMatcher::default();
        let result = matcher.match_skills_to_resume(&matcher.extract_skills(JD), RESUME);
        let snippets = matcher.select_snippets(&result, RESUME, JD, 6);

        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].skills, vec!["aws", "docker", "python"]);
    }

    #[test]
    fn test_empty_inputs_yield_empty_outputs() {
        let matcher = SkillMatcher::default();
        assert!(matcher.extract_skills("").is_empty());
        let result = matcher.match_skills_to_resume(&matcher.extract_skills(JD), "");
        assert!(result.is_empty());
        assert!(matcher.select_snippets(&result, "", JD, 6).is_empty());
    }
}
