//! Cover Letter Generation — orchestrates the full generation pipeline.
//!
//! Flow: validate input → extract JD skills → match resume → select snippets →
//!       build prompt → LLM completion → draft.
//!
//! The matching steps are CPU-bound and run on the blocking pool; only the LLM call
//! awaits on the network.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::cover_letter::prompts::{
    COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM_TEMPLATE, NO_MATCHED_SKILLS, NO_SNIPPETS,
};
use crate::errors::AppError;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, PROSE_ONLY_INSTRUCTION};
use crate::llm_client::ChatCompletion;
use crate::matching::resume_matcher::SkillMatch;
use crate::matching::snippets::Snippet;
use crate::matching::SkillMatcher;
use crate::resume::resume_bio;

/// Accepted sampling temperature range.
pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 1.2;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Everything needed to draft one cover letter. `resume_text` is already normalized.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverLetterInput {
    pub company: String,
    pub job_title: String,
    pub jd_text: String,
    pub resume_text: String,
    pub temperature: Option<f32>,
}

impl CoverLetterInput {
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("company", &self.company),
            ("job_title", &self.job_title),
            ("jd_text", &self.jd_text),
            ("resume", &self.resume_text),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        if let Some(t) = self.temperature {
            if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&t) {
                return Err(AppError::Validation(format!(
                    "temperature must be between {MIN_TEMPERATURE} and {MAX_TEMPERATURE}, got {t}"
                )));
            }
        }
        Ok(())
    }
}

/// Output of the matching pipeline for one JD/resume pair.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub jd_skills: Vec<String>,
    pub matched: Vec<SkillMatch>,
    pub matched_skills: Vec<String>,
    pub snippets: Vec<Snippet>,
}

/// A generated cover letter plus the evidence it was built from.
#[derive(Debug, Clone, Serialize)]
pub struct CoverLetterDraft {
    pub letter_id: Uuid,
    pub company: String,
    pub job_title: String,
    pub model: String,
    pub cover_letter: String,
    pub jd_skills: Vec<String>,
    pub matched: Vec<SkillMatch>,
    pub matched_skills: Vec<String>,
    pub snippets: Vec<Snippet>,
    pub download_filename: String,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs skill extraction, resume matching and snippet selection.
pub fn analyze(matcher: &SkillMatcher, jd_text: &str, resume_text: &str, top_k: usize) -> MatchReport {
    let jd_skills = matcher.extract_skills(jd_text);
    let match_result = matcher.match_skills_to_resume(&jd_skills, resume_text);
    let snippets = matcher.select_snippets(&match_result, resume_text, jd_text, top_k);

    MatchReport {
        jd_skills: jd_skills.into_iter().collect(),
        matched_skills: match_result.matched_skills(),
        matched: match_result.matched,
        snippets,
    }
}

/// `analyze` on the blocking pool.
pub async fn analyze_blocking(
    matcher: Arc<SkillMatcher>,
    jd_text: String,
    resume_text: String,
    top_k: usize,
) -> Result<MatchReport, AppError> {
    tokio::task::spawn_blocking(move || analyze(&matcher, &jd_text, &resume_text, top_k))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Matching task failed: {e}")))
}

/// Generates a cover letter for `input`.
///
/// Steps:
/// 1. validate input
/// 2. analyze() → MatchReport (blocking pool)
/// 3. build system + user prompts
/// 4. LLM completion
pub async fn generate_cover_letter(
    matcher: Arc<SkillMatcher>,
    llm: &dyn ChatCompletion,
    input: CoverLetterInput,
    default_temperature: f32,
) -> Result<CoverLetterDraft, AppError> {
    input.validate()?;

    let top_k = matcher.config().top_k;
    let report = analyze_blocking(
        matcher,
        input.jd_text.clone(),
        input.resume_text.clone(),
        top_k,
    )
    .await?;
    info!(
        "Matched {}/{} JD skills, {} snippets for {} at {}",
        report.matched_skills.len(),
        report.jd_skills.len(),
        report.snippets.len(),
        input.job_title,
        input.company
    );

    let system = build_system_prompt();
    let user = build_user_prompt(&input, &report);
    let temperature = input.temperature.unwrap_or(default_temperature);

    let cover_letter = llm.complete(&system, &user, temperature).await?;
    info!(
        "Generated cover letter ({} words) with model {}",
        cover_letter.split_whitespace().count(),
        llm.model()
    );

    Ok(CoverLetterDraft {
        letter_id: Uuid::new_v4(),
        download_filename: download_filename(&input.company, &input.job_title),
        company: input.company,
        job_title: input.job_title,
        model: llm.model().to_string(),
        cover_letter,
        jd_skills: report.jd_skills,
        matched: report.matched,
        matched_skills: report.matched_skills,
        snippets: report.snippets,
        generated_at: Utc::now(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt construction
// ────────────────────────────────────────────────────────────────────────────

pub fn build_system_prompt() -> String {
    COVER_LETTER_SYSTEM_TEMPLATE
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{prose_instruction}", PROSE_ONLY_INSTRUCTION)
}

pub fn build_user_prompt(input: &CoverLetterInput, report: &MatchReport) -> String {
    let matched_skills = if report.matched_skills.is_empty() {
        NO_MATCHED_SKILLS.to_string()
    } else {
        report.matched_skills.join(", ")
    };
    let snippets = if report.snippets.is_empty() {
        NO_SNIPPETS.to_string()
    } else {
        report
            .snippets
            .iter()
            .map(Snippet::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    // Free-text fields go in last so their contents cannot collide with placeholders.
    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{jd_skills}", &report.jd_skills.join(", "))
        .replace("{matched_skills}", &matched_skills)
        .replace("{resume_snippets}", &snippets)
        .replace("{resume_bio}", &resume_bio(&input.resume_text))
        .replace("{job_description}", input.jd_text.trim())
        .replace("{company}", input.company.trim())
        .replace("{job_title}", input.job_title.trim())
}

/// `Cover_Letter_{company}_{job_title}.txt`, whitespace as underscores, limited to
/// filename-safe characters.
pub fn download_filename(company: &str, job_title: &str) -> String {
    format!(
        "Cover_Letter_{}_{}.txt",
        filename_part(company),
        filename_part(job_title)
    )
}

fn filename_part(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;

    const JD: &str = "Looking for a Python developer with AWS and Docker experience, React a plus.";
    const RESUME: &str = "Jane Doe. Built APIs in Python and deployed containers with Docker on AWS.";

    /// Records the prompts it receives and answers with a canned letter.
    struct StubLlm {
        reply: Result<String, ()>,
        seen: Mutex<Vec<(String, String, f32)>>,
    }

    impl StubLlm {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatCompletion for StubLlm {
        async fn complete(
            &self,
            system: &str,
            user: &str,
            temperature: f32,
        ) -> Result<String, LlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string(), temperature));
            self.reply.clone().map_err(|_| LlmError::EmptyContent)
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    fn input() -> CoverLetterInput {
        CoverLetterInput {
            company: "Acme Corp".to_string(),
            job_title: "Senior Software Engineer".to_string(),
            jd_text: JD.to_string(),
            resume_text: RESUME.to_string(),
            temperature: None,
        }
    }

    #[test]
    fn test_validate_reports_all_missing_fields() {
        let mut bad = input();
        bad.company = "  ".to_string();
        bad.resume_text = String::new();
        let err = bad.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("company"), "{msg}");
        assert!(msg.contains("resume"), "{msg}");
        assert!(!msg.contains("job_title"), "{msg}");
    }

    #[test]
    fn test_validate_temperature_range() {
        let mut hot = input();
        hot.temperature = Some(1.5);
        assert!(matches!(hot.validate(), Err(AppError::Validation(_))));
        hot.temperature = Some(1.2);
        assert!(hot.validate().is_ok());
    }

    #[test]
    fn test_analyze_reports_skills_and_snippets() {
        let report = analyze(&SkillMatcher::default(), JD, RESUME, 6);
        assert!(report.jd_skills.contains(&"react".to_string()));
        assert_eq!(report.matched_skills, vec!["aws", "docker", "python"]);
        assert_eq!(report.snippets.len(), 1);
    }

    #[test]
    fn test_user_prompt_fills_every_placeholder() {
        let report = analyze(&SkillMatcher::default(), JD, RESUME, 6);
        let prompt = build_user_prompt(&input(), &report);
        assert!(prompt.contains("Company: Acme Corp"));
        assert!(prompt.contains("Role: Senior Software Engineer"));
        assert!(prompt.contains("Matched Skills (from resume): aws, docker, python"));
        assert!(prompt.contains("Skill: aws, docker, python\nContext: Jane Doe."));
        for placeholder in ["{company}", "{job_title}", "{jd_skills}", "{resume_bio}", "{resume_snippets}"] {
            assert!(!prompt.contains(placeholder), "unfilled {placeholder}");
        }
    }

    #[test]
    fn test_user_prompt_placeholders_when_no_evidence() {
        let report = MatchReport {
            jd_skills: vec!["rust".to_string()],
            matched: Vec::new(),
            matched_skills: Vec::new(),
            snippets: Vec::new(),
        };
        let prompt = build_user_prompt(&input(), &report);
        assert!(prompt.contains("Matched Skills (from resume): (none)"));
        assert!(prompt.contains("(no snippets found)"));
    }

    #[test]
    fn test_system_prompt_includes_grounding() {
        let system = build_system_prompt();
        assert!(system.contains(GROUNDING_INSTRUCTION));
        assert!(!system.contains("{grounding_instruction}"));
    }

    #[test]
    fn test_download_filename() {
        assert_eq!(
            download_filename("Acme Corp", "Senior Software Engineer"),
            "Cover_Letter_Acme_Corp_Senior_Software_Engineer.txt"
        );
        assert_eq!(
            download_filename("Foo \"Bar\"\n", "C++ Dev"),
            "Cover_Letter_Foo_Bar_C_Dev.txt"
        );
    }

    #[tokio::test]
    async fn test_generate_returns_draft_with_evidence() {
        let llm = StubLlm::replying("Dear Acme Corp hiring team, ...");
        let draft = generate_cover_letter(Arc::new(SkillMatcher::default()), &llm, input(), 0.3)
            .await
            .unwrap();

        assert_eq!(draft.cover_letter, "Dear Acme Corp hiring team, ...");
        assert_eq!(draft.model, "stub-model");
        assert_eq!(draft.matched_skills, vec!["aws", "docker", "python"]);
        assert_eq!(
            draft.download_filename,
            "Cover_Letter_Acme_Corp_Senior_Software_Engineer.txt"
        );

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!((seen[0].2 - 0.3).abs() < f32::EPSILON);
        assert!(seen[0].1.contains("Company: Acme Corp"));
    }

    #[tokio::test]
    async fn test_generate_uses_request_temperature() {
        let llm = StubLlm::replying("letter");
        let mut request = input();
        request.temperature = Some(0.9);
        generate_cover_letter(Arc::new(SkillMatcher::default()), &llm, request, 0.3)
            .await
            .unwrap();
        assert!((llm.seen.lock().unwrap()[0].2 - 0.9).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_generate_rejects_invalid_input_before_calling_llm() {
        let llm = StubLlm::replying("letter");
        let mut request = input();
        request.jd_text = String::new();
        let result = generate_cover_letter(Arc::new(SkillMatcher::default()), &llm, request, 0.3).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(llm.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_surfaces_llm_failure() {
        let llm = StubLlm::failing();
        let result = generate_cover_letter(Arc::new(SkillMatcher::default()), &llm, input(), 0.3).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
