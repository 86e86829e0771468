// All LLM prompt constants for the Cover Letter module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for cover letter generation.
/// Replace: {grounding_instruction}, {prose_instruction}
pub const COVER_LETTER_SYSTEM_TEMPLATE: &str = "You are an expert career assistant that writes \
    concise, personalized cover letters. {grounding_instruction} \
    Prefer measurable impact if present; otherwise keep claims qualitative. \
    Target 250-350 words, professional tone, tailored to the company and role. \
    {prose_instruction}";

/// Cover letter user prompt template.
/// Replace: {company}, {job_title}, {job_description}, {jd_skills}, {matched_skills},
///          {resume_bio}, {resume_snippets}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Company: {company}
Role: {job_title}

Job Description:
{job_description}

JD Skills: {jd_skills}
Matched Skills (from resume): {matched_skills}

Candidate Bio (brief):
{resume_bio}

Supporting Resume Snippets:
{resume_snippets}

Write a tailored cover letter that:
- Opens with a specific hook mentioning the company and role.
- Weaves in JD requirements and highlights matching resume experience.
- Cites snippets as evidence; include project names/metrics when present.
- If a JD skill is not evidenced, acknowledge adjacent strengths without inventing.
- Closes with clear enthusiasm and a call-to-action.
- Strictly 250-350 words. No bullet points. No cliches. No unsupported claims."#;

/// Placeholder when no JD skill has resume evidence.
pub const NO_MATCHED_SKILLS: &str = "(none)";

/// Placeholder when the resume produced no snippets.
pub const NO_SNIPPETS: &str = "(no snippets found)";
