//! Axum route handlers for the skills, matching and cover letter APIs.

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cover_letter::generator::{
    analyze_blocking, download_filename, generate_cover_letter, CoverLetterDraft,
    CoverLetterInput, MatchReport,
};
use crate::errors::AppError;
use crate::resume::{extract_text_from_pdf, normalize_text};
use crate::state::AppState;

/// Upper bound on snippets a caller may request.
const MAX_TOP_K: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub jd_text: String,
    pub resume_text: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub company: String,
    pub job_title: String,
    pub cover_letter: String,
}

/// Fields collected from the multipart generation form.
#[derive(Debug, Default)]
struct GenerateForm {
    company: Option<String>,
    job_title: Option<String>,
    jd_text: Option<String>,
    resume_pdf: Option<Bytes>,
    temperature: Option<f32>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/skills/extract
///
/// Returns the canonical skills found in a job description, sorted.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ExtractSkillsRequest>,
) -> Result<Json<ExtractSkillsResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let matcher = state.matcher.clone();
    let jd_text = request.jd_text;
    let skills = tokio::task::spawn_blocking(move || matcher.extract_skills(&jd_text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Skill extraction task failed: {e}")))?;
    Ok(Json(ExtractSkillsResponse {
        skills: skills.into_iter().collect(),
    }))
}

/// POST /api/v1/match
///
/// Runs the matching pipeline without calling the LLM. Useful for previewing which
/// skills and snippets a cover letter would be built from.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchReport>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    let top_k = request.top_k.unwrap_or(state.matcher.config().top_k);
    if top_k == 0 || top_k > MAX_TOP_K {
        return Err(AppError::Validation(format!(
            "top_k must be between 1 and {MAX_TOP_K}"
        )));
    }

    let resume_text = normalize_text(&request.resume_text);
    let report =
        analyze_blocking(state.matcher.clone(), request.jd_text, resume_text, top_k).await?;
    Ok(Json(report))
}

/// POST /api/v1/cover-letters
///
/// Multipart form: `company`, `job_title`, `jd_text`, `resume` (PDF file) and an
/// optional `temperature`. Extracts the resume text, runs matching and drafts the letter.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CoverLetterDraft>, AppError> {
    let form = read_generate_form(multipart).await?;

    let pdf = form
        .resume_pdf
        .ok_or_else(|| AppError::Validation("resume PDF is required".to_string()))?;
    info!("Received resume PDF ({} bytes)", pdf.len());

    let resume_text = tokio::task::spawn_blocking(move || extract_text_from_pdf(&pdf))
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("Failed to read resume PDF: {e}")))??;

    let input = CoverLetterInput {
        company: form.company.unwrap_or_default(),
        job_title: form.job_title.unwrap_or_default(),
        jd_text: form.jd_text.unwrap_or_default(),
        resume_text,
        temperature: form.temperature,
    };

    let draft = generate_cover_letter(
        state.matcher.clone(),
        state.llm.as_ref(),
        input,
        state.config.llm_temperature,
    )
    .await?;
    Ok(Json(draft))
}

/// POST /api/v1/cover-letters/export
///
/// Returns the letter as a plain-text attachment.
pub async fn handle_export(Json(request): Json<ExportRequest>) -> Result<Response, AppError> {
    if request.cover_letter.trim().is_empty() {
        return Err(AppError::Validation(
            "cover_letter cannot be empty".to_string(),
        ));
    }

    let filename = download_filename(&request.company, &request.job_title);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        request.cover_letter,
    )
        .into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart parsing
// ────────────────────────────────────────────────────────────────────────────

async fn read_generate_form(mut multipart: Multipart) -> Result<GenerateForm, AppError> {
    let mut form = GenerateForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => form.resume_pdf = Some(field.bytes().await.map_err(multipart_error)?),
            "company" => form.company = Some(field.text().await.map_err(multipart_error)?),
            "job_title" => form.job_title = Some(field.text().await.map_err(multipart_error)?),
            "jd_text" => form.jd_text = Some(field.text().await.map_err(multipart_error)?),
            "temperature" => {
                let raw = field.text().await.map_err(multipart_error)?;
                let value = raw.trim().parse::<f32>().map_err(|_| {
                    AppError::Validation(format!("temperature must be a number, got '{raw}'"))
                })?;
                form.temperature = Some(value);
            }
            _ => {} // unknown fields are ignored
        }
    }

    Ok(form)
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart form: {}", err.body_text()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
