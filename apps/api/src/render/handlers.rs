//! Axum route handlers for the Render API.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::template::FALLBACK_DOCUMENT;
use crate::render::{render_document, RenderError, RenderReport, SectionKind, SkippedSection};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LatexResponse {
    pub latex: String,
    pub rendered_sections: Vec<SectionKind>,
    pub skipped_sections: Vec<SkippedSection>,
}

#[derive(Debug, Serialize)]
pub struct PdfResponse {
    pub job_id: Uuid,
    pub url: String,
    /// True when the document could not be rendered and the static fallback
    /// template was compiled instead.
    pub used_fallback: bool,
    pub skipped_sections: Vec<SkippedSection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/render/latex
///
/// Renders a resume document (canonical or bare section map) to LaTeX source.
pub async fn handle_render_latex(
    Json(document): Json<Value>,
) -> Result<Json<LatexResponse>, AppError> {
    let report = render_blocking(document).await??;

    Ok(Json(LatexResponse {
        latex: report.latex,
        rendered_sections: report.rendered,
        skipped_sections: report.skipped,
    }))
}

/// POST /api/v1/render/pdf
///
/// Render → compile (strict, then permissive) → upload. A document that cannot
/// be rendered at all is replaced by the static fallback template rather than
/// failing the request.
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    Json(document): Json<Value>,
) -> Result<Json<PdfResponse>, AppError> {
    let job_id = Uuid::new_v4();

    let (latex, skipped_sections, used_fallback) = match render_blocking(document).await? {
        Ok(report) => (report.latex, report.skipped, false),
        Err(e) => {
            warn!("Job {job_id}: rendering failed, compiling fallback template: {e}");
            (FALLBACK_DOCUMENT.to_string(), Vec::new(), true)
        }
    };

    let artifact = state.compiler.compile(&latex, &job_id.to_string()).await?;

    let key = format!("resumes/{job_id}.pdf");
    let url = state.store.upload(&key, artifact.bytes).await?;

    info!(
        "Job {job_id}: rendered and uploaded ({:?} mode, fallback={used_fallback})",
        artifact.mode
    );

    Ok(Json(PdfResponse {
        job_id,
        url,
        used_fallback,
        skipped_sections,
    }))
}

/// Rendering is CPU-bound; run it off the async executor.
async fn render_blocking(document: Value) -> Result<Result<RenderReport, RenderError>, AppError> {
    tokio::task::spawn_blocking(move || render_document(&document))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))
}
