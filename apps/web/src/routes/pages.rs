//! Axum route handlers for the upload, results and roadmap pages.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use serde::Deserialize;
use tracing::info;

use crate::backend_client::ResumeUpload;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRun;
use crate::pages::roadmap::RoadmapPage;
use crate::pages::{results, roadmap, upload, ViewState};
use crate::run_id::{parse_run_id, Page, RunId};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RunIdQuery {
    pub run_id: Option<String>,
}

/// Raw fields of the upload form, before validation.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<ResumeUpload>,
    pub target_role: String,
}

impl UploadForm {
    /// Client-side checks from the upload page, enforced before any backend call.
    /// Returns the file and the trimmed role.
    pub fn validate(self) -> Result<(ResumeUpload, String), AppError> {
        let role = self.target_role.trim().to_string();
        let Some(file) = self.file else {
            return Err(AppError::upload(
                StatusCode::BAD_REQUEST,
                "Please upload your CV (PDF or DOCX).",
                &role,
            ));
        };
        if role.is_empty() {
            return Err(AppError::upload(
                StatusCode::BAD_REQUEST,
                "Please select or type a target role.",
                &role,
            ));
        }
        Ok((file, role))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /upload
pub async fn handle_upload_form() -> Html<String> {
    Html(upload::render(None, ""))
}

/// POST /upload
///
/// Forwards the résumé to the backend and redirects to the results page of the new run.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Redirect, AppError> {
    let multipart = multipart.map_err(|e| {
        AppError::upload(e.status(), "Could not read the submitted form.", "")
    })?;

    let form = read_upload_form(multipart).await?;
    let (file, role) = form.validate()?;

    let run_id = state
        .backend
        .analyze_cv(file, &role)
        .await
        .map_err(|e| {
            tracing::error!("Analyze request failed: {e}");
            AppError::upload(StatusCode::BAD_GATEWAY, e.user_message(), &role)
        })?;

    info!("Analysis {run_id} created for role '{role}'");
    Ok(Redirect::to(&format!("/results?run_id={run_id}")))
}

/// GET /results?run_id=
pub async fn handle_results(
    State(state): State<AppState>,
    Query(query): Query<RunIdQuery>,
) -> Result<Html<String>, AppError> {
    let run_id = run_id_for(Page::Results, &query)?;
    let view = match fetch(&state, Page::Results, run_id).await? {
        Some(run) => ViewState::Loaded(run),
        None => ViewState::Empty,
    };
    Ok(Html(results::render(&view)))
}

/// GET /roadmap?run_id=
pub async fn handle_roadmap(
    State(state): State<AppState>,
    Query(query): Query<RunIdQuery>,
) -> Result<Html<String>, AppError> {
    let run_id = run_id_for(Page::Roadmap, &query)?;
    let view = match fetch(&state, Page::Roadmap, run_id).await? {
        Some(run) => ViewState::Loaded(RoadmapPage {
            run,
            report_url: state.backend.report_url(run_id),
        }),
        None => ViewState::Empty,
    };
    Ok(Html(roadmap::render(&view)))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn run_id_for(page: Page, query: &RunIdQuery) -> Result<RunId, AppError> {
    parse_run_id(query.run_id.as_deref()).map_err(|source| AppError::RunId { page, source })
}

async fn fetch(
    state: &AppState,
    page: Page,
    run_id: RunId,
) -> Result<Option<AnalysisRun>, AppError> {
    state
        .backend
        .fetch_analysis(run_id)
        .await
        .map_err(|source| AppError::Backend { page, source })
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(AppError::upload(
                    e.status(),
                    "Could not read the uploaded file. It may be too large.",
                    &form.target_role,
                ))
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::upload(
                        e.status(),
                        "Could not read the uploaded file. It may be too large.",
                        &form.target_role,
                    )
                })?;
                // Browsers send an empty part when no file was chosen.
                if !bytes.is_empty() {
                    form.file = Some(ResumeUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            "target_role" => {
                form.target_role = field.text().await.map_err(|e| {
                    AppError::upload(e.status(), "Could not read the target role.", "")
                })?;
            }
            _ => {}
        }
    }

    Ok(form)
}
