use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::backend_client::BackendError;
use crate::pages::roadmap::RoadmapPage;
use crate::pages::{results, roadmap, upload, ViewState};
use crate::run_id::{Page, RunIdError};

/// Application-level error type.
/// Implements `IntoResponse` so every failure lands on a rendered page, never a bare status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad run id on {page:?} page: {source}")]
    RunId { page: Page, source: RunIdError },

    #[error("Backend failure on {page:?} page: {source}")]
    Backend { page: Page, source: BackendError },

    #[error("Upload rejected ({status}): {message}")]
    Upload {
        status: StatusCode,
        message: String,
        /// Echoed back into the form so the user does not retype it.
        target_role: String,
    },
}

impl AppError {
    pub fn upload(status: StatusCode, message: impl Into<String>, target_role: &str) -> Self {
        AppError::Upload {
            status,
            message: message.into(),
            target_role: target_role.to_string(),
        }
    }
}

fn failed_page(page: Page, message: String) -> String {
    match page {
        Page::Results => results::render(&ViewState::Failed(message)),
        Page::Roadmap => roadmap::render(&ViewState::<RoadmapPage>::Failed(message)),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, html) = match self {
            AppError::RunId { page, source } => {
                tracing::debug!("Rejected run_id: {source}");
                (
                    StatusCode::BAD_REQUEST,
                    failed_page(page, source.user_message(page).to_string()),
                )
            }
            AppError::Backend { page, source } => {
                tracing::error!("Backend error: {source}");
                let status = match source.backend_status() {
                    Some(404) => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, failed_page(page, source.user_message()))
            }
            AppError::Upload {
                status,
                message,
                target_role,
            } => {
                tracing::warn!("Upload rejected ({status}): {message}");
                (status, upload::render(Some(&message), &target_role))
            }
        };

        (status, Html(html)).into_response()
    }
}
