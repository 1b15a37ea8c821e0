//! Backend client: the single point of entry for calls to the analysis service.
//!
//! Résumé parsing, skill extraction, gap analysis and roadmap generation all
//! happen behind these endpoints. Pages never build backend URLs themselves.
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::analysis::AnalysisRun;
use crate::run_id::RunId;

/// Response keys that have carried the run id across backend versions, in lookup order.
const RUN_ID_KEYS: &[&str] = &["run_id", "id", "runId", "analysis_id", "analysisId"];
const MAX_ATTEMPTS: u32 = 3;
const BASE_BACKOFF_MS: u64 = 250;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Analysis did not return a run_id. Raw response: {raw}")]
    MissingRunId { raw: String },
}

impl BackendError {
    /// Text shown to the user on the page that hit the error.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Api { message, .. } => message.clone(),
            BackendError::MissingRunId { .. } => self.to_string(),
            BackendError::Http(_) => {
                "Could not reach the analysis service. Please try again.".to_string()
            }
            BackendError::Parse(_) => {
                "The analysis service returned an unreadable response.".to_string()
            }
        }
    }

    /// Status code reported by the backend, if it got that far.
    pub fn backend_status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A résumé file received from the upload form, ready to forward.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// The operations pages need from the analysis service.
///
/// Carried in `AppState` as `Arc<dyn AnalysisBackend>` so handlers can run
/// against a fake in tests.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze_cv(
        &self,
        upload: ResumeUpload,
        target_role: &str,
    ) -> Result<RunId, BackendError>;

    async fn fetch_analysis(&self, run_id: RunId) -> Result<Option<AnalysisRun>, BackendError>;

    /// Browser-facing URL of the downloadable report for a run.
    fn report_url(&self, run_id: RunId) -> String;
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    public_base_url: String,
}

impl BackendClient {
    /// `base_url` is used for server-side calls; `public_base_url` for links
    /// handed to the browser. They differ when the backend sits on an internal network.
    pub fn new(
        base_url: &str,
        public_base_url: &str,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST /mentor/analyze. Never retried: each call creates a new run.
    pub async fn analyze_cv(
        &self,
        upload: ResumeUpload,
        target_role: &str,
    ) -> Result<RunId, BackendError> {
        let url = format!("{}/mentor/analyze", self.base_url);
        debug!(
            "Submitting CV '{}' ({} bytes) for role '{}'",
            upload.file_name,
            upload.bytes.len(),
            target_role
        );

        let form = multipart::Form::new()
            .part("file", file_part(upload))
            .text("target_role", target_role.to_string());

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: detail_message(&body).unwrap_or_else(|| {
                    format!("Failed to analyze CV (status {}).", status.as_u16())
                }),
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        let run_id = extract_run_id(&value).ok_or(BackendError::MissingRunId { raw: body })?;
        debug!("Analysis created: run_id={run_id}");
        Ok(run_id)
    }

    /// GET /analysis/{id}. Retries 5xx and transport failures with exponential backoff.
    /// A JSON `null` body means the backend has no record to show.
    pub async fn fetch_analysis(
        &self,
        run_id: RunId,
    ) -> Result<Option<AnalysisRun>, BackendError> {
        let url = format!("{}/analysis/{}", self.base_url, run_id);
        let mut attempt = 1;

        loop {
            let failure = match self.client.get(&url).send().await {
                Err(e) => BackendError::Http(e),
                Ok(response) => {
                    let status = response.status();
                    if status.is_server_error() {
                        let body = response.text().await.unwrap_or_default();
                        load_failure(status, &body)
                    } else {
                        let body = response.text().await?;
                        if !status.is_success() {
                            return Err(load_failure(status, &body));
                        }

                        let run: Option<AnalysisRun> = serde_json::from_str(&body)?;
                        debug!(
                            "Fetched analysis {}: found={}, roadmap_chars={}",
                            run_id,
                            run.is_some(),
                            run.as_ref().map_or(0, |r| r.roadmap_md.len())
                        );
                        return Ok(run);
                    }
                }
            };

            if attempt >= MAX_ATTEMPTS {
                warn!("Fetching analysis {run_id} failed after {attempt} attempts: {failure}");
                return Err(failure);
            }

            let delay = Duration::from_millis(BASE_BACKOFF_MS * (1 << (attempt - 1)));
            warn!(
                "Fetching analysis {} failed (attempt {}), retrying after {}ms: {}",
                run_id,
                attempt,
                delay.as_millis(),
                failure
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    pub fn report_url(&self, run_id: RunId) -> String {
        format!("{}/analysis/{}/report", self.public_base_url, run_id)
    }
}

#[async_trait]
impl AnalysisBackend for BackendClient {
    async fn analyze_cv(
        &self,
        upload: ResumeUpload,
        target_role: &str,
    ) -> Result<RunId, BackendError> {
        BackendClient::analyze_cv(self, upload, target_role).await
    }

    async fn fetch_analysis(&self, run_id: RunId) -> Result<Option<AnalysisRun>, BackendError> {
        BackendClient::fetch_analysis(self, run_id).await
    }

    fn report_url(&self, run_id: RunId) -> String {
        BackendClient::report_url(self, run_id)
    }
}

fn file_part(upload: ResumeUpload) -> multipart::Part {
    let part = || multipart::Part::bytes(upload.bytes.to_vec()).file_name(upload.file_name.clone());
    match upload.content_type.as_deref() {
        // A malformed browser-supplied content type is dropped, not fatal.
        Some(content_type) => part().mime_str(content_type).unwrap_or_else(|_| part()),
        None => part(),
    }
}

fn load_failure(status: StatusCode, body: &str) -> BackendError {
    BackendError::Api {
        status: status.as_u16(),
        message: detail_message(body)
            .unwrap_or_else(|| format!("Failed to load analysis (status {}).", status.as_u16())),
    }
}

/// Pulls the user-facing `detail` out of an error body.
/// Non-string details (e.g. validation error arrays) are shown as JSON.
fn detail_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Returns the run id under the first non-null key of `RUN_ID_KEYS`.
fn extract_run_id(value: &Value) -> Option<RunId> {
    let candidate = RUN_ID_KEYS
        .iter()
        .filter_map(|key| value.get(*key))
        .find(|v| !v.is_null())?;

    match candidate {
        Value::Number(n) => n.as_i64().and_then(RunId::new),
        Value::String(s) => s.trim().parse::<i64>().ok().and_then(RunId::new),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{
        extract::{Multipart, Path, State},
        http::StatusCode as AxumStatus,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(base: &str) -> BackendClient {
        BackendClient::new(base, "http://public.example", Duration::from_secs(5)).unwrap()
    }

    fn sample_upload() -> ResumeUpload {
        ResumeUpload {
            file_name: "cv.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: Bytes::from_static(b"%PDF-1.4 fake"),
        }
    }

    /// Accepts the upload only if both form fields arrived intact.
    async fn strict_analyze(mut multipart: Multipart) -> (AxumStatus, Json<Value>) {
        let mut file: Option<(String, usize)> = None;
        let mut role: Option<String> = None;

        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let len = field.bytes().await.map(|b| b.len()).unwrap_or(0);
                    file = Some((file_name, len));
                }
                "target_role" => role = field.text().await.ok(),
                _ => {}
            }
        }

        match (file, role) {
            (Some((name, len)), Some(role)) if name == "cv.pdf" && len > 0 && role == "Data Analyst" => {
                (AxumStatus::OK, Json(json!({"run_id": 12, "target_role": role})))
            }
            _ => (
                AxumStatus::UNPROCESSABLE_ENTITY,
                Json(json!({"detail": "bad form"})),
            ),
        }
    }

    #[test]
    fn test_extract_run_id_key_order() {
        assert_eq!(extract_run_id(&json!({"run_id": 5, "id": 9})), RunId::new(5));
        assert_eq!(extract_run_id(&json!({"id": 9})), RunId::new(9));
        assert_eq!(extract_run_id(&json!({"runId": "14"})), RunId::new(14));
        assert_eq!(extract_run_id(&json!({"analysis_id": 3})), RunId::new(3));
        assert_eq!(extract_run_id(&json!({"analysisId": " 8 "})), RunId::new(8));
    }

    #[test]
    fn test_extract_run_id_skips_null_keys() {
        assert_eq!(
            extract_run_id(&json!({"run_id": null, "analysisId": 21})),
            RunId::new(21)
        );
    }

    #[test]
    fn test_extract_run_id_rejects_unusable_values() {
        assert_eq!(extract_run_id(&json!({})), None);
        assert_eq!(extract_run_id(&json!({"run_id": 0})), None);
        assert_eq!(extract_run_id(&json!({"run_id": "abc"})), None);
        assert_eq!(extract_run_id(&json!({"run_id": [1]})), None);
        assert_eq!(extract_run_id(&json!([1, 2])), None);
    }

    #[test]
    fn test_detail_message_variants() {
        assert_eq!(
            detail_message(r#"{"detail": "Failed to analyze CV"}"#).as_deref(),
            Some("Failed to analyze CV")
        );
        assert_eq!(
            detail_message(r#"{"detail": [{"loc": ["body", "file"]}]}"#).as_deref(),
            Some(r#"[{"loc":["body","file"]}]"#)
        );
        assert_eq!(detail_message(r#"{"detail": ""}"#), None);
        assert_eq!(detail_message(r#"{"other": 1}"#), None);
        assert_eq!(detail_message("<html>502</html>"), None);
    }

    #[test]
    fn test_report_url_uses_public_base() {
        let client =
            BackendClient::new("http://backend:8000/", "http://localhost:8000/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.base_url(), "http://backend:8000");
        assert_eq!(
            client.report_url(RunId::new(4).unwrap()),
            "http://localhost:8000/analysis/4/report"
        );
    }

    #[tokio::test]
    async fn test_analyze_cv_forwards_multipart_form() {
        let base = spawn_backend(Router::new().route("/mentor/analyze", post(strict_analyze))).await;
        let run_id = client_for(&base)
            .analyze_cv(sample_upload(), "Data Analyst")
            .await
            .unwrap();
        assert_eq!(run_id.get(), 12);
    }

    #[tokio::test]
    async fn test_analyze_cv_reports_backend_detail() {
        let base = spawn_backend(Router::new().route("/mentor/analyze", post(strict_analyze))).await;
        let err = client_for(&base)
            .analyze_cv(sample_upload(), "Someone Else")
            .await
            .unwrap_err();
        assert_eq!(err.backend_status(), Some(422));
        assert_eq!(err.user_message(), "bad form");
    }

    #[tokio::test]
    async fn test_analyze_cv_generic_message_without_detail() {
        let router = Router::new().route(
            "/mentor/analyze",
            post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn_backend(router).await;
        let err = client_for(&base)
            .analyze_cv(sample_upload(), "Data Analyst")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Failed to analyze CV (status 500).");
    }

    #[tokio::test]
    async fn test_analyze_cv_fallback_run_id_key() {
        let router = Router::new().route(
            "/mentor/analyze",
            post(|| async { Json(json!({"analysisId": "77"})) }),
        );
        let base = spawn_backend(router).await;
        let run_id = client_for(&base)
            .analyze_cv(sample_upload(), "Data Analyst")
            .await
            .unwrap();
        assert_eq!(run_id.get(), 77);
    }

    #[tokio::test]
    async fn test_analyze_cv_missing_run_id_keeps_raw_body() {
        let router = Router::new().route(
            "/mentor/analyze",
            post(|| async { Json(json!({"status": "queued"})) }),
        );
        let base = spawn_backend(router).await;
        let err = client_for(&base)
            .analyze_cv(sample_upload(), "Data Analyst")
            .await
            .unwrap_err();
        match &err {
            BackendError::MissingRunId { raw } => assert!(raw.contains("queued")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.user_message().starts_with("Analysis did not return a run_id."));
    }

    #[tokio::test]
    async fn test_fetch_analysis_returns_record() {
        let router = Router::new().route(
            "/analysis/:id",
            get(|Path(id): Path<i64>| async move {
                Json(json!({
                    "id": id,
                    "target_role": "MLOps Engineer",
                    "skills": {"validated_skills": ["docker"]},
                    "gap_report": {"strengths": ["docker"], "missing_core": ["kubernetes"], "missing_nice_to_have": []},
                    "roadmap_md": "Phase 1\n- kubernetes",
                    "projects": []
                }))
            }),
        );
        let base = spawn_backend(router).await;
        let run = client_for(&base)
            .fetch_analysis(RunId::new(9).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(run.id, 9);
        assert_eq!(run.target_role, "MLOps Engineer");
        assert_eq!(run.gap_counts().core_gaps, 1);
    }

    #[tokio::test]
    async fn test_fetch_analysis_null_body_is_none() {
        let router = Router::new().route("/analysis/:id", get(|| async { Json(Value::Null) }));
        let base = spawn_backend(router).await;
        let run = client_for(&base)
            .fetch_analysis(RunId::new(1).unwrap())
            .await
            .unwrap();
        assert!(run.is_none());
    }

    #[tokio::test]
    async fn test_fetch_analysis_not_found_is_not_retried() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                "/analysis/:id",
                get(|State(hits): State<Arc<AtomicUsize>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (
                        AxumStatus::NOT_FOUND,
                        Json(json!({"detail": "Analysis run not found"})),
                    )
                }),
            )
            .with_state(hits.clone());
        let base = spawn_backend(router).await;
        let err = client_for(&base)
            .fetch_analysis(RunId::new(404).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.backend_status(), Some(404));
        assert_eq!(err.user_message(), "Analysis run not found");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_analysis_retries_server_errors() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                "/analysis/:id",
                get(|State(hits): State<Arc<AtomicUsize>>| async move {
                    if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                        (AxumStatus::SERVICE_UNAVAILABLE, Json(Value::Null))
                    } else {
                        (
                            AxumStatus::OK,
                            Json(json!({"id": 2, "target_role": "AI Engineer"})),
                        )
                    }
                }),
            )
            .with_state(hits.clone());
        let base = spawn_backend(router).await;
        let run = client_for(&base)
            .fetch_analysis(RunId::new(2).unwrap())
            .await
            .unwrap();
        assert_eq!(run.map(|r| r.id), Some(2));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_analysis_gives_up_after_max_attempts() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                "/analysis/:id",
                get(|State(hits): State<Arc<AtomicUsize>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (AxumStatus::BAD_GATEWAY, "upstream down")
                }),
            )
            .with_state(hits.clone());
        let base = spawn_backend(router).await;
        let err = client_for(&base)
            .fetch_analysis(RunId::new(3).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.backend_status(), Some(502));
        assert_eq!(err.user_message(), "Failed to load analysis (status 502).");
        assert_eq!(hits.load(Ordering::SeqCst), MAX_ATTEMPTS as usize);
    }

    #[tokio::test]
    async fn test_fetch_analysis_unreachable_backend_returns_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{addr}"))
            .fetch_analysis(RunId::new(8).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Http(_)));
        assert_eq!(err.backend_status(), None);
        assert_eq!(
            err.user_message(),
            "Could not reach the analysis service. Please try again."
        );
    }
}
