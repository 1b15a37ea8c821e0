use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness probe; reports the crate name and version this binary was built from.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_package_identity() {
        let Json(body) = health_handler().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "web");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
