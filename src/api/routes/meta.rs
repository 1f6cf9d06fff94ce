use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub matches: usize,
    pub sets: usize,
    pub characters: usize,
}

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        matches: state.store.match_count()?,
        sets: state.store.set_count()?,
        characters: state.characters.len(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::models::test_support::match_record;
    use crate::models::CharacterTable;
    use crate::storage::{JsonlMatchStore, StorageConfig, DEFAULT_SET_WINDOW};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_endpoint() {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState {
            store: Arc::new(JsonlMatchStore::new(StorageConfig::new(
                tmp.path().to_path_buf(),
            ))),
            characters: Arc::new(CharacterTable::tekken8()),
            set_window: DEFAULT_SET_WINDOW,
        };
        state
            .store
            .append_matches(&[match_record("m1", 100, ("alice", 3, 3), ("bob", 7, 1), 1)])
            .unwrap();

        let app = build_router(state);
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["name"], "polaris-tracker");
        assert_eq!(json["matches"], 1);
        assert_eq!(json["sets"], 0);
        assert!(json["characters"].as_u64().unwrap() > 30);
    }
}
