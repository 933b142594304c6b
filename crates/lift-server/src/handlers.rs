//! Request handlers for the data and upload endpoints.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use lift_core::models::ExerciseSeries;
use tracing::{info, warn};

use crate::server::AppContext;

/// `GET /api/data` — the full store snapshot, keyed by user.
pub async fn all_data(
    State(ctx): State<AppContext>,
) -> Json<HashMap<String, ExerciseSeries>> {
    Json(ctx.store.snapshot())
}

/// `GET /api/data/:user` — one user's series, 404 when unknown.
pub async fn user_data(
    State(ctx): State<AppContext>,
    Path(user): Path<String>,
) -> Result<Json<ExerciseSeries>, StatusCode> {
    ctx.store.query(&user).map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// `POST /upload` — multipart form with a `user` field and a `file` field.
///
/// The posted export is saved as `<storage_dir>/<user>` (the file name is
/// the store key) and a full reload runs before the response is sent, so
/// a following `GET /api/data` already sees the new data. Load failures
/// inside the sweep only skip the affected file; errors surfaced here are
/// request-level (malformed form, unwritable storage).
pub async fn upload(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Result<String, (StatusCode, String)> {
    let mut user: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut payload: Option<axum::body::Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("user") => {
                user = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
                );
            }
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                payload = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let user = user
        .filter(|u| !u.is_empty())
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "missing 'user' field".to_string()))?;
    let payload = payload
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "missing 'file' field".to_string()))?;

    // The user name becomes a file name inside the storage directory; keep
    // it from escaping that directory.
    if user.contains(['/', '\\']) || user == ".." || user == "." {
        warn!("Rejected upload with unsafe user name {:?}", user);
        return Err((StatusCode::BAD_REQUEST, "invalid 'user' field".to_string()));
    }

    let dest = ctx.store.storage_dir().join(&user);
    tokio::fs::write(&dest, &payload)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let store = ctx.store.clone();
    let loaded = tokio::task::spawn_blocking(move || store.load())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let file_name = file_name.unwrap_or_else(|| user.clone());
    info!(
        "Upload for {:?} saved ({} bytes); {} user series loaded",
        user,
        payload.len(),
        loaded
    );

    Ok(format!("'{}' uploaded!", file_name))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use lift_data::store::DataStore;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const IOS_HEADER: &str =
        "Date,Workout Name,Duration,Exercise Name,Set Order,Weight,Reps,Distance,Seconds,Notes,Workout Notes,RPE";

    fn write_export(dir: &std::path::Path, name: &str, lines: &[&str]) {
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    fn test_app(storage: &std::path::Path, assets: &std::path::Path) -> axum::Router {
        let store = Arc::new(DataStore::new(storage));
        store.load();
        crate::build_router(AppContext { store }, assets)
    }

    async fn get_json(
        app: &axum::Router,
        path: &str,
    ) -> (StatusCode, Option<serde_json::Value>) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            None
        } else {
            serde_json::from_slice(&body).ok()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_all_data_returns_every_user() {
        let storage = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();
        write_export(
            storage.path(),
            "alice",
            &[IOS_HEADER, "2024-01-01 10:00:00,Push,1h,Bench,1,100,5,,,,,"],
        );

        let app = test_app(storage.path(), assets.path());
        let (status, body) = get_json(&app, "/api/data").await;

        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        let point = &body["alice"]["Bench"][0];
        assert_eq!(point["maxWeight"], 100.0);
        assert_eq!(point["totalVolume"], 500.0);
        assert_eq!(point["maxOneRepMax"], 112.5);
    }

    #[tokio::test]
    async fn test_user_data_unknown_user_is_404() {
        let storage = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();

        let app = test_app(storage.path(), assets.path());
        let (status, _) = get_json(&app, "/api/data/nobody").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_user_data_returns_single_series() {
        let storage = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();
        write_export(
            storage.path(),
            "alice",
            &[
                IOS_HEADER,
                "2024-01-01 10:00:00,Legs,1h,Squat,1,80,5,,,,,",
                "2024-01-01 10:00:00,Legs,1h,Squat,2,90,3,,,,,",
            ],
        );

        let app = test_app(storage.path(), assets.path());
        let (status, body) = get_json(&app, "/api/data/alice").await;

        assert_eq!(status, StatusCode::OK);
        let points = &body.unwrap()["Squat"];
        assert_eq!(points.as_array().unwrap().len(), 1);
        assert_eq!(points[0]["maxWeight"], 90.0);
        assert_eq!(points[0]["totalVolume"], 670.0);
    }

    #[tokio::test]
    async fn test_upload_saves_file_and_reloads_store() {
        let storage = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();
        let app = test_app(storage.path(), assets.path());

        let csv = format!(
            "{}\n2024-01-01 10:00:00,Push,1h,Bench,1,100,5,,,,,\n",
            IOS_HEADER
        );
        let boundary = "liftlog-test-boundary";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"user\"\r\n\r\nalice\r\n--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"strong.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
            b = boundary,
            csv = csv
        );

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={}", boundary),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(storage.path().join("alice").is_file());

        // The reload ran before the response, so the data is queryable.
        let (status, body) = get_json(&app, "/api/data/alice").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["Bench"][0]["maxWeight"], 100.0);
    }

    #[tokio::test]
    async fn test_upload_without_user_field_is_rejected() {
        let storage = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();
        let app = test_app(storage.path(), assets.path());

        let boundary = "liftlog-test-boundary";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"strong.csv\"\r\n\r\ndata\r\n--{b}--\r\n",
            b = boundary
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={}", boundary),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_with_traversal_user_is_rejected() {
        let storage = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();
        let app = test_app(storage.path(), assets.path());

        let boundary = "liftlog-test-boundary";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"user\"\r\n\r\n../escape\r\n--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"x.csv\"\r\n\r\ndata\r\n--{b}--\r\n",
            b = boundary
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={}", boundary),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
