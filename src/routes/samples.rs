use axum::{
    extract::State,
    routing::post,
    Router,
    Json,
    http::Method,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use crate::{
    AppState,
    error::AppError,
    models::BatchReport,
    services::{
        file_processor::{self, FileProcessor},
        litesizer::{ExtractError, InputFault},
    },
};
use tower_http::cors::{CorsLayer, Any};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/samples/batch", post(extract_batch))
        .route("/samples/analyze", post(analyze_samples))
        .layer(cors)
}

#[derive(Debug, Default, Deserialize)]
pub struct BatchRequest {
    directory: Option<PathBuf>,
    parallel: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct FileInfo {
    #[serde(rename = "type")]
    file_type: String,
    signed_url: String,
    file_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    files: Vec<FileInfo>,
}

async fn extract_batch(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchReport>, AppError> {
    let directory = request
        .directory
        .or_else(|| state.config.data_dir.clone())
        .ok_or_else(|| AppError::InvalidInput("No directory given and LITESIZER_DATA_DIR unset".to_string()))?;

    let mut processor = FileProcessor::from_config(&state.config);
    if let Some(parallel) = request.parallel {
        processor = processor.with_parallel(parallel);
    }

    tracing::info!("Starting batch extraction in {}", directory.display());
    let report = tokio::task::spawn_blocking(move || processor.process_dir(&directory)).await??;

    Ok(Json(report))
}

async fn analyze_samples(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<BatchReport>, AppError> {
    if request.files.is_empty() {
        return Err(AppError::InvalidInput("No file provided".to_string()));
    }
    if let Some(file) = request
        .files
        .iter()
        .find(|f| !f.file_type.to_lowercase().contains("xlsx"))
    {
        tracing::error!("Unsupported file type: {}", file.file_type);
        return Err(AppError::InvalidInput("Only XLSX files are supported".to_string()));
    }

    let processor = FileProcessor::from_config(&state.config);
    let mut outcomes = Vec::with_capacity(request.files.len());

    for file in request.files {
        let download_start = std::time::Instant::now();
        let data = match file_processor::load_file_from_url(&file.signed_url).await {
            Ok(data) => data,
            Err(e) => {
                let fault = ExtractError::UnreadableInput(InputFault::Io(e.to_string()));
                outcomes.push(file_processor::outcome(file.file_name, Err(fault)));
                continue;
            }
        };
        tracing::info!(
            "Downloaded {}, size: {}KB, took: {:?}",
            file.file_name,
            data.len() / 1024,
            download_start.elapsed()
        );

        let worker = processor.clone();
        let name = file.file_name.clone();
        let result = tokio::task::spawn_blocking(move || worker.process_bytes(&name, data)).await?;
        outcomes.push(file_processor::outcome(file.file_name, result));
    }

    Ok(Json(BatchReport::new(outcomes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::http::StatusCode;
    use std::fs;

    fn state(config: Config) -> State<Arc<AppState>> {
        State(Arc::new(AppState::new(config)))
    }

    #[tokio::test]
    async fn batch_without_directory_is_rejected() {
        let err = extract_batch(state(Config::default()), Json(BatchRequest::default()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn batch_reports_failures_per_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("LS20230401_L00000001-002-1.xlsx"), b"junk").unwrap();

        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        let Json(report) = extract_batch(state(config), Json(BatchRequest::default()))
            .await
            .unwrap();

        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.failed, 1);
    }

    #[tokio::test]
    async fn failed_download_is_reported_as_unreadable() {
        let request = AnalyzeRequest {
            files: vec![FileInfo {
                file_type: "xlsx".to_string(),
                signed_url: "http://127.0.0.1:9/LS20230401_L00000001-002-1.xlsx".to_string(),
                file_name: "LS20230401_L00000001-002-1.xlsx".to_string(),
            }],
        };
        let Json(report) = analyze_samples(state(Config::default()), Json(request))
            .await
            .unwrap();

        assert_eq!(report.failed, 1);
        let expected = ExtractError::UnreadableInput(InputFault::NoWorksheet);
        assert!(matches!(
            &report.outcomes[0],
            crate::models::FileOutcome::Failed { file, kind, reason }
                if file == "LS20230401_L00000001-002-1.xlsx"
                    && kind == expected.kind()
                    && reason.contains("Failed to fetch file")
        ));
    }

    #[test]
    fn non_xlsx_uploads_are_rejected() {
        let request = AnalyzeRequest {
            files: vec![FileInfo {
                file_type: "text/csv".to_string(),
                signed_url: "http://localhost/none".to_string(),
                file_name: "LS20230401_L00000001-002-1.csv".to_string(),
            }],
        };
        let err = tokio_test::block_on(analyze_samples(state(Config::default()), Json(request)))
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
