use crate::config::Config;
use crate::error::AppError;
use crate::models::{BatchReport, FileOutcome, SampleId, SampleRecord};
use crate::services::litesizer::{ExtractError, Grid, InputFault, SampleRecordBuilder};
use bytes::Bytes;
use calamine::{open_workbook, open_workbook_from_rs, Reader, Xlsx};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use reqwest::Client;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

static SAMPLE_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"LS(\d{8})_([LR]\d{8}-\d{3})-(\d+)").expect("sample id pattern is valid")
});

/// Splits `LS20230401_L00000001-002-1.xlsx` into its identifiers.
pub fn parse_sample_id(path: &Path) -> Result<SampleId, ExtractError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| InputFault::FileName(path.display().to_string()))?;

    let caps = SAMPLE_ID_PATTERN
        .captures(stem)
        .ok_or_else(|| InputFault::FileName(stem.to_string()))?;

    Ok(SampleId {
        test_id: caps[1].to_string(),
        file_name_id: caps[2].to_string(),
        run_number: caps[3].to_string(),
        file_name: stem.to_string(),
    })
}

/// `LS*.xlsx`
fn is_sample_file(name: &str) -> bool {
    name.starts_with("LS") && name.ends_with(".xlsx")
}

/// Export files directly inside `dir`, sorted by name. Symlinks are kept
/// unless they point at a directory; a dangling one fails later as
/// unreadable input.
pub fn list_sample_files(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| InputFault::Io(e.to_string()))?;
        let matches = entry
            .file_name()
            .to_str()
            .map_or(false, is_sample_file);
        if matches && !entry.path().is_dir() {
            files.push(entry.into_path());
        }
    }
    tracing::info!("Found {} sample files in {}", files.len(), dir.display());
    Ok(files)
}

fn first_sheet<R: Read + Seek>(mut workbook: Xlsx<R>) -> Result<Grid, ExtractError> {
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(InputFault::NoWorksheet)??;
    Ok(Grid::from_range(&range))
}

pub fn load_grid_from_path(path: &Path) -> Result<Grid, ExtractError> {
    let workbook: Xlsx<_> = open_workbook(path)?;
    first_sheet(workbook)
}

pub fn load_grid_from_bytes(data: Bytes) -> Result<Grid, ExtractError> {
    let workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(data))?;
    first_sheet(workbook)
}

/// Batch collaborator around the extraction core: file naming, size
/// limits, workbook loading and per-file outcome collection.
#[derive(Debug, Clone)]
pub struct FileProcessor {
    max_file_size: u64,
    parallel: bool,
}

impl FileProcessor {
    pub fn new(max_file_size: u64, parallel: bool) -> Self {
        Self {
            max_file_size,
            parallel,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_file_size as u64, config.parallel)
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn check_size(&self, size: u64) -> Result<(), ExtractError> {
        if size > self.max_file_size {
            return Err(InputFault::TooLarge {
                size,
                limit: self.max_file_size,
            }
            .into());
        }
        Ok(())
    }

    pub fn process_path(&self, path: &Path) -> Result<SampleRecord, ExtractError> {
        let id = parse_sample_id(path)?;
        self.check_size(std::fs::metadata(path)?.len())?;
        let grid = load_grid_from_path(path)?;
        SampleRecordBuilder::new(&grid).build(id)
    }

    pub fn process_bytes(&self, file_name: &str, data: Bytes) -> Result<SampleRecord, ExtractError> {
        let id = parse_sample_id(Path::new(file_name))?;
        self.check_size(data.len() as u64)?;
        let grid = load_grid_from_bytes(data)?;
        SampleRecordBuilder::new(&grid).build(id)
    }

    /// Runs every file; one failure never stops the others. Outcomes keep
    /// the order of `paths`.
    pub fn process_batch(&self, paths: &[PathBuf]) -> BatchReport {
        let start = std::time::Instant::now();
        let total = paths.len();
        let run = |(idx, path): (usize, &PathBuf)| {
            tracing::info!("[{}/{}] Processing {}", idx + 1, total, path.display());
            outcome(path.display().to_string(), self.process_path(path))
        };

        let outcomes: Vec<FileOutcome> = if self.parallel {
            paths.par_iter().enumerate().map(run).collect()
        } else {
            paths.iter().enumerate().map(run).collect()
        };

        let report = BatchReport::new(outcomes);
        tracing::info!(
            "Batch finished in {:?}: {} extracted, {} failed",
            start.elapsed(),
            report.extracted,
            report.failed
        );
        report
    }

    pub fn process_dir(&self, dir: &Path) -> Result<BatchReport, ExtractError> {
        let files = list_sample_files(dir)?;
        Ok(self.process_batch(&files))
    }
}

pub fn outcome(file: String, result: Result<SampleRecord, ExtractError>) -> FileOutcome {
    match result {
        Ok(record) => FileOutcome::Extracted { file, record },
        Err(e) => {
            tracing::warn!("Skipping {}: {}", file, e);
            FileOutcome::Failed {
                file,
                kind: e.kind().to_string(),
                reason: e.to_string(),
            }
        }
    }
}

pub async fn load_file_from_url(url: &str) -> Result<Bytes, AppError> {
    let client = Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::FileProcessingError(format!("Failed to fetch file: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::FileProcessingError(
            format!("Failed to fetch file. Status: {}", response.status())
        ));
    }

    response
        .bytes()
        .await
        .map_err(|e| AppError::FileProcessingError(format!("Failed to read response bytes: {}", e)))
}
