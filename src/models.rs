use crate::services::litesizer::types::PSD_COLUMNS;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingKind {
    Intensity,
    Volume,
    Number,
}

impl WeightingKind {
    pub const ALL: [WeightingKind; 3] = [
        WeightingKind::Intensity,
        WeightingKind::Volume,
        WeightingKind::Number,
    ];

    /// Header text of this band in the export.
    pub fn label(&self) -> &'static str {
        match self {
            WeightingKind::Intensity => "Intensity weighted",
            WeightingKind::Volume => "Volume weighted",
            WeightingKind::Number => "Number weighted",
        }
    }
}

impl fmt::Display for WeightingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One diameter bin of a particle size distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PsdRow {
    #[serde(rename = "Particle Diameter (nm)")]
    pub diameter_nm: f64,
    #[serde(rename = "Relative Frequency (%)")]
    pub relative_frequency_pct: f64,
    #[serde(rename = "Cumulative Undersize (%)")]
    pub cumulative_undersize_pct: f64,
}

/// Rows in sheet order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionTable {
    pub kind: WeightingKind,
    pub rows: Vec<PsdRow>,
}

impl DistributionTable {
    pub fn empty(kind: WeightingKind) -> Self {
        Self { kind, rows: Vec::new() }
    }

    pub fn column_names(&self) -> [&'static str; 3] {
        PSD_COLUMNS
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Identifiers carried by the export file name,
/// `LS<test id>_<file name id>-<run number>.xlsx`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleId {
    pub test_id: String,
    pub file_name_id: String,
    pub run_number: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRecord {
    #[serde(flatten)]
    pub id: SampleId,

    pub workbook_name: Option<String>,
    pub measurement_name: Option<String>,
    pub measurement_mode: Option<String>,
    pub comment: Option<String>,

    pub hydrodynamic_diameter: Option<f64>,
    pub polydispersity_index: Option<f64>,
    pub intercept_g1: Option<f64>,
    pub baseline: Option<f64>,
    pub mean_intensity: Option<f64>,
    pub absolute_intensity: Option<f64>,
    pub fit_error: Option<f64>,
    pub diffusion_coefficient: Option<f64>,

    pub psd_intensity: DistributionTable,
    pub psd_volume: DistributionTable,
    pub psd_number: DistributionTable,
}

impl SampleRecord {
    pub fn distribution(&self, kind: WeightingKind) -> &DistributionTable {
        match kind {
            WeightingKind::Intensity => &self.psd_intensity,
            WeightingKind::Volume => &self.psd_volume,
            WeightingKind::Number => &self.psd_number,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Extracted {
        file: String,
        record: SampleRecord,
    },
    Failed {
        file: String,
        kind: String,
        reason: String,
    },
}

impl FileOutcome {
    pub fn file(&self) -> &str {
        match self {
            FileOutcome::Extracted { file, .. } | FileOutcome::Failed { file, .. } => file,
        }
    }

    pub fn record(&self) -> Option<&SampleRecord> {
        match self {
            FileOutcome::Extracted { record, .. } => Some(record),
            FileOutcome::Failed { .. } => None,
        }
    }
}

/// Per-file outcomes of one batch run, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub extracted: usize,
    pub failed: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<FileOutcome>) -> Self {
        let extracted = outcomes.iter().filter(|o| o.record().is_some()).count();
        Self {
            generated_at: Utc::now(),
            extracted,
            failed: outcomes.len() - extracted,
            outcomes,
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &SampleRecord> {
        self.outcomes.iter().filter_map(FileOutcome::record)
    }
}
