use super::distribution::DistributionTableExtractor;
use super::error::{ExtractError, FieldCause};
use super::grid::{Cell, Grid};
use super::resolver::{resolve_adjacent, resolve_nearby, Resolution};
use super::types::*;
use crate::models::{SampleId, SampleRecord, WeightingKind};
use tracing::debug;

/// Assembles one [`SampleRecord`] from a loaded sheet.
pub struct SampleRecordBuilder<'a> {
    grid: &'a Grid,
}

impl<'a> SampleRecordBuilder<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn build(&self, id: SampleId) -> Result<SampleRecord, ExtractError> {
        let extractor = DistributionTableExtractor::new(self.grid);

        Ok(SampleRecord {
            id,
            workbook_name: self.metadata(WORKBOOK_NAME),
            measurement_name: self.metadata(MEASUREMENT_NAME),
            measurement_mode: self.metadata(MEASUREMENT_MODE),
            comment: self.metadata(COMMENT),

            hydrodynamic_diameter: self.numeric(HYDRODYNAMIC_DIAMETER)?,
            polydispersity_index: self.numeric(POLYDISPERSITY_INDEX)?,
            intercept_g1: self.numeric(INTERCEPT_G1)?,
            baseline: self.numeric(BASELINE)?,
            mean_intensity: self.numeric(MEAN_INTENSITY)?,
            absolute_intensity: self.numeric(ABSOLUTE_INTENSITY)?,
            fit_error: self.numeric(FIT_ERROR)?,
            diffusion_coefficient: self.numeric(DIFFUSION_COEFFICIENT)?,

            psd_intensity: extractor.extract(WeightingKind::Intensity)?,
            psd_volume: extractor.extract(WeightingKind::Volume)?,
            psd_number: extractor.extract(WeightingKind::Number)?,
        })
    }

    fn metadata(&self, label: &str) -> Option<String> {
        let view = self.grid.select(&METADATA_COLUMNS);
        match resolve_adjacent(&view, &Cell::text(label)) {
            Resolution::Resolved { value, .. } if !value.is_empty() => Some(value.to_string()),
            Resolution::Resolved { .. } => None,
            unresolved => {
                debug!("metadata {:?} unresolved: {:?}", label, unresolved);
                None
            }
        }
    }

    /// Required labels fail the record; optional ones fall back to `None`.
    fn numeric(&self, label: &str) -> Result<Option<f64>, ExtractError> {
        let view = self.grid.select(&RESULT_COLUMNS);
        let cause = match resolve_nearby(&view, &Cell::text(label)) {
            Resolution::Resolved { value, .. } => match value.to_number() {
                Some(n) => return Ok(Some(n)),
                None if value.is_empty() => FieldCause::Absent,
                None => FieldCause::NotNumeric(value.to_string()),
            },
            Resolution::Absent => FieldCause::Absent,
            Resolution::Ambiguous(n) => FieldCause::Ambiguous(n),
        };

        if REQUIRED_RESULTS.contains(&label) {
            return Err(ExtractError::MissingRequiredField {
                label: label.to_string(),
                cause,
            });
        }
        debug!("optional result {:?} left empty: {}", label, cause);
        Ok(None)
    }
}
