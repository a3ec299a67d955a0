use super::types::PSD_COLUMNS;
use crate::models::{DistributionTable, SampleRecord, WeightingKind};
use polars::prelude::*;

impl DistributionTable {
    /// The table as a three-column frame, in sheet row order.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let [diameter, frequency, cumulative] = PSD_COLUMNS;
        DataFrame::new(vec![
            Series::new(diameter, self.rows.iter().map(|r| r.diameter_nm).collect::<Vec<f64>>()),
            Series::new(
                frequency,
                self.rows.iter().map(|r| r.relative_frequency_pct).collect::<Vec<f64>>(),
            ),
            Series::new(
                cumulative,
                self.rows.iter().map(|r| r.cumulative_undersize_pct).collect::<Vec<f64>>(),
            ),
        ])
    }
}

fn text_column<F>(name: &str, records: &[SampleRecord], get: F) -> Series
where
    F: Fn(&SampleRecord) -> Option<&str>,
{
    Series::new(name, records.iter().map(get).collect::<Vec<Option<&str>>>())
}

fn number_column<F>(name: &str, records: &[SampleRecord], get: F) -> Series
where
    F: Fn(&SampleRecord) -> Option<f64>,
{
    Series::new(name, records.iter().map(get).collect::<Vec<Option<f64>>>())
}

/// One row per record: identifiers, metadata, scalar results and the row
/// count of each distribution table. Absent values become nulls.
pub fn records_to_dataframe(records: &[SampleRecord]) -> PolarsResult<DataFrame> {
    let mut columns = vec![
        text_column("test_id", records, |r| Some(r.id.test_id.as_str())),
        text_column("file_name_id", records, |r| Some(r.id.file_name_id.as_str())),
        text_column("run_number", records, |r| Some(r.id.run_number.as_str())),
        text_column("file_name", records, |r| Some(r.id.file_name.as_str())),
        text_column("workbook_name", records, |r| r.workbook_name.as_deref()),
        text_column("measurement_name", records, |r| r.measurement_name.as_deref()),
        text_column("measurement_mode", records, |r| r.measurement_mode.as_deref()),
        text_column("comment", records, |r| r.comment.as_deref()),
        number_column("hydrodynamic_diameter", records, |r| r.hydrodynamic_diameter),
        number_column("polydispersity_index", records, |r| r.polydispersity_index),
        number_column("intercept_g1", records, |r| r.intercept_g1),
        number_column("baseline", records, |r| r.baseline),
        number_column("mean_intensity", records, |r| r.mean_intensity),
        number_column("absolute_intensity", records, |r| r.absolute_intensity),
        number_column("fit_error", records, |r| r.fit_error),
        number_column("diffusion_coefficient", records, |r| r.diffusion_coefficient),
    ];

    for kind in WeightingKind::ALL {
        let name = format!("psd_{}_rows", kind_key(kind));
        let counts: Vec<u32> = records
            .iter()
            .map(|r| r.distribution(kind).len() as u32)
            .collect();
        columns.push(Series::new(&name, counts));
    }

    DataFrame::new(columns)
}

fn kind_key(kind: WeightingKind) -> &'static str {
    match kind {
        WeightingKind::Intensity => "intensity",
        WeightingKind::Volume => "volume",
        WeightingKind::Number => "number",
    }
}
