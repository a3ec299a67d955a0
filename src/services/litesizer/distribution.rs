use super::error::{ExtractError, SheetFault};
use super::grid::{Cell, Grid};
use super::locator::find_exact;
use super::types::{PARTICLE_DIAMETER_MARKER, PSD_HEADER_ROWS};
use crate::models::{DistributionTable, PsdRow, WeightingKind};
use tracing::debug;

/// Isolates the particle size distribution tables of one sheet.
///
/// The band starts at the first "Particle diameter" cell (the anchor). The
/// anchor column carries the diameters; each weighting kind contributes the
/// columns whose header reads e.g. "Volume weighted". From the anchor row
/// down, blank rows are dropped and the header, units and spacer rows are
/// skipped before the numeric body.
pub struct DistributionTableExtractor<'a> {
    grid: &'a Grid,
}

impl<'a> DistributionTableExtractor<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn extract(&self, kind: WeightingKind) -> Result<DistributionTable, ExtractError> {
        let view = self.grid.view();

        let anchor = find_exact(&view, &Cell::text(PARTICLE_DIAMETER_MARKER))
            .first()
            .ok_or(SheetFault::MissingAnchor)?;

        let label_columns: Vec<usize> = find_exact(&view, &Cell::text(kind.label()))
            .columns()
            .into_iter()
            .filter(|&col| col != anchor.col)
            .collect();

        if label_columns.is_empty() {
            debug!("no {} header in sheet, returning empty table", kind);
            return Ok(DistributionTable::empty(kind));
        }

        let mut selection = Vec::with_capacity(label_columns.len() + 1);
        selection.push(anchor.col);
        selection.extend(label_columns);

        let [diameter_col, frequency_col, cumulative_col] = selection[..] else {
            return Err(SheetFault::UnexpectedColumnCount {
                kind: kind.label().to_string(),
                found: selection.len(),
            }
            .into());
        };
        let columns = [diameter_col, frequency_col, cumulative_col];

        let body = (anchor.row..self.grid.height())
            .map(|row| (row, columns.map(|col| self.grid.cell(row, col).clone())))
            .filter(|(_, cells)| !cells.iter().all(Cell::is_empty))
            .map(|(row, cells)| (row, cells.map(Cell::coerce_numeric)))
            .skip(PSD_HEADER_ROWS);

        let mut rows = Vec::new();
        for (row, cells) in body {
            let [diameter, frequency, cumulative] =
                self.numeric_row(kind, row, &columns, cells)?;
            rows.push(PsdRow {
                diameter_nm: diameter,
                relative_frequency_pct: frequency,
                cumulative_undersize_pct: cumulative,
            });
        }

        debug!("{} table: {} rows from anchor row {}", kind, rows.len(), anchor.row);
        Ok(DistributionTable { kind, rows })
    }

    /// Blank cells in a partially filled row read as NaN.
    fn numeric_row(
        &self,
        kind: WeightingKind,
        row: usize,
        columns: &[usize; 3],
        cells: [Cell; 3],
    ) -> Result<[f64; 3], ExtractError> {
        let mut values = [f64::NAN; 3];
        for (i, cell) in cells.into_iter().enumerate() {
            values[i] = match cell {
                Cell::Number(n) => n,
                Cell::Empty => f64::NAN,
                Cell::Text(value) => {
                    return Err(SheetFault::NonNumericCell {
                        kind: kind.label().to_string(),
                        row,
                        col: columns[i],
                        value,
                    }
                    .into())
                }
            };
        }
        Ok(values)
    }
}
