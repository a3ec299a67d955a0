//! Layout constants for the Litesizer 500 xlsx export.

/// Marker cell heading the particle size distribution band.
pub const PARTICLE_DIAMETER_MARKER: &str = "Particle diameter";

/// Rows between the band header and the numeric body: the header row,
/// the units row and one spacer row. Tied to the current export format;
/// other firmware revisions may shift it.
pub const PSD_HEADER_ROWS: usize = 3;

pub const DIAMETER_COLUMN: &str = "Particle Diameter (nm)";
pub const FREQUENCY_COLUMN: &str = "Relative Frequency (%)";
pub const CUMULATIVE_COLUMN: &str = "Cumulative Undersize (%)";

pub const PSD_COLUMNS: [&str; 3] = [DIAMETER_COLUMN, FREQUENCY_COLUMN, CUMULATIVE_COLUMN];

/// Metadata labels live in the first two columns.
pub const METADATA_COLUMNS: [usize; 2] = [0, 1];

/// Numeric result labels live in the first four columns.
pub const RESULT_COLUMNS: [usize; 4] = [0, 1, 2, 3];

pub const WORKBOOK_NAME: &str = "Workbook name";
pub const MEASUREMENT_NAME: &str = "Measurement name";
pub const MEASUREMENT_MODE: &str = "Measurement mode";
pub const COMMENT: &str = "Comment";

pub const HYDRODYNAMIC_DIAMETER: &str = "Hydrodynamic diameter";
pub const POLYDISPERSITY_INDEX: &str = "Polydispersity index";
pub const INTERCEPT_G1: &str = "Intercept g1²";
pub const BASELINE: &str = "Baseline";
pub const MEAN_INTENSITY: &str = "Mean intensity";
pub const ABSOLUTE_INTENSITY: &str = "Absolute intensity";
pub const FIT_ERROR: &str = "Fit error";
pub const DIFFUSION_COEFFICIENT: &str = "Diffusion coefficient";

/// Numeric results without which a record is not emitted.
pub const REQUIRED_RESULTS: [&str; 2] = [HYDRODYNAMIC_DIAMETER, POLYDISPERSITY_INDEX];
