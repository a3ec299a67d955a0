use thiserror::Error;

/// Why a label lookup did not produce a usable number.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldCause {
    Absent,
    Ambiguous(usize),
    NotNumeric(String),
}

impl std::fmt::Display for FieldCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldCause::Absent => write!(f, "label not found"),
            FieldCause::Ambiguous(n) => write!(f, "label found {} times", n),
            FieldCause::NotNumeric(value) => write!(f, "value {:?} is not numeric", value),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetFault {
    #[error("no \"Particle diameter\" marker in sheet")]
    MissingAnchor,

    #[error("{kind} band spans {found} columns, expected 3")]
    UnexpectedColumnCount { kind: String, found: usize },

    #[error("non-numeric value {value:?} at row {row}, column {col} of the {kind} table")]
    NonNumericCell {
        kind: String,
        row: usize,
        col: usize,
        value: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputFault {
    #[error("failed to open workbook: {0}")]
    Workbook(String),

    #[error("workbook has no worksheet")]
    NoWorksheet,

    #[error("file name {0:?} does not match LS<date>_<id>-<run>")]
    FileName(String),

    #[error("file too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(String),
}

/// File-scoped extraction failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("missing required field {label:?}: {cause}")]
    MissingRequiredField { label: String, cause: FieldCause },

    #[error("malformed sheet: {0}")]
    MalformedSheet(#[from] SheetFault),

    #[error("unreadable input: {0}")]
    UnreadableInput(#[from] InputFault),
}

impl ExtractError {
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::MissingRequiredField { .. } => "missing_required_field",
            ExtractError::MalformedSheet(_) => "malformed_sheet",
            ExtractError::UnreadableInput(_) => "unreadable_input",
        }
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        ExtractError::UnreadableInput(InputFault::Io(err.to_string()))
    }
}

impl From<calamine::XlsxError> for ExtractError {
    fn from(err: calamine::XlsxError) -> Self {
        ExtractError::UnreadableInput(InputFault::Workbook(err.to_string()))
    }
}
