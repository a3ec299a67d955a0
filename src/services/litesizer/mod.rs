pub mod distribution;
pub mod error;
pub mod frame;
pub mod grid;
pub mod locator;
pub mod record;
pub mod resolver;
pub mod types;

pub use distribution::DistributionTableExtractor;
pub use error::{ExtractError, FieldCause, InputFault, SheetFault};
pub use frame::records_to_dataframe;
pub use grid::{Cell, Grid, GridView, Position};
pub use locator::{find_containing, find_exact, LabelMatch};
pub use record::SampleRecordBuilder;
pub use resolver::{resolve_adjacent, resolve_adjacent_containing, resolve_nearby, Resolution};
