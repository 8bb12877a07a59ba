pub mod enums;
pub mod error;
pub mod export;
pub mod record;

pub use enums::{DataSource, ProjectType, RowStatus, SourceCoverage, SourceSelection};
pub use error::ValidationError;
pub use export::{EXPORT_COLUMNS, ExportRow, ManualRowInput, UNIT_CHOICES};
pub use record::VariableRecord;
