pub mod arrow;
pub mod types;
pub mod variables;
pub mod write;

pub use self::arrow::{build_arrow_schema, to_record_batch};
pub use types::{Metadata, Observation, Period, PeriodDescriptor, WideRow, WideTable};
pub use variables::{column_for_id, id_for_name, VALUE_COLUMNS};
pub use write::write_parquet;
