pub mod cli;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;

pub use error::{ProcessingError, Result};
pub use models::{DatasetReport, FieldAccumulator, FieldKind, FieldReport, FieldSummary};
pub use processors::{MonthDay, StatPipeline};
pub use readers::{DatasetReader, ObservationReader};
