pub mod aggregate;
pub mod field;
pub mod summary;

pub use aggregate::FieldAccumulator;
pub use field::{FieldKind, FieldSpec};
pub use summary::{DatasetReport, FieldAudit, FieldReport, FieldSummary, RestrictedReport};
