use serde::Serialize;

use crate::models::aggregate::FieldAccumulator;
use crate::models::field::FieldKind;
use crate::utils::constants::MEASUREMENT_SCALE;

/// Summary statistics for one field over one record subset. Built only from
/// a non-empty accumulator, so every statistic is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSummary {
    pub min: i32,
    pub max: i32,
    pub sum: i64,
    pub count: u64,
}

impl FieldSummary {
    /// None when the accumulator holds no samples.
    pub fn from_accumulator(acc: &FieldAccumulator) -> Option<Self> {
        Some(Self {
            min: acc.min()?,
            max: acc.max()?,
            sum: acc.sum(),
            count: acc.count(),
        })
    }

    /// Mean in stored (tenths) units.
    pub fn mean(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }

    pub fn min_scaled(&self) -> f64 {
        self.min as f64 / MEASUREMENT_SCALE
    }

    pub fn max_scaled(&self) -> f64 {
        self.max as f64 / MEASUREMENT_SCALE
    }

    pub fn mean_scaled(&self) -> f64 {
        self.mean() / MEASUREMENT_SCALE
    }
}

/// Outcome of one pipeline pass for one field. `summary` is None when no
/// admissible samples were found, which is a legitimate result and not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub field: FieldKind,
    pub scanned: u64,
    pub malformed: u64,
    pub summary: Option<FieldSummary>,
}

/// Structural and quality audit counters for one field, without statistics.
/// Every scanned record lands in exactly one of the four outcome buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldAudit {
    pub field: FieldKind,
    pub scanned: u64,
    pub malformed: u64,
    pub inadmissible: u64,
    pub admissible: u64,
    pub unparseable: u64,
}

impl FieldAudit {
    pub fn new(field: FieldKind) -> Self {
        Self {
            field,
            scanned: 0,
            malformed: 0,
            inadmissible: 0,
            admissible: 0,
            unparseable: 0,
        }
    }

    pub fn combine(self, other: Self) -> Self {
        Self {
            field: self.field,
            scanned: self.scanned + other.scanned,
            malformed: self.malformed + other.malformed,
            inadmissible: self.inadmissible + other.inadmissible,
            admissible: self.admissible + other.admissible,
            unparseable: self.unparseable + other.unparseable,
        }
    }
}

/// Results of the date-restricted pass over one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct RestrictedReport {
    pub date: String,
    pub fields: Vec<FieldReport>,
}

/// Full results for one dataset (one year directory, or a flat input dir).
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub dataset: String,
    pub files: usize,
    pub records: usize,
    pub elapsed_ms: u64,
    pub fields: Vec<FieldReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricted: Option<RestrictedReport>,
}
