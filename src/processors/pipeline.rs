use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{ProcessingError, Result};
use crate::models::aggregate::FieldAccumulator;
use crate::models::field::FieldKind;
use crate::models::summary::{FieldAudit, FieldReport, FieldSummary};
use crate::processors::quality::is_admissible;
use crate::utils::constants::{DATE_MONTH_DAY_END, DATE_MONTH_DAY_START};

/// Month-day restriction, matched against the MMDD digits of each record's
/// timestamp column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    month: u32,
    day: u32,
    digits: [u8; 4],
}

impl MonthDay {
    /// Parses `MM-DD`, validated against the calendar. The leap day `02-29`
    /// is accepted.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || ProcessingError::InvalidDateFilter(input.to_string());

        let (month_str, day_str) = input.split_once('-').ok_or_else(invalid)?;
        let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(month_str) || !two_digits(day_str) {
            return Err(invalid());
        }

        let month: u32 = month_str.parse().map_err(|_| invalid())?;
        let day: u32 = day_str.parse().map_err(|_| invalid())?;

        // Year 2000 is a leap year, so 02-29 validates
        NaiveDate::from_ymd_opt(2000, month, day).ok_or_else(invalid)?;

        Ok(Self {
            month,
            day,
            digits: [
                b'0' + (month / 10) as u8,
                b'0' + (month % 10) as u8,
                b'0' + (day / 10) as u8,
                b'0' + (day % 10) as u8,
            ],
        })
    }

    /// Whether the record's timestamp falls on this month and day.
    pub fn matches(&self, record: &str) -> bool {
        record
            .as_bytes()
            .get(DATE_MONTH_DAY_START..DATE_MONTH_DAY_END)
            == Some(&self.digits[..])
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Single-pass statistics pipeline over a record collection.
///
/// Each run makes one fused parallel scan per field: optional month-day
/// restriction, structural screening, quality filtering, extraction and a
/// fold into `FieldAccumulator`. An unparseable admissible value aborts the
/// run. Runs share no state, so repeated invocations over the same records
/// produce identical reports.
#[derive(Debug, Clone)]
pub struct StatPipeline {
    restriction: Option<MonthDay>,
}

impl StatPipeline {
    pub fn new() -> Self {
        Self { restriction: None }
    }

    pub fn with_restriction(mut self, restriction: MonthDay) -> Self {
        self.restriction = Some(restriction);
        self
    }

    pub fn run(&self, field: FieldKind, records: &[String]) -> Result<FieldReport> {
        let spec = field.spec();
        let min_len = spec.min_record_len();
        let scanned = AtomicU64::new(0);
        let malformed = AtomicU64::new(0);

        let accumulated = records
            .par_iter()
            .filter(|record| match self.restriction {
                Some(ref restriction) => restriction.matches(record),
                None => true,
            })
            .filter(|record| {
                scanned.fetch_add(1, Ordering::Relaxed);
                if record.len() < min_len {
                    malformed.fetch_add(1, Ordering::Relaxed);
                    false
                } else {
                    true
                }
            })
            .filter(|record| is_admissible(field, record))
            .try_fold(
                || FieldAccumulator::EMPTY,
                |acc, record| spec.extract(record).map(|value| acc.observe(value)),
            )
            .try_reduce(|| FieldAccumulator::EMPTY, |a, b| Ok(a.merge(b)))?;

        let scanned = scanned.into_inner();
        let malformed = malformed.into_inner();

        if malformed > 0 {
            warn!(
                "{} pass excluded {} records too short for the field",
                field.name(),
                malformed
            );
        }
        debug!(
            "{} pass scanned {} records, admitted {}",
            field.name(),
            scanned,
            accumulated.count()
        );

        Ok(FieldReport {
            field,
            scanned,
            malformed,
            summary: FieldSummary::from_accumulator(&accumulated),
        })
    }

    /// Classifies every record for one field without computing statistics.
    /// Unlike `run`, unparseable values are counted rather than aborting.
    pub fn audit(&self, field: FieldKind, records: &[String]) -> FieldAudit {
        let spec = field.spec();
        let min_len = spec.min_record_len();

        records
            .par_iter()
            .filter(|record| match self.restriction {
                Some(ref restriction) => restriction.matches(record),
                None => true,
            })
            .fold(
                || FieldAudit::new(field),
                |mut audit, record| {
                    audit.scanned += 1;
                    if record.len() < min_len {
                        audit.malformed += 1;
                    } else if !is_admissible(field, record) {
                        audit.inadmissible += 1;
                    } else if spec.extract(record).is_ok() {
                        audit.admissible += 1;
                    } else {
                        audit.unparseable += 1;
                    }
                    audit
                },
            )
            .reduce(|| FieldAudit::new(field), FieldAudit::combine)
    }
}

impl Default for StatPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Builds a full-width observation line with every tracked field set.
    fn observation(
        mmdd: &str,
        wind: (&str, char),
        temp: (&str, char),
        pressure: (&str, char),
    ) -> String {
        let mut line = vec![b'0'; 105];
        line[19..23].copy_from_slice(mmdd.as_bytes());
        line[65..69].copy_from_slice(wind.0.as_bytes());
        line[69] = wind.1 as u8;
        line[87..92].copy_from_slice(temp.0.as_bytes());
        line[92] = temp.1 as u8;
        line[99..104].copy_from_slice(pressure.0.as_bytes());
        line[104] = pressure.1 as u8;
        String::from_utf8(line).unwrap()
    }

    fn temperature_record(value: &str, quality: char) -> String {
        observation("0101", ("0042", '1'), (value, quality), ("10132", '1'))
    }

    #[test]
    fn test_end_to_end_temperature_statistics() {
        let records = vec![
            temperature_record("+0100", '1'),
            temperature_record("-0050", '1'),
            temperature_record("+0999", '2'),
        ];

        let report = StatPipeline::new()
            .run(FieldKind::AirTemperature, &records)
            .unwrap();
        let summary = report.summary.unwrap();

        assert_eq!(summary.min, -50);
        assert_eq!(summary.max, 100);
        assert_eq!(summary.sum, 50);
        assert_eq!(summary.count, 2);
        assert_eq!(report.scanned, 3);
        assert_eq!(report.malformed, 0);
    }

    #[test]
    fn test_empty_input_has_no_summary() {
        let report = StatPipeline::new()
            .run(FieldKind::AirTemperature, &[])
            .unwrap();
        assert_eq!(report.scanned, 0);
        assert!(report.summary.is_none());
    }

    #[test]
    fn test_fully_filtered_input_has_no_summary() {
        let records = vec![
            temperature_record("+0100", '2'),
            temperature_record("+9999", '9'),
        ];

        let report = StatPipeline::new()
            .run(FieldKind::AirTemperature, &records)
            .unwrap();
        assert_eq!(report.scanned, 2);
        assert!(report.summary.is_none());
    }

    #[test]
    fn test_corrupt_admissible_value_aborts_run() {
        let records = vec![
            temperature_record("+0100", '1'),
            temperature_record("+01x0", '1'),
        ];

        let err = StatPipeline::new()
            .run(FieldKind::AirTemperature, &records)
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::MeasurementParse { field: "air temperature", .. }
        ));
    }

    #[test]
    fn test_corrupt_inadmissible_value_is_ignored() {
        // The extractor only sees records that pass the quality filter
        let records = vec![
            temperature_record("+0100", '1'),
            temperature_record("+0x50", '3'),
        ];

        let report = StatPipeline::new()
            .run(FieldKind::AirTemperature, &records)
            .unwrap();
        assert_eq!(report.summary.unwrap().count, 1);
    }

    #[test]
    fn test_short_records_counted_and_excluded() {
        let records = vec![
            temperature_record("+0100", '1'),
            "0107011570".to_string(),
        ];

        let report = StatPipeline::new()
            .run(FieldKind::AirTemperature, &records)
            .unwrap();
        assert_eq!(report.scanned, 2);
        assert_eq!(report.malformed, 1);
        assert_eq!(report.summary.unwrap().count, 1);
    }

    #[test]
    fn test_restriction_composes_with_quality_filter() {
        let records = vec![
            observation("0430", ("0042", '1'), ("+0200", '1'), ("10132", '1')),
            observation("0430", ("0042", '1'), ("+0300", '2'), ("10132", '1')),
            observation("0501", ("0042", '1'), ("+0400", '1'), ("10132", '1')),
        ];

        let restricted = StatPipeline::new().with_restriction(MonthDay::parse("04-30").unwrap());
        let report = restricted.run(FieldKind::AirTemperature, &records).unwrap();
        let summary = report.summary.unwrap();

        // Only the admissible April 30th record survives both predicates
        assert_eq!(report.scanned, 2);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.min, 200);
        assert_eq!(summary.max, 200);
    }

    #[test]
    fn test_restriction_matching_no_records_has_no_summary() {
        let records = vec![
            observation("0101", ("0042", '1'), ("+0100", '1'), ("10132", '1')),
            observation("0502", ("0042", '1'), ("+0200", '1'), ("10132", '1')),
        ];

        let pipeline = StatPipeline::new().with_restriction(MonthDay::parse("04-30").unwrap());
        for field in FieldKind::ALL {
            let report = pipeline.run(field, &records).unwrap();
            assert_eq!(report.scanned, 0);
            assert!(report.summary.is_none());
        }
    }

    #[test]
    fn test_restriction_with_only_inadmissible_matches_has_no_summary() {
        // April 30th records exist but none carries a usable sample
        let records = vec![
            observation("0430", ("9999", '1'), ("+9999", '9'), ("99999", '1')),
            observation("0430", ("0042", '2'), ("+0100", '3'), ("10132", '6')),
            observation("0501", ("0042", '1'), ("+0100", '1'), ("10132", '1')),
        ];

        let pipeline = StatPipeline::new().with_restriction(MonthDay::parse("04-30").unwrap());
        for field in FieldKind::ALL {
            let report = pipeline.run(field, &records).unwrap();
            assert_eq!(report.scanned, 2);
            assert!(
                report.summary.is_none(),
                "{} produced a summary",
                field.name()
            );
        }
    }

    #[test]
    fn test_reruns_are_idempotent() {
        let records = vec![
            temperature_record("+0100", '1'),
            temperature_record("-0050", '1'),
            temperature_record("+9999", '9'),
        ];

        let pipeline = StatPipeline::new();
        let first = pipeline.run(FieldKind::AirTemperature, &records).unwrap();
        let second = pipeline.run(FieldKind::AirTemperature, &records).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_wind_and_pressure_fields_aggregate_independently() {
        let records = vec![
            observation("0101", ("0010", '1'), ("+9999", '9'), ("99999", '1')),
            observation("0101", ("0030", '9'), ("+0150", '1'), ("10040", '1')),
        ];

        let pipeline = StatPipeline::new();

        let wind = pipeline.run(FieldKind::WindSpeed, &records).unwrap();
        let wind_summary = wind.summary.unwrap();
        assert_eq!(wind_summary.count, 2);
        assert_eq!(wind_summary.min, 10);
        assert_eq!(wind_summary.max, 30);

        let pressure = pipeline.run(FieldKind::AirPressure, &records).unwrap();
        let pressure_summary = pressure.summary.unwrap();
        assert_eq!(pressure_summary.count, 1);
        assert_eq!(pressure_summary.min, 10040);

        let temperature = pipeline.run(FieldKind::AirTemperature, &records).unwrap();
        assert_eq!(temperature.summary.unwrap().count, 1);
    }

    #[test]
    fn test_audit_buckets_every_record() {
        let records = vec![
            temperature_record("+0100", '1'),
            temperature_record("+0300", '2'),
            temperature_record("+0x50", '1'),
            "short line".to_string(),
        ];

        let audit = StatPipeline::new().audit(FieldKind::AirTemperature, &records);
        assert_eq!(audit.scanned, 4);
        assert_eq!(audit.malformed, 1);
        assert_eq!(audit.inadmissible, 1);
        assert_eq!(audit.admissible, 1);
        assert_eq!(audit.unparseable, 1);
    }

    #[test]
    fn test_month_day_parsing() {
        assert_eq!(MonthDay::parse("04-30").unwrap().to_string(), "04-30");
        assert_eq!(MonthDay::parse("02-29").unwrap().to_string(), "02-29");
        assert_eq!(MonthDay::parse("12-01").unwrap().to_string(), "12-01");

        for bad in [
            "13-01", "00-10", "04-31", "02-30", "4-30", "0430", "ab-cd", "+4-30", "04-+5", "",
        ] {
            assert!(MonthDay::parse(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_month_day_matching() {
        let april30 = MonthDay::parse("04-30").unwrap();
        let record = observation("0430", ("0042", '1'), ("+0100", '1'), ("10132", '1'));
        assert!(april30.matches(&record));

        let other = observation("0429", ("0042", '1'), ("+0100", '1'), ("10132", '1'));
        assert!(!april30.matches(&other));
        assert!(!april30.matches("short"));
    }
}
