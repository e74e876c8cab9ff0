use serde::Serialize;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    AIR_PRESSURE_END, AIR_PRESSURE_QUALITY, AIR_PRESSURE_START, AIR_TEMP_END, AIR_TEMP_QUALITY,
    AIR_TEMP_START, WIND_SPEED_END, WIND_SPEED_QUALITY, WIND_SPEED_START,
};

/// Byte layout of one fixed-width measurement within an observation record.
/// Offsets are 0-indexed and the value range is end-exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub value_start: usize,
    pub value_end: usize,
    pub quality_offset: usize,
}

pub const AIR_TEMPERATURE_SPEC: FieldSpec = FieldSpec {
    name: "air temperature",
    value_start: AIR_TEMP_START,
    value_end: AIR_TEMP_END,
    quality_offset: AIR_TEMP_QUALITY,
};

pub const AIR_PRESSURE_SPEC: FieldSpec = FieldSpec {
    name: "air pressure",
    value_start: AIR_PRESSURE_START,
    value_end: AIR_PRESSURE_END,
    quality_offset: AIR_PRESSURE_QUALITY,
};

pub const WIND_SPEED_SPEC: FieldSpec = FieldSpec {
    name: "wind speed",
    value_start: WIND_SPEED_START,
    value_end: WIND_SPEED_END,
    quality_offset: WIND_SPEED_QUALITY,
};

impl FieldSpec {
    /// Shortest record that carries both the value and its quality code.
    pub fn min_record_len(&self) -> usize {
        self.quality_offset + 1
    }

    /// The raw value column, or None when the record is too short.
    pub fn raw_value<'a>(&self, record: &'a str) -> Option<&'a str> {
        record.get(self.value_start..self.value_end)
    }

    /// The quality code byte following the value column.
    pub fn quality_code(&self, record: &str) -> Option<u8> {
        record.as_bytes().get(self.quality_offset).copied()
    }

    /// Parses the value column as a signed integer in tenths of the
    /// physical unit. Accepts an explicit leading sign (`+0100`, `-0050`).
    pub fn extract(&self, record: &str) -> Result<i32> {
        let raw = self.raw_value(record).ok_or_else(|| {
            ProcessingError::InvalidFormat(format!(
                "record too short for {}: {} bytes",
                self.name,
                record.len()
            ))
        })?;

        raw.trim()
            .parse::<i32>()
            .map_err(|_| ProcessingError::MeasurementParse {
                field: self.name,
                raw: raw.to_string(),
            })
    }
}

/// The measurements tracked by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    AirTemperature,
    AirPressure,
    WindSpeed,
}

impl FieldKind {
    pub const ALL: [FieldKind; 3] = [
        FieldKind::AirTemperature,
        FieldKind::AirPressure,
        FieldKind::WindSpeed,
    ];

    pub fn spec(&self) -> &'static FieldSpec {
        match self {
            FieldKind::AirTemperature => &AIR_TEMPERATURE_SPEC,
            FieldKind::AirPressure => &AIR_PRESSURE_SPEC,
            FieldKind::WindSpeed => &WIND_SPEED_SPEC,
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    /// Display unit after applying the tenths scale.
    pub fn unit(&self) -> &'static str {
        match self {
            FieldKind::AirTemperature => "°C",
            FieldKind::AirPressure => "hPa",
            FieldKind::WindSpeed => "m/s",
        }
    }
}
