/// Wind speed observation, tenths of metres per second
pub const WIND_SPEED_START: usize = 65;
pub const WIND_SPEED_END: usize = 69;
pub const WIND_SPEED_QUALITY: usize = 69;

/// Air temperature observation, tenths of degrees Celsius
pub const AIR_TEMP_START: usize = 87;
pub const AIR_TEMP_END: usize = 92;
pub const AIR_TEMP_QUALITY: usize = 92;

/// Sea-level pressure observation, tenths of hectopascals
pub const AIR_PRESSURE_START: usize = 99;
pub const AIR_PRESSURE_END: usize = 104;
pub const AIR_PRESSURE_QUALITY: usize = 104;

/// Month and day digits of the observation timestamp (MMDD)
pub const DATE_MONTH_DAY_START: usize = 19;
pub const DATE_MONTH_DAY_END: usize = 23;

/// Quality codes marking a measurement as erroneous in every field
pub const REJECTED_QUALITY_CODES: [u8; 4] = [b'2', b'3', b'6', b'7'];

/// Missing-value sentinels, exactly as they appear in the value columns
pub const AIR_TEMP_MISSING: &str = "+9999";
pub const AIR_PRESSURE_MISSING: &str = "99999";
pub const WIND_SPEED_MISSING: &str = "9999";

/// Stored measurements are tenths of their physical unit
pub const MEASUREMENT_SCALE: f64 = 10.0;

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const DEFAULT_YEAR_START: u16 = 1980;
pub const DEFAULT_YEAR_END: u16 = 2012;
