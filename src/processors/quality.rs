use crate::models::field::FieldKind;
use crate::utils::constants::{
    AIR_PRESSURE_MISSING, AIR_TEMP_MISSING, REJECTED_QUALITY_CODES, WIND_SPEED_MISSING,
};

/// Whether `record` carries a usable sample of `field`.
///
/// Every field rejects the erroneous quality codes 2, 3, 6 and 7. The
/// missing-value rules differ per field and each arm states its complete
/// rule: temperature treats `+9999` as missing only under quality code `9`,
/// pressure and wind reject their sentinels under any code, and wind code
/// `9` on its own encodes calm wind and stays admissible. Records too short
/// to carry the field are not admissible.
pub fn is_admissible(field: FieldKind, record: &str) -> bool {
    let spec = field.spec();
    let (code, raw) = match (spec.quality_code(record), spec.raw_value(record)) {
        (Some(code), Some(raw)) => (code, raw),
        _ => return false,
    };

    match field {
        FieldKind::AirTemperature => {
            !REJECTED_QUALITY_CODES.contains(&code) && !(code == b'9' && raw == AIR_TEMP_MISSING)
        }
        FieldKind::AirPressure => {
            !REJECTED_QUALITY_CODES.contains(&code) && raw != AIR_PRESSURE_MISSING
        }
        FieldKind::WindSpeed => {
            !REJECTED_QUALITY_CODES.contains(&code) && raw != WIND_SPEED_MISSING
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field::FieldSpec;

    fn record_with(spec: &FieldSpec, value: &str, quality: char) -> String {
        let mut line = vec![b'0'; spec.min_record_len()];
        line[spec.value_start..spec.value_end].copy_from_slice(value.as_bytes());
        line[spec.quality_offset] = quality as u8;
        String::from_utf8(line).unwrap()
    }

    fn temperature(value: &str, quality: char) -> String {
        record_with(FieldKind::AirTemperature.spec(), value, quality)
    }

    fn pressure(value: &str, quality: char) -> String {
        record_with(FieldKind::AirPressure.spec(), value, quality)
    }

    fn wind(value: &str, quality: char) -> String {
        record_with(FieldKind::WindSpeed.spec(), value, quality)
    }

    #[test]
    fn test_erroneous_codes_rejected_for_every_field() {
        for code in ['2', '3', '6', '7'] {
            assert!(!is_admissible(
                FieldKind::AirTemperature,
                &temperature("+0100", code)
            ));
            assert!(!is_admissible(
                FieldKind::AirPressure,
                &pressure("10132", code)
            ));
            assert!(!is_admissible(FieldKind::WindSpeed, &wind("0042", code)));
        }
    }

    #[test]
    fn test_passing_codes_admissible() {
        for code in ['0', '1', '4', '5', '8'] {
            assert!(is_admissible(
                FieldKind::AirTemperature,
                &temperature("+0100", code)
            ));
            assert!(is_admissible(
                FieldKind::AirPressure,
                &pressure("10132", code)
            ));
            assert!(is_admissible(FieldKind::WindSpeed, &wind("0042", code)));
        }
    }

    #[test]
    fn test_temperature_missing_only_under_code_nine() {
        // Sentinel plus code 9 marks the sample missing
        assert!(!is_admissible(
            FieldKind::AirTemperature,
            &temperature("+9999", '9')
        ));
        // Code 9 with a real value passes
        assert!(is_admissible(
            FieldKind::AirTemperature,
            &temperature("+0123", '9')
        ));
        // Sentinel under any other code passes
        assert!(is_admissible(
            FieldKind::AirTemperature,
            &temperature("+9999", '1')
        ));
    }

    #[test]
    fn test_pressure_sentinel_rejected_under_any_code() {
        assert!(!is_admissible(
            FieldKind::AirPressure,
            &pressure("99999", '1')
        ));
        assert!(!is_admissible(
            FieldKind::AirPressure,
            &pressure("99999", '9')
        ));
        assert!(is_admissible(
            FieldKind::AirPressure,
            &pressure("10132", '9')
        ));
    }

    #[test]
    fn test_wind_code_nine_alone_is_calm() {
        // Sentinel rejected regardless of code
        assert!(!is_admissible(FieldKind::WindSpeed, &wind("9999", '1')));
        assert!(!is_admissible(FieldKind::WindSpeed, &wind("9999", '9')));
        // Code 9 with a real speed is a calm-wind observation
        assert!(is_admissible(FieldKind::WindSpeed, &wind("0000", '9')));
        assert!(is_admissible(FieldKind::WindSpeed, &wind("0042", '9')));
    }

    #[test]
    fn test_short_record_not_admissible() {
        assert!(!is_admissible(FieldKind::AirTemperature, "0000000000"));
        assert!(!is_admissible(FieldKind::AirPressure, ""));
        assert!(!is_admissible(FieldKind::WindSpeed, "0"));
    }
}
