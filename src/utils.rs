use time::{format_description::FormatItem, macros::format_description};

pub static ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Coerce an optional nutrient value to a finite float, defaulting to 0.0.
/// Absent, NaN and infinite values all collapse to the default so consumers
/// never observe null or NaN downstream.
pub fn safe_float(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Serde adapter for `time::Date` as `YYYY-MM-DD`, the wire format used by
/// every date field in the API.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    use super::ISO_DATE;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(ISO_DATE).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Date::parse(&raw, ISO_DATE).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Date;

    #[test]
    fn test_safe_float_coercion() {
        assert_eq!(safe_float(Some(1.5)), 1.5);
        assert_eq!(safe_float(Some(0.0)), 0.0);
        assert_eq!(safe_float(None), 0.0);
        assert_eq!(safe_float(Some(f64::NAN)), 0.0);
        assert_eq!(safe_float(Some(f64::INFINITY)), 0.0);
        assert_eq!(safe_float(Some(f64::NEG_INFINITY)), 0.0);
    }

    #[test]
    fn test_iso_date_round_trip() {
        let date = Date::parse("2024-03-09", ISO_DATE).unwrap();
        assert_eq!(date.format(ISO_DATE).unwrap(), "2024-03-09");
    }
}
