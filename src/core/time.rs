use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};

const NAIVE_TIMESTAMP_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Time zone used to read zone-less timestamps and to format hour labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DisplayTimeZone {
    #[default]
    Utc,
    FixedOffsetMinutes {
        minutes: i16,
    },
}

impl DisplayTimeZone {
    #[must_use]
    pub fn offset_minutes(self) -> i16 {
        match self {
            Self::Utc => 0,
            Self::FixedOffsetMinutes { minutes } => minutes,
        }
    }

    pub fn validate(self) -> DashResult<Self> {
        let minutes = i32::from(self.offset_minutes());
        if !(-14 * 60..=14 * 60).contains(&minutes) {
            return Err(DashError::InvalidConfig(
                "time zone offset must be between -840 and 840 minutes".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn fixed_offset(self) -> FixedOffset {
        let seconds = i32::from(self.offset_minutes()) * 60;
        FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
    }

    #[must_use]
    pub fn localize(self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.fixed_offset())
    }
}

/// Parses one feed timestamp.
///
/// RFC 3339 strings carry their own offset. Zone-less strings are read as
/// wall-clock time in `zone`. Returns `None` for anything unparseable.
#[must_use]
pub fn parse_timestamp(raw: &str, zone: DisplayTimeZone) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS.iter().find_map(|format| {
        let naive = NaiveDateTime::parse_from_str(raw, format).ok()?;
        zone.fixed_offset()
            .from_local_datetime(&naive)
            .single()
            .map(|local| local.with_timezone(&Utc))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn rfc3339_keeps_its_own_offset() {
        let parsed = parse_timestamp("2024-01-01T02:00:00+02:00", DisplayTimeZone::Utc)
            .expect("rfc3339");
        assert_eq!(parsed.hour(), 0);
    }

    #[test]
    fn naive_minute_precision_is_read_in_display_zone() {
        let zone = DisplayTimeZone::FixedOffsetMinutes { minutes: 120 };
        let parsed = parse_timestamp("2024-01-01T01:30", zone).expect("naive");
        assert_eq!(parsed.hour(), 23);
        assert_eq!(parsed.minute(), 30);
    }

    #[test]
    fn garbage_is_rejected_without_panicking() {
        assert!(parse_timestamp("not a date", DisplayTimeZone::Utc).is_none());
        assert!(parse_timestamp("", DisplayTimeZone::Utc).is_none());
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let zone = DisplayTimeZone::FixedOffsetMinutes { minutes: 900 };
        assert!(zone.validate().is_err());
    }
}
