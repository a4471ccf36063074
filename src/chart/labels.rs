use chrono::{DateTime, Utc};

use crate::core::DisplayTimeZone;

const MISSING_TIME: &str = "--:--";
const MISSING_DATE: &str = "--.--.----";

/// Formats chart and table labels in a fixed display time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelFormatter {
    zone: DisplayTimeZone,
}

impl LabelFormatter {
    #[must_use]
    pub fn new(zone: DisplayTimeZone) -> Self {
        Self { zone }
    }

    #[must_use]
    pub fn zone(self) -> DisplayTimeZone {
        self.zone
    }

    /// Hour label truncated to the hour, e.g. `07:00`.
    #[must_use]
    pub fn hour(self, instant: Option<DateTime<Utc>>) -> String {
        match instant {
            Some(instant) => self.zone.localize(instant).format("%H:00").to_string(),
            None => MISSING_TIME.to_owned(),
        }
    }

    /// `dd.mm.yyyy`
    #[must_use]
    pub fn date(self, instant: Option<DateTime<Utc>>) -> String {
        match instant {
            Some(instant) => self.zone.localize(instant).format("%d.%m.%Y").to_string(),
            None => MISSING_DATE.to_owned(),
        }
    }

    /// `dd.mm. HH:MM`, as used by the best-times list and the price table.
    #[must_use]
    pub fn short_date_time(self, instant: Option<DateTime<Utc>>) -> String {
        match instant {
            Some(instant) => self.zone.localize(instant).format("%d.%m. %H:%M").to_string(),
            None => format!("--.--. {MISSING_TIME}"),
        }
    }

    /// Full timestamp for the "last updated" footer.
    #[must_use]
    pub fn timestamp(self, instant: DateTime<Utc>) -> String {
        self.zone
            .localize(instant)
            .format("%d.%m.%Y %H:%M:%S")
            .to_string()
    }

    /// Tooltip detail line: `dd.mm.yyyy | HH:00`.
    #[must_use]
    pub fn tooltip_detail(self, instant: Option<DateTime<Utc>>) -> String {
        format!("{} | {}", self.date(instant), self.hour(instant))
    }
}

#[must_use]
pub fn price_value(price: f64) -> String {
    format!("{price:.2}")
}

#[must_use]
pub fn price_with_unit(price: f64) -> String {
    format!("{price:.2} c/kWh")
}

#[must_use]
pub fn histogram_price(price: f64) -> String {
    format!("{price:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn hour_labels_follow_display_zone() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 5, 22, 15, 0).single();
        let utc = LabelFormatter::default();
        let helsinki = LabelFormatter::new(DisplayTimeZone::FixedOffsetMinutes { minutes: 120 });

        assert_eq!(utc.hour(instant), "22:00");
        assert_eq!(helsinki.hour(instant), "00:00");
        assert_eq!(helsinki.date(instant), "06.03.2024");
        assert_eq!(helsinki.tooltip_detail(instant), "06.03.2024 | 00:00");
    }

    #[test]
    fn missing_instant_has_placeholder_labels() {
        let formatter = LabelFormatter::default();
        assert_eq!(formatter.hour(None), "--:--");
        assert_eq!(formatter.short_date_time(None), "--.--. --:--");
    }

    #[test]
    fn prices_use_fixed_decimals() {
        assert_eq!(price_value(3.456), "3.46");
        assert_eq!(price_with_unit(0.0), "0.00 c/kWh");
        assert_eq!(histogram_price(-1.26), "-1.3");
    }
}
