use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashError;

/// Language of every user-facing string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fi,
    En,
}

impl Locale {
    #[must_use]
    pub fn texts(self) -> &'static LocaleTexts {
        match self {
            Self::Fi => &FI_TEXTS,
            Self::En => &EN_TEXTS,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fi => "fi",
            Self::En => "en",
        })
    }
}

impl FromStr for Locale {
    type Err = DashError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fi" | "fi-fi" => Ok(Self::Fi),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            other => Err(DashError::InvalidConfig(format!(
                "unsupported locale `{other}`"
            ))),
        }
    }
}

/// Static text table for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTexts {
    pub page_title: &'static str,
    pub page_subtitle: &'static str,
    pub price_chart_title: &'static str,
    pub price_chart_heading: &'static str,
    pub histogram_title: &'static str,
    pub histogram_heading: &'static str,
    pub current_marker: &'static str,
    pub stat_current: &'static str,
    pub stat_average: &'static str,
    pub stat_min: &'static str,
    pub stat_max: &'static str,
    pub deviation_suffix: &'static str,
    pub good_time: &'static str,
    pub wait_time: &'static str,
    pub best_times_heading: &'static str,
    pub table_heading: &'static str,
    pub column_time: &'static str,
    pub column_price: &'static str,
    pub column_status: &'static str,
    pub status_cheap: &'static str,
    pub status_expensive: &'static str,
    pub error_title: &'static str,
    pub error_hint: &'static str,
    pub retry_label: &'static str,
    pub unknown_error: &'static str,
    pub footer_source: &'static str,
    pub footer_updated: &'static str,
}

static FI_TEXTS: LocaleTexts = LocaleTexts {
    page_title: "Tuntihinnat Suomessa",
    page_subtitle: "Nykyiset sähkön tuntihinnat Suomessa (senttiä/kWh)",
    price_chart_title: "Sähkön Hinnat (senttiä/kWh)",
    price_chart_heading: "Hintakehitys",
    histogram_title: "Hintajakauma (senttiä/kWh)",
    histogram_heading: "Hintajakauma",
    current_marker: "NYT",
    stat_current: "Nykyinen Hinta",
    stat_average: "Keskihinta",
    stat_min: "Minimihinta",
    stat_max: "Maksimihinta",
    deviation_suffix: "keskiarvosta",
    good_time: "✅ Hyvä aika käyttää sähköä! Hinta on keskiarvoa alhaisempi.",
    wait_time: "⚠️ Hinta on keskiarvoa korkeampi. Harkitse odottamista jos mahdollista.",
    best_times_heading: "Parhaat Ajat Käyttää Sähköä",
    table_heading: "Kaikki Tuntihinnat",
    column_time: "Aika",
    column_price: "Hinta (senttiä/kWh)",
    column_status: "Tila",
    status_cheap: "Edullinen",
    status_expensive: "Kallis",
    error_title: "Hintatietojen Lataaminen Epäonnistui",
    error_hint: "Yritä myöhemmin uudelleen tai ota yhteyttä tukeen, jos ongelma jatkuu.",
    retry_label: "Yritä Uudelleen",
    unknown_error: "Unknown error occurred",
    footer_source: "Tiedot saatu porssisahko.net API:sta",
    footer_updated: "Viimeksi päivitetty",
};

static EN_TEXTS: LocaleTexts = LocaleTexts {
    page_title: "Hourly Prices in Finland",
    page_subtitle: "Current hourly electricity prices in Finland (cents/kWh)",
    price_chart_title: "Electricity Prices (cents/kWh)",
    price_chart_heading: "Price Trend",
    histogram_title: "Price Distribution (cents/kWh)",
    histogram_heading: "Price Distribution",
    current_marker: "NOW",
    stat_current: "Current Price",
    stat_average: "Average Price",
    stat_min: "Minimum Price",
    stat_max: "Maximum Price",
    deviation_suffix: "from average",
    good_time: "✅ Good time to use electricity! The price is below average.",
    wait_time: "⚠️ The price is above average. Consider waiting if possible.",
    best_times_heading: "Best Times to Use Electricity",
    table_heading: "All Hourly Prices",
    column_time: "Time",
    column_price: "Price (cents/kWh)",
    column_status: "Status",
    status_cheap: "Cheap",
    status_expensive: "Expensive",
    error_title: "Failed to Load Price Data",
    error_hint: "Try again later or contact support if the problem persists.",
    retry_label: "Try Again",
    unknown_error: "Unknown error occurred",
    footer_source: "Data provided by the porssisahko.net API",
    footer_updated: "Last updated",
};
