use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while reading a `DD/MM/YYYY` display date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("expected a DD/MM/YYYY date, got {0:?}")]
    Format(String),
    #[error("{0:?} is not a valid calendar date")]
    Calendar(String),
}

/// A catalog date in its human-facing `DD/MM/YYYY` form.
///
/// The input text is kept verbatim so the selector and the selected-date
/// state show exactly what the backend listed (`5/3/2024` stays unpadded).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayDate {
    raw: String,
    date: NaiveDate,
}

impl DisplayDate {
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let parts: Vec<&str> = input.split('/').collect();
        let [day, month, year] = parts.as_slice() else {
            return Err(DateError::Format(input.to_string()));
        };

        let numeric = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !(numeric(day) && numeric(month) && numeric(year)) || year.len() != 4 {
            return Err(DateError::Format(input.to_string()));
        }

        let format_err = || DateError::Format(input.to_string());
        let day: u32 = day.parse().map_err(|_| format_err())?;
        let month: u32 = month.parse().map_err(|_| format_err())?;
        let year: i32 = year.parse().map_err(|_| format_err())?;

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| DateError::Calendar(input.to_string()))?;

        Ok(Self {
            raw: input.to_string(),
            date,
        })
    }

    /// The date exactly as it was listed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The machine-facing `YYYY-MM-DD` form sent to the report endpoint.
    pub fn api_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl FromStr for DisplayDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DisplayDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Convert a `DD/MM/YYYY` display date into the `YYYY-MM-DD` API form.
pub fn to_api_date(display: &str) -> Result<String, DateError> {
    DisplayDate::parse(display).map(|d| d.api_date())
}
