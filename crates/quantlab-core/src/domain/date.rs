use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const BHAVCOPY_DATE: &[FormatItem<'static>] =
    format_description!("[day]-[month repr:short case_sensitive:false]-[year]");

/// Calendar trading date with no time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeDate(Date);

impl TradeDate {
    /// Parse an ISO `YYYY-MM-DD` date.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), &ISO_DATE)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    /// Parse an exchange bhavcopy `DD-Mon-YYYY` date such as `02-Jan-2024`.
    pub fn parse_bhavcopy(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), &BHAVCOPY_DATE)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    /// Parse either supported representation, ISO first.
    pub fn parse_any(input: &str) -> Result<Self, ValidationError> {
        Self::parse(input).or_else(|_| Self::parse_bhavcopy(input))
    }

    pub fn from_date(value: Date) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> Date {
        self.0
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(&ISO_DATE)
            .expect("TradeDate must be ISO formattable")
    }

    /// Next calendar day, used when generating fixture sequences.
    pub fn next_day(self) -> Option<Self> {
        self.0.next_day().map(Self)
    }
}

impl Display for TradeDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for TradeDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for TradeDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse_any(&value).map_err(D::Error::custom)
    }
}
