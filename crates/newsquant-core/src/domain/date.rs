use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset, Weekday};

use crate::ValidationError;

/// Calendar date used as the join key of every time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    pub fn from_calendar_date(year: i32, month: u8, day: u8) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDate {
            value: format!("{year:04}-{month:02}-{day:02}"),
        };
        let month = Month::try_from(month).map_err(|_| invalid())?;
        Date::from_calendar_date(year, month, day)
            .map(Self)
            .map_err(|_| invalid())
    }

    /// Parse a date, or a timestamp whose date part is kept.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        NewsTimestamp::parse(input).map(NewsTimestamp::date)
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }
}

impl From<Date> for TradingDate {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TradingDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Publication timestamp of a headline.
///
/// Keeps the wall-clock time as published; the offset is retained when the
/// source carried one. The calendar date is taken from the wall clock, so a
/// `2020-06-05 23:30:00-04:00` headline belongs to June 5th.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NewsTimestamp {
    local: PrimitiveDateTime,
    offset: Option<UtcOffset>,
}

impl NewsTimestamp {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let value = input.trim();

        if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) {
            return Ok(Self::from_offset(parsed));
        }
        if let Ok(parsed) = OffsetDateTime::parse(
            value,
            format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
            ),
        ) {
            return Ok(Self::from_offset(parsed));
        }
        if let Ok(local) = PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        ) {
            return Ok(Self::naive(local));
        }
        if let Ok(local) = PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        ) {
            return Ok(Self::naive(local));
        }
        if let Ok(date) = Date::parse(value, format_description!("[year]-[month]-[day]")) {
            return Ok(Self::naive(PrimitiveDateTime::new(date, Time::MIDNIGHT)));
        }

        Err(ValidationError::InvalidDate {
            value: input.to_owned(),
        })
    }

    fn from_offset(value: OffsetDateTime) -> Self {
        Self {
            local: PrimitiveDateTime::new(value.date(), value.time()),
            offset: Some(value.offset()),
        }
    }

    fn naive(local: PrimitiveDateTime) -> Self {
        Self {
            local,
            offset: None,
        }
    }

    pub fn date(self) -> TradingDate {
        TradingDate(self.local.date())
    }

    pub fn hour(self) -> u8 {
        self.local.hour()
    }

    pub fn offset(self) -> Option<UtcOffset> {
        self.offset
    }
}

impl Display for NewsTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}:{:02}",
            self.date(),
            self.local.hour(),
            self.local.minute(),
            self.local.second()
        )?;
        if let Some(offset) = self.offset {
            let (hours, minutes, _) = offset.as_hms();
            let sign = if offset.is_negative() { '-' } else { '+' };
            write!(f, "{sign}{:02}:{:02}", hours.unsigned_abs(), minutes.unsigned_abs())?;
        }
        Ok(())
    }
}

impl Serialize for NewsTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NewsTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dataset_timestamp_with_offset() {
        let ts = NewsTimestamp::parse("2020-06-05 10:30:54-04:00").expect("must parse");
        assert_eq!(ts.date().to_string(), "2020-06-05");
        assert_eq!(ts.hour(), 10);
        assert_eq!(ts.to_string(), "2020-06-05 10:30:54-04:00");
    }

    #[test]
    fn late_evening_headline_keeps_wall_clock_date() {
        let ts = NewsTimestamp::parse("2020-06-05 23:30:00-04:00").expect("must parse");
        assert_eq!(ts.date().to_string(), "2020-06-05");
    }

    #[test]
    fn parses_rfc3339_naive_and_date_only_forms() {
        assert_eq!(
            NewsTimestamp::parse("2024-01-01T10:30:00Z")
                .expect("rfc3339")
                .hour(),
            10
        );
        assert_eq!(
            NewsTimestamp::parse("2024-01-02 15:45:00")
                .expect("naive")
                .hour(),
            15
        );
        let midnight = NewsTimestamp::parse("2024-01-03").expect("date only");
        assert_eq!(midnight.hour(), 0);
        assert_eq!(midnight.offset(), None);
    }

    #[test]
    fn rejects_garbage_dates() {
        let err = NewsTimestamp::parse("yesterday").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
        assert!(TradingDate::parse("2024-13-01").is_err());
    }

    #[test]
    fn trading_date_reports_weekday_and_serializes_as_iso() {
        let date = TradingDate::from_calendar_date(2024, 1, 1).expect("valid date");
        assert_eq!(date.weekday(), Weekday::Monday);
        assert_eq!(
            serde_json::to_string(&date).expect("serialize"),
            "\"2024-01-01\""
        );
    }
}
