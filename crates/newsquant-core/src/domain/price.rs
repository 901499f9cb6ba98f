use serde::{Deserialize, Serialize};

use crate::{TradingDate, ValidationError};

/// One daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    pub fn new(
        date: TradingDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_positive("open", open)?;
        validate_positive("high", high)?;
        validate_positive("low", low)?;
        validate_positive("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }
        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Flat bar where every price equals `close`; used when only closes are known.
    pub fn from_close(date: TradingDate, close: f64) -> Result<Self, ValidationError> {
        Self::new(date, close, close, close, close, 0)
    }
}

/// Check the batch contract shared by every time-series stage: non-empty,
/// positive finite prices, strictly ascending dates.
pub fn validate_series(bars: &[PriceBar]) -> Result<(), ValidationError> {
    if bars.is_empty() {
        return Err(ValidationError::EmptySeries);
    }

    for (index, bar) in bars.iter().enumerate() {
        for (field, value) in [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::InvalidPrice {
                    index,
                    date: bar.date.to_string(),
                    field,
                });
            }
        }
    }

    for (index, pair) in bars.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        if current.date == previous.date {
            return Err(ValidationError::DuplicateDate {
                index: index + 1,
                date: current.date.to_string(),
            });
        }
        if current.date < previous.date {
            return Err(ValidationError::UnsortedDates {
                index: index + 1,
                previous: previous.date.to_string(),
                date: current.date.to_string(),
            });
        }
    }

    Ok(())
}

/// Validate a raw CSV volume (floats such as `1.5e7` are common in exports).
pub fn parse_volume(value: f64) -> Result<u64, ValidationError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(ValidationError::InvalidVolume { field: "volume" });
    }
    Ok(value as u64)
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u8) -> TradingDate {
        TradingDate::from_calendar_date(2024, 1, d).expect("valid date")
    }

    #[test]
    fn rejects_non_positive_and_non_finite_prices() {
        assert_eq!(
            PriceBar::new(day(1), 0.0, 1.0, 0.0, 1.0, 10),
            Err(ValidationError::NonPositiveValue { field: "open" })
        );
        assert_eq!(
            PriceBar::from_close(day(1), f64::NAN),
            Err(ValidationError::NonFiniteValue { field: "open" })
        );
    }

    #[test]
    fn rejects_inconsistent_ranges() {
        assert_eq!(
            PriceBar::new(day(1), 10.0, 9.0, 11.0, 10.0, 1),
            Err(ValidationError::InvalidBarRange)
        );
        assert_eq!(
            PriceBar::new(day(1), 10.0, 12.0, 9.0, 12.5, 1),
            Err(ValidationError::InvalidBarBounds)
        );
    }

    #[test]
    fn series_validation_names_offending_row() {
        let bars = vec![
            PriceBar::from_close(day(2), 10.0).expect("bar"),
            PriceBar::from_close(day(1), 11.0).expect("bar"),
        ];
        assert_eq!(
            validate_series(&bars),
            Err(ValidationError::UnsortedDates {
                index: 1,
                previous: String::from("2024-01-02"),
                date: String::from("2024-01-01"),
            })
        );

        let duplicated = vec![
            PriceBar::from_close(day(1), 10.0).expect("bar"),
            PriceBar::from_close(day(1), 11.0).expect("bar"),
        ];
        assert!(matches!(
            validate_series(&duplicated),
            Err(ValidationError::DuplicateDate { index: 1, .. })
        ));
        assert_eq!(validate_series(&[]), Err(ValidationError::EmptySeries));
    }

    #[test]
    fn series_validation_catches_mutated_prices() {
        let mut bar = PriceBar::from_close(day(1), 10.0).expect("bar");
        bar.close = -1.0;
        assert!(matches!(
            validate_series(&[bar]),
            Err(ValidationError::InvalidPrice { field: "close", .. })
        ));
    }

    #[test]
    fn volume_must_be_whole_and_non_negative() {
        assert_eq!(parse_volume(1.5e7), Ok(15_000_000));
        assert!(parse_volume(-1.0).is_err());
        assert!(parse_volume(10.5).is_err());
    }
}
