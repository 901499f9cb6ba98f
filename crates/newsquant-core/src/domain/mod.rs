//! # Domain Models
//!
//! Record types shared by every analysis stage.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PriceBar`] | Daily OHLCV bar |
//! | [`RawNewsRecord`] | Unvalidated news CSV row |
//! | [`NewsItem`] | Validated headline with timestamp and ticker |
//! | [`Ticker`] | Normalized stock ticker |
//! | [`TradingDate`] | Calendar date join key |
//! | [`NewsTimestamp`] | Headline publication time |
//!
//! Construction validates invariants; derived values live in separate row
//! types so loaded records are never mutated.

mod date;
mod news;
mod price;
mod ticker;

pub use date::{NewsTimestamp, TradingDate};
pub use news::{NewsItem, RawNewsRecord};
pub use price::{parse_volume, validate_series, PriceBar};
pub use ticker::Ticker;
