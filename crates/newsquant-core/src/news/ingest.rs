use tracing::{debug, warn};

use crate::{IngestReport, NewsItem, NewsTimestamp, RawNewsRecord, Ticker, ValidationError};

/// Validated headlines plus the accounting of what was skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsBatch {
    pub items: Vec<NewsItem>,
    pub report: IngestReport,
}

/// Convert raw rows into [`NewsItem`]s.
///
/// Rows without a headline are dropped and counted. Rows with a bad date are
/// recorded as rejections. A malformed ticker does not cost the headline: the
/// row is kept untagged and noted in the report. None of these stops the
/// batch.
pub fn ingest<I>(records: I) -> NewsBatch
where
    I: IntoIterator<Item = RawNewsRecord>,
{
    ingest_rows(
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| (index + 1, record)),
    )
}

/// [`ingest`] with caller-assigned row numbers.
pub(crate) fn ingest_rows<I>(rows: I) -> NewsBatch
where
    I: IntoIterator<Item = (usize, RawNewsRecord)>,
{
    let mut batch = NewsBatch::default();

    for (row, record) in rows {
        batch.report.total_rows += 1;

        if record
            .headline
            .as_deref()
            .is_none_or(|headline| headline.trim().is_empty())
        {
            debug!(row, "dropping news row without headline");
            batch.report.dropped_missing_headline += 1;
            continue;
        }

        match to_item(record) {
            Ok((item, ticker_error)) => {
                if let Some(err) = ticker_error {
                    warn!(row, error = %err, "keeping news row without its ticker");
                    batch.report.untag(row, err);
                }
                batch.report.accepted += 1;
                batch.items.push(item);
            }
            Err(err) => {
                warn!(row, error = %err, "rejecting news row");
                batch.report.reject(row, err);
            }
        }
    }

    batch
}

/// The item, plus the reason its ticker was dropped if it had to be.
fn to_item(record: RawNewsRecord) -> Result<(NewsItem, Option<ValidationError>), ValidationError> {
    let raw_date = record
        .date
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::MissingField { field: "date" })?;
    let timestamp = NewsTimestamp::parse(raw_date)?;

    let (stock, ticker_error) = match record.stock.as_deref().map(str::trim) {
        None | Some("") => (None, None),
        Some(value) => match Ticker::parse(value) {
            Ok(ticker) => (Some(ticker), None),
            Err(err) => (None, Some(err)),
        },
    };

    let item = NewsItem::new(
        timestamp,
        record.headline.unwrap_or_default().trim(),
        record.publisher.unwrap_or_default().trim(),
        stock,
        record.url.unwrap_or_default().trim(),
    )?;
    Ok((item, ticker_error))
}

/// Keep only headlines tagged with `ticker`.
pub fn filter_by_ticker(items: &[NewsItem], ticker: &Ticker) -> Vec<NewsItem> {
    items
        .iter()
        .filter(|item| item.stock.as_ref() == Some(ticker))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, headline: Option<&str>, stock: &str) -> RawNewsRecord {
        RawNewsRecord {
            date: Some(date.to_owned()),
            headline: headline.map(str::to_owned),
            url: Some("https://example.com/a".to_owned()),
            publisher: Some("Benzinga Newsdesk".to_owned()),
            stock: Some(stock.to_owned()),
        }
    }

    #[test]
    fn missing_headlines_are_dropped_and_counted() {
        let batch = ingest(vec![
            raw("2020-06-05 10:30:00-04:00", Some("Stocks rally"), "AAPL"),
            raw("2020-06-05 11:00:00-04:00", None, "AAPL"),
            raw("2020-06-05 12:00:00-04:00", Some("   "), "AAPL"),
        ]);

        assert_eq!(batch.items.len(), 1);
        assert_eq!(batch.report.total_rows, 3);
        assert_eq!(batch.report.accepted, 1);
        assert_eq!(batch.report.dropped_missing_headline, 2);
        assert!(batch.report.rejected.is_empty());
    }

    #[test]
    fn bad_dates_are_rejected_with_row_numbers() {
        let batch = ingest(vec![
            raw("not a date", Some("Headline"), "AAPL"),
            raw("2020-06-05", Some("Headline"), "aapl"),
        ]);

        assert_eq!(batch.items.len(), 1);
        assert_eq!(batch.items[0].stock.as_ref().map(Ticker::as_str), Some("AAPL"));
        let rows: Vec<usize> = batch.report.rejected.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![1]);
        assert!(batch.report.rejected[0].reason.contains("not a date"));
    }

    #[test]
    fn malformed_ticker_keeps_the_headline_untagged() {
        let batch = ingest(vec![
            raw("2020-06-05", Some("Macro update"), "1BAD"),
            raw("2020-06-05", Some("Apple rallies"), "AAPL"),
        ]);

        assert_eq!(batch.items.len(), 2);
        assert_eq!(batch.items[0].stock, None);
        assert_eq!(batch.report.accepted, 2);
        assert!(batch.report.rejected.is_empty());
        assert_eq!(batch.report.untagged.len(), 1);
        assert_eq!(batch.report.untagged[0].row, 1);
        assert!(batch
            .report
            .warnings("news")
            .iter()
            .any(|w| w.starts_with("news: row 1 ticker ignored")));

        let aapl = Ticker::parse("AAPL").expect("ticker");
        assert_eq!(filter_by_ticker(&batch.items, &aapl).len(), 1);
    }

    #[test]
    fn missing_date_is_a_rejection() {
        let mut record = raw("", Some("Headline"), "AAPL");
        record.date = None;
        let batch = ingest(vec![record]);
        assert_eq!(batch.report.rejected.len(), 1);
        assert!(batch.report.rejected[0].reason.contains("date"));
    }

    #[test]
    fn blank_stock_is_untagged() {
        let batch = ingest(vec![raw("2020-06-05", Some("Macro update"), " ")]);
        assert_eq!(batch.items[0].stock, None);
    }

    #[test]
    fn ticker_filter_keeps_matching_items() {
        let batch = ingest(vec![
            raw("2020-06-05", Some("One"), "AAPL"),
            raw("2020-06-05", Some("Two"), "MSFT"),
            raw("2020-06-06", Some("Three"), "AAPL"),
        ]);
        let aapl = Ticker::parse("AAPL").expect("ticker");

        let kept = filter_by_ticker(&batch.items, &aapl);
        let headlines: Vec<&str> = kept.iter().map(|i| i.headline.as_str()).collect();
        assert_eq!(headlines, vec!["One", "Three"]);
    }
}
