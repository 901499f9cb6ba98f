//! Behavior tests for invalid input: what fails, what is skipped and how the
//! caller learns about it.

use newsquant_core::{
    correlate, load_news, load_prices, read_prices, CoreError, CorrelationError,
    DailySentiment, IndicatorEngine, InsufficientDataError, PriceBar, RawNewsRecord,
    TopicConfig, TopicError, TradingDate, ValidationError,
};
use newsquant_core::news::ingest;
use newsquant_tests::{bars, wavy_closes, write_file};
use tempfile::tempdir;

fn raw(date: &str, headline: &str) -> RawNewsRecord {
    RawNewsRecord {
        date: Some(date.to_owned()),
        headline: Some(headline.to_owned()),
        url: None,
        publisher: Some("Desk".to_owned()),
        stock: Some("AAPL".to_owned()),
    }
}

#[test]
fn malformed_news_dates_are_excluded_and_counted() {
    // Given: A batch where one of three rows has an unparseable date
    let records = vec![
        raw("2020-06-05 10:30:54-04:00", "Apple rallies"),
        raw("05/06/2020", "Apple slips"),
        raw("2020-06-06", "Apple steadies"),
    ];

    // When: The batch is ingested
    let batch = ingest(records);

    // Then: The rest of the batch proceeds and the bad row is reported
    assert_eq!(batch.items.len(), 2);
    assert_eq!(batch.report.rejected.len(), 1);
    assert_eq!(batch.report.rejected[0].row, 2);
    assert!(batch.report.rejected[0].reason.contains("05/06/2020"));
}

#[test]
fn zero_overlap_between_sentiment_and_returns_is_insufficient_data() {
    // Given: Prices in January 2024 and sentiment in 2019
    let rows = IndicatorEngine::new()
        .compute(&bars(&wavy_closes(10)))
        .expect("indicators");
    let sentiment = vec![DailySentiment {
        date: TradingDate::from_calendar_date(2019, 5, 1).expect("date"),
        mean_sentiment: 0.3,
        article_count: 2,
    }];

    // When: They are correlated
    let err = correlate(&rows, &sentiment).expect_err("no overlap");

    // Then: The failure says how much data was missing
    assert_eq!(
        err,
        CorrelationError::InsufficientData(InsufficientDataError::new(
            "sentiment/return correlation",
            2,
            0
        ))
    );
}

#[test]
fn unsorted_or_duplicate_price_dates_name_the_offending_row() {
    let jan = |d| TradingDate::from_calendar_date(2024, 1, d).expect("date");
    let bar = |d| PriceBar::from_close(jan(d), 10.0).expect("bar");
    let engine = IndicatorEngine::new();

    assert!(matches!(
        engine.compute(&[bar(2), bar(1)]),
        Err(ValidationError::UnsortedDates { index: 1, .. })
    ));
    assert!(matches!(
        engine.compute(&[bar(1), bar(1)]),
        Err(ValidationError::DuplicateDate { index: 1, .. })
    ));
    assert_eq!(engine.compute(&[]), Err(ValidationError::EmptySeries));
}

#[test]
fn invalid_bars_are_rejected_at_construction() {
    let date = TradingDate::from_calendar_date(2024, 1, 2).expect("date");
    assert!(PriceBar::new(date, 10.0, 9.0, 11.0, 10.0, 1).is_err());
    assert!(PriceBar::new(date, -1.0, 10.0, 9.0, 9.5, 1).is_err());
    assert!(PriceBar::new(date, f64::NAN, 10.0, 9.0, 9.5, 1).is_err());
}

#[test]
fn missing_files_report_their_path() {
    let dir = tempdir().expect("temp dir");
    let missing = dir.path().join("absent.csv");

    for err in [
        load_prices(&missing).expect_err("missing prices"),
        load_news(&missing).map(|_| ()).expect_err("missing news"),
    ] {
        match err {
            CoreError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("expected an io error, got {other}"),
        }
    }
}

#[test]
fn skipped_price_rows_do_not_abort_the_load() {
    // Given: A price file with a corrupt row between two good ones
    let dir = tempdir().expect("temp dir");
    let path = write_file(
        dir.path(),
        "prices.csv",
        "Date,Open,High,Low,Close,Volume\n\
         2024-01-02,10,11,9,10.5,100\n\
         2024-01-03,10,11,9,n/a,100\n\
         2024-01-04,10,11,9,10.2,100\n",
    );

    // When: It is loaded
    let load = load_prices(&path).expect("load should succeed");

    // Then: The good rows survive and the bad one is reported
    assert_eq!(load.bars.len(), 2);
    assert_eq!(load.report.rejected.len(), 1);
    assert_eq!(load.report.rejected[0].row, 2);
}

#[test]
fn header_only_price_file_yields_an_empty_series_error_downstream() {
    let load = read_prices("Date,Open,High,Low,Close,Volume\n".as_bytes()).expect("csv");
    assert!(load.bars.is_empty());
    assert_eq!(
        IndicatorEngine::new().compute(&load.bars),
        Err(ValidationError::EmptySeries)
    );
}

#[test]
fn topic_model_on_tiny_corpus_reports_an_empty_vocabulary() {
    let err = newsquant_core::topic_model_from_texts(&["one headline"], &TopicConfig::default())
        .expect_err("min_df of 20 cannot be met");
    assert!(matches!(err, TopicError::EmptyVocabulary { min_df: 20, .. }));
}

#[test]
fn unequal_series_are_not_silently_truncated() {
    assert_eq!(
        newsquant_core::pearson(&[0.01, -0.02, 0.03], &[0.2, -0.1]),
        Err(CorrelationError::LengthMismatch { left: 3, right: 2 })
    );
}

#[test]
fn malformed_ticker_keeps_the_headline() {
    // Given: A headline whose stock column is not a ticker
    let mut record = raw("2024-01-02", "Fed holds rates");
    record.stock = Some("$$$".to_owned());

    // When: It is ingested
    let batch = ingest(vec![record]);

    // Then: The headline survives without a ticker and the report says why
    assert_eq!(batch.items.len(), 1);
    assert_eq!(batch.items[0].stock, None);
    assert!(batch.report.rejected.is_empty());
    assert_eq!(batch.report.untagged[0].row, 1);
}

#[test]
fn blank_headlines_are_dropped_not_rejected() {
    let batch = ingest(vec![raw("2024-01-02", "  "), raw("2024-01-02", "Apple rallies")]);
    assert_eq!(batch.report.dropped_missing_headline, 1);
    assert!(batch.report.rejected.is_empty());
    assert_eq!(batch.report.accepted, 1);
}
