use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::EnrichedNewsItem;
use crate::{NewsItem, TradingDate};

/// Mean headline polarity for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySentiment {
    pub date: TradingDate,
    pub mean_sentiment: f64,
    pub article_count: usize,
}

/// Group scored headlines by calendar date, sorted ascending.
///
/// Each date's score is the unweighted mean of its headline polarities.
pub fn daily_sentiment(items: &[EnrichedNewsItem]) -> Vec<DailySentiment> {
    let mut by_date: BTreeMap<TradingDate, (f64, usize)> = BTreeMap::new();
    for item in items {
        let entry = by_date.entry(item.date).or_insert((0.0, 0));
        entry.0 += item.sentiment.polarity;
        entry.1 += 1;
    }

    by_date
        .into_iter()
        .map(|(date, (sum, count))| DailySentiment {
            date,
            mean_sentiment: sum / count as f64,
            article_count: count,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherCount {
    pub publisher: String,
    pub count: usize,
}

/// Articles per publisher, most active first; ties sorted by name.
pub fn publisher_counts(items: &[NewsItem]) -> Vec<PublisherCount> {
    count_by(items.iter().map(|item| item.publisher.as_str()))
}

/// Articles per publisher email domain, for publishers that are addresses.
pub fn publisher_domain_counts(items: &[NewsItem]) -> Vec<PublisherCount> {
    count_by(items.iter().filter_map(|item| publisher_domain(&item.publisher)))
}

fn count_by<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<PublisherCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }

    let mut out: Vec<PublisherCount> = counts
        .into_iter()
        .map(|(publisher, count)| PublisherCount {
            publisher: publisher.to_owned(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.publisher.cmp(&b.publisher)));
    out
}

/// `"jane@reuters.com"` → `Some("reuters.com")`; plain names yield `None`.
pub fn publisher_domain(publisher: &str) -> Option<&str> {
    let (local, domain) = publisher.trim().rsplit_once('@')?;
    if local.is_empty() || domain.is_empty() {
        return None;
    }
    Some(domain)
}
