use serde::{Deserialize, Serialize};

/// One input row that was excluded, with its 1-based data row number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRejection {
    pub row: usize,
    pub reason: String,
}

/// Accounting of a batch conversion from raw rows to validated records.
///
/// `total_rows == accepted + dropped_missing_headline + rejected.len()`.
/// Rows in `untagged` were accepted with their unusable ticker cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub total_rows: usize,
    pub accepted: usize,
    pub dropped_missing_headline: usize,
    pub rejected: Vec<RowRejection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub untagged: Vec<RowRejection>,
}

impl IngestReport {
    pub fn skipped(&self) -> usize {
        self.dropped_missing_headline + self.rejected.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped() == 0
    }

    pub(crate) fn reject(&mut self, row: usize, reason: impl ToString) {
        self.rejected.push(RowRejection {
            row,
            reason: reason.to_string(),
        });
    }

    pub(crate) fn untag(&mut self, row: usize, reason: impl ToString) {
        self.untagged.push(RowRejection {
            row,
            reason: reason.to_string(),
        });
    }

    /// Human-readable summary lines, one per kind of skip.
    pub fn warnings(&self, source: &str) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.dropped_missing_headline > 0 {
            warnings.push(format!(
                "{source}: dropped {} row(s) without a headline",
                self.dropped_missing_headline
            ));
        }
        warnings.extend(
            self.rejected
                .iter()
                .map(|r| format!("{source}: row {} rejected: {}", r.row, r.reason)),
        );
        warnings.extend(
            self.untagged
                .iter()
                .map(|r| format!("{source}: row {} ticker ignored: {}", r.row, r.reason)),
        );
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_list_every_skip() {
        let mut report = IngestReport {
            total_rows: 4,
            accepted: 2,
            dropped_missing_headline: 1,
            rejected: Vec::new(),
            untagged: Vec::new(),
        };
        report.reject(3, "unparseable date 'soon'");
        report.untag(4, "symbol must start with an ASCII letter: '1'");

        assert_eq!(report.skipped(), 2);
        assert!(!report.is_clean());
        assert_eq!(
            report.warnings("news"),
            vec![
                "news: dropped 1 row(s) without a headline".to_owned(),
                "news: row 3 rejected: unparseable date 'soon'".to_owned(),
                "news: row 4 ticker ignored: symbol must start with an ASCII letter: '1'"
                    .to_owned(),
            ]
        );
    }
}
