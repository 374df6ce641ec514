use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use papertrail_core::Money;

/// A previously issued quote kept as reference context.
///
/// Populated from an external source; the core never mutates the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// The customer's original free-text request.
    pub request_text: String,
    pub total_amount: Money,
    /// The explanation that accompanied the quote.
    pub rationale: String,
    pub job_type: Option<String>,
    pub order_size: Option<String>,
    pub event_type: Option<String>,
    pub request_date: NaiveDate,
}

/// Read-only corpus of historical quotes with keyword relevance search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteHistory {
    records: Vec<QuoteRecord>,
}

impl QuoteHistory {
    pub fn new(records: Vec<QuoteRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[QuoteRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive keyword match across request text and rationale.
    ///
    /// Ranked by number of matching terms, then most recent first. Records
    /// matching no term are omitted; blank terms are ignored.
    pub fn search(&self, terms: &[&str], limit: usize) -> Vec<&QuoteRecord> {
        let needles: Vec<String> = terms
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if needles.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(usize, &QuoteRecord)> = self
            .records
            .iter()
            .filter_map(|record| {
                let haystack =
                    format!("{} {}", record.request_text, record.rationale).to_lowercase();
                let score = needles
                    .iter()
                    .filter(|needle| haystack.contains(needle.as_str()))
                    .count();
                (score > 0).then_some((score, record))
            })
            .collect();

        hits.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| b.1.request_date.cmp(&a.1.request_date))
        });
        hits.truncate(limit);
        hits.into_iter().map(|(_, record)| record).collect()
    }
}
