//! Running summary over normalized QR codes.

use super::qr_code::QrCode;
use serde::Serialize;
use tracing::warn;

/// Output of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateResult {
    pub static_count: usize,
    pub dynamic_count: usize,
    /// Sum of integer `total_scans` over dynamic codes only.
    pub total_scans_all_time: i64,
    /// Included codes in fetch order.
    pub records: Vec<QrCode>,
}

impl AggregateResult {
    /// Number of included codes.
    pub fn total(&self) -> usize {
        self.static_count + self.dynamic_count
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Single forward pass accumulator producing an [`AggregateResult`].
#[derive(Debug, Default)]
pub struct Aggregator {
    result: AggregateResult,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the code and keeps it. Order is preserved and ids are not deduplicated.
    pub fn push(&mut self, code: QrCode) {
        if code.is_dynamic {
            self.result.dynamic_count += 1;
        } else {
            self.result.static_count += 1;
        }

        if let Some(scans) = code.counted_scans() {
            self.add_scans(&code.id, scans);
        }

        self.result.records.push(code);
    }

    /// Saturates at the `i64` bounds instead of overflowing.
    fn add_scans(&mut self, id: &str, scans: i64) {
        let total = &mut self.result.total_scans_all_time;
        match total.checked_add(scans) {
            Some(sum) => *total = sum,
            None => {
                warn!(
                    "Total scan count overflowed adding {} scans of code {}, capping it",
                    scans, id
                );
                *total = total.saturating_add(scans);
            }
        }
    }

    pub fn finish(self) -> AggregateResult {
        self.result
    }
}

impl Extend<QrCode> for Aggregator {
    fn extend<I: IntoIterator<Item = QrCode>>(&mut self, iter: I) {
        for code in iter {
            self.push(code);
        }
    }
}

impl FromIterator<QrCode> for AggregateResult {
    fn from_iter<I: IntoIterator<Item = QrCode>>(iter: I) -> Self {
        let mut aggregator = Aggregator::new();
        aggregator.extend(iter);
        aggregator.finish()
    }
}
