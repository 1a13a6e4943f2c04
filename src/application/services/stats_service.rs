//! QR code statistics: fetch, normalize, filter and aggregate.

use crate::application::services::inventory_service::{InventoryService, Termination};
use crate::domain::date_window::{DateWindow, include};
use crate::domain::entities::{AggregateResult, Aggregator, RawRecord};
use crate::domain::transport::HttpTransport;
use crate::utils::record_normalizer::normalize_record;
use tracing::info;

/// Result of one statistics run.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub aggregate: AggregateResult,
    /// Raw records received before filtering.
    pub fetched: usize,
    pub pages_fetched: u32,
    pub termination: Termination,
}

impl StatsReport {
    /// Records dropped by the date window.
    pub fn excluded(&self) -> usize {
        self.fetched - self.aggregate.total()
    }

    /// True when a page failed and the counters cover only earlier pages.
    pub fn is_partial(&self) -> bool {
        matches!(self.termination, Termination::Failed(_))
    }
}

/// Service computing summary statistics over a QR code inventory.
pub struct StatsService<T: HttpTransport> {
    inventory: InventoryService<T>,
}

impl<T: HttpTransport> StatsService<T> {
    pub fn new(inventory: InventoryService<T>) -> Self {
        Self { inventory }
    }

    /// Runs the whole pipeline for one access token.
    ///
    /// Never fails: a fetch error yields a partial report whose
    /// `termination` carries the error.
    pub async fn collect(&self, access_token: &str, window: Option<&DateWindow>) -> StatsReport {
        let outcome = self.inventory.fetch_all(access_token).await;
        let aggregate = summarize(&outcome.records, window);

        info!(
            "Summarized {} of {} QR codes: {} static, {} dynamic, {} total scans",
            aggregate.total(),
            outcome.records.len(),
            aggregate.static_count,
            aggregate.dynamic_count,
            aggregate.total_scans_all_time
        );

        StatsReport {
            fetched: outcome.records.len(),
            pages_fetched: outcome.pages_fetched,
            termination: outcome.termination,
            aggregate,
        }
    }
}

/// Normalizes, filters and aggregates raw records in fetch order.
pub fn summarize<'a>(
    records: impl IntoIterator<Item = &'a RawRecord>,
    window: Option<&DateWindow>,
) -> AggregateResult {
    let mut aggregator = Aggregator::new();
    aggregator.extend(
        records
            .into_iter()
            .map(normalize_record)
            .filter(|code| include(code, window)),
    );
    aggregator.finish()
}
