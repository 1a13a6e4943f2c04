//! Paginated retrieval of the QR code inventory.

use std::sync::Arc;

use crate::domain::entities::RawRecord;
use crate::domain::transport::HttpTransport;
use crate::error::FetchError;
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Records per page served by the listing endpoint.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound on pages requested in one run.
pub const DEFAULT_MAX_PAGES: u32 = 50_000;

/// One decoded page of the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub number: u32,
    /// Number of items the API returned, including any non-object entries
    /// that were skipped.
    pub size: usize,
    pub records: Vec<RawRecord>,
}

/// Why pagination stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// A short or empty page marked the end of the data.
    Completed,
    /// The very first page was empty.
    Empty,
    /// `max_pages` pages were fetched without reaching the end.
    PageLimitReached,
    /// A page could not be fetched; records from earlier pages are kept.
    Failed(FetchError),
}

impl Termination {
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Everything gathered by [`InventoryService::fetch_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub records: Vec<RawRecord>,
    pub pages_fetched: u32,
    pub termination: Termination,
}

/// Issues one GET per page against the listing endpoint.
pub struct PageFetcher<T: HttpTransport> {
    transport: Arc<T>,
    endpoint: String,
}

impl<T: HttpTransport> PageFetcher<T> {
    pub fn new(transport: Arc<T>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    /// Fetches and decodes one 1-based page.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Transport`] if no response was received
    /// - [`FetchError::Status`] on a non-2xx status
    /// - [`FetchError::Decode`] if the body is not a page of records
    pub async fn fetch_page(&self, access_token: &str, page: u32) -> Result<Page, FetchError> {
        let query = [
            ("access-token".to_string(), access_token.to_string()),
            ("page".to_string(), page.to_string()),
        ];

        let response = self
            .transport
            .get(&self.endpoint, &query)
            .await
            .map_err(|source| FetchError::Transport { page, source })?;

        if !response.is_success() {
            return Err(FetchError::Status {
                page,
                status: response.status,
                body: response.body_text(),
            });
        }

        let items =
            decode_page(&response.body).map_err(|message| FetchError::Decode { page, message })?;
        let size = items.len();

        let records: Vec<RawRecord> = items.into_iter().filter_map(RawRecord::from_value).collect();
        if records.len() < size {
            warn!(
                "Page {}: skipped {} entries that are not JSON objects",
                page,
                size - records.len()
            );
        }

        Ok(Page {
            number: page,
            size,
            records,
        })
    }
}

/// Extracts the item list from a page body.
///
/// Accepts a bare JSON array or an object with a `data` array. An object
/// without `data` is an empty page.
pub fn decode_page(body: &[u8]) -> Result<Vec<Value>, String> {
    let value: Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;

    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut fields) => match fields.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(other) => Err(format!("expected `data` to be an array, got {}", other)),
        },
        other => Err(format!("expected an array or object, got {}", other)),
    }
}

/// Drives [`PageFetcher`] over sequential pages until the data runs out.
///
/// Pages are requested one at a time with no retries: a single failed page
/// ends the run and whatever was collected before it is returned alongside
/// the error.
pub struct InventoryService<T: HttpTransport> {
    fetcher: PageFetcher<T>,
    page_size: usize,
    max_pages: u32,
}

impl<T: HttpTransport> InventoryService<T> {
    /// Creates a service with the default page size and page limit.
    pub fn new(transport: Arc<T>, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher: PageFetcher::new(transport, endpoint),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetches every page of the inventory.
    ///
    /// # Termination
    ///
    /// - page shorter than `page_size`: [`Termination::Completed`]
    /// - empty page: [`Termination::Empty`] on page 1, else [`Termination::Completed`]
    /// - fetch failure: [`Termination::Failed`] with earlier pages kept
    /// - `max_pages` reached: [`Termination::PageLimitReached`]
    pub async fn fetch_all(&self, access_token: &str) -> FetchOutcome {
        let mut records = Vec::new();
        let mut pages_fetched = 0;

        for number in 1..=self.max_pages {
            let page = match self.fetcher.fetch_page(access_token, number).await {
                Ok(page) => page,
                Err(e) => {
                    error!("Stopping pagination: {}", e);
                    return FetchOutcome {
                        records,
                        pages_fetched,
                        termination: Termination::Failed(e),
                    };
                }
            };
            pages_fetched = number;
            debug!("Fetched page {} with {} records", number, page.size);

            if page.size == 0 {
                let termination = if records.is_empty() {
                    info!("No QR codes found");
                    Termination::Empty
                } else {
                    Termination::Completed
                };
                return FetchOutcome {
                    records,
                    pages_fetched,
                    termination,
                };
            }

            let is_last = page.size < self.page_size;
            records.extend(page.records);

            if is_last {
                info!(
                    "Fetched {} QR codes from {} pages",
                    records.len(),
                    pages_fetched
                );
                return FetchOutcome {
                    records,
                    pages_fetched,
                    termination: Termination::Completed,
                };
            }
        }

        warn!(
            "Page limit of {} reached, treating page {} as the last one",
            self.max_pages, pages_fetched
        );
        FetchOutcome {
            records,
            pages_fetched,
            termination: Termination::PageLimitReached,
        }
    }
}
