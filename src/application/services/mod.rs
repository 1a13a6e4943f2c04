//! Business logic services for the application layer.

pub mod inventory_service;
pub mod stats_service;

pub use inventory_service::{FetchOutcome, InventoryService, Page, PageFetcher, Termination};
pub use stats_service::{StatsReport, StatsService, summarize};
