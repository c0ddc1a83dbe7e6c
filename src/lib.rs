//! feedex - Terminal Block Feed Explorer
//!
//! A terminal client for a block feed served over JSON-RPC, kept fresh by a
//! periodic refresh and filterable by transaction sender or receiver.

pub mod app;
pub mod config;
pub mod feed;
pub mod files;
pub mod logging;
pub mod rpc;
pub mod search;
pub mod ui;

// Re-export commonly used types
pub use app::{App, BlockDetail, Screen};
pub use config::Config;
pub use feed::{BlockFeedView, FeedHandle, FeedState, RefreshOutcome};
