//! Block feed view: a locally cached snapshot of blocks kept fresh by a
//! periodic refresh, with a filtered view derived from a search query.
//!
//! Every refresh takes a sequence number when it starts. A response is
//! applied only if it is newer than the last one applied, so a slow fetch
//! can never overwrite a faster, later one.

use crate::rpc::{Block, BlockSource, FeedError, Snapshot};
use crate::search::SearchQuery;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    pub blocks: Vec<Block>,
    pub total_blocks: u64,
    pub total_tokens: u64,
    pub search_query: SearchQuery,
    pub last_error: Option<String>,
    /// Sequence number of the newest response applied so far
    pub applied_seq: u64,
}

impl FeedState {
    pub fn filtered_blocks(&self) -> impl Iterator<Item = &Block> + Clone + '_ {
        self.search_query.filter(&self.blocks)
    }

    /// Transactions across the filtered view
    pub fn filtered_tx_count(&self) -> usize {
        self.filtered_blocks().map(|b| b.transactions.len()).sum()
    }

    fn recompute_totals(&mut self) {
        self.total_blocks = self.blocks.len() as u64;
        self.total_tokens = self.blocks.iter().map(|b| b.tokens).sum();
    }
}

/// Result of one refresh, for callers that want to know
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    Failed,
    /// A newer response had already been applied
    Stale,
}

struct Shared {
    source: Arc<dyn BlockSource>,
    state: Mutex<FeedState>,
    issued_seq: AtomicU64,
}

/// Cloneable access to the feed, for tasks spawned off the view
#[derive(Clone)]
pub struct FeedHandle {
    shared: Arc<Shared>,
}

impl FeedHandle {
    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn next_seq(&self) -> u64 {
        self.shared.issued_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Discard every response issued before this point
    fn fence(&self) {
        let fence = self.next_seq();
        let mut state = self.lock();
        state.applied_seq = state.applied_seq.max(fence);
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let seq = self.next_seq();
        let result = self.shared.source.fetch_snapshot().await;

        let mut state = self.lock();
        if seq <= state.applied_seq {
            debug!(seq, applied = state.applied_seq, "discarding stale refresh");
            return RefreshOutcome::Stale;
        }
        state.applied_seq = seq;

        match result {
            Ok(snapshot) => {
                apply_snapshot(&mut state, snapshot);
                debug!(seq, blocks = state.total_blocks, "snapshot applied");
                RefreshOutcome::Applied
            }
            Err(e) => {
                warn!(seq, error = %e, "refresh failed");
                state.last_error = Some(fetch_error_message(&e));
                RefreshOutcome::Failed
            }
        }
    }

    /// Mint a block and insert it at the front of the snapshot without
    /// waiting for the next refresh. Refreshes issued before the mint
    /// completes come back stale, so they cannot drop the new block.
    pub async fn create_block(&self) -> Option<Block> {
        match self.shared.source.create_block().await {
            Ok(block) => {
                let seq = self.next_seq();
                let mut state = self.lock();
                state.applied_seq = state.applied_seq.max(seq);
                if !state.blocks.iter().any(|b| b.hash == block.hash) {
                    state.blocks.insert(0, block.clone());
                    state.recompute_totals();
                }
                info!(hash = %block.hash, index = block.index, "block created");
                Some(block)
            }
            Err(e) => {
                warn!(error = %e, "create_block failed");
                self.lock().last_error = Some(format!("Failed to create block: {e}"));
                None
            }
        }
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.lock().search_query = SearchQuery::new(query);
    }

    pub fn snapshot(&self) -> FeedState {
        self.lock().clone()
    }

    pub fn filtered_blocks(&self) -> Vec<Block> {
        self.lock().filtered_blocks().cloned().collect()
    }

    pub fn filtered_tx_count(&self) -> usize {
        self.lock().filtered_tx_count()
    }

}

fn apply_snapshot(state: &mut FeedState, snapshot: Snapshot) {
    let reported = (snapshot.reported_total_blocks, snapshot.reported_total_tokens);
    state.blocks = snapshot.blocks;
    state.recompute_totals();
    state.last_error = None;

    if reported.0.is_some_and(|n| n != state.total_blocks)
        || reported.1.is_some_and(|n| n != state.total_tokens)
    {
        warn!(
            reported_blocks = ?reported.0,
            reported_tokens = ?reported.1,
            blocks = state.total_blocks,
            tokens = state.total_tokens,
            "source totals disagree with snapshot"
        );
    }
}

fn fetch_error_message(e: &FeedError) -> String {
    format!("Failed to fetch blocks: {e}")
}

/// Owns the feed state and the refresh timer
pub struct BlockFeedView {
    handle: FeedHandle,
    period: Duration,
    ticker: Option<JoinHandle<()>>,
}

impl BlockFeedView {
    pub fn new(source: Arc<dyn BlockSource>) -> Self {
        Self::with_interval(source, DEFAULT_REFRESH_INTERVAL)
    }

    pub fn with_interval(source: Arc<dyn BlockSource>, period: Duration) -> Self {
        Self {
            handle: FeedHandle {
                shared: Arc::new(Shared {
                    source,
                    state: Mutex::new(FeedState::default()),
                    issued_seq: AtomicU64::new(0),
                }),
            },
            period,
            ticker: None,
        }
    }

    pub fn handle(&self) -> FeedHandle {
        self.handle.clone()
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Fetch now, then every period. Calling again while running is a no-op.
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            return;
        }

        let handle = self.handle.clone();
        let period = self.period;
        info!(period_ms = period.as_millis() as u64, "starting block feed");

        self.ticker = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                // Refreshes may overlap; the sequence guard sorts them out
                let handle = handle.clone();
                tokio::spawn(async move {
                    handle.refresh().await;
                });
            }
        }));
    }

    /// Cancel the timer. Responses still in flight are discarded.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            self.handle.fence();
            info!("block feed stopped");
        }
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        self.handle.refresh().await
    }

    pub async fn create_block(&self) -> Option<Block> {
        self.handle.create_block().await
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.handle.set_search_query(query);
    }

    pub fn filtered_blocks(&self) -> Vec<Block> {
        self.handle.filtered_blocks()
    }

    pub fn snapshot(&self) -> FeedState {
        self.handle.snapshot()
    }
}

impl Drop for BlockFeedView {
    fn drop(&mut self) {
        self.stop();
    }
}
