use crate::config::Config;
use crate::feed::{BlockFeedView, FeedHandle, FeedState};
use crate::rpc::{self, Block, BlockSource};
use std::sync::Arc;
use tui_input::Input;

#[derive(Debug, Clone)]
pub enum Screen {
    Feed,
    Block(BlockDetail),
}

#[derive(Debug, Clone)]
pub struct BlockDetail {
    pub block: Block,
    pub selected_tx: usize,
}

pub struct App {
    pub config: Config,
    pub screen: Screen,
    pub search_input: Input,
    pub rpc_input: Input,
    pub selected_block: usize,
    pub should_quit: bool,
    pub rpc_url: Option<String>,
    pub feed: Option<BlockFeedView>,
    /// Transient status line, e.g. while a block is being minted
    pub status: Option<String>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let rpc_url = config.rpc_url.clone();
        let feed = rpc_url
            .as_ref()
            .and_then(|url| rpc::connect(url, config.transport).ok())
            .map(|source| BlockFeedView::with_interval(source, config.refresh_interval()));

        Self::build(config, rpc_url, feed)
    }

    /// App over an already-built block source
    pub fn with_source(config: Config, source: Arc<dyn BlockSource>) -> Self {
        let rpc_url = config.rpc_url.clone();
        let feed = BlockFeedView::with_interval(source, config.refresh_interval());
        Self::build(config, rpc_url, Some(feed))
    }

    fn build(config: Config, rpc_url: Option<String>, feed: Option<BlockFeedView>) -> Self {
        Self {
            config,
            screen: Screen::Feed,
            search_input: Input::default(),
            rpc_input: Input::default(),
            selected_block: 0,
            should_quit: false,
            rpc_url,
            feed,
            status: None,
        }
    }

    /// Start periodic refresh. Needs a tokio runtime.
    pub fn start_feed(&mut self) {
        if let Some(feed) = self.feed.as_mut() {
            feed.start();
        }
    }

    pub fn submit_rpc(&mut self) -> Result<(), String> {
        let url = self.rpc_input.value().trim().to_string();
        if url.is_empty() {
            return Err("RPC URL cannot be empty".to_string());
        }

        // Try to create a client to validate the URL
        match rpc::connect(&url, self.config.transport) {
            Ok(source) => {
                // Dropping the old view stops its timer
                self.feed = Some(BlockFeedView::with_interval(
                    source,
                    self.config.refresh_interval(),
                ));
                self.rpc_url = Some(url.clone());
                let saved = self.config.set_rpc(url);
                self.record_config_save(saved);
                self.rpc_input.reset();
                Ok(())
            }
            Err(e) => Err(format!("Invalid RPC URL: {e}")),
        }
    }

    /// The connection works either way; a failed write only costs the
    /// setting on the next launch
    pub fn record_config_save(&mut self, result: anyhow::Result<()>) {
        self.status = match result {
            Ok(()) => None,
            Err(e) => Some(format!("Connected, but config not saved: {e:#}")),
        };
    }

    pub fn needs_rpc_setup(&self) -> bool {
        self.feed.is_none()
    }

    pub fn feed_handle(&self) -> Option<FeedHandle> {
        self.feed.as_ref().map(BlockFeedView::handle)
    }

    pub fn feed_state(&self) -> FeedState {
        self.feed
            .as_ref()
            .map(BlockFeedView::snapshot)
            .unwrap_or_default()
    }

    /// Push the search box contents into the feed filter
    pub fn sync_search_query(&mut self) {
        if let Some(feed) = &self.feed {
            feed.set_search_query(self.search_input.value());
        }
        self.selected_block = 0;
    }

    pub fn set_status(&mut self, msg: &str) {
        self.status = Some(msg.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn block_created(&mut self, block: Option<Block>) {
        self.status = block.map(|b| format!("Created block #{}", b.index));
    }

    pub fn is_on_feed(&self) -> bool {
        matches!(self.screen, Screen::Feed)
    }

    fn visible_block_count(&self) -> usize {
        self.feed
            .as_ref()
            .map(|f| f.filtered_blocks().len())
            .unwrap_or(0)
    }

    /// Move selection up
    pub fn select_prev(&mut self) {
        match &mut self.screen {
            Screen::Feed => {
                self.selected_block = self.selected_block.saturating_sub(1);
            }
            Screen::Block(detail) => {
                detail.selected_tx = detail.selected_tx.saturating_sub(1);
            }
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        let visible = self.visible_block_count();
        match &mut self.screen {
            Screen::Feed => {
                if visible > 0 && self.selected_block < visible - 1 {
                    self.selected_block += 1;
                }
            }
            Screen::Block(detail) => {
                let len = detail.block.transactions.len();
                if len > 0 && detail.selected_tx < len - 1 {
                    detail.selected_tx += 1;
                }
            }
        }
    }

    /// Open the selected block of the filtered view
    pub fn open_selected_block(&mut self) -> bool {
        let Some(feed) = &self.feed else {
            return false;
        };
        let blocks = feed.filtered_blocks();
        let index = self.selected_block.min(blocks.len().saturating_sub(1));

        match blocks.into_iter().nth(index) {
            Some(block) => {
                self.screen = Screen::Block(BlockDetail {
                    block,
                    selected_tx: 0,
                });
                true
            }
            None => false,
        }
    }

    pub fn go_back(&mut self) {
        self.screen = Screen::Feed;
    }
}
