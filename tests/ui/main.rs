//! UI rendering tests for feedex
//!
//! These tests ensure the UI renders correctly by inspecting the rendered buffer.
//! Run with: cargo test --test ui

mod block_tests;
mod common_tests;
mod feed_tests;
mod setup_tests;

use feedex::app::App;
use feedex::config::Config;
use feedex::rpc::{Block, BlockSource, FeedError, Snapshot, Transaction};
use feedex::ui::draw;

use async_trait::async_trait;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::sync::Arc;

// ==================== Test Data Builders ====================

/// Serves a fixed snapshot, or fails every fetch when there is none
pub struct FixtureSource(Option<Snapshot>);

#[async_trait]
impl BlockSource for FixtureSource {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FeedError> {
        self.0
            .clone()
            .ok_or_else(|| FeedError::Transport("connection refused".to_string()))
    }

    async fn create_block(&self) -> Result<Block, FeedError> {
        Err(FeedError::Transport("connection refused".to_string()))
    }
}

pub fn mock_config() -> Config {
    Config {
        rpc_url: Some("http://127.0.0.1:3030".to_string()),
        ..Config::default()
    }
}

pub fn mock_config_no_rpc() -> Config {
    Config::default()
}

pub fn mock_hash(c: char) -> String {
    format!("0x{}", c.to_string().repeat(64))
}

pub fn mock_tx(sender: &str, receiver: &str, amount: f64) -> Transaction {
    Transaction {
        sender: sender.to_string(),
        receiver: receiver.to_string(),
        amount,
        gas_cost: 0.0000015,
    }
}

pub fn mock_block(c: char, index: u64, sender: &str, receiver: &str) -> Block {
    Block {
        hash: mock_hash(c),
        index,
        timestamp: 1_700_000_000_000,
        transactions: vec![
            mock_tx(sender, receiver, 5.0),
            mock_tx("system", "miner_address", 0.0),
        ],
        tokens: 25,
        miner_address: "miner_address".to_string(),
        prev_hash: Some(mock_hash('0')),
        token_name: Some("Kanari".to_string()),
    }
}

pub fn mock_snapshot() -> Snapshot {
    Snapshot {
        blocks: vec![
            mock_block('a', 1, "alice", "bob"),
            mock_block('b', 2, "carol", "dave"),
            mock_block('c', 3, "bob", "erin"),
        ],
        reported_total_blocks: Some(3),
        reported_total_tokens: Some(75),
    }
}

/// App whose feed has completed one refresh against `snapshot`
pub async fn create_test_app(snapshot: Option<Snapshot>) -> App {
    let app = App::with_source(mock_config(), Arc::new(FixtureSource(snapshot)));
    if let Some(feed) = &app.feed {
        feed.refresh().await;
    }
    app
}

pub fn create_setup_app() -> App {
    App::new(mock_config_no_rpc())
}

// ==================== Helper Functions ====================

/// Render the app to a buffer and return it
pub fn render_to_buffer(app: &App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal
        .draw(|frame| {
            draw(frame, app);
        })
        .unwrap();

    terminal.backend().buffer().clone()
}

/// Check if buffer contains a specific string anywhere
pub fn buffer_contains(buffer: &Buffer, needle: &str) -> bool {
    let content = buffer_to_string(buffer);
    content.contains(needle)
}

/// Convert buffer to a single string for searching
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut content = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            content.push(
                buffer
                    .cell((x, y))
                    .map(|c| c.symbol().chars().next().unwrap_or(' '))
                    .unwrap_or(' '),
            );
        }
        content.push('\n');
    }
    content
}

/// Get a specific line from the buffer
#[allow(dead_code)]
pub fn buffer_line(buffer: &Buffer, y: u16) -> String {
    let mut line = String::new();
    for x in 0..buffer.area.width {
        if let Some(cell) = buffer.cell((x, y)) {
            line.push_str(cell.symbol());
        }
    }
    line.trim_end().to_string()
}

/// Print buffer for debugging
#[allow(dead_code)]
pub fn print_buffer(buffer: &Buffer) {
    for y in 0..buffer.area.height {
        println!("{}", buffer_line(buffer, y));
    }
}
