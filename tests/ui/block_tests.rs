//! Block page UI tests

use super::*;
use feedex::app::{BlockDetail, Screen};

fn block_screen(block: Block) -> Screen {
    Screen::Block(BlockDetail {
        block,
        selected_tx: 0,
    })
}

#[tokio::test]
async fn test_block_screen_shows_block_number() {
    let mut app = create_test_app(Some(mock_snapshot())).await;
    app.screen = block_screen(mock_block('a', 42, "alice", "bob"));
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Block #42"));
}

#[tokio::test]
async fn test_block_screen_shows_header_fields() {
    let mut app = create_test_app(Some(mock_snapshot())).await;
    app.screen = block_screen(mock_block('a', 1, "alice", "bob"));
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Hash"));
    assert!(buffer_contains(&buffer, "Parent Hash"));
    assert!(buffer_contains(&buffer, "Miner: miner_address"));
    assert!(buffer_contains(&buffer, "Tokens Minted: 25 Kanari"));
}

#[tokio::test]
async fn test_block_screen_lists_transactions() {
    let mut app = create_test_app(Some(mock_snapshot())).await;
    app.screen = block_screen(mock_block('a', 1, "alice", "bob"));
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Transactions (2)"));
    assert!(buffer_contains(&buffer, "Sender"));
    assert!(buffer_contains(&buffer, "Receiver"));
    assert!(buffer_contains(&buffer, "alice"));
    assert!(buffer_contains(&buffer, "0.0000015"));
}

#[tokio::test]
async fn test_block_screen_without_transactions() {
    let mut block = mock_block('a', 1, "alice", "bob");
    block.transactions.clear();

    let mut app = create_test_app(Some(mock_snapshot())).await;
    app.screen = block_screen(block);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "No transactions in this block"));
}

#[tokio::test]
async fn test_block_screen_opened_from_feed() {
    let mut app = create_test_app(Some(mock_snapshot())).await;
    app.select_next();
    assert!(app.open_selected_block());

    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Block #2"));
    assert!(buffer_contains(&buffer, "carol"));
}
