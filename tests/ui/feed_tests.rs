//! Feed screen UI tests

use super::*;
use tui_input::Input;

#[tokio::test]
async fn test_feed_shows_stats() {
    let app = create_test_app(Some(mock_snapshot())).await;
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Total Blocks"));
    assert!(buffer_contains(&buffer, "Total Transactions"));
    assert!(buffer_contains(&buffer, "Total Tokens"));
    assert!(buffer_contains(&buffer, "75"));
}

#[tokio::test]
async fn test_feed_shows_rpc_url() {
    let app = create_test_app(Some(mock_snapshot())).await;
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "127.0.0.1:3030"));
}

#[tokio::test]
async fn test_feed_lists_every_block() {
    let app = create_test_app(Some(mock_snapshot())).await;
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Blocks (3)"));
    assert!(buffer_contains(&buffer, "0xaaaaaaaa"));
    assert!(buffer_contains(&buffer, "0xbbbbbbbb"));
    assert!(buffer_contains(&buffer, "0xcccccccc"));
}

#[tokio::test]
async fn test_feed_search_placeholder() {
    let app = create_test_app(Some(mock_snapshot())).await;
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Search by Transaction Sender or Receiver"));
}

#[tokio::test]
async fn test_feed_filtered_by_search() {
    let mut app = create_test_app(Some(mock_snapshot())).await;
    app.search_input = Input::new("carol".to_string());
    app.sync_search_query();

    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Blocks (1)"));
    assert!(buffer_contains(&buffer, "0xbbbbbbbb"));
    assert!(!buffer_contains(&buffer, "0xaaaaaaaa"));
    assert!(!buffer_contains(&buffer, "0xcccccccc"));
}

#[tokio::test]
async fn test_feed_search_without_matches() {
    let mut app = create_test_app(Some(mock_snapshot())).await;
    app.search_input = Input::new("nobody".to_string());
    app.sync_search_query();

    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "No blocks found matching your search."));
}

#[tokio::test]
async fn test_feed_empty_snapshot() {
    let app = create_test_app(Some(Snapshot::default())).await;
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "No blocks found."));
}

#[tokio::test]
async fn test_feed_shows_fetch_error() {
    let app = create_test_app(None).await;
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Error"));
    assert!(buffer_contains(&buffer, "Failed to fetch blocks"));
}

#[tokio::test]
async fn test_feed_status_replaces_help() {
    let mut app = create_test_app(Some(mock_snapshot())).await;
    app.set_status("Creating block...");

    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Creating block..."));
    assert!(!buffer_contains(&buffer, "^N mint"));
}
