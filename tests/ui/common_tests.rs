//! Common UI tests - layout and navigation help

use super::*;
use feedex::app::{BlockDetail, Screen};

fn all_screens() -> Vec<Screen> {
    vec![
        Screen::Feed,
        Screen::Block(BlockDetail {
            block: mock_block('a', 1, "alice", "bob"),
            selected_tx: 1,
        }),
    ]
}

// ==================== Navigation Help Tests ====================

#[tokio::test]
async fn test_screens_show_navigation_help() {
    for screen in all_screens() {
        let mut app = create_test_app(Some(mock_snapshot())).await;
        app.screen = screen;
        let buffer = render_to_buffer(&app, 100, 40);

        assert!(buffer_contains(&buffer, "Esc quit"));
        assert!(buffer_contains(&buffer, "↑↓"));
    }
}

// ==================== Layout Tests ====================

#[tokio::test]
async fn test_small_terminal_renders_without_panic() {
    for screen in all_screens() {
        let mut app = create_test_app(Some(mock_snapshot())).await;
        app.screen = screen;
        // This should not panic even with very small dimensions
        let _ = render_to_buffer(&app, 40, 10);
    }

    let _ = render_to_buffer(&create_test_app(None).await, 40, 10);
    let _ = render_to_buffer(&create_setup_app(), 40, 10);
}

#[tokio::test]
async fn test_large_terminal_renders_without_panic() {
    let app = create_test_app(Some(mock_snapshot())).await;
    let _ = render_to_buffer(&app, 200, 100);
}
