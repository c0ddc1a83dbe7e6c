//! RPC setup screen UI tests

use super::*;
use tui_input::Input;

#[test]
fn test_setup_screen_shown_without_rpc() {
    let app = create_setup_app();
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "RPC Configuration Required"));
    assert!(buffer_contains(&buffer, "http://..."));
}

#[test]
fn test_setup_screen_shows_title() {
    let app = create_setup_app();
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "████"));
    assert!(buffer_contains(&buffer, "Terminal Block Feed Explorer"));
}

#[test]
fn test_setup_screen_shows_typed_url() {
    let mut app = create_setup_app();
    app.rpc_input = Input::new("http://localhost:3030".to_string());
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "http://localhost:3030"));
}

#[test]
fn test_setup_screen_shows_validation_status() {
    let mut app = create_setup_app();
    let err = app.submit_rpc().unwrap_err();
    app.set_status(&err);
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "RPC URL cannot be empty"));
}
