mod block_page;
mod helper;

use block_page::draw_block_detail;
use helper::*;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Screen};
use crate::feed::FeedState;

const TITLE_ART: &str = r#"
███████╗███████╗███████╗██████╗ ███████╗██╗  ██╗
██╔════╝██╔════╝██╔════╝██╔══██╗██╔════╝╚██╗██╔╝
█████╗  █████╗  █████╗  ██║  ██║█████╗   ╚███╔╝
██╔══╝  ██╔══╝  ██╔══╝  ██║  ██║██╔══╝   ██╔██╗
██║     ███████╗███████╗██████╔╝███████╗██╔╝ ██╗
╚═╝     ╚══════╝╚══════╝╚═════╝ ╚══════╝╚═╝  ╚═╝
"#;

const NAV_HELP_FEED: &str = "↑↓ select • Enter open • ^N mint • ^R refresh • Esc quit";
const NAV_HELP_BLOCK: &str = "↑↓ navigate • b back • Esc quit";

pub fn draw(frame: &mut Frame, app: &App) {
    if app.needs_rpc_setup() {
        draw_rpc_setup(frame, app, frame.area());
        return;
    }

    match &app.screen {
        Screen::Feed => draw_feed(frame, app),
        Screen::Block(detail) => draw_block_detail(frame, detail),
    }
}

fn draw_rpc_setup(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(8), // Title
        Constraint::Length(1), // Subtitle
        Constraint::Length(2), // Spacing
        Constraint::Length(5), // RPC input box
        Constraint::Length(2), // Spacing
        Constraint::Length(1), // Help
        Constraint::Min(0),    // Padding
    ])
    .split(area);

    let title = Paragraph::new(TITLE_ART)
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let subtitle = Paragraph::new("Terminal Block Feed Explorer")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    // RPC input box
    let rpc_area = centered_rect(70, chunks[3]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" ⚡ RPC Configuration Required ")
        .title_style(Style::default().fg(Color::Yellow));

    let inner_area = block.inner(rpc_area);
    frame.render_widget(block, rpc_area);

    let input_chunks = Layout::vertical([
        Constraint::Length(1), // Label
        Constraint::Length(1), // Input
    ])
    .split(inner_area);

    let label = Paragraph::new("Enter the block feed RPC URL (e.g., http://127.0.0.1:3030):")
        .style(Style::default().fg(Color::White));
    frame.render_widget(label, input_chunks[0]);

    let inner_width = input_chunks[1].width as usize;
    let scroll = app.rpc_input.visual_scroll(inner_width);

    let display_text = if app.rpc_input.value().is_empty() {
        Span::styled("http://...", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(app.rpc_input.value(), Style::default().fg(Color::White))
    };

    let input = Paragraph::new(display_text).scroll((0, scroll as u16));
    frame.render_widget(input, input_chunks[1]);

    let cursor_x =
        input_chunks[1].x + (app.rpc_input.visual_cursor().saturating_sub(scroll)) as u16;
    let cursor_y = input_chunks[1].y;
    if cursor_x < input_chunks[1].x + input_chunks[1].width {
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    let help_text = match &app.status {
        Some(status) => status.as_str(),
        None => "Press Enter to connect • Esc to quit",
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);
}

fn draw_feed(frame: &mut Frame, app: &App) {
    let area = padded_rect(frame.area(), 1);
    let state = app.feed_state();
    let error_height = if state.last_error.is_some() { 3 } else { 0 };

    let chunks = Layout::vertical([
        Constraint::Length(1),            // Title + RPC
        Constraint::Length(3),            // Statistics
        Constraint::Length(3),            // Search bar
        Constraint::Length(error_height), // Error banner
        Constraint::Min(3),               // Block list
        Constraint::Length(1),            // Help / status
    ])
    .split(area);

    let rpc = app.rpc_url.as_deref().unwrap_or("Not configured");
    let rpc_display = if rpc.chars().count() > 50 {
        format!("{}...", rpc.chars().take(47).collect::<String>())
    } else {
        rpc.to_string()
    };
    let header = Line::from(vec![
        Span::styled("Block Feed Explorer", Style::default().fg(Color::Cyan).bold()),
        Span::styled("  RPC: ", Style::default().fg(Color::DarkGray)),
        Span::styled(rpc_display, Style::default().fg(Color::Green)),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    draw_stats(frame, &state, chunks[1]);
    draw_search_bar(frame, app, chunks[2]);

    if let Some(error) = &state.last_error {
        let banner = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" ❌ Error "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(banner, chunks[3]);
    }

    draw_block_list(frame, app, &state, chunks[4]);

    let (help_text, help_color) = match &app.status {
        Some(status) => (status.as_str(), Color::Yellow),
        None => (NAV_HELP_FEED, Color::DarkGray),
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(help_color))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);
}

fn draw_stats(frame: &mut Frame, state: &FeedState, area: Rect) {
    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    let stats = [
        ("Total Blocks", state.total_blocks.to_string(), Color::Cyan),
        (
            "Total Transactions",
            state.filtered_tx_count().to_string(),
            Color::Magenta,
        ),
        ("Total Tokens", state.total_tokens.to_string(), Color::Yellow),
    ];

    for ((label, value, color), column) in stats.into_iter().zip(columns.iter()) {
        let widget = Paragraph::new(Span::styled(value, Style::default().fg(Color::White).bold()))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(format!(" {label} "))
                    .title_style(Style::default().fg(color)),
            );
        frame.render_widget(widget, *column);
    }
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 🔍 Search ")
        .title_style(Style::default().fg(Color::Cyan));

    let inner_width = area.width.saturating_sub(2) as usize;
    let scroll = app.search_input.visual_scroll(inner_width);

    let display_text = if app.search_input.value().is_empty() {
        Span::styled(
            "Search by Transaction Sender or Receiver",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(app.search_input.value(), Style::default().fg(Color::White))
    };

    let input = Paragraph::new(display_text)
        .block(block)
        .scroll((0, scroll as u16));
    frame.render_widget(input, area);

    let cursor_x = area.x + 1 + (app.search_input.visual_cursor().saturating_sub(scroll)) as u16;
    let cursor_y = area.y + 1;
    if cursor_x < area.x + area.width.saturating_sub(1) {
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn draw_block_list(frame: &mut Frame, app: &App, state: &FeedState, area: Rect) {
    let filtered: Vec<_> = state.filtered_blocks().collect();

    let title = if state.search_query.is_empty() {
        format!(" Blocks ({}) ", filtered.len())
    } else {
        format!(
            " Blocks ({}) • {} ",
            filtered.len(),
            state.search_query.description()
        )
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);

    if filtered.is_empty() {
        let message = if state.search_query.is_empty() {
            "No blocks found."
        } else {
            "No blocks found matching your search."
        };
        let empty = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let selected = app.selected_block.min(filtered.len() - 1);
    let visible_count = area.height.saturating_sub(2) as usize;
    let start = selected.saturating_sub(visible_count / 2);

    let items: Vec<ListItem> = filtered
        .iter()
        .enumerate()
        .skip(start)
        .take(visible_count)
        .map(|(i, b)| format_block_list_item(b, i == selected))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
