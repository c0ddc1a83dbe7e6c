use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::ListItem,
};

use crate::rpc::{Block, Transaction};

// ============================================================================
// Helper Functions
// ============================================================================

/// Shorten long hashes and addresses to `head...tail`
pub fn truncate_hash(hash: &str) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() > 20 {
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 6..].iter().collect();
        format!("{head}...{tail}")
    } else {
        hash.to_string()
    }
}

/// Format an address to a fixed width (19 chars to match truncated hashes)
pub fn format_addr_fixed_width(addr: &str) -> String {
    const WIDTH: usize = 19;
    format!("{:>WIDTH$}", truncate_hash(addr))
}

/// Amounts arrive as JSON numbers; show integers without a fraction
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        let s = format!("{amount:.8}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Relative age of an epoch-milliseconds timestamp
pub fn format_timestamp(ts_ms: u64) -> String {
    use std::time::{Duration, UNIX_EPOCH};
    let datetime = UNIX_EPOCH + Duration::from_millis(ts_ms);
    let secs_ago = std::time::SystemTime::now()
        .duration_since(datetime)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    if secs_ago < 60 {
        format!("{secs_ago} secs ago")
    } else if secs_ago < 3600 {
        format!("{} mins ago", secs_ago / 60)
    } else if secs_ago < 86400 {
        format!("{} hours ago", secs_ago / 3600)
    } else {
        format!("{} days ago", secs_ago / 86400)
    }
}

pub fn format_block_list_item<'a>(block: &Block, selected: bool) -> ListItem<'a> {
    let line = Line::from(vec![
        Span::styled(
            format!("#{:<7}", block.index),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("{:<19}", truncate_hash(&block.hash)),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:>4} txs", block.transactions.len()),
            Style::default().fg(Color::White),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:>8} tokens", block.tokens),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format_timestamp(block.timestamp),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let style = if selected {
        Style::default().bg(Color::Cyan).fg(Color::Black)
    } else {
        Style::default()
    };

    ListItem::new(line).style(style)
}

pub fn format_tx_list_item<'a>(index: usize, tx: &Transaction, selected: bool) -> ListItem<'a> {
    let line = Line::from(vec![
        Span::styled(
            format!("{index:>3} "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format_addr_fixed_width(&tx.sender),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" → ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format_addr_fixed_width(&tx.receiver),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:>12}", format_amount(tx.amount)),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:>12}", format_amount(tx.gas_cost)),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let style = if selected {
        Style::default().bg(Color::Cyan).fg(Color::Black)
    } else {
        Style::default()
    };

    ListItem::new(line).style(style)
}

pub fn format_tx_list_header<'a>() -> ListItem<'a> {
    let line = Line::from(vec![
        Span::styled("    ", Style::default()), // index space
        Span::styled(
            format!("{:^19}", "Sender"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled("   ", Style::default()), // arrow space
        Span::styled(
            format!("{:^19}", "Receiver"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:>12}", "Amount"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:>12}", "Gas"),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    ListItem::new(line).style(Style::default())
}

pub fn format_kv(key: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}

pub fn centered_rect(percent_x: u16, area: Rect) -> Rect {
    let popup_layout = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(area);

    popup_layout[1]
}

pub fn padded_rect(area: Rect, padding: u16) -> Rect {
    Rect {
        x: area.x + padding,
        y: area.y + padding,
        width: area.width.saturating_sub(padding * 2),
        height: area.height.saturating_sub(padding * 2),
    }
}
