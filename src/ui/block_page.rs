use super::helper::*;

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::NAV_HELP_BLOCK;

use crate::app::BlockDetail;

pub fn draw_block_detail(frame: &mut Frame, detail: &BlockDetail) {
    let area = frame.area();
    let block = &detail.block;
    let padded = padded_rect(area, 1);

    // Each tx takes 1 line plus header and borders; at least 3 txs, at most half
    let block_info_height: u16 = 10;
    let min_tx_height: u16 = 6;
    let max_tx_height = (padded.height / 2).max(min_tx_height);
    let remaining = padded.height.saturating_sub(block_info_height + 1);
    let tx_list_height = remaining.max(min_tx_height).min(max_tx_height);

    let chunks = Layout::vertical([
        Constraint::Length(padded.height.saturating_sub(tx_list_height + 1)),
        Constraint::Length(tx_list_height),
        Constraint::Length(1),
    ])
    .split(padded);

    // Block info section
    let info_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 📦 Block #{} ", block.index));

    let mut lines = vec![
        format_kv("Hash", &block.hash),
        format_kv(
            "Parent Hash",
            block.prev_hash.as_deref().unwrap_or("N/A"),
        ),
        format_kv("Timestamp", &format_timestamp(block.timestamp)),
        format_kv("Miner", &block.miner_address),
        Line::from(""),
        format_kv("Transactions", &block.transactions.len().to_string()),
    ];

    let tokens = match &block.token_name {
        Some(name) => format!("{} {name}", block.tokens),
        None => block.tokens.to_string(),
    };
    lines.push(format_kv("Tokens Minted", &tokens));

    let paragraph = Paragraph::new(lines).block(info_block);
    frame.render_widget(paragraph, chunks[0]);

    // Transaction list section
    let tx_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Transactions ({}) ", block.transactions.len()));

    if block.transactions.is_empty() {
        let empty_msg = Paragraph::new("No transactions in this block")
            .block(tx_block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty_msg, chunks[1]);
    } else {
        let visible_count = (chunks[1].height.saturating_sub(3)) as usize; // -2 borders, -1 header
        let start = detail.selected_tx.saturating_sub(visible_count / 2);

        let mut items: Vec<ListItem> = vec![format_tx_list_header()];
        items.extend(
            block
                .transactions
                .iter()
                .enumerate()
                .skip(start)
                .take(visible_count)
                .map(|(i, tx)| format_tx_list_item(i, tx, i == detail.selected_tx)),
        );

        let list = List::new(items).block(tx_block);
        frame.render_widget(list, chunks[1]);
    }

    let help = Paragraph::new(NAV_HELP_BLOCK)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}
