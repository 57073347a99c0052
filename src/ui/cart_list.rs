//! Cart panel rendering
//!
//! One row per line item with its quantity controls, followed by the cart total.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::truncate;
use crate::app::{App, Focus};
use crate::cart::CartLineItem;
use crate::data::{format_price, format_total};

/// Width reserved for the price, quantity and controls after the name
const CONTROLS_WIDTH: usize = 30;

/// Builds the line for one cart row
fn item_line(item: &CartLineItem, selected: bool, width: usize) -> Line<'static> {
    let marker = if selected { "▸ " } else { "  " };
    let name_width = width.saturating_sub(CONTROLS_WIDTH).max(8);

    let name_style = if selected {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(truncate(&item.name, name_width), name_style),
        Span::raw(" - "),
        Span::styled(format_price(item.price), Style::default().fg(Color::Green)),
        Span::raw(format!(" x {} ", item.quantity)),
        Span::styled("[+] [-] [x]", Style::default().fg(Color::DarkGray)),
    ])
}

/// Renders the cart panel into `area`
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Cart;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(" Cart ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    if app.cart.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Your cart is empty",
                Style::default().fg(Color::DarkGray),
            )),
            chunks[0],
        );
    } else {
        let visible = chunks[0].height.max(1) as usize;
        let first = app.cart_cursor.saturating_sub(visible - 1);
        let width = chunks[0].width as usize;

        let lines: Vec<Line> = app
            .cart
            .items()
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .map(|(index, item)| item_line(item, focused && index == app.cart_cursor, width))
            .collect();
        frame.render_widget(Paragraph::new(lines), chunks[0]);
    }

    let total = Line::from(vec![
        Span::styled("Total: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format_total(app.cart.total()),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(total), chunks[1]);
}
