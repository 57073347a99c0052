//! Product grid rendering
//!
//! Draws one card per visible product, laid out row by row in as many columns
//! as the pane fits. Each card shows the image URL, the title, the price and
//! the add-to-cart affordance; the grid scrolls to keep the selected card on
//! screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::truncate;
use crate::app::{App, CatalogStatus, Focus};
use crate::data::{format_price, Product};

/// Minimum width of one card in columns
const CARD_WIDTH: u16 = 30;

/// Height of one card including its border
const CARD_HEIGHT: u16 = 6;

/// Message shown in place of the grid, if any
///
/// An empty filter result is an empty grid, not a message.
fn empty_message(app: &App) -> Option<&'static str> {
    if !app.products.is_empty() {
        return None;
    }
    match app.catalog_status {
        CatalogStatus::Loading => Some("Loading catalog..."),
        CatalogStatus::Failed(_) => Some("Catalog unavailable. Press r to retry"),
        CatalogStatus::Loaded(_) => None,
    }
}

/// Builds the lines of one card
fn card_lines(product: &Product, selected: bool, width: usize) -> Vec<Line<'static>> {
    let add_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    vec![
        Line::from(Span::styled(
            truncate(&product.image, width),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            truncate(&product.title, width),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format_price(product.price),
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled("[a] Add to cart", add_style)),
    ]
}

/// One-line summary of the selected product's extra details
fn detail_line(product: &Product, width: usize) -> Line<'static> {
    let mut text = product.category.clone();
    if let Some(rating) = &product.rating {
        text.push_str(&format!("  ★ {:.1} ({})", rating.rate, rating.count));
    }
    if let Some(description) = &product.description {
        text.push_str("  ");
        text.push_str(description);
    }
    Line::from(Span::styled(
        truncate(&text, width),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Renders the product grid into `area`
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let products = app.visible_products();
    let focused = app.focus == Focus::Products;

    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .title(format!(" Products ({}) ", products.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(message) = empty_message(app) {
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, inner);
        return;
    }

    if products.is_empty() || inner.width == 0 || inner.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    let grid_area = chunks[0];

    let columns = (grid_area.width / CARD_WIDTH).max(1);
    let card_width = grid_area.width / columns;
    let visible_rows = (grid_area.height / CARD_HEIGHT).max(1) as usize;
    let columns = columns as usize;

    let selected_row = app.product_cursor / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    for (index, product) in products
        .iter()
        .enumerate()
        .skip(first_row * columns)
        .take(visible_rows * columns)
    {
        let row = (index / columns - first_row) as u16;
        let col = (index % columns) as u16;
        let y_offset = row * CARD_HEIGHT;
        let rect = Rect::new(
            grid_area.x + col * card_width,
            grid_area.y + y_offset,
            card_width,
            CARD_HEIGHT.min(grid_area.height.saturating_sub(y_offset)),
        );
        if rect.height < 3 {
            continue;
        }

        let selected = focused && index == app.product_cursor;
        let card_border = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let card = Paragraph::new(card_lines(
            product,
            selected,
            card_width.saturating_sub(2) as usize,
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(card_border),
        );
        frame.render_widget(card, rect);
    }

    if let Some(product) = app.selected_product() {
        frame.render_widget(
            Paragraph::new(detail_line(product, chunks[1].width as usize)),
            chunks[1],
        );
    }
}
