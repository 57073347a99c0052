//! UI rendering module for the storefront
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components. Every frame redraws the whole
//! screen from the app state.

pub mod cart_list;
pub mod filter_bar;
pub mod help_overlay;
pub mod product_grid;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, CatalogStatus, Focus};

/// Renders the full storefront screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Category and sort selectors
            Constraint::Min(5),    // Products and cart
            Constraint::Length(1), // Status and help text
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    filter_bar::render(frame, app, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[2]);

    product_grid::render(frame, app, body[0]);
    cart_list::render(frame, app, body[1]);

    render_status(frame, app, chunks[3]);

    if app.show_help {
        help_overlay::render(frame);
    }
}

/// Text describing the catalog fetch state
fn catalog_status_text(app: &App) -> String {
    match &app.catalog_status {
        CatalogStatus::Loading => "Loading catalog...".to_string(),
        CatalogStatus::Loaded(at) => format!(
            "{} products, updated {}",
            app.products.len(),
            at.format("%H:%M")
        ),
        CatalogStatus::Failed(_) => "Catalog unavailable".to_string(),
    }
}

/// Renders the title line with the catalog state and the cart counter badge
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(16)])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            "SHOPFRONT",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(catalog_status_text(app), Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(title), chunks[0]);

    // Badge is optional; nothing is drawn when it is turned off
    if app.show_badge {
        let badge = Paragraph::new(Line::from(Span::styled(
            format!("Cart ({})", app.cart.item_count()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Right);
        frame.render_widget(badge, chunks[1]);
    }
}

/// Renders the status message, or the key hints for the focused pane
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )),
        None => {
            let hints: &[(&str, &str)] = match app.focus {
                Focus::Products => &[
                    ("↑↓", "Select"),
                    ("a", "Add"),
                    ("←→", "Category"),
                    ("s", "Sort"),
                    ("Tab", "Cart"),
                    ("?", "Help"),
                    ("q", "Quit"),
                ],
                Focus::Cart => &[
                    ("↑↓", "Select"),
                    ("+/-", "Qty"),
                    ("x", "Remove"),
                    ("c", "Clear"),
                    ("Tab", "Products"),
                    ("?", "Help"),
                    ("q", "Quit"),
                ],
            };
            let mut spans = Vec::with_capacity(hints.len() * 2);
            for (key, action) in hints {
                spans.push(Span::styled(
                    format!(" {} ", key),
                    Style::default().fg(Color::Cyan),
                ));
                spans.push(Span::styled(
                    format!("{} ", action),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Shortens `text` to at most `max` characters, marking the cut with an ellipsis
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut shortened: String = text.chars().take(max - 1).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Command;
    use crate::data::Product;
    use crate::loader::CatalogMessage;
    use crate::store::LocalStore;
    use ratatui::{backend::TestBackend, Terminal};
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn create_test_app() -> (App, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let app = App::new(LocalStore::with_dir(temp_dir.path().to_path_buf()));
        (app, temp_dir)
    }

    fn product(id: u64, title: &str, price: i64, category: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            price: Decimal::from(price),
            image: String::new(),
            category: category.to_string(),
            description: None,
            rating: None,
        }
    }

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_loading_state_is_shown() {
        let (app, _temp_dir) = create_test_app();
        let content = render_to_string(&app);
        assert!(content.contains("SHOPFRONT"));
        assert!(content.contains("Loading catalog"));
    }

    #[test]
    fn test_badge_counts_quantities() {
        let (mut app, _temp_dir) = create_test_app();
        let a = product(1, "A", 10, "X");
        app.dispatch(Command::AddToCart(a.clone()));
        app.dispatch(Command::AddToCart(a));
        app.dispatch(Command::AddToCart(product(2, "B", 20, "Y")));

        let content = render_to_string(&app);

        assert!(content.contains("Cart (3)"), "Badge should sum quantities");
    }

    #[test]
    fn test_badge_hidden_when_disabled() {
        let (mut app, _temp_dir) = create_test_app();
        app.show_badge = false;

        let content = render_to_string(&app);

        assert!(!content.contains("Cart ("));
    }

    #[test]
    fn test_status_message_replaces_hints() {
        let (mut app, _temp_dir) = create_test_app();
        app.apply_catalog_message(CatalogMessage::Failed("boom".to_string()));

        let content = render_to_string(&app);

        assert!(content.contains("Could not load the catalog"));
        assert!(content.contains("Catalog unavailable"));
    }

    #[test]
    fn test_help_overlay_drawn_on_top() {
        let (mut app, _temp_dir) = create_test_app();
        app.show_help = true;

        let content = render_to_string(&app);

        assert!(content.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("much longer text", 6), "much …");
        assert_eq!(truncate("anything", 0), "");
    }
}
