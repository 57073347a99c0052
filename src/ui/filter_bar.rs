//! Category and sort selectors
//!
//! Shows the category options (with the current one highlighted) and the price
//! sort direction above the product grid.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::filter::SortOrder;

/// Label of the sort selector before any direction is chosen
const UNSORTED_LABEL: &str = "Catalog order";

/// Sort selector label for an optional direction
fn sort_label(sort: Option<SortOrder>) -> &'static str {
    sort.map_or(UNSORTED_LABEL, |order| order.label())
}

/// Builds the category selector line, highlighting the current option
fn category_line(app: &App) -> Line<'static> {
    let mut spans = Vec::new();
    for option in app.category_options() {
        let style = if option == app.query.category {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", option.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Renders the selectors into `area`
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(26)])
        .split(area);

    let categories = Paragraph::new(category_line(app)).block(
        Block::default()
            .title(" Category ←/→ ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(categories, chunks[0]);

    let sort = Paragraph::new(Line::from(Span::styled(
        sort_label(app.query.sort),
        Style::default().fg(Color::Yellow),
    )))
    .block(
        Block::default()
            .title(" Sort [s] ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(sort, chunks[1]);
}
