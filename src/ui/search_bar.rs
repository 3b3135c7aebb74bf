//! Search bar with inline ghost suggestion

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, AppState};

/// Renders the city input, the greyed completion and a cursor marker
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let loading = matches!(app.state, AppState::Loading(_));

    let mut spans = vec![Span::styled(
        app.input.clone(),
        Style::default().fg(Color::White),
    )];
    let ghost = app.ghost_text();
    if !ghost.is_empty() {
        spans.push(Span::styled(
            ghost.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    if !loading {
        spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
    }

    let border_color = if loading { Color::DarkGray } else { Color::Cyan };
    let block = Block::default()
        .title(" City ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
