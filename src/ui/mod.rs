//! UI rendering module for citywx
//!
//! This module contains the rendering logic for the terminal user interface,
//! using the ratatui library, plus a plain-text renderer for `--plain`.

pub mod help_overlay;
pub mod report_view;
pub mod search_bar;
pub mod text;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, AppState};
use crate::data::Backdrop;
use crate::stats::NextOccurrence;

pub use help_overlay::render as render_help_overlay;
pub use report_view::render as render_report;
pub use search_bar::render as render_search_bar;
pub use text::render_plain;

/// Renders the whole screen for the current application state
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(3),    // Report / status
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_search_bar(frame, app, chunks[0]);

    match &app.state {
        AppState::Idle => render_message(
            frame,
            chunks[1],
            "Type a city and press Enter",
            Color::DarkGray,
        ),
        AppState::Loading(city) => render_message(
            frame,
            chunks[1],
            &format!("Loading weather for {}...", city),
            Color::Cyan,
        ),
        AppState::Report(report) => render_report(frame, report, chunks[1]),
        AppState::Error(message) => render_message(frame, chunks[1], message, Color::Red),
    }

    render_key_hints(frame, chunks[2]);

    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Renders a single centered status line
fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(area);

    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, chunks[1]);
}

fn render_key_hints(frame: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Search  "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Complete  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ]);
    let paragraph = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Border colour for a category backdrop
pub fn backdrop_color(backdrop: Backdrop) -> Color {
    match backdrop {
        Backdrop::Clear => Color::Yellow,
        Backdrop::Fog => Color::Gray,
        Backdrop::Rain => Color::Blue,
        Backdrop::Snow => Color::White,
        Backdrop::Thunder => Color::Magenta,
    }
}

/// Color for temperature (warmer = more red, cooler = more blue)
pub fn temperature_color(temp: i64) -> Color {
    if temp >= 30 {
        Color::Red
    } else if temp >= 25 {
        Color::LightRed
    } else if temp >= 20 {
        Color::Yellow
    } else if temp >= 15 {
        Color::Green
    } else if temp >= 10 {
        Color::Cyan
    } else {
        Color::Blue
    }
}

/// Eight-point compass direction the wind blows from
pub fn compass_point(degrees: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let index = (degrees.rem_euclid(360.0) / 45.0).round() as usize % POINTS.len();
    POINTS[index]
}

/// "+3d", or "+1d (no history)" when no year matched
pub fn format_next(next: &NextOccurrence) -> String {
    if next.has_history() {
        next.to_string()
    } else {
        format!("{} (no history)", next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{GeocodingClient, WeatherClient};
    use crate::report::fixtures::sample_report;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 34);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn create_test_app() -> App {
        App::with_clients(GeocodingClient::new(), WeatherClient::new(), None)
    }

    #[test]
    fn test_idle_screen_shows_prompt() {
        let app = create_test_app();
        let content = render_to_string(&app);
        assert!(content.contains("Type a city"));
        assert!(content.contains("Search"));
    }

    #[test]
    fn test_loading_screen_names_city() {
        let mut app = create_test_app();
        app.state = AppState::Loading("Uppsala".to_string());
        assert!(render_to_string(&app).contains("Loading weather for Uppsala"));
    }

    #[test]
    fn test_error_screen_shows_message() {
        let mut app = create_test_app();
        app.state = AppState::Error("City could not be found.".to_string());
        assert!(render_to_string(&app).contains("City could not be found."));
    }

    #[test]
    fn test_report_screen_shows_cards() {
        let mut app = create_test_app();
        app.state = AppState::Report(Box::new(sample_report()));
        let content = render_to_string(&app);

        assert!(content.contains("Stockholm, Sweden"));
        assert!(content.contains("Yesterday"));
        assert!(content.contains("Tomorrow"));
    }

    #[test]
    fn test_help_overlay_drawn_on_top() {
        let mut app = create_test_app();
        app.show_help = true;
        assert!(render_to_string(&app).contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_compass_point() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(44.0), "NE");
        assert_eq!(compass_point(270.0), "W");
        assert_eq!(compass_point(350.0), "N");
        assert_eq!(compass_point(-90.0), "W");
    }

    #[test]
    fn test_format_next_marks_missing_history() {
        let none = NextOccurrence {
            offset: 0,
            years_matched: 0,
        };
        assert_eq!(format_next(&none), "+1d (no history)");

        let some = NextOccurrence {
            offset: 2,
            years_matched: 4,
        };
        assert_eq!(format_next(&some), "+3d");
    }
}
