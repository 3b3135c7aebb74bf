//! Report screen rendering
//!
//! Renders the assembled weather report: the location header, three day
//! cards, clothing advice and the rain and thunder panels.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::report::{ConditionPanel, DayCard, DisplayDay, WeatherReport, Wind};

use super::{backdrop_color, compass_point, format_next, temperature_color};

/// Shown in the accessories column when there is nothing to add
pub const NO_ACCESSORIES: &str = "No accessories needed";

/// Renders the report into `area`
pub fn render(frame: &mut Frame, report: &WeatherReport, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Location header
            Constraint::Length(10), // Day cards
            Constraint::Length(6),  // Clothing
            Constraint::Length(5),  // Rain / thunder
            Constraint::Min(0),
        ])
        .split(area);

    render_header(frame, report, chunks[0]);
    render_cards(frame, report, chunks[1]);
    render_clothing(frame, report, chunks[2]);
    render_panels(frame, report, chunks[3]);
}

fn render_header(frame: &mut Frame, report: &WeatherReport, area: Rect) {
    let header = Line::from(Span::styled(
        report.location.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(header), area);
}

fn render_cards(frame: &mut Frame, report: &WeatherReport, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (card, column) in report.days.iter().zip(columns.iter()) {
        let wind = (card.day == DisplayDay::Today).then_some(report.wind);
        render_card(frame, card, wind, *column);
    }
}

fn render_card(frame: &mut Frame, card: &DayCard, wind: Option<Wind>, area: Rect) {
    let dim = Style::default().fg(Color::Gray);

    let mut lines = vec![
        Line::from(vec![
            Span::raw(format!("{} ", card.assets.icon)),
            Span::styled(
                format!("{}°C", card.temperature),
                Style::default()
                    .fg(temperature_color(card.temperature))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(card.description),
        Line::from(Span::styled(format!("Cloud cover {}%", card.cloud_cover), dim)),
        Line::from(Span::styled(
            format!(
                "Sunrise {}  Sunset {}",
                card.sunrise.format("%H:%M"),
                card.sunset.format("%H:%M")
            ),
            dim,
        )),
        Line::from(Span::styled(format!("{}:", card.comparison.label()), dim)),
        Line::from(format!(
            "  {}°C {}",
            card.comparison.reference(),
            card.comparison.note()
        )),
        Line::from(Span::styled(historical_text(card), dim)),
    ];

    if let Some(wind) = wind {
        lines.push(Line::from(format!(
            "Wind {:.0} km/h {}",
            wind.speed,
            compass_point(wind.direction)
        )));
    }

    let block = Block::default()
        .title(format!(" {} ", card.day.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(backdrop_color(card.assets.backdrop)));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// "Historical: 13°C Clear", with N/A for missing parts
pub fn historical_text(card: &DayCard) -> String {
    let temperature = card
        .historical
        .temperature
        .map_or_else(|| "N/A".to_string(), |t| format!("{}°C", t));
    let category = card.historical.category.map_or("N/A", |c| c.label());
    format!("Historical: {} {}", temperature, category)
}

fn render_clothing(frame: &mut Frame, report: &WeatherReport, area: Rect) {
    let block = Block::default()
        .title(" What to Wear Today ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(inner);

    let clothing = &report.clothing;
    let accessories = if clothing.accessories.is_empty() {
        vec![NO_ACCESSORIES.to_string()]
    } else {
        clothing.accessories.clone()
    };

    let groups = [
        ("Layers", clothing.layers.clone()),
        ("Accessories", accessories),
        ("Footwear", clothing.footwear.clone()),
    ];

    for ((title, items), column) in groups.into_iter().zip(columns.iter()) {
        let mut lines = vec![Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        lines.extend(items.into_iter().map(Line::from));
        frame.render_widget(Paragraph::new(lines), *column);
    }
}

fn render_panels(frame: &mut Frame, report: &WeatherReport, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_panel(frame, &report.rain, Color::Blue, columns[0]);
    render_panel(frame, &report.thunder, Color::Magenta, columns[1]);
}

fn render_panel(frame: &mut Frame, panel: &ConditionPanel, color: Color, area: Rect) {
    let label = Style::default().fg(Color::Gray);
    let lines = vec![
        Line::from(vec![
            Span::styled("Past Month: ", label),
            Span::raw(format!("{} days", panel.past_month)),
        ]),
        Line::from(vec![
            Span::styled("Last: ", label),
            Span::raw(panel.last.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Next: ", label),
            Span::raw(format_next(&panel.next)),
        ]),
    ];

    let block = Block::default()
        .title(format!(" {} ", panel.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
