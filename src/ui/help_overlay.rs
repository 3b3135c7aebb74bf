//! Key binding modal, toggled with `?`

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const WIDTH: u16 = 48;

/// Key bindings grouped by what they act on
const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Search",
        &[
            ("Enter", "Look up the typed city"),
            ("Tab", "Accept the suggested city"),
            ("Backspace", "Delete a character"),
        ],
    ),
    (
        "Other",
        &[
            ("?", "Toggle this help"),
            ("Esc", "Close help / Quit"),
            ("Ctrl-C", "Quit"),
        ],
    ),
];

pub fn render(frame: &mut Frame) {
    let lines = help_lines();
    // Borders add one row above and below
    let area = modal_area(frame.area(), WIDTH, lines.len() as u16 + 2);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        area,
    );
}

fn help_lines() -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled(
        "Keyboard Shortcuts",
        bold.fg(Color::Cyan),
    ))];

    for (group, keys) in BINDINGS {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(*group, bold)));
        lines.extend(keys.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("  {:<12}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        }));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Press Esc or ? to close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// `width` x `height` box centered in `area`, shrunk to fit small terminals
fn modal_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [modal] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    modal
}
