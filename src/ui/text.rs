//! Plain-text report for `--plain`

use crate::report::{ConditionPanel, DayCard, DisplayDay, WeatherReport};

use super::report_view::{historical_text, NO_ACCESSORIES};
use super::{compass_point, format_next};

/// Formats the report as plain text, one section after another
pub fn render_plain(report: &WeatherReport) -> String {
    let mut lines = vec![report.location.clone(), String::new()];

    for card in &report.days {
        lines.extend(card_lines(card));
        if card.day == DisplayDay::Today {
            lines.push(format!(
                "  Wind {:.0} km/h {}",
                report.wind.speed,
                compass_point(report.wind.direction)
            ));
        }
        lines.push(String::new());
    }

    let clothing = &report.clothing;
    let accessories = if clothing.accessories.is_empty() {
        NO_ACCESSORIES.to_string()
    } else {
        clothing.accessories.join(", ")
    };
    lines.push("What to Wear Today".to_string());
    lines.push(format!("  Layers: {}", clothing.layers.join(", ")));
    lines.push(format!("  Accessories: {}", accessories));
    lines.push(format!("  Footwear: {}", clothing.footwear.join(", ")));
    lines.push(String::new());

    lines.push(panel_line(&report.rain));
    lines.push(panel_line(&report.thunder));

    lines.join("\n")
}

fn card_lines(card: &DayCard) -> Vec<String> {
    vec![
        format!(
            "{:<10} {}°C  {}",
            card.day.label(),
            card.temperature,
            card.description
        ),
        format!(
            "  Cloud cover {}%  Sunrise {}  Sunset {}",
            card.cloud_cover,
            card.sunrise.format("%H:%M"),
            card.sunset.format("%H:%M")
        ),
        format!(
            "  {}: {}°C {}",
            card.comparison.label(),
            card.comparison.reference(),
            card.comparison.note()
        ),
        format!("  {}", historical_text(card)),
    ]
}

fn panel_line(panel: &ConditionPanel) -> String {
    format!(
        "{:<8} Past Month: {} days  Last: {}  Next: {}",
        panel.title,
        panel.past_month,
        panel.last,
        format_next(&panel.next)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn test_plain_report_sections() {
        let text = render_plain(&sample_report());

        assert!(text.starts_with("Stockholm, Sweden\n"));
        assert!(text.contains("Yesterday  15°C  Clear"));
        assert!(text.contains("Today      16°C  Clear"));
        assert!(text.contains("  Yesterday's Forecast: 15°C (91% accurate)"));
        assert!(text.contains("  Today's Forecast: 15°C (Forecast)"));
        assert!(text.contains("  Wind 12 km/h W"));
        assert!(text.contains("  Accessories: No accessories needed"));
        assert!(text.contains("Rain     Past Month: 0 days  Last: 30d+  Next: +1d (no history)"));
        assert!(text.contains("Thunder  Past Month: 0 days"));
    }

    #[test]
    fn test_plain_report_lists_accessories() {
        let mut report = sample_report();
        report.clothing.accessories = vec!["Sun protection".to_string(), "Rain protection".to_string()];

        let text = render_plain(&report);
        assert!(text.contains("  Accessories: Sun protection, Rain protection"));
    }
}
