use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::aggregate::MonthlyUsers;
use crate::formatters::format_number;
use crate::report::PanelHeading;

const REGISTERED_COLOR: Color = Color::Blue;
const CASUAL_COLOR: Color = Color::Rgb(255, 165, 0);

fn short_label(label: &str) -> String {
    label.chars().take(3).collect()
}

fn bar(value: u64, color: Color) -> Bar<'static> {
    Bar::default()
        .value(value)
        .style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color))
        .text_value(format_number(value))
}

pub fn draw_monthly_bars(f: &mut Frame, area: Rect, heading: &PanelHeading, months: &[MonthlyUsers]) {
    let block = Block::default()
        .title(format!(" {} ", heading.title))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)].as_ref())
        .split(inner);

    let legend = Paragraph::new(Line::from(vec![
        Span::styled("■ ", Style::default().fg(REGISTERED_COLOR)),
        Span::raw("Registered Users  "),
        Span::styled("■ ", Style::default().fg(CASUAL_COLOR)),
        Span::raw("Casual Users"),
    ]));
    f.render_widget(legend, chunks[0]);

    // Two bars per month plus a gap, sized to the available width
    let groups = months.len().max(1) as u16;
    let bar_width = (chunks[1].width / groups).saturating_sub(2).max(2) / 2;
    let bar_width = bar_width.max(1);

    let mut chart = BarChart::default()
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(1);
    for month in months {
        let group = BarGroup::default()
            .label(Line::from(short_label(month.label)))
            .bars(&[
                bar(month.registered, REGISTERED_COLOR),
                bar(month.casual, CASUAL_COLOR),
            ]);
        chart = chart.data(group);
    }
    f.render_widget(chart, chunks[1]);

    let axis = Paragraph::new(Line::from(vec![
        Span::styled(
            heading.x_label.unwrap_or_default(),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(" / "),
        Span::styled(
            heading.y_label.unwrap_or_default(),
            Style::default().fg(Color::Gray),
        ),
    ]));
    f.render_widget(axis, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("January"), "Jan");
        assert_eq!(short_label("May"), "May");
    }
}
