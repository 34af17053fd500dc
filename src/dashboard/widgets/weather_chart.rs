use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition},
    Frame,
};

use super::{axis_labels, padded_max};
use crate::aggregate::{WeatherParameter, WeatherSeries};
use crate::report::PanelHeading;

fn series_color(parameter: WeatherParameter) -> Color {
    match parameter {
        WeatherParameter::Temperature => Color::Blue,
        WeatherParameter::Humidity => Color::Green,
        WeatherParameter::Windspeed => Color::Red,
    }
}

pub fn draw_weather_chart(f: &mut Frame, area: Rect, heading: &PanelHeading, series: &[WeatherSeries]) {
    let all_points = series.iter().flat_map(|s| s.points.iter());
    let (x_min, x_max, y_max) = all_points.fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0f64),
        |(x_min, x_max, y_max), (x, y)| (x_min.min(*x), x_max.max(*x), y_max.max(*y)),
    );
    let (x_min, x_max) = if x_min.is_finite() && x_max > x_min {
        (x_min, x_max)
    } else if x_min.is_finite() {
        (x_min - 0.5, x_min + 0.5)
    } else {
        (0.0, 1.0)
    };
    let y_max = padded_max(y_max);

    let datasets: Vec<Dataset> = series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.parameter.label())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series_color(s.parameter)))
                .data(&s.points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(" {} ", heading.title))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title(heading.x_label.unwrap_or_default())
                .style(Style::default().fg(Color::Gray))
                .labels(axis_labels(x_min, x_max, 5, 2))
                .bounds([x_min, x_max]),
        )
        .y_axis(
            Axis::default()
                .title(heading.y_label.unwrap_or_default())
                .style(Style::default().fg(Color::Gray))
                .labels(axis_labels(0.0, y_max, 5, 0))
                .bounds([0.0, y_max]),
        )
        .legend_position(Some(LegendPosition::TopRight))
        // Always show the legend, even in small terminals
        .hidden_legend_constraints((Constraint::Percentage(100), Constraint::Percentage(100)));

    f.render_widget(chart, area);
}
