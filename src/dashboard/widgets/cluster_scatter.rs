use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition},
    Frame,
};

use super::{axis_labels, padded_max};
use crate::aggregate::ClusterPartition;
use crate::report::PanelHeading;

const CLUSTER_COLORS: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

pub fn draw_cluster_scatter(f: &mut Frame, area: Rect, heading: &PanelHeading, partition: &ClusterPartition) {
    let points: Vec<Vec<(f64, f64)>> = partition
        .series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .map(|(hour, count)| (*hour as f64, *count as f64))
                .collect()
        })
        .collect();

    let y_max = points
        .iter()
        .flatten()
        .fold(0.0f64, |acc, (_, y)| acc.max(*y));
    let y_max = padded_max(y_max);

    let datasets: Vec<Dataset> = partition
        .series
        .iter()
        .zip(points.iter())
        .enumerate()
        .map(|(i, (series, data))| {
            Dataset::default()
                .name(series.label.clone())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(CLUSTER_COLORS[i % CLUSTER_COLORS.len()]))
                .data(data)
        })
        .collect();

    let mut title = format!(" {} ", heading.title);
    if partition.unassigned > 0 {
        title.push_str(&format!("({} rows outside clusters) ", partition.unassigned));
    }

    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title(heading.x_label.unwrap_or_default())
                .style(Style::default().fg(Color::Gray))
                .labels(axis_labels(0.0, 23.0, 5, 0))
                .bounds([0.0, 23.0]),
        )
        .y_axis(
            Axis::default()
                .title(heading.y_label.unwrap_or_default())
                .style(Style::default().fg(Color::Gray))
                .labels(axis_labels(0.0, y_max, 5, 0))
                .bounds([0.0, y_max]),
        )
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Percentage(100), Constraint::Percentage(100)));

    f.render_widget(chart, area);
}
