pub mod cluster_scatter;
pub mod monthly_bars;
pub mod sidebar;
pub mod weather_chart;
pub mod weekday_pie;

use ratatui::text::Span;

/// Evenly spaced axis labels between `min` and `max`.
pub(crate) fn axis_labels(min: f64, max: f64, count: usize, precision: usize) -> Vec<Span<'static>> {
    let steps = count.max(2) - 1;
    (0..=steps)
        .map(|i| {
            let value = min + (max - min) * i as f64 / steps as f64;
            Span::raw(format!("{:.*}", precision, value))
        })
        .collect()
}

/// Upper y bound with 10% headroom, never zero.
pub(crate) fn padded_max(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_labels() {
        let labels: Vec<String> = axis_labels(0.0, 1.0, 3, 2)
            .into_iter()
            .map(|s| s.content.into_owned())
            .collect();
        assert_eq!(labels, vec!["0.00", "0.50", "1.00"]);
    }

    #[test]
    fn test_padded_max() {
        assert_eq!(padded_max(0.0), 1.0);
        assert!((padded_max(100.0) - 110.0).abs() < 1e-9);
    }
}
