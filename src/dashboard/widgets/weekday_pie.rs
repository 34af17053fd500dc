use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};
use std::f64::consts::TAU;

use crate::aggregate::WeekdaySlice;
use crate::report::PanelHeading;

/// Sampling step of the pie surface, in units of the radius.
const PIE_STEP: f64 = 0.02;
const Y_HALF_SPAN: f64 = 1.1;

/// Saturday in red, the rest in alternating greys so neighbours stay apart.
pub fn slice_color(index: usize, slice: &WeekdaySlice) -> Color {
    if slice.highlighted {
        Color::Red
    } else if index % 2 == 0 {
        Color::Gray
    } else {
        Color::DarkGray
    }
}

/// Start angle of every slice, counter-clockwise from 3 o'clock, plus the closing
/// angle. Empty slices take no room.
pub fn slice_angles(slices: &[WeekdaySlice]) -> Vec<f64> {
    let total: f64 = slices.iter().map(|s| s.share_percent).sum();
    let mut angles = Vec::with_capacity(slices.len() + 1);
    let mut acc = 0.0;
    angles.push(0.0);
    for slice in slices {
        if total > 0.0 {
            acc += slice.share_percent / total * TAU;
        }
        angles.push(acc);
    }
    angles
}

/// Sample the unit disc and bucket every point into the slice covering its angle.
pub fn slice_points(slices: &[WeekdaySlice]) -> Vec<Vec<(f64, f64)>> {
    let angles = slice_angles(slices);
    let mut points = vec![Vec::new(); slices.len()];
    if angles.last().copied().unwrap_or(0.0) <= 0.0 {
        return points;
    }

    let steps = (2.0 / PIE_STEP) as i32;
    for i in 0..=steps {
        for j in 0..=steps {
            let x = -1.0 + i as f64 * PIE_STEP;
            let y = -1.0 + j as f64 * PIE_STEP;
            if x * x + y * y > 1.0 {
                continue;
            }
            let angle = y.atan2(x).rem_euclid(TAU);
            if let Some(idx) = (0..slices.len()).find(|k| angle >= angles[*k] && angle < angles[k + 1]) {
                points[idx].push((x, y));
            }
        }
    }
    points
}

pub fn draw_weekday_pie(f: &mut Frame, area: Rect, heading: &PanelHeading, slices: &[WeekdaySlice]) {
    let block = Block::default()
        .title(format!(" {} ", heading.title))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(28)].as_ref())
        .split(inner);

    draw_pie(f, chunks[0], slices);
    draw_legend(f, chunks[1], slices);
}

fn draw_pie(f: &mut Frame, area: Rect, slices: &[WeekdaySlice]) {
    let points = slice_points(slices);
    let colors: Vec<Color> = slices
        .iter()
        .enumerate()
        .map(|(i, s)| slice_color(i, s))
        .collect();

    // Braille dots are close to square: 2 per cell across, 4 per cell down.
    let dots_wide = area.width.max(1) as f64 * 2.0;
    let dots_high = area.height.max(1) as f64 * 4.0;
    let x_half_span = Y_HALF_SPAN * dots_wide / dots_high;

    let angles = slice_angles(slices);
    let labels: Vec<(f64, f64, String)> = slices
        .iter()
        .enumerate()
        .filter(|(_, s)| s.share_percent > 0.0)
        .map(|(i, s)| {
            let mid = (angles[i] + angles[i + 1]) / 2.0;
            (0.6 * mid.cos(), 0.6 * mid.sin(), format!("{:.1}%", s.share_percent))
        })
        .collect();

    let canvas = Canvas::default()
        .marker(symbols::Marker::Braille)
        .x_bounds([-x_half_span, x_half_span])
        .y_bounds([-Y_HALF_SPAN, Y_HALF_SPAN])
        .paint(|ctx| {
            for (coords, color) in points.iter().zip(colors.iter()) {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
            ctx.layer();
            for (x, y, text) in &labels {
                ctx.print(
                    *x,
                    *y,
                    Span::styled(
                        text.clone(),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn draw_legend(f: &mut Frame, area: Rect, slices: &[WeekdaySlice]) {
    let lines: Vec<Line> = slices
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let mut label_style = Style::default();
            if s.highlighted {
                label_style = label_style.fg(Color::Red).add_modifier(Modifier::BOLD);
            }
            Line::from(vec![
                Span::styled(" ■ ", Style::default().fg(slice_color(i, s))),
                Span::styled(format!("{:<10}", s.label), label_style),
                Span::raw(format!("{:>5.1}% ", s.share_percent)),
                Span::styled(
                    format!("{:>6.1}", s.mean_count),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices(shares: [f64; 7]) -> Vec<WeekdaySlice> {
        ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
            .iter()
            .zip(shares.iter())
            .map(|(label, share)| WeekdaySlice {
                label: *label,
                mean_count: *share,
                share_percent: *share,
                highlighted: *label == "Saturday",
            })
            .collect()
    }

    #[test]
    fn test_slice_angles_close_the_circle() {
        let angles = slice_angles(&slices([10.0, 10.0, 10.0, 10.0, 10.0, 25.0, 25.0]));
        assert_eq!(angles.len(), 8);
        assert!((angles[7] - TAU).abs() < 1e-9);
        assert!((angles[6] - angles[5] - TAU / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_every_disc_point_lands_in_one_slice() {
        let s = slices([14.0, 14.0, 14.0, 14.0, 14.0, 15.0, 15.0]);
        let points = slice_points(&s);
        assert_eq!(points.len(), 7);
        assert!(points.iter().all(|p| !p.is_empty()));
        // Saturday is bigger than Monday
        assert!(points[5].len() > points[0].len());
    }

    #[test]
    fn test_empty_pie_has_no_points() {
        let points = slice_points(&slices([0.0; 7]));
        assert!(points.iter().all(|p| p.is_empty()));
    }

    #[test]
    fn test_saturday_is_red() {
        let s = slices([1.0; 7]);
        assert_eq!(slice_color(5, &s[5]), Color::Red);
        assert_ne!(slice_color(0, &s[0]), Color::Red);
    }
}
