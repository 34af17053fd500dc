use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::correlation::CorrelationMatrix;
use crate::dashboard::app::App;
use crate::formatters::format_coefficient;
use crate::sidebar_image::{ImageStatus, SidebarImage};

const NAME_WIDTH: u16 = 12;
const VALUE_WIDTH: u16 = 7;

pub fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let sidebar = &app.report.sidebar;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(4), // Image
                Constraint::Min(6),    // Correlation
                Constraint::Length(4), // User counts
                Constraint::Length(8), // Dataset information
            ]
            .as_ref(),
        )
        .split(area);

    draw_image(f, chunks[0], &sidebar.image);
    draw_correlation(f, chunks[1], &sidebar.correlation, app.correlation_row, app.correlation_col);

    let users = Paragraph::new(vec![
        Line::from(Span::styled(
            sidebar.users.casual_line(),
            Style::default().fg(Color::Rgb(255, 165, 0)),
        )),
        Line::from(Span::styled(
            sidebar.users.registered_line(),
            Style::default().fg(Color::Blue),
        )),
    ])
    .block(Block::default().title(" User Counts ").borders(Borders::ALL));
    f.render_widget(users, chunks[2]);

    let info = Paragraph::new(sidebar.dataset_info)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().title(" Dataset Information ").borders(Borders::ALL));
    f.render_widget(info, chunks[3]);
}

fn draw_image(f: &mut Frame, area: Rect, image: &SidebarImage) {
    let status_color = match image.status {
        ImageStatus::Available => Color::Green,
        ImageStatus::Unchecked => Color::DarkGray,
        ImageStatus::Unavailable(_) => Color::Yellow,
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(image.caption.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(format!("[{}]", image.status.describe()), Style::default().fg(status_color)),
        ]),
        Line::from(Span::styled(image.url.as_str(), Style::default().fg(Color::DarkGray))),
    ];
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn coefficient_style(r: f64) -> Style {
    if r.is_nan() {
        Style::default().fg(Color::DarkGray)
    } else if r >= 0.5 {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if r > 0.0 {
        Style::default().fg(Color::Green)
    } else if r <= -0.5 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red)
    }
}

/// Number of value columns that fit next to the row names.
fn visible_columns(width: u16) -> usize {
    let usable = width.saturating_sub(2 + NAME_WIDTH);
    (usable / (VALUE_WIDTH + 1)).max(1) as usize
}

fn draw_correlation(f: &mut Frame, area: Rect, matrix: &CorrelationMatrix, first_row: usize, first_col: usize) {
    let block = Block::default()
        .title(format!(" Correlation Matrix ({}x{}) ", matrix.len(), matrix.len()))
        .borders(Borders::ALL);

    if matrix.is_empty() {
        let empty = Paragraph::new("No numeric columns").block(block);
        f.render_widget(empty, area);
        return;
    }

    let cols: Vec<usize> = (first_col..matrix.len()).take(visible_columns(area.width)).collect();

    let mut header_cells = vec![Cell::from("")];
    header_cells.extend(cols.iter().map(|&j| Cell::from(matrix.columns[j].clone())));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = matrix
        .values
        .iter()
        .enumerate()
        .skip(first_row)
        .map(|(i, row)| {
            let mut cells = vec![Cell::from(matrix.columns[i].clone()).style(Style::default().fg(Color::Cyan))];
            cells.extend(cols.iter().map(|&j| {
                Cell::from(format_coefficient(row[j])).style(coefficient_style(row[j]))
            }));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(NAME_WIDTH)];
    widths.extend(cols.iter().map(|_| Constraint::Length(VALUE_WIDTH)));

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
