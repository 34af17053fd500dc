use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::{App, Panel};
use super::widgets::{
    cluster_scatter::draw_cluster_scatter, monthly_bars::draw_monthly_bars,
    sidebar::draw_sidebar, weather_chart::draw_weather_chart, weekday_pie::draw_weekday_pie,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(4), // Title
                Constraint::Length(3), // Tabs
                Constraint::Min(12),   // Main content
                Constraint::Length(2), // Help
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_header(f, chunks[0], app);
    draw_tabs(f, chunks[1], app);
    draw_main_content(f, chunks[2], app);
    draw_help(f, chunks[3]);

    if app.show_help {
        draw_help_overlay(f, f.size());
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let report = &app.report;
    let lines = vec![
        Line::from(Span::styled(
            report.title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(report.subtitle, Style::default().fg(Color::Yellow)),
            Span::raw(" | "),
            Span::raw(format!("{} ({} rows)", report.source, report.rows)),
        ]),
    ];

    let header = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(format!(" {} {} ", report.page_icon, report.page_title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Panel::ALL
        .iter()
        .map(|p| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", p.index() + 1),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(p.tab_title()),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.panel.index())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn draw_main_content(f: &mut Frame, area: Rect, app: &App) {
    let chart_area = if app.show_sidebar {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                [
                    Constraint::Percentage(65), // Chart panel
                    Constraint::Percentage(35), // Sidebar
                ]
                .as_ref(),
            )
            .split(area);
        draw_sidebar(f, chunks[1], app);
        chunks[0]
    } else {
        area
    };

    draw_panel(f, chart_area, app);
}

fn draw_panel(f: &mut Frame, area: Rect, app: &App) {
    let heading = app.panel.heading();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)].as_ref())
        .split(area);

    let header = Paragraph::new(Line::from(Span::styled(
        heading.header,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    let panels = &app.report.panels;
    match app.panel {
        Panel::Weather => draw_weather_chart(f, chunks[1], heading, &panels.weather),
        Panel::Weekday => draw_weekday_pie(f, chunks[1], heading, &panels.weekday),
        Panel::Monthly => draw_monthly_bars(f, chunks[1], heading, &panels.monthly),
        Panel::Clusters => draw_cluster_scatter(f, chunks[1], heading, &panels.clusters),
    }
}

fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn draw_help(f: &mut Frame, area: Rect) {
    let help_text = vec![
        Span::raw("["),
        key_span("q"),
        Span::raw("]uit ["),
        key_span("←→"),
        Span::raw("] panel ["),
        key_span("↑↓"),
        Span::raw("] correlations ["),
        key_span("s"),
        Span::raw("]idebar ["),
        key_span("?"),
        Span::raw("] help"),
    ];

    let help = Paragraph::new(Line::from(help_text))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);

    f.render_widget(help, area);
}

fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 50, area);
    let lines = vec![
        Line::from(vec![key_span("1-4"), Span::raw("       select a chart panel")]),
        Line::from(vec![key_span("←/→ Tab"), Span::raw("   previous / next panel")]),
        Line::from(vec![key_span("↑/↓"), Span::raw("       scroll correlation rows")]),
        Line::from(vec![key_span("[ / ]"), Span::raw("     scroll correlation columns")]),
        Line::from(vec![key_span("s"), Span::raw("         show / hide the sidebar")]),
        Line::from(vec![key_span("? h"), Span::raw("       toggle this help")]),
        Line::from(vec![key_span("q Esc"), Span::raw("     quit")]),
    ];

    let help = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White)),
        );

    f.render_widget(Clear, popup);
    f.render_widget(help, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical[1])[1]
}
