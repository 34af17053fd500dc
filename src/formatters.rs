use crate::aggregate::{ClusterPartition, MonthlyUsers, WeatherSeries, WeekdaySlice};
use crate::correlation::CorrelationMatrix;
use crate::report::{
    PanelHeading, Report, CLUSTER_HEADING, MONTHLY_HEADING, WEATHER_HEADING, WEEKDAY_HEADING,
};
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

pub fn format_table(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}\n",
        report.page_icon,
        report.title.bright_cyan().bold()
    ));
    out.push_str(&format!("{}\n", report.subtitle.yellow()));
    out.push_str(&format!(
        "Source: {} ({} rows)\n",
        report.source,
        format_number(report.rows as u64)
    ));

    push_section(&mut out, &WEATHER_HEADING, weather_table(&report.panels.weather));
    push_section(&mut out, &WEEKDAY_HEADING, weekday_table(&report.panels.weekday));
    push_section(&mut out, &MONTHLY_HEADING, monthly_table(&report.panels.monthly));
    push_section(&mut out, &CLUSTER_HEADING, cluster_table(&report.panels.clusters));
    if report.panels.clusters.unassigned > 0 {
        out.push_str(&format!(
            "{}\n",
            format!(
                "{} rows with an unknown cluster label are not shown",
                report.panels.clusters.unassigned
            )
            .dimmed()
        ));
    }

    let sidebar = &report.sidebar;
    out.push_str(&format!("\n{}\n", "=== Sidebar ===".bright_cyan().bold()));
    out.push_str(&format!(
        "[image] {} ({})\n        {}\n",
        sidebar.image.caption,
        sidebar.image.status.describe(),
        sidebar.image.url.dimmed()
    ));

    out.push_str(&format!("\n{}\n", "Correlation Calculation".yellow()));
    out.push_str(&correlation_table(&sidebar.correlation).to_string());

    out.push_str(&format!("\n{}\n", "User Counts".yellow()));
    out.push_str(&format!("  {}\n", sidebar.users.casual_line().green()));
    out.push_str(&format!("  {}\n", sidebar.users.registered_line().green()));

    out.push_str(&format!("\n{}\n", "Dataset Information".yellow()));
    out.push_str(&format!("  {}\n", sidebar.dataset_info));

    out
}

fn push_section(out: &mut String, heading: &PanelHeading, table: Table) {
    out.push_str(&format!(
        "\n{}\n",
        format!("=== {} ===", heading.header).bright_cyan().bold()
    ));
    out.push_str(&format!("{}\n", heading.title.yellow()));
    out.push_str(&table.to_string());
}

fn new_table(titles: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        titles
            .iter()
            .map(|t| Cell::new(t).style_spec("bFc"))
            .collect(),
    ));
    table
}

fn weather_table(series: &[WeatherSeries]) -> Table {
    let mut table = new_table(&[
        "Series",
        "Values",
        "Range",
        "Lowest Avg Rentals",
        "Highest Avg Rentals",
        "Peak At",
    ]);

    for s in series {
        let summary = summarize_series(&s.points);
        let row = match summary {
            Some(summary) => vec![
                Cell::new(s.parameter.label()),
                Cell::new(&s.points.len().to_string()),
                Cell::new(&format!("{:.2} - {:.2}", summary.min_key, summary.max_key)),
                Cell::new(&format!("{:.1}", summary.min_mean)),
                Cell::new(&format!("{:.1}", summary.max_mean)).style_spec("Fg"),
                Cell::new(&format!("{:.2}", summary.peak_key)),
            ],
            None => vec![
                Cell::new(s.parameter.label()),
                Cell::new("0"),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
            ],
        };
        table.add_row(Row::new(row));
    }

    table
}

struct SeriesSummary {
    min_key: f64,
    max_key: f64,
    min_mean: f64,
    max_mean: f64,
    peak_key: f64,
}

fn summarize_series(points: &[(f64, f64)]) -> Option<SeriesSummary> {
    let first = points.first()?;
    let last = points.last()?;
    let mut summary = SeriesSummary {
        min_key: first.0,
        max_key: last.0,
        min_mean: first.1,
        max_mean: first.1,
        peak_key: first.0,
    };
    for (key, mean) in points {
        if *mean < summary.min_mean {
            summary.min_mean = *mean;
        }
        if *mean > summary.max_mean {
            summary.max_mean = *mean;
            summary.peak_key = *key;
        }
    }
    Some(summary)
}

fn weekday_table(slices: &[WeekdaySlice]) -> Table {
    let mut table = new_table(&["Day", "Avg Rentals", "Share"]);

    for slice in slices {
        // Saturday is drawn red, every other slice grey.
        let spec = if slice.highlighted { "bFr" } else { "FD" };
        table.add_row(Row::new(vec![
            Cell::new(slice.label).style_spec(spec),
            Cell::new(&format!("{:.1}", slice.mean_count)).style_spec(spec),
            Cell::new(&format!("{:.1}%", slice.share_percent)).style_spec(spec),
        ]));
    }

    table
}

fn monthly_table(months: &[MonthlyUsers]) -> Table {
    let mut table = new_table(&["Month", "Registered", "Casual"]);

    for month in months {
        table.add_row(Row::new(vec![
            Cell::new(month.label),
            Cell::new(&format_number(month.registered)).style_spec("Fb"),
            Cell::new(&format_number(month.casual)).style_spec("Fy"),
        ]));
    }

    table
}

fn cluster_table(partition: &ClusterPartition) -> Table {
    let mut table = new_table(&["Cluster", "Points", "Hours", "Avg Rentals", "Max Rentals"]);
    let colors = ["Fr", "Fg", "Fb"];

    for (series, color) in partition.series.iter().zip(colors.iter()) {
        let points = &series.points;
        let (hours, avg, max) = if points.is_empty() {
            ("-".to_string(), "-".to_string(), "-".to_string())
        } else {
            let min_hour = points.iter().map(|p| p.0).min().unwrap_or(0);
            let max_hour = points.iter().map(|p| p.0).max().unwrap_or(0);
            let total: u128 = points.iter().map(|p| p.1 as u128).sum();
            let max = points.iter().map(|p| p.1).max().unwrap_or(0);
            (
                format!("{} - {}", min_hour, max_hour),
                format!("{:.1}", total as f64 / points.len() as f64),
                format_number(max),
            )
        };

        table.add_row(Row::new(vec![
            Cell::new(&series.label).style_spec(color),
            Cell::new(&format_number(points.len() as u64)),
            Cell::new(&hours),
            Cell::new(&avg),
            Cell::new(&max),
        ]));
    }

    table
}

fn correlation_table(matrix: &CorrelationMatrix) -> Table {
    let mut titles = vec![""];
    titles.extend(matrix.columns.iter().map(|c| c.as_str()));
    let mut table = new_table(&titles);

    for (name, row) in matrix.columns.iter().zip(matrix.values.iter()) {
        let mut cells = vec![Cell::new(name).style_spec("b")];
        cells.extend(row.iter().map(|r| Cell::new(&format_coefficient(*r))));
        table.add_row(Row::new(cells));
    }

    table
}

pub fn format_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn format_markdown(report: &Report) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {} {}\n\n", report.page_icon, report.title));
    md.push_str(&format!("## {}\n\n", report.subtitle));
    md.push_str(&format!(
        "_Source: {} ({} rows)_\n\n",
        report.source,
        format_number(report.rows as u64)
    ));

    push_markdown_heading(&mut md, &WEATHER_HEADING);
    md.push_str("| Series | Values | Range | Highest Avg Rentals | Peak At |\n");
    md.push_str("|--------|--------|-------|---------------------|---------|\n");
    for s in &report.panels.weather {
        match summarize_series(&s.points) {
            Some(summary) => md.push_str(&format!(
                "| {} | {} | {:.2} - {:.2} | {:.1} | {:.2} |\n",
                s.parameter.label(),
                s.points.len(),
                summary.min_key,
                summary.max_key,
                summary.max_mean,
                summary.peak_key
            )),
            None => md.push_str(&format!("| {} | 0 | - | - | - |\n", s.parameter.label())),
        }
    }

    push_markdown_heading(&mut md, &WEEKDAY_HEADING);
    md.push_str("| Day | Avg Rentals | Share |\n");
    md.push_str("|-----|-------------|-------|\n");
    for slice in &report.panels.weekday {
        if slice.highlighted {
            md.push_str(&format!(
                "| **{}** | **{:.1}** | **{:.1}%** |\n",
                slice.label, slice.mean_count, slice.share_percent
            ));
        } else {
            md.push_str(&format!(
                "| {} | {:.1} | {:.1}% |\n",
                slice.label, slice.mean_count, slice.share_percent
            ));
        }
    }

    push_markdown_heading(&mut md, &MONTHLY_HEADING);
    md.push_str("| Month | Registered | Casual |\n");
    md.push_str("|-------|------------|--------|\n");
    for month in &report.panels.monthly {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            month.label,
            format_number(month.registered),
            format_number(month.casual)
        ));
    }

    push_markdown_heading(&mut md, &CLUSTER_HEADING);
    md.push_str("| Cluster | Points |\n");
    md.push_str("|---------|--------|\n");
    for series in &report.panels.clusters.series {
        md.push_str(&format!(
            "| {} | {} |\n",
            series.label,
            format_number(series.points.len() as u64)
        ));
    }

    let sidebar = &report.sidebar;
    md.push_str("\n## Sidebar\n\n");
    md.push_str(&format!(
        "![{}]({})\n\n_{}_\n\n",
        sidebar.image.caption, sidebar.image.url, sidebar.image.caption
    ));

    md.push_str("### Correlation Calculation\n\n");
    md.push_str("| |");
    for column in &sidebar.correlation.columns {
        md.push_str(&format!(" {} |", column));
    }
    md.push_str("\n|---|");
    for _ in &sidebar.correlation.columns {
        md.push_str("---|");
    }
    md.push('\n');
    for (name, row) in sidebar
        .correlation
        .columns
        .iter()
        .zip(sidebar.correlation.values.iter())
    {
        md.push_str(&format!("| **{}** |", name));
        for r in row {
            md.push_str(&format!(" {} |", format_coefficient(*r)));
        }
        md.push('\n');
    }

    md.push_str("\n### User Counts\n\n");
    md.push_str(&format!("{}\n\n", sidebar.users.casual_line()));
    md.push_str(&format!("{}\n\n", sidebar.users.registered_line()));

    md.push_str("### Dataset Information\n\n");
    md.push_str(sidebar.dataset_info);
    md.push('\n');

    md
}

fn push_markdown_heading(md: &mut String, heading: &PanelHeading) {
    md.push_str(&format!("\n## {}\n\n", heading.header));
    md.push_str(&format!("**{}**\n\n", heading.title));
}

pub fn format_coefficient(r: f64) -> String {
    if r.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.2}", r)
    }
}

pub fn format_number(num: u64) -> String {
    let num_str = num.to_string();
    let mut result = String::new();
    let mut count = 0;

    for ch in num_str.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}
