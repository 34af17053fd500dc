use crate::report::{
    PanelHeading, Report, CLUSTER_HEADING, MONTHLY_HEADING, WEATHER_HEADING, WEEKDAY_HEADING,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Weather,
    Weekday,
    Monthly,
    Clusters,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Panel::Weather, Panel::Weekday, Panel::Monthly, Panel::Clusters];

    pub fn tab_title(&self) -> &'static str {
        match self {
            Panel::Weather => "Weather",
            Panel::Weekday => "Weekdays",
            Panel::Monthly => "Registered vs Casual",
            Panel::Clusters => "Clusters",
        }
    }

    pub fn heading(&self) -> &'static PanelHeading {
        match self {
            Panel::Weather => &WEATHER_HEADING,
            Panel::Weekday => &WEEKDAY_HEADING,
            Panel::Monthly => &MONTHLY_HEADING,
            Panel::Clusters => &CLUSTER_HEADING,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Panel::Weather => 0,
            Panel::Weekday => 1,
            Panel::Monthly => 2,
            Panel::Clusters => 3,
        }
    }

    pub fn next(&self) -> Self {
        Panel::ALL[(self.index() + 1) % Panel::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Panel::ALL[(self.index() + Panel::ALL.len() - 1) % Panel::ALL.len()]
    }

    /// `'1'..='4'` select a panel directly.
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        if n == 0 {
            return None;
        }
        Panel::ALL.get(n - 1).copied()
    }
}

pub struct App {
    pub report: Report,
    pub panel: Panel,
    pub show_sidebar: bool,
    pub show_help: bool,
    pub correlation_row: usize,
    pub correlation_col: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(report: Report) -> Self {
        Self {
            report,
            panel: Panel::Weather,
            show_sidebar: true,
            show_help: false,
            correlation_row: 0,
            correlation_col: 0,
            should_quit: false,
        }
    }

    pub fn next_panel(&mut self) {
        self.panel = self.panel.next();
    }

    pub fn previous_panel(&mut self) {
        self.panel = self.panel.previous();
    }

    pub fn select_panel(&mut self, panel: Panel) {
        self.panel = panel;
    }

    pub fn toggle_sidebar(&mut self) {
        self.show_sidebar = !self.show_sidebar;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    fn correlation_len(&self) -> usize {
        self.report.sidebar.correlation.len()
    }

    pub fn scroll_correlation_up(&mut self) {
        self.correlation_row = self.correlation_row.saturating_sub(1);
    }

    pub fn scroll_correlation_down(&mut self) {
        if self.correlation_row + 1 < self.correlation_len() {
            self.correlation_row += 1;
        }
    }

    pub fn scroll_correlation_left(&mut self) {
        self.correlation_col = self.correlation_col.saturating_sub(1);
    }

    pub fn scroll_correlation_right(&mut self) {
        if self.correlation_col + 1 < self.correlation_len() {
            self.correlation_col += 1;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dataset::{Dataset, NumericColumn};
    use crate::models::HourRecord;
    use crate::sidebar_image::SidebarImage;
    use chrono::Month;

    pub(crate) fn sample_app() -> App {
        let records: Vec<HourRecord> = (0..24)
            .map(|hour| HourRecord {
                temperature: Some(0.1 + hour as f64 * 0.03),
                humidity: Some(0.9 - hour as f64 * 0.02),
                windspeed: Some((hour % 5) as f64 * 0.1),
                weekday: crate::models::WEEKDAYS[(hour % 7) as usize],
                month: if hour < 12 { Month::January } else { Month::July },
                hour,
                count: 10 + hour as u64 * 7,
                casual: hour as u64,
                registered: 10 + hour as u64 * 6,
                cluster: (hour % 3) as i64,
            })
            .collect();
        let columns = vec![
            NumericColumn {
                name: "hr".to_string(),
                values: records.iter().map(|r| r.hour as f64).collect(),
            },
            NumericColumn {
                name: "cnt_y".to_string(),
                values: records.iter().map(|r| r.count as f64).collect(),
            },
            NumericColumn {
                name: "casual_y".to_string(),
                values: records.iter().map(|r| r.casual as f64).collect(),
            },
        ];
        let dataset = Dataset::new("analysis.csv", records, columns);
        App::new(Report::build(&dataset, SidebarImage::unchecked()).unwrap())
    }

    #[test]
    fn test_panel_cycling_wraps() {
        assert_eq!(Panel::Clusters.next(), Panel::Weather);
        assert_eq!(Panel::Weather.previous(), Panel::Clusters);
        assert_eq!(Panel::Weekday.next(), Panel::Monthly);
    }

    #[test]
    fn test_panel_from_digit() {
        assert_eq!(Panel::from_digit('1'), Some(Panel::Weather));
        assert_eq!(Panel::from_digit('4'), Some(Panel::Clusters));
        assert_eq!(Panel::from_digit('0'), None);
        assert_eq!(Panel::from_digit('5'), None);
        assert_eq!(Panel::from_digit('x'), None);
    }

    #[test]
    fn test_correlation_scroll_is_bounded() {
        let mut app = sample_app();
        app.scroll_correlation_up();
        assert_eq!(app.correlation_row, 0);
        for _ in 0..10 {
            app.scroll_correlation_down();
            app.scroll_correlation_right();
        }
        assert_eq!(app.correlation_row, 2);
        assert_eq!(app.correlation_col, 2);
    }
}
