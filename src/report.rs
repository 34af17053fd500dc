use crate::aggregate::{
    cluster_partition, monthly_users, user_counts, weather_effect, weekday_shares,
    ClusterPartition, MonthlyUsers, UserCounts, WeatherSeries, WeekdaySlice,
};
use crate::correlation::CorrelationMatrix;
use crate::dataset::Dataset;
use crate::error::AggregateError;
use crate::sidebar_image::SidebarImage;
use serde::Serialize;

pub const PAGE_TITLE: &str = "Bike Sharing Dashboard";
pub const PAGE_ICON: &str = "🚲";
pub const TITLE: &str = "Bike Sharing Dashboard";
pub const SUBTITLE: &str = "Insights and Visualizations";

pub const DATASET_INFO: &str = "The dataset contains 33 columns, including data on instant, dteday, \
season, yr, mnth, hr, holiday, weekday, workingday, weathersit, temp_x and temp_y (temperature), \
atemp_x and atemp_y (feeling temperature), hum_x and hum_y (humidity), windspeed_x and windspeed_y \
(wind speed), casual_x and casual_y (number of casual users), registered_x and registered_y (number \
of registered users), cnt_x and cnt_y (total count of bike rentals) for two different years (_x for \
one year and _y for another year). The dataset also includes a 'cluster' column.";

/// Section heading and chart title of one chart panel.
#[derive(Debug, Clone, Serialize)]
pub struct PanelHeading {
    pub header: &'static str,
    pub title: &'static str,
    pub x_label: Option<&'static str>,
    pub y_label: Option<&'static str>,
}

pub const WEATHER_HEADING: PanelHeading = PanelHeading {
    header: "Effect of Weather on Bike Rentals",
    title: "Effect of Weather on Total Bike Rentals",
    x_label: Some("Weather Parameter"),
    y_label: Some("Average Bike Rentals"),
};

pub const WEEKDAY_HEADING: PanelHeading = PanelHeading {
    header: "Difference in Bike Rentals between Weekdays and Weekends/Holidays",
    title: "Comparison of Total Bike Rentals",
    x_label: None,
    y_label: None,
};

pub const MONTHLY_HEADING: PanelHeading = PanelHeading {
    header: "Comparison of Bike Rental Behavior between Registered and Casual Users",
    title: "Comparison of Bike Rental Behavior (Monthly)",
    x_label: Some("Month"),
    y_label: Some("Total Number of Bike Rentals"),
};

pub const CLUSTER_HEADING: PanelHeading = PanelHeading {
    header: "Clustering Result Visualization",
    title: "Clustering Result",
    x_label: Some("Hour"),
    y_label: Some("Number of Bike Rentals"),
};

#[derive(Debug, Clone, Serialize)]
pub struct Panels {
    pub weather: Vec<WeatherSeries>,
    pub weekday: Vec<WeekdaySlice>,
    pub monthly: Vec<MonthlyUsers>,
    pub clusters: ClusterPartition,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sidebar {
    pub image: SidebarImage,
    pub correlation: CorrelationMatrix,
    pub users: UserCounts,
    pub dataset_info: &'static str,
}

/// Everything the dashboard shows, computed up front so that a failing step
/// leaves nothing half-rendered.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub page_title: &'static str,
    pub page_icon: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub source: String,
    pub rows: usize,
    pub panels: Panels,
    pub sidebar: Sidebar,
}

impl Report {
    pub fn build(dataset: &Dataset, image: SidebarImage) -> Result<Self, AggregateError> {
        let weather = weather_effect(dataset);
        tracing::debug!(
            points = weather.iter().map(|s| s.points.len()).sum::<usize>(),
            "Weather panel ready"
        );

        let weekday = weekday_shares(dataset);
        let monthly = monthly_users(dataset)?;
        tracing::debug!(months = monthly.len(), "Monthly panel ready");

        let clusters = cluster_partition(dataset);
        tracing::debug!(unassigned = clusters.unassigned, "Cluster panel ready");

        let correlation = CorrelationMatrix::from_dataset(dataset);
        let users = user_counts(dataset)?;

        tracing::info!(
            rows = dataset.len(),
            correlated_columns = correlation.len(),
            "Report assembled"
        );

        Ok(Self {
            page_title: PAGE_TITLE,
            page_icon: PAGE_ICON,
            title: TITLE,
            subtitle: SUBTITLE,
            source: dataset.source().display().to_string(),
            rows: dataset.len(),
            panels: Panels {
                weather,
                weekday,
                monthly,
                clusters,
            },
            sidebar: Sidebar {
                image,
                correlation,
                users,
                dataset_info: DATASET_INFO,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::NumericColumn;
    use crate::models::HourRecord;
    use chrono::{Month, Weekday};

    fn record(hour: u32, count: u64, casual: u64, cluster: i64) -> HourRecord {
        HourRecord {
            temperature: Some(0.3),
            humidity: Some(0.6),
            windspeed: Some(0.1),
            weekday: Weekday::Wed,
            month: Month::June,
            hour,
            count,
            casual,
            registered: count - casual,
            cluster,
        }
    }

    #[test]
    fn test_build_collects_every_panel() {
        let records = vec![record(5, 10, 3, 0), record(12, 20, 5, 1), record(20, 30, 7, 2)];
        let columns = vec![
            NumericColumn {
                name: "hr".to_string(),
                values: vec![5.0, 12.0, 20.0],
            },
            NumericColumn {
                name: "cnt_y".to_string(),
                values: vec![10.0, 20.0, 30.0],
            },
        ];
        let dataset = Dataset::new("analysis.csv", records, columns);
        let report = Report::build(&dataset, SidebarImage::unchecked()).unwrap();

        assert_eq!(report.rows, 3);
        assert_eq!(report.panels.weather.len(), 3);
        assert_eq!(report.panels.weekday.len(), 7);
        assert_eq!(report.panels.monthly.len(), 1);
        assert_eq!(report.panels.clusters.series.len(), 3);
        assert_eq!(report.sidebar.correlation.columns, vec!["hr", "cnt_y"]);
        assert_eq!(report.sidebar.users.casual, 15);
        assert_eq!(report.sidebar.users.registered, 45);
    }

    #[test]
    fn test_build_fails_without_users() {
        let dataset = Dataset::new("analysis.csv", vec![record(1, 0, 0, 0)], Vec::new());
        let err = Report::build(&dataset, SidebarImage::unchecked()).unwrap_err();
        assert_eq!(err, AggregateError::NoUsers);
    }
}
