use crate::dataset::Dataset;
use crate::error::AggregateError;
use crate::models::{weekday_label, HourRecord, WEEKDAYS};
use chrono::{Month, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of precomputed cluster labels (0, 1, 2).
pub const CLUSTER_COUNT: usize = 3;

/// The pie slice drawn in red; every other slice is grey.
pub const HIGHLIGHTED_WEEKDAY: Weekday = Weekday::Sat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherParameter {
    Temperature,
    Humidity,
    Windspeed,
}

impl WeatherParameter {
    pub const ALL: [WeatherParameter; 3] = [
        WeatherParameter::Temperature,
        WeatherParameter::Humidity,
        WeatherParameter::Windspeed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WeatherParameter::Temperature => "Temperature",
            WeatherParameter::Humidity => "Humidity",
            WeatherParameter::Windspeed => "Windspeed",
        }
    }

    fn value(&self, record: &HourRecord) -> Option<f64> {
        let value = match self {
            WeatherParameter::Temperature => record.temperature,
            WeatherParameter::Humidity => record.humidity,
            WeatherParameter::Windspeed => record.windspeed,
        };
        value.filter(|v| !v.is_nan())
    }
}

/// Mean rental count for every distinct value of one weather parameter.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherSeries {
    pub parameter: WeatherParameter,
    /// `(parameter value, mean count)`, ascending by parameter value.
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekdaySlice {
    pub label: &'static str,
    pub mean_count: f64,
    pub share_percent: f64,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyUsers {
    pub month: u32,
    pub label: &'static str,
    pub registered: u64,
    pub casual: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterSeries {
    pub cluster: i64,
    pub label: String,
    /// `(hour, count)` in dataset order.
    pub points: Vec<(u32, u64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterPartition {
    pub series: Vec<ClusterSeries>,
    /// Rows whose label falls outside `0..CLUSTER_COUNT`; they are not plotted.
    pub unassigned: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserCounts {
    pub casual: u64,
    pub registered: u64,
    pub casual_percent: f64,
    pub registered_percent: f64,
}

impl UserCounts {
    pub fn from_totals(casual: u64, registered: u64) -> Result<Self, AggregateError> {
        // Both totals fit in u64 on their own; their sum may not.
        let total = casual as u128 + registered as u128;
        if total == 0 {
            return Err(AggregateError::NoUsers);
        }
        Ok(Self {
            casual,
            registered,
            casual_percent: casual as f64 / total as f64 * 100.0,
            registered_percent: registered as f64 / total as f64 * 100.0,
        })
    }

    pub fn casual_line(&self) -> String {
        format!("Casual Users: {} ({:.2}%)", self.casual, self.casual_percent)
    }

    pub fn registered_line(&self) -> String {
        format!(
            "Registered Users: {} ({:.2}%)",
            self.registered, self.registered_percent
        )
    }
}

/// Group `(key, value)` pairs by key and average each group. Keys come back in
/// ascending numeric order.
pub fn mean_by_key(mut pairs: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut means: Vec<(f64, f64)> = Vec::new();
    let mut current: Option<(f64, f64, usize)> = None;

    for (key, value) in pairs {
        current = match current {
            Some((k, sum, n)) if k == key => Some((k, sum + value, n + 1)),
            Some((k, sum, n)) => {
                means.push((k, sum / n as f64));
                Some((key, value, 1))
            }
            None => Some((key, value, 1)),
        };
    }
    if let Some((k, sum, n)) = current {
        means.push((k, sum / n as f64));
    }

    means
}

pub fn weather_effect(dataset: &Dataset) -> Vec<WeatherSeries> {
    WeatherParameter::ALL
        .iter()
        .map(|parameter| {
            let pairs = dataset
                .records()
                .iter()
                .filter_map(|r| parameter.value(r).map(|v| (v, r.count as f64)))
                .collect();
            WeatherSeries {
                parameter: *parameter,
                points: mean_by_key(pairs),
            }
        })
        .collect()
}

/// Mean rental count per weekday, always seven slices from Monday to Sunday.
/// A weekday without rows gets a zero slice.
pub fn weekday_shares(dataset: &Dataset) -> Vec<WeekdaySlice> {
    let mut sums = [(0u128, 0usize); 7];
    for record in dataset.records() {
        let idx = record.weekday.num_days_from_monday() as usize;
        sums[idx].0 += record.count as u128;
        sums[idx].1 += 1;
    }

    let means: Vec<f64> = sums
        .iter()
        .map(|(sum, n)| if *n == 0 { 0.0 } else { *sum as f64 / *n as f64 })
        .collect();
    let total: f64 = means.iter().sum();

    WEEKDAYS
        .iter()
        .zip(means)
        .map(|(day, mean)| WeekdaySlice {
            label: weekday_label(*day),
            mean_count: mean,
            share_percent: if total > 0.0 { mean / total * 100.0 } else { 0.0 },
            highlighted: *day == HIGHLIGHTED_WEEKDAY,
        })
        .collect()
}

/// Registered and casual sums per month present in the data, in calendar order.
pub fn monthly_users(dataset: &Dataset) -> Result<Vec<MonthlyUsers>, AggregateError> {
    let mut months: BTreeMap<u32, (Month, u64, u64)> = BTreeMap::new();
    for record in dataset.records() {
        let entry = months
            .entry(record.month.number_from_month())
            .or_insert((record.month, 0, 0));
        entry.1 = checked_sum(entry.1, record.registered, "registered_y")?;
        entry.2 = checked_sum(entry.2, record.casual, "casual_y")?;
    }

    Ok(months
        .into_iter()
        .map(|(number, (month, registered, casual))| MonthlyUsers {
            month: number,
            label: month.name(),
            registered,
            casual,
        })
        .collect())
}

pub fn cluster_partition(dataset: &Dataset) -> ClusterPartition {
    let mut series: Vec<ClusterSeries> = (0..CLUSTER_COUNT)
        .map(|i| ClusterSeries {
            cluster: i as i64,
            label: format!("Cluster {}", i + 1),
            points: Vec::new(),
        })
        .collect();
    let mut unassigned = 0;

    for record in dataset.records() {
        match usize::try_from(record.cluster) {
            Ok(idx) if idx < CLUSTER_COUNT => series[idx].points.push((record.hour, record.count)),
            _ => unassigned += 1,
        }
    }

    if unassigned > 0 {
        tracing::warn!(
            unassigned,
            "Rows with a cluster label outside 0..{} are not plotted",
            CLUSTER_COUNT
        );
    }

    ClusterPartition { series, unassigned }
}

pub fn user_counts(dataset: &Dataset) -> Result<UserCounts, AggregateError> {
    let (casual, registered) = dataset
        .records()
        .iter()
        .try_fold((0u64, 0u64), |(c, r), record| {
            Ok::<_, AggregateError>((
                checked_sum(c, record.casual, "casual_y")?,
                checked_sum(r, record.registered, "registered_y")?,
            ))
        })?;
    UserCounts::from_totals(casual, registered)
}

fn checked_sum(total: u64, value: u64, column: &'static str) -> Result<u64, AggregateError> {
    total
        .checked_add(value)
        .ok_or(AggregateError::CountOverflow(column))
}
