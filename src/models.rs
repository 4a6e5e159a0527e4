use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One calendar day of measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub users: u64,
    pub sessions: u64,
}

impl Record {
    pub fn new(date: NaiveDate, users: u64, sessions: u64) -> Self {
        Self {
            date,
            users,
            sessions,
        }
    }

    pub fn value(&self, measure: Measure) -> u64 {
        match measure {
            Measure::Users => self.users,
            Measure::Sessions => self.sessions,
        }
    }

    /// Per-day density, 0 when the day has no users.
    pub fn sessions_per_user(&self) -> f64 {
        if self.users == 0 {
            0.0
        } else {
            self.sessions as f64 / self.users as f64
        }
    }
}

/// Which measure is in focus. The other one is the contrast measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    #[default]
    Users,
    Sessions,
}

impl Measure {
    pub fn contrast(self) -> Self {
        match self {
            Self::Users => Self::Sessions,
            Self::Sessions => Self::Users,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Sessions => "sessions",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Sessions => "Sessions",
        }
    }

    pub fn contrast_total_label(self) -> &'static str {
        match self {
            Self::Users => "Period Sessions",
            Self::Sessions => "Period Users",
        }
    }

    pub fn ratio_label(self) -> &'static str {
        match self {
            Self::Users => "Engagement Ratio",
            Self::Sessions => "Density Ratio",
        }
    }
}

impl FromStr for Measure {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "users" | "primary" => Ok(Self::Users),
            "sessions" | "secondary" => Ok(Self::Sessions),
            other => Err(format!(
                "measure must be 'users' or 'sessions', got '{other}'"
            )),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trailing range selected on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Last7,
    #[default]
    #[serde(rename = "30d")]
    Last30,
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    /// Number of trailing records, or `None` for the whole series.
    pub fn trailing_days(self) -> Option<usize> {
        match self {
            Self::Last7 => Some(7),
            Self::Last30 => Some(30),
            Self::All => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Last7 => "7d",
            Self::Last30 => "30d",
            Self::All => "all",
        }
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "7d" => Ok(Self::Last7),
            "30d" => Ok(Self::Last30),
            "all" => Ok(Self::All),
            other => Err(format!("range must be '7d', '30d' or 'all', got '{other}'")),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Flat,
}

impl Trend {
    pub fn summary(self) -> &'static str {
        match self {
            Self::Increasing => "Usage metrics show consistent growth over the selected period.",
            Self::Decreasing => "Recent decline detected. Suggest investigating retention cohorts.",
            Self::Flat => "Metrics are stable with minimal variance.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub latest_value: u64,
    pub contrast_total: u64,
    pub engagement_ratio: f64,
    pub growth_rate_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insights {
    pub peak: Record,
    pub trough: Record,
    pub trend: Trend,
}

#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub range: Option<String>,
    pub measure: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub users: u64,
    pub sessions: u64,
    pub sessions_per_user: f64,
}

impl From<&Record> for SeriesPoint {
    fn from(record: &Record) -> Self {
        Self {
            date: record.date,
            users: record.users,
            sessions: record.sessions,
            sessions_per_user: record.sessions_per_user(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InsightsPayload {
    pub peak_date: NaiveDate,
    pub peak_value: u64,
    pub trough_date: NaiveDate,
    pub trough_value: u64,
    pub trend: Trend,
    pub summary: String,
}

impl InsightsPayload {
    pub fn new(insights: &Insights, measure: Measure) -> Self {
        Self {
            peak_date: insights.peak.date,
            peak_value: insights.peak.value(measure),
            trough_date: insights.trough.date,
            trough_value: insights.trough.value(measure),
            trend: insights.trend,
            summary: insights.trend.summary().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KpiLabels {
    pub latest: String,
    pub contrast_total: String,
    pub ratio: String,
}

impl KpiLabels {
    pub fn for_measure(measure: Measure) -> Self {
        Self {
            latest: format!("Today's {}", measure.label()),
            contrast_total: measure.contrast_total_label().to_string(),
            ratio: measure.ratio_label().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesResponse {
    pub range: TimeRange,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub range: TimeRange,
    pub measure: Measure,
    pub stats: DerivedStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InsightsResponse {
    pub range: TimeRange,
    pub measure: Measure,
    pub insights: InsightsPayload,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub range: TimeRange,
    pub measure: Measure,
    pub labels: KpiLabels,
    pub stats: DerivedStats,
    pub insights: InsightsPayload,
    pub points: Vec<SeriesPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_parses_names_and_aliases() {
        assert_eq!("users".parse::<Measure>(), Ok(Measure::Users));
        assert_eq!("primary".parse::<Measure>(), Ok(Measure::Users));
        assert_eq!("sessions".parse::<Measure>(), Ok(Measure::Sessions));
        assert_eq!(" secondary ".parse::<Measure>(), Ok(Measure::Sessions));
        assert!("revenue".parse::<Measure>().is_err());
    }

    #[test]
    fn contrast_flips_measure() {
        assert_eq!(Measure::Users.contrast(), Measure::Sessions);
        assert_eq!(Measure::Sessions.contrast(), Measure::Users);
    }

    #[test]
    fn time_range_parses_and_serializes() {
        assert_eq!("7d".parse::<TimeRange>(), Ok(TimeRange::Last7));
        assert_eq!("30d".parse::<TimeRange>(), Ok(TimeRange::Last30));
        assert_eq!("all".parse::<TimeRange>(), Ok(TimeRange::All));
        assert!("90d".parse::<TimeRange>().is_err());

        let json = serde_json::to_string(&TimeRange::Last7).unwrap();
        assert_eq!(json, "\"7d\"");
    }

    #[test]
    fn sessions_per_user_guards_zero_users() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(Record::new(date, 0, 12).sessions_per_user(), 0.0);
        assert_eq!(Record::new(date, 4, 10).sessions_per_user(), 2.5);
    }

    #[test]
    fn kpi_labels_follow_measure() {
        let labels = KpiLabels::for_measure(Measure::Sessions);
        assert_eq!(labels.latest, "Today's Sessions");
        assert_eq!(labels.contrast_total, "Period Users");
        assert_eq!(labels.ratio, "Density Ratio");
    }
}
