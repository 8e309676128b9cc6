use std::{fmt::Display, str::FromStr};

use chrono::Duration;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Relative time ranges records can be viewed in. Months are 30 days and years are 365 days,
/// these are not calendar boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
pub enum WindowSelector {
    #[default]
    #[value(name = "week")]
    #[serde(rename = "Week")]
    Week,
    #[value(name = "month")]
    #[serde(rename = "Month")]
    Month,
    #[value(name = "3-months")]
    #[serde(rename = "3 Months")]
    ThreeMonths,
    #[value(name = "6-months")]
    #[serde(rename = "6 Months")]
    SixMonths,
    #[value(name = "year")]
    #[serde(rename = "Year")]
    Year,
    #[value(name = "all-time")]
    #[serde(rename = "All time")]
    AllTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time range '{0}'")]
pub struct UnknownWindow(pub String);

impl WindowSelector {
    pub const ALL: [WindowSelector; 6] = [
        WindowSelector::Week,
        WindowSelector::Month,
        WindowSelector::ThreeMonths,
        WindowSelector::SixMonths,
        WindowSelector::Year,
        WindowSelector::AllTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WindowSelector::Week => "Week",
            WindowSelector::Month => "Month",
            WindowSelector::ThreeMonths => "3 Months",
            WindowSelector::SixMonths => "6 Months",
            WindowSelector::Year => "Year",
            WindowSelector::AllTime => "All time",
        }
    }

    /// `None` means the window is unbounded.
    pub fn duration(self) -> Option<Duration> {
        match self {
            WindowSelector::Week => Some(Duration::days(7)),
            WindowSelector::Month => Some(Duration::days(30)),
            WindowSelector::ThreeMonths => Some(Duration::days(90)),
            WindowSelector::SixMonths => Some(Duration::days(180)),
            WindowSelector::Year => Some(Duration::days(365)),
            WindowSelector::AllTime => None,
        }
    }

    /// Earliest timestamp (epoch seconds, inclusive) that falls in the window.
    pub fn cutoff(self, now: i64) -> Option<i64> {
        self.duration().map(|v| now - v.num_seconds())
    }
}

impl Display for WindowSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WindowSelector {
    type Err = UnknownWindow;

    /// Accepts both display labels (`3 Months`) and command line names (`3-months`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        WindowSelector::ALL
            .into_iter()
            .find(|v| {
                v.label().eq_ignore_ascii_case(trimmed)
                    || v
                        .to_possible_value()
                        .is_some_and(|p| p.matches(trimmed, true))
            })
            .ok_or_else(|| UnknownWindow(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::WindowSelector;

    const DAY: i64 = 24 * 3600;

    #[test]
    fn test_window_durations() {
        let expected = [
            (WindowSelector::Week, Some(7 * DAY)),
            (WindowSelector::Month, Some(30 * DAY)),
            (WindowSelector::ThreeMonths, Some(90 * DAY)),
            (WindowSelector::SixMonths, Some(180 * DAY)),
            (WindowSelector::Year, Some(365 * DAY)),
            (WindowSelector::AllTime, None),
        ];
        for (window, seconds) in expected {
            assert_eq!(window.duration().map(|v| v.num_seconds()), seconds);
        }
    }

    #[test]
    fn test_cutoff() {
        let now = 1_700_000_000;
        assert_eq!(WindowSelector::Month.cutoff(now), Some(now - 30 * DAY));
        assert_eq!(WindowSelector::AllTime.cutoff(now), None);
    }

    #[test]
    fn test_parsing_labels_and_names() {
        for window in WindowSelector::ALL {
            assert_eq!(window.label().parse(), Ok(window));
        }
        assert_eq!("3-months".parse(), Ok(WindowSelector::ThreeMonths));
        assert_eq!("ALL-TIME".parse(), Ok(WindowSelector::AllTime));
        assert_eq!("all time".parse(), Ok(WindowSelector::AllTime));
        assert!("fortnight".parse::<WindowSelector>().is_err());
    }

    #[test]
    fn test_serde_uses_labels() {
        assert_eq!(
            serde_json::to_string(&WindowSelector::SixMonths).unwrap(),
            "\"6 Months\""
        );
        assert_eq!(
            serde_json::from_str::<WindowSelector>("\"All time\"").unwrap(),
            WindowSelector::AllTime
        );
    }
}
