use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Longest custom interval accepted, roughly ten years.
pub const MAX_CUSTOM_DAYS: u32 = 3660;

/// How often a patient is asked to complete a quiz.
///
/// Stored as a descriptor only; nothing in this crate schedules runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Frequency {
    Hourly,
    Daily,
    Weekly,
    Fortnightly,
    Monthly,
    Yearly,
    Custom,
}

/// Calendar distance between two runs of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "unit", content = "every", rename_all = "snake_case")]
#[ts(export)]
pub enum Interval {
    Hours(u32),
    Days(u32),
    Months(u32),
    Years(u32),
}

impl Frequency {
    pub const ALL: &'static [Frequency] = &[
        Frequency::Hourly,
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Fortnightly,
        Frequency::Monthly,
        Frequency::Yearly,
        Frequency::Custom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Hourly => "Hourly",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Fortnightly => "Fortnightly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
            Frequency::Custom => "Custom",
        }
    }

    /// `custom_days` is only read for [`Frequency::Custom`].
    pub fn interval(self, custom_days: u32) -> Interval {
        match self {
            Frequency::Hourly => Interval::Hours(1),
            Frequency::Daily => Interval::Days(1),
            Frequency::Weekly => Interval::Days(7),
            Frequency::Fortnightly => Interval::Days(14),
            Frequency::Monthly => Interval::Months(1),
            Frequency::Yearly => Interval::Years(1),
            Frequency::Custom => Interval::Days(custom_days),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Interval {
    pub fn to_span(self) -> Result<jiff::Span, jiff::Error> {
        let span = jiff::Span::new();
        match self {
            Interval::Hours(n) => span.try_hours(i64::from(n)),
            Interval::Days(n) => span.try_days(i64::from(n)),
            Interval::Months(n) => span.try_months(i64::from(n)),
            Interval::Years(n) => span.try_years(i64::from(n)),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n, unit) = match self {
            Interval::Hours(n) => (n, "hour"),
            Interval::Days(n) => (n, "day"),
            Interval::Months(n) => (n, "month"),
            Interval::Years(n) => (n, "year"),
        };
        if *n == 1 {
            write!(f, "every {unit}")
        } else {
            write!(f, "every {n} {unit}s")
        }
    }
}
