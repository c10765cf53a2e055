//! Evaluation cadence declared to the host.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interval {
    OneMinute,
    FiveMinutes,
    OneHour,
    FourHours,
    #[default]
    OneDay,
    OneWeek,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1min",
            Interval::FiveMinutes => "5min",
            Interval::OneHour => "1hour",
            Interval::FourHours => "4hour",
            Interval::OneDay => "1day",
            Interval::OneWeek => "1week",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown interval '{0}' (expected one of 1min, 5min, 1hour, 4hour, 1day, 1week)")]
pub struct UnknownInterval(pub String);

impl FromStr for Interval {
    type Err = UnknownInterval;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1min" => Ok(Interval::OneMinute),
            "5min" => Ok(Interval::FiveMinutes),
            "1hour" => Ok(Interval::OneHour),
            "4hour" => Ok(Interval::FourHours),
            "1day" => Ok(Interval::OneDay),
            "1week" => Ok(Interval::OneWeek),
            other => Err(UnknownInterval(other.to_string())),
        }
    }
}
