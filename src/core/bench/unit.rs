use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Reporting unit for benchmark scalars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeUnit {
    #[default]
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
}

impl TimeUnit {
    /// Ordered from finest to coarsest; each step is a factor of 1000.
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Nanoseconds,
        TimeUnit::Microseconds,
        TimeUnit::Milliseconds,
        TimeUnit::Seconds,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Microseconds => "µs",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
        }
    }

    fn index(&self) -> i32 {
        match self {
            TimeUnit::Nanoseconds => 0,
            TimeUnit::Microseconds => 1,
            TimeUnit::Milliseconds => 2,
            TimeUnit::Seconds => 3,
        }
    }

    /// Nanoseconds per one of this unit.
    pub fn divisor(&self) -> f64 {
        1000f64.powi(self.index())
    }

    pub fn from_nanos(&self, nanos: f64) -> f64 {
        nanos / self.divisor()
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ns" | "nanoseconds" => Ok(TimeUnit::Nanoseconds),
            "µs" | "us" | "microseconds" => Ok(TimeUnit::Microseconds),
            "ms" | "milliseconds" => Ok(TimeUnit::Milliseconds),
            "s" | "seconds" => Ok(TimeUnit::Seconds),
            other => Err(Error::bench_invalid_config(
                "unit",
                Some(other.to_string()),
                "Unit must be one of: s, ms, µs, ns",
            )),
        }
    }
}

impl Serialize for TimeUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisors_step_by_thousand() {
        assert_eq!(TimeUnit::Nanoseconds.divisor(), 1.0);
        assert_eq!(TimeUnit::Microseconds.divisor(), 1e3);
        assert_eq!(TimeUnit::Milliseconds.divisor(), 1e6);
        assert_eq!(TimeUnit::Seconds.divisor(), 1e9);
    }

    #[test]
    fn parses_symbols_and_names() {
        assert_eq!("µs".parse::<TimeUnit>().unwrap(), TimeUnit::Microseconds);
        assert_eq!("us".parse::<TimeUnit>().unwrap(), TimeUnit::Microseconds);
        assert_eq!("seconds".parse::<TimeUnit>().unwrap(), TimeUnit::Seconds);
        for unit in TimeUnit::ALL {
            assert_eq!(unit.symbol().parse::<TimeUnit>().unwrap(), unit);
        }
    }

    #[test]
    fn bogus_unit_is_config_error() {
        let err = "bogus".parse::<TimeUnit>().unwrap_err();
        assert_eq!(err.code.as_str(), "bench.invalid_config");
    }
}
