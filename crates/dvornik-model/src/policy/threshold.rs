use std::fmt;

use time::{Duration, OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{ModelError, ModelResult};

/// Cutoff instant of a run: pods created strictly before it are old enough to collect.
///
/// Computed once per run and shared by every pod evaluated in that run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StalenessThreshold(OffsetDateTime);

impl StalenessThreshold {
    /// Threshold `max_age` before `now`.
    ///
    /// `max_age` must be positive.
    pub fn new(now: OffsetDateTime, max_age: Duration) -> ModelResult<Self> {
        if !max_age.is_positive() {
            return Err(ModelError::NonPositiveAge(max_age.whole_minutes()));
        }
        now.checked_sub(max_age)
            .map(Self)
            .ok_or_else(|| ModelError::Invalid(format!("threshold underflows for age {max_age}")))
    }

    /// Wrap an already computed cutoff instant.
    pub fn at(instant: OffsetDateTime) -> Self {
        Self(instant)
    }

    pub fn instant(&self) -> OffsetDateTime {
        self.0
    }

    /// Strict comparison: a pod created exactly at the cutoff is not stale.
    pub fn is_stale(&self, created_at: OffsetDateTime) -> bool {
        created_at < self.0
    }

    /// Parse a pod age given in whole minutes.
    pub fn parse_minutes(raw: &str) -> ModelResult<Duration> {
        let minutes: i64 = raw
            .trim()
            .parse()
            .map_err(|_| ModelError::UnparseableAge(raw.to_string()))?;
        if minutes <= 0 {
            return Err(ModelError::NonPositiveAge(minutes));
        }
        minutes
            .checked_mul(60)
            .map(Duration::seconds)
            .ok_or(ModelError::AgeOutOfRange(minutes))
    }
}

impl fmt::Display for StalenessThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.format(&Rfc3339) {
            Ok(ts) => f.write_str(&ts),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}
