//! The derived-view pipeline: which records are visible for a filter state.
//!
//! Every check is an independent predicate on a different field, so the
//! result does not depend on the order they run in and applying the same
//! state twice yields the same subset.

use chrono::{Datelike, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::domain::{MediaType, ParseTagError, Rating, WatchStatus};
use crate::models::WatchRecord;

/// Either a wildcard or one concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    /// Like [`Choice::matches`] but an absent value only passes the wildcard.
    #[must_use]
    pub fn matches_opt(&self, value: Option<&T>) -> bool {
        match (self, value) {
            (Self::All, _) => true,
            (Self::Only(wanted), Some(v)) => wanted == v,
            (Self::Only(_), None) => false,
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: FromStr> FromStr for Choice<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.trim().parse().map(Self::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Only(v) => v.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    All,
    Ongoing,
}

impl ViewMode {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All Memories",
            Self::Ongoing => "Ongoing",
        }
    }
}

/// Coarse bucketing by the month of the last-watched date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    ThisMonth,
    LastMonth,
}

impl DateRange {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::ThisMonth => "This Month",
            Self::LastMonth => "Last Month",
        }
    }

    /// The (year, month) bucket this range selects, relative to `today`.
    #[must_use]
    pub fn target_month(&self, today: NaiveDate) -> Option<(i32, u32)> {
        match self {
            Self::All => None,
            Self::ThisMonth => Some((today.year(), today.month())),
            Self::LastMonth => {
                // Day one of the month cannot overflow when stepping back.
                let first = today.with_day(1).unwrap_or(today);
                let prev = first.checked_sub_months(Months::new(1)).unwrap_or(first);
                Some((prev.year(), prev.month()))
            }
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.target_month(today)
            .is_none_or(|(year, month)| date.year() == year && date.month() == month)
    }
}

impl FromStr for DateRange {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ALL" => Ok(Self::All),
            "THIS_MONTH" => Ok(Self::ThisMonth),
            "LAST_MONTH" => Ok(Self::LastMonth),
            _ => Err(ParseTagError::new("date range", s)),
        }
    }
}

/// Every client-side filter input. The search term is not here: it is sent
/// to the store, which returns the already-matching records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    pub view_mode: ViewMode,
    pub date_range: DateRange,
    pub year: Choice<i32>,
    pub media_type: Choice<MediaType>,
    pub rating: Choice<Rating>,
    pub status: Choice<WatchStatus>,
}

impl FilterState {
    #[must_use]
    pub fn has_active_field_filters(&self) -> bool {
        !(self.year.is_all()
            && self.media_type.is_all()
            && self.rating.is_all()
            && self.status.is_all())
    }

    /// Resets the four field filters; view mode and date range are kept.
    #[must_use]
    pub fn clear_field_filters(self) -> Self {
        Self {
            year: Choice::All,
            media_type: Choice::All,
            rating: Choice::All,
            status: Choice::All,
            ..self
        }
    }

    #[must_use]
    pub fn accepts(&self, record: &WatchRecord, today: NaiveDate) -> bool {
        self.date_range.contains(record.date_watched, today)
            && (self.view_mode == ViewMode::All || record.status == WatchStatus::Watching)
            && self.year.matches_opt(record.release_year.as_ref())
            && self.media_type.matches(&record.media_type)
            && self.rating.matches(&record.rating)
            && self.status.matches(&record.status)
    }
}

/// Returns the visible subset in input order.
#[must_use]
pub fn apply<'a>(
    records: &'a [WatchRecord],
    filters: &FilterState,
    today: NaiveDate,
) -> Vec<&'a WatchRecord> {
    records
        .iter()
        .filter(|r| filters.accepts(r, today))
        .collect()
}

/// Distinct release years present in `records`, newest first.
#[must_use]
pub fn available_years(records: &[WatchRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().filter_map(|r| r.release_year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}
