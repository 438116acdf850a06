//! Time-window resolution: synoptic-time label → time-of-day filter.
//!
//! A window is a calendar-independent rule over the time of day of a
//! record. Single hours match exactly; pairs span both hours inclusively
//! and drop every other synoptic hour inside the span, so "00Z and 12Z"
//! never lets a 06Z cycle through.

use chrono::NaiveTime;
use smna_gsi::synoptic::{SynopticHour, SynopticTime};
use smna_gsi::Result;
use std::collections::BTreeSet;

/// Time-of-day filter derived from a [`SynopticTime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Times of day removed from the span.
    pub exclusions: BTreeSet<NaiveTime>,
}

impl TimeWindow {
    /// Window matching exactly one time of day.
    pub fn at(time: NaiveTime) -> Self {
        Self {
            start: time,
            end: time,
            exclusions: BTreeSet::new(),
        }
    }

    /// Inclusive span from `start` to `end`, wrapping past midnight when
    /// `start > end`.
    pub fn between(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            exclusions: BTreeSet::new(),
        }
    }

    /// Span covering both hours, minus the synoptic hours strictly inside it.
    pub fn pair(first: SynopticHour, second: SynopticHour) -> Self {
        let mut window = Self::between(first.time(), second.time());
        window.exclusions = SynopticHour::ALL
            .into_iter()
            .filter(|h| *h != first && *h != second)
            .map(|h| h.time())
            .filter(|t| window.spans(*t))
            .collect();
        window
    }

    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    fn spans(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= time && time <= self.end
        } else {
            time >= self.start || time <= self.end
        }
    }

    /// Whether a record taken at `time` of day passes this window.
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.is_instant() {
            return time == self.start;
        }
        self.spans(time) && !self.exclusions.contains(&time)
    }
}

/// Resolve a synoptic-time selection into its window.
pub fn resolve(synoptic_time: SynopticTime) -> TimeWindow {
    match synoptic_time {
        SynopticTime::Single(hour) => TimeWindow::at(hour.time()),
        SynopticTime::Pair(first, second) => TimeWindow::pair(first, second),
        SynopticTime::All => TimeWindow::between(SynopticHour::H00.time(), SynopticHour::H18.time()),
    }
}

/// Resolve a raw label, failing on anything outside the known set.
pub fn resolve_label(label: &str) -> Result<TimeWindow> {
    Ok(resolve(label.parse()?))
}
