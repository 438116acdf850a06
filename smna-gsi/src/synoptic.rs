//! Synoptic hours and the synoptic-time selection labels.
//!
//! The global model runs four analyses a day (00Z, 06Z, 12Z, 18Z). The
//! `Horário` control picks either one of them, a pair of them, or all of
//! them; [`SynopticTime`] is that choice. Turning a label into a concrete
//! filtering rule is done by `smna_data::window`.

use crate::error::{Result, SmnaError};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four daily analysis times (UTC).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SynopticHour {
    H00,
    H06,
    H12,
    H18,
}

impl SynopticHour {
    pub const ALL: [SynopticHour; 4] = [
        SynopticHour::H00,
        SynopticHour::H06,
        SynopticHour::H12,
        SynopticHour::H18,
    ];

    pub fn hour(&self) -> u32 {
        match self {
            SynopticHour::H00 => 0,
            SynopticHour::H06 => 6,
            SynopticHour::H12 => 12,
            SynopticHour::H18 => 18,
        }
    }

    /// Time of day of this analysis.
    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), 0, 0).unwrap_or(NaiveTime::MIN)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SynopticHour::H00 => "00Z",
            SynopticHour::H06 => "06Z",
            SynopticHour::H12 => "12Z",
            SynopticHour::H18 => "18Z",
        }
    }
}

impl fmt::Display for SynopticHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Value of the synoptic-time control.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum SynopticTime {
    /// A single analysis time.
    Single(SynopticHour),
    /// Two analysis times, earliest first.
    Pair(SynopticHour, SynopticHour),
    /// Every analysis time of the day.
    All,
}

impl SynopticTime {
    pub const H00: SynopticTime = SynopticTime::Single(SynopticHour::H00);
    pub const H06: SynopticTime = SynopticTime::Single(SynopticHour::H06);
    pub const H12: SynopticTime = SynopticTime::Single(SynopticHour::H12);
    pub const H18: SynopticTime = SynopticTime::Single(SynopticHour::H18);
    pub const H00_H12: SynopticTime = SynopticTime::Pair(SynopticHour::H00, SynopticHour::H12);
    pub const H06_H18: SynopticTime = SynopticTime::Pair(SynopticHour::H06, SynopticHour::H18);
    pub const H00_H06: SynopticTime = SynopticTime::Pair(SynopticHour::H00, SynopticHour::H06);
    pub const H12_H18: SynopticTime = SynopticTime::Pair(SynopticHour::H12, SynopticHour::H18);

    /// Options offered by the `Horário` radio group, in display order.
    pub const UI_OPTIONS: [SynopticTime; 6] = [
        SynopticTime::H00,
        SynopticTime::H06,
        SynopticTime::H12,
        SynopticTime::H18,
        SynopticTime::H00_H12,
        SynopticTime::H06_H18,
    ];

    /// Every label the window resolver understands, UI-reachable or not.
    pub const ALL: [SynopticTime; 9] = [
        SynopticTime::H00,
        SynopticTime::H06,
        SynopticTime::H12,
        SynopticTime::H18,
        SynopticTime::H00_H12,
        SynopticTime::H06_H18,
        SynopticTime::H00_H06,
        SynopticTime::H12_H18,
        SynopticTime::All,
    ];

    pub fn label(&self) -> String {
        match self {
            SynopticTime::Single(hour) => hour.label().to_string(),
            SynopticTime::Pair(first, second) => format!("{} and {}", first, second),
            SynopticTime::All => "All".to_string(),
        }
    }
}

impl Default for SynopticTime {
    fn default() -> Self {
        SynopticTime::H00
    }
}

impl fmt::Display for SynopticTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn parse_hour(s: &str) -> Option<SynopticHour> {
    SynopticHour::ALL.into_iter().find(|h| h.label() == s)
}

impl FromStr for SynopticTime {
    type Err = SmnaError;

    /// Accepts the English labels (`12Z`, `00Z and 12Z`, `All`) as well as
    /// the Portuguese ones written by the first dashboard (`00Z e 12Z`,
    /// `Tudo`). Only the pairs listed in [`SynopticTime::ALL`] exist.
    fn from_str(s: &str) -> Result<Self> {
        let unknown = || SmnaError::UnknownSynopticTime(s.to_string());
        let label = s.trim();
        if label == "All" || label == "Tudo" {
            return Ok(SynopticTime::All);
        }
        if let Some(hour) = parse_hour(label) {
            return Ok(SynopticTime::Single(hour));
        }
        let (first, second) = label
            .split_once(" and ")
            .or_else(|| label.split_once(" e "))
            .ok_or_else(unknown)?;
        let pair = SynopticTime::Pair(
            parse_hour(first.trim()).ok_or_else(unknown)?,
            parse_hour(second.trim()).ok_or_else(unknown)?,
        );
        if SynopticTime::ALL.contains(&pair) {
            Ok(pair)
        } else {
            Err(unknown())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synoptic_hour_times() {
        assert_eq!(
            SynopticHour::H18.time(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap()
        );
        assert_eq!(SynopticHour::H00.time(), NaiveTime::MIN);
    }

    #[test]
    fn labels_round_trip_for_every_option() {
        for option in SynopticTime::ALL {
            assert_eq!(option.label().parse::<SynopticTime>().unwrap(), option);
        }
    }

    #[test]
    fn portuguese_labels_are_accepted() {
        assert_eq!(
            "00Z e 12Z".parse::<SynopticTime>().unwrap(),
            SynopticTime::H00_H12
        );
        assert_eq!(
            "12Z e 18Z".parse::<SynopticTime>().unwrap(),
            SynopticTime::H12_H18
        );
        assert_eq!("Tudo".parse::<SynopticTime>().unwrap(), SynopticTime::All);
    }

    #[test]
    fn unlisted_pairs_and_garbage_are_rejected() {
        assert!("18Z and 00Z".parse::<SynopticTime>().is_err());
        assert!("00Z and 18Z".parse::<SynopticTime>().is_err());
        assert!("03Z".parse::<SynopticTime>().is_err());
        assert_eq!(
            "".parse::<SynopticTime>().unwrap_err(),
            SmnaError::UnknownSynopticTime(String::new())
        );
    }

    #[test]
    fn ui_options_are_a_prefix_of_all() {
        assert_eq!(&SynopticTime::ALL[..6], &SynopticTime::UI_OPTIONS[..]);
        assert!(!SynopticTime::UI_OPTIONS.contains(&SynopticTime::H00_H06));
    }
}
