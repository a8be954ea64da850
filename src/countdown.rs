//! Countdown Logic
//!
//! Target dates are calendar days counted to their local midnight.
//! The same parsing rule is used for user input and for the stored value,
//! so a reload resumes exactly where a fresh submit would have started.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

use crate::error::DateInputError;
use crate::storage::{KeyValueStore, TARGET_DATE_KEY};

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Placeholder shown when there is nothing to count
pub const PLACEHOLDER: &str = "--";

/// Leading integer of `text`, the way form input is read on the page:
/// optional sign, then digits; anything after the digits is ignored.
fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// Parse `YYYY-MM-DD` into a calendar date
pub fn parse_date(text: &str) -> Result<NaiveDate, DateInputError> {
    if text.trim().is_empty() {
        return Err(DateInputError::Empty);
    }
    let parts: Vec<&str> = text.split('-').collect();
    if parts.len() != 3 {
        return Err(DateInputError::Format);
    }
    let mut numbers = [0i64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = parse_int_prefix(part).ok_or(DateInputError::Components)?;
    }
    let [year, month, day] = numbers;
    let year = i32::try_from(year).map_err(|_| DateInputError::NotACalendarDate)?;
    let month = u32::try_from(month).map_err(|_| DateInputError::NotACalendarDate)?;
    let day = u32::try_from(day).map_err(|_| DateInputError::NotACalendarDate)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateInputError::NotACalendarDate)
}

/// Parse user input and reject days before today. Today itself is accepted.
pub fn accept_input<Tz: TimeZone>(text: &str, now: &DateTime<Tz>) -> Result<NaiveDate, DateInputError> {
    let date = parse_date(text)?;
    if date < now.date_naive() {
        return Err(DateInputError::InPast);
    }
    Ok(date)
}

/// Start of `date` in `tz`. A midnight skipped by a DST jump resolves to 01:00.
pub fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    let at = |hour| date.and_hms_opt(hour, 0, 0).and_then(|t| tz.from_local_datetime(&t).earliest());
    at(0).or_else(|| at(1))
}

/// Whole days/hours/minutes/seconds left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// None once the difference is zero or negative
    pub fn from_millis(ms: i64) -> Option<Self> {
        if ms <= 0 {
            return None;
        }
        Some(Self {
            days: ms / MS_PER_DAY,
            hours: (ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        })
    }
}

/// What the four countdown fields show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    NoTarget,
    Remaining(Remaining),
    Expired,
}

impl Reading {
    /// Days, hours, minutes, seconds as displayed
    pub fn fields(&self) -> [String; 4] {
        match self {
            Reading::NoTarget => std::array::from_fn(|_| PLACEHOLDER.to_string()),
            Reading::Expired => std::array::from_fn(|_| "00".to_string()),
            Reading::Remaining(r) => [r.days, r.hours, r.minutes, r.seconds].map(|n| format!("{:02}", n)),
        }
    }

    /// Whether the per-second tick should keep running
    pub fn is_running(&self) -> bool {
        matches!(self, Reading::Remaining(_))
    }
}

/// Countdown target owned by the widget
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    target: Option<NaiveDate>,
}

impl Countdown {
    pub fn target(&self) -> Option<NaiveDate> {
        self.target
    }

    /// Validate input, persist the raw string and take it as the new target.
    /// Rejected input leaves the countdown and the store untouched.
    pub fn submit<Tz: TimeZone, S: KeyValueStore>(
        &mut self,
        input: &str,
        now: &DateTime<Tz>,
        store: Option<&S>,
    ) -> Result<NaiveDate, DateInputError> {
        let date = accept_input(input, now)?;
        if let Some(store) = store {
            if let Err(e) = store.write(TARGET_DATE_KEY, input) {
                log::warn!("target date not persisted: {}", e);
            }
        }
        self.target = Some(date);
        Ok(date)
    }

    /// Load the stored target. Returns the raw stored string for the date input.
    /// An unparseable value is removed and the countdown starts empty.
    pub fn restore<S: KeyValueStore>(store: &S) -> (Self, Option<String>) {
        let Some(raw) = store.read(TARGET_DATE_KEY) else {
            return (Self::default(), None);
        };
        match parse_date(&raw) {
            Ok(date) => (Self { target: Some(date) }, Some(raw)),
            Err(e) => {
                log::debug!("discarding stored target '{}': {}", raw, e);
                store.delete(TARGET_DATE_KEY);
                (Self::default(), None)
            }
        }
    }

    pub fn reading<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Reading {
        let Some(midnight) = self.target.and_then(|d| local_midnight(d, &now.timezone())) else {
            return Reading::NoTarget;
        };
        let diff = midnight.timestamp_millis() - now.timestamp_millis();
        match Remaining::from_millis(diff) {
            Some(remaining) => Reading::Remaining(remaining),
            None => Reading::Expired,
        }
    }

    /// Day-of-month for the day before, the target, and the day after
    pub fn calendar(&self) -> [String; 3] {
        let Some(date) = self.target else {
            return std::array::from_fn(|_| PLACEHOLDER.to_string());
        };
        let day = |d: Option<NaiveDate>| d.map(|d| d.day().to_string()).unwrap_or_else(|| PLACEHOLDER.to_string());
        [day(date.pred_opt()), day(Some(date)), day(date.succ_opt())]
    }
}
