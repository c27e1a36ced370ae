use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::Serialize;

pub const DEFAULT_BOOKING_WINDOW_DAYS: u32 = 10;
pub const DEFAULT_START_HOUR: u32 = 8;
pub const DEFAULT_END_HOUR: u32 = 13;
pub const DEFAULT_INTERVAL_MINUTES: u32 = 30;

/// One offerable calendar day, pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookableDate {
    /// ISO `YYYY-MM-DD` in the local calendar.
    pub full_date: String,
    /// Day of month.
    pub day: u32,
    /// 3-letter uppercase weekday abbreviation.
    pub day_name: String,
}

/// Finite window of offerable days, starting strictly tomorrow. Lazy and
/// restartable: cloning restarts iteration from the first day.
#[derive(Debug, Clone)]
pub struct BookableDates {
    today: NaiveDate,
    offset: u32,
    window: u32,
}

impl Iterator for BookableDates {
    type Item = BookableDate;

    fn next(&mut self) -> Option<BookableDate> {
        if self.offset >= self.window {
            return None;
        }
        self.offset += 1;
        let date = self.today + Duration::days(i64::from(self.offset));
        Some(BookableDate {
            full_date: date.format("%Y-%m-%d").to_string(),
            day: date.day(),
            day_name: weekday_abbrev(date.weekday()).to_string(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.window - self.offset) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BookableDates {}

/// The `window`-day booking horizon relative to `today`. Today itself is
/// never offerable; the window runs from tomorrow through `window` days
/// ahead inclusive. Fully determined by its inputs.
pub fn bookable_dates_after(today: NaiveDate, window: u32) -> BookableDates {
    BookableDates {
        today,
        offset: 0,
        window,
    }
}

/// The booking horizon relative to the local calendar day.
pub fn bookable_dates(window: u32) -> BookableDates {
    bookable_dates_after(Local::now().date_naive(), window)
}

fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "SUN",
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
    }
}

/// Ordered `HH:MM` labels from `start_hour:00`, stepping `interval_minutes`
/// within each hour, strictly before `end_hour:00`, plus exactly one closing
/// `end_hour:00` label.
///
/// Minutes step independently inside each hour and reset at the hour
/// boundary, so intervals that do not divide 60 truncate rather than carry
/// (45 yields :00 and :45 each hour). Inherited behavior, kept as-is.
pub fn time_slots(start_hour: u32, end_hour: u32, interval_minutes: u32) -> Vec<String> {
    let mut slots = Vec::new();

    if interval_minutes > 0 {
        for hour in start_hour..end_hour {
            let mut minute = 0;
            while minute < 60 {
                slots.push(format!("{:02}:{:02}", hour, minute));
                minute += interval_minutes;
            }
        }
    }

    // The closing boundary is always offered.
    slots.push(format!("{:02}:00", end_hour));

    slots
}

/// The default availability universe: 08:00 through 13:00 every 30 minutes.
pub fn default_time_slots() -> Vec<String> {
    time_slots(
        DEFAULT_START_HOUR,
        DEFAULT_END_HOUR,
        DEFAULT_INTERVAL_MINUTES,
    )
}
