use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Duration};

/// Span of the "last 12 months" window, in days.
pub const RECENT_WINDOW_DAYS: u32 = 365;

/// Calendar dates travel as `YYYY-MM-DD` everywhere: storage, URLs and JSON.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, DATE_FORMAT)
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Date,
    pub end: Date,
}

impl DateWindow {
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Window of `span_days` days ending at `anchor`.
///
/// The anchor is the latest date in the data, not today. A start before the
/// earliest representable date saturates to [`Date::MIN`]. The span is
/// unsigned, so the start never passes the anchor, and even `u32::MAX` days
/// fits in a [`Duration`].
pub fn recent_window(anchor: Date, span_days: u32) -> DateWindow {
    DateWindow {
        start: anchor.saturating_sub(Duration::days(i64::from(span_days))),
        end: anchor,
    }
}

/// Serde adapter writing a [`Date`] as `YYYY-MM-DD`.
pub mod iso_date {
    use serde::{ser, Serializer};
    use time::Date;

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(DATE_FORMAT).map_err(ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}
