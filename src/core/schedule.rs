//! Consultation date and slot rules.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

/// Consultations are not offered on this day.
pub const EXCLUDED_WEEKDAY: Weekday = Weekday::Sun;

/// Slots starting within this many minutes of "now" are hidden.
pub const SAME_DAY_BUFFER_MINUTES: u32 = 30;

const FIRST_HOUR: u32 = 9;
const LAST_HOUR: u32 = 18;
const SLOT_MINUTES: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    /// `HH:MM`, the stored value.
    pub value: String,
    /// `9:30 AM`, for display.
    pub display: String,
}

impl TimeSlot {
    fn at(hour: u32, minute: u32) -> Self {
        Self {
            value: format!("{:02}:{:02}", hour, minute),
            display: display_time(hour, minute),
        }
    }

    fn minutes(&self) -> Option<u32> {
        parse_slot(&self.value).map(|t| t.hour() * 60 + t.minute())
    }
}

/// Every slot of a working day: 09:00 through 17:30.
pub fn time_slots() -> Vec<TimeSlot> {
    (FIRST_HOUR..LAST_HOUR)
        .flat_map(|hour| (0..60).step_by(SLOT_MINUTES as usize).map(move |m| TimeSlot::at(hour, m)))
        .collect()
}

pub fn is_date_disabled(date: NaiveDate, today: NaiveDate) -> bool {
    date < today || date.weekday() == EXCLUDED_WEEKDAY
}

/// Slots that may still be booked for `date`. Only today is filtered.
pub fn available_slots(date: NaiveDate, now: NaiveDateTime) -> Vec<TimeSlot> {
    let slots = time_slots();
    if date != now.date() {
        return slots;
    }

    let current = now.hour() * 60 + now.minute();
    slots
        .into_iter()
        .filter(|slot| {
            slot.minutes()
                .is_some_and(|start| start > current + SAME_DAY_BUFFER_MINUTES)
        })
        .collect()
}

pub fn is_slot_available(date: NaiveDate, slot: &str, now: NaiveDateTime) -> bool {
    available_slots(date, now).iter().any(|s| s.value == slot)
}

/// `14:30` -> `2:30 PM`. Returns an empty string for anything unparsable.
pub fn format_time_slot(slot: &str) -> String {
    parse_slot(slot)
        .map(|t| display_time(t.hour(), t.minute()))
        .unwrap_or_default()
}

fn parse_slot(slot: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(slot, "%H:%M").ok()
}

fn display_time(hour: u32, minute: u32) -> String {
    let (h12, suffix) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };
    format!("{}:{:02} {}", h12, minute, suffix)
}
