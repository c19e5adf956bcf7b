//! Per-field rules for the draft.

use crate::core::schedule;
use crate::domain::model::{Draft, Field};
use chrono::NaiveDateTime;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .expect("email pattern is valid")
    })
}

pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && email_pattern().is_match(value)
}

/// Failing fields and their messages, in the order they were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<(Field, String)>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.iter().map(|(f, _)| *f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn push(&mut self, field: Field, message: String) {
        self.errors.push((field, message));
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

fn required(value: &str, message: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

fn non_negative(value: f64, message: &str) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

/// Checks one field. `now` decides which dates and slots are still bookable.
pub fn validate_field(draft: &Draft, field: Field, now: NaiveDateTime) -> Result<(), String> {
    match field {
        Field::Name => required(&draft.name, "Name is required"),
        Field::Whatsapp => required(&draft.whatsapp, "WhatsApp number is required"),
        Field::Email => {
            if is_valid_email(draft.email.trim()) {
                Ok(())
            } else {
                Err("Valid email is required".to_string())
            }
        }
        Field::Region => required(&draft.region, "Region is required"),
        Field::Timezone => required(&draft.timezone, "Timezone is required"),
        Field::Categories => {
            if draft.categories.is_empty() {
                Err("At least one category must be added".to_string())
            } else if draft.categories.iter().any(|item| item.quantity < 1) {
                Err("Quantity must be at least 1".to_string())
            } else {
                Ok(())
            }
        }
        Field::Currency => required(&draft.currency, "Currency is required"),
        Field::BudgetFrom => non_negative(draft.budget_from, "Budget from must be positive"),
        Field::BudgetTo => non_negative(draft.budget_to, "Budget to must be positive"),
        Field::Date => match draft.date {
            None => Err("Date is required".to_string()),
            Some(date) if schedule::is_date_disabled(date, now.date()) => {
                Err("Date is not available".to_string())
            }
            Some(_) => Ok(()),
        },
        Field::TimeSlot => {
            required(&draft.time_slot, "Time slot is required")?;
            match draft.date {
                Some(date) if !schedule::is_slot_available(date, &draft.time_slot, now) => {
                    Err("Time slot is not available".to_string())
                }
                _ => Ok(()),
            }
        }
        Field::ScheduleTimezone => required(&draft.schedule_timezone, "Timezone is required"),
        Field::Consent => {
            if draft.consent {
                Ok(())
            } else {
                Err("You must agree to proceed".to_string())
            }
        }
        Field::Company | Field::CustomBrand | Field::Notes => Ok(()),
    }
}

pub fn validate_fields(draft: &Draft, fields: &[Field], now: NaiveDateTime) -> ValidationReport {
    let mut report = ValidationReport::default();
    for &field in fields {
        if let Err(message) = validate_field(draft, field, now) {
            report.push(field, message);
        }
    }
    report
}

pub fn validate_all(draft: &Draft, now: NaiveDateTime) -> ValidationReport {
    validate_fields(draft, &Field::ALL, now)
}
