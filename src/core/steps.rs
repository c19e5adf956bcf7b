//! Wizard screens, the fields each one owns, and the review summary.

use crate::core::{catalog, schedule};
use crate::domain::model::{Draft, Field};
use crate::utils::error::{IntakeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Welcome,
    Contact,
    Product,
    Budget,
    Schedule,
    Review,
}

impl StepKind {
    pub fn title(self) -> &'static str {
        match self {
            StepKind::Welcome => "Welcome",
            StepKind::Contact => "Contact",
            StepKind::Product => "Products",
            StepKind::Budget => "Budget",
            StepKind::Schedule => "Schedule",
            StepKind::Review => "Review",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            StepKind::Welcome => "Welcome to Riaaj Vintage — Handpick",
            StepKind::Contact => "Contact Information",
            StepKind::Product => "Product Preferences",
            StepKind::Budget => "Budget & Requirements",
            StepKind::Schedule => "Schedule Consultation",
            StepKind::Review => "Review & Submit",
        }
    }

    /// Fields the step's screen renders and validates by default.
    pub fn default_fields(self) -> Vec<Field> {
        match self {
            StepKind::Welcome => vec![],
            StepKind::Contact => vec![
                Field::Name,
                Field::Whatsapp,
                Field::Email,
                Field::Region,
                Field::Timezone,
            ],
            StepKind::Product => vec![Field::Categories],
            StepKind::Budget => vec![Field::Currency, Field::BudgetFrom, Field::BudgetTo],
            StepKind::Schedule => vec![Field::Date, Field::TimeSlot, Field::ScheduleTimezone],
            StepKind::Review => vec![Field::Consent],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpec {
    pub kind: StepKind,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl StepSpec {
    pub fn new(kind: StepKind) -> Self {
        Self {
            kind,
            fields: kind.default_fields(),
        }
    }
}

/// The ordered screens of the wizard and the fields validated before leaving
/// each one. Positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPlan {
    steps: Vec<StepSpec>,
}

impl Default for StepPlan {
    fn default() -> Self {
        Self::contact_first()
    }
}

impl StepPlan {
    pub fn new(steps: Vec<StepSpec>) -> Result<Self> {
        if steps.is_empty() {
            return Err(IntakeError::ConfigValidationError {
                field: "wizard.steps".to_string(),
                message: "at least one step is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for field in steps.iter().flat_map(|s| s.fields.iter()) {
            if !seen.insert(*field) {
                return Err(IntakeError::InvalidConfigValueError {
                    field: "wizard.steps".to_string(),
                    value: field.to_string(),
                    reason: "field is assigned to more than one step".to_string(),
                });
            }
        }
        Ok(Self { steps })
    }

    /// Contact details are collected right after the welcome screen.
    pub fn contact_first() -> Self {
        Self::from_kinds(&[
            StepKind::Welcome,
            StepKind::Contact,
            StepKind::Product,
            StepKind::Budget,
            StepKind::Schedule,
            StepKind::Review,
        ])
    }

    /// Products and budget come first; contact details are asked at step 4.
    pub fn contact_late() -> Self {
        Self::from_kinds(&[
            StepKind::Welcome,
            StepKind::Product,
            StepKind::Budget,
            StepKind::Contact,
            StepKind::Schedule,
            StepKind::Review,
        ])
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "contact_first" => Some(Self::contact_first()),
            "contact_late" => Some(Self::contact_late()),
            _ => None,
        }
    }

    fn from_kinds(kinds: &[StepKind]) -> Self {
        Self {
            steps: kinds.iter().copied().map(StepSpec::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&StepSpec> {
        position.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    pub fn fields_for(&self, position: usize) -> &[Field] {
        self.get(position).map(|s| s.fields.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepSpec> {
        self.steps.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSection {
    pub title: &'static str,
    pub entries: Vec<(&'static str, String)>,
}

const NOT_SELECTED: &str = "Not selected";

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// Read-only sections shown on the review screen.
pub fn review_sections(draft: &Draft) -> Vec<ReviewSection> {
    let contact = ReviewSection {
        title: "Contact Information",
        entries: vec![
            ("Name", or_placeholder(&draft.name, "-")),
            ("WhatsApp", or_placeholder(&draft.whatsapp, "-")),
            ("Email", or_placeholder(&draft.email, "-")),
            ("Company", or_placeholder(draft.company.as_deref().unwrap_or(""), "-")),
            ("Region", or_placeholder(&draft.region, "-")),
            ("Timezone", or_placeholder(&draft.timezone, "-")),
        ],
    };

    let mut products = Vec::new();
    if let Some(custom) = draft.custom_brand.as_deref().filter(|b| !b.is_empty()) {
        products.push(("Custom brand", custom.to_string()));
    }
    if draft.categories.is_empty() {
        products.push(("Categories", "No categories added".to_string()));
    }
    for item in &draft.categories {
        let mut line = format!(
            "{} · {} · {} · {} × {}",
            or_placeholder(&item.name, "-"),
            or_placeholder(&item.grade, "-"),
            or_placeholder(&item.size, "-"),
            or_placeholder(&item.color, "-"),
            item.quantity
        );
        if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
            line.push_str(&format!(" ({})", description));
        }
        products.push(("Category", line));
    }

    let symbol = catalog::currency_symbol(&draft.currency);
    let mut budget = vec![(
        "Budget",
        format!("{}{} - {}{}", symbol, draft.budget_from, symbol, draft.budget_to),
    )];
    if let Some(notes) = draft.notes.as_deref().filter(|n| !n.is_empty()) {
        budget.push(("Notes", notes.to_string()));
    }

    let schedule = ReviewSection {
        title: "Consultation Schedule",
        entries: vec![
            (
                "Date",
                draft
                    .date
                    .map(|d| d.format("%B %-d, %Y").to_string())
                    .unwrap_or_else(|| NOT_SELECTED.to_string()),
            ),
            (
                "Time",
                or_placeholder(&schedule::format_time_slot(&draft.time_slot), NOT_SELECTED),
            ),
            ("Timezone", or_placeholder(&draft.schedule_timezone, NOT_SELECTED)),
        ],
    };

    vec![
        contact,
        ReviewSection {
            title: "Product Selection",
            entries: products,
        },
        ReviewSection {
            title: "Budget & Notes",
            entries: budget,
        },
        schedule,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LineItem;
    use chrono::NaiveDate;

    #[test]
    fn test_contact_first_plan() {
        let plan = StepPlan::contact_first();
        assert_eq!(plan.len(), 6);
        assert_eq!(plan.get(2).unwrap().kind, StepKind::Contact);
        assert!(plan.fields_for(1).is_empty());
        assert_eq!(plan.fields_for(3), &[Field::Categories]);
        assert_eq!(plan.fields_for(6), &[Field::Consent]);
        assert!(plan.get(0).is_none());
        assert!(plan.fields_for(7).is_empty());
    }

    #[test]
    fn test_contact_late_plan_moves_contact_to_step_four() {
        let plan = StepPlan::contact_late();
        assert_eq!(plan.get(4).unwrap().kind, StepKind::Contact);
        assert!(plan.fields_for(4).contains(&Field::Email));
        assert_eq!(plan.fields_for(2), &[Field::Categories]);
    }

    #[test]
    fn test_presets_by_name() {
        assert_eq!(StepPlan::preset("contact_late"), Some(StepPlan::contact_late()));
        assert!(StepPlan::preset("alphabetical").is_none());
    }

    #[test]
    fn test_plan_rejects_duplicate_fields() {
        let steps = vec![
            StepSpec::new(StepKind::Contact),
            StepSpec {
                kind: StepKind::Review,
                fields: vec![Field::Email, Field::Consent],
            },
        ];
        assert!(StepPlan::new(steps).is_err());
        assert!(StepPlan::new(vec![]).is_err());
    }

    #[test]
    fn test_review_sections_use_placeholders() {
        let sections = review_sections(&Draft::default());
        assert_eq!(sections.len(), 4);

        let schedule = &sections[3];
        assert_eq!(schedule.entries[0], ("Date", "Not selected".to_string()));
        assert_eq!(schedule.entries[1], ("Time", "Not selected".to_string()));
        assert_eq!(sections[1].entries[0].1, "No categories added");
        assert_eq!(sections[2].entries[0].1, "$0 - $0");
    }

    #[test]
    fn test_review_sections_render_values() {
        let mut draft = Draft::default();
        draft.currency = "GBP".to_string();
        draft.budget_from = 400.0;
        draft.budget_to = 750.5;
        draft.date = NaiveDate::from_ymd_opt(2026, 10, 21);
        draft.time_slot = "15:30".to_string();
        draft.categories.push(LineItem {
            name: "Nike".to_string(),
            grade: "B Grade".to_string(),
            size: "L".to_string(),
            color: "Red".to_string(),
            quantity: 20,
            description: Some("windbreakers".to_string()),
        });

        let sections = review_sections(&draft);
        assert_eq!(sections[1].entries[0].1, "Nike · B Grade · L · Red × 20 (windbreakers)");
        assert_eq!(sections[2].entries[0].1, "£400 - £750.5");
        assert_eq!(sections[3].entries[0].1, "October 21, 2026");
        assert_eq!(sections[3].entries[1].1, "3:30 PM");
    }
}
