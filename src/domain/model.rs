use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The in-progress handpick request. Created empty when the wizard starts and
/// read in full once at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub name: String,
    pub whatsapp: String,
    pub email: String,
    pub company: Option<String>,
    pub region: String,
    pub timezone: String,

    pub custom_brand: Option<String>,
    pub categories: Vec<LineItem>,

    pub currency: String,
    pub budget_from: f64,
    pub budget_to: f64,
    pub notes: Option<String>,

    pub date: Option<NaiveDate>,
    pub time_slot: String,
    pub schedule_timezone: String,

    pub consent: bool,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            name: String::new(),
            whatsapp: String::new(),
            email: String::new(),
            company: None,
            region: String::new(),
            timezone: String::new(),
            custom_brand: None,
            categories: Vec::new(),
            currency: String::new(),
            budget_from: 0.0,
            budget_to: 0.0,
            notes: None,
            date: None,
            time_slot: String::new(),
            schedule_timezone: String::new(),
            consent: false,
        }
    }
}

impl Draft {
    /// Appends a blank line item and returns its index.
    pub fn add_line_item(&mut self) -> usize {
        self.categories.push(LineItem::default());
        self.categories.len() - 1
    }

    pub fn remove_line_item(&mut self, index: usize) -> Option<LineItem> {
        if index < self.categories.len() {
            Some(self.categories.remove(index))
        } else {
            None
        }
    }

    /// Appends transcribed text to the notes, separated by one space.
    pub fn append_notes(&mut self, text: &str) {
        append_note_text(&mut self.notes, text);
    }
}

pub fn append_note_text(notes: &mut Option<String>, text: &str) {
    *notes = Some(match notes.take() {
        Some(current) if !current.is_empty() => format!("{} {}", current, text),
        _ => text.to_string(),
    });
}

/// One requested product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub grade: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub description: Option<String>,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            name: String::new(),
            grade: String::new(),
            size: String::new(),
            color: String::new(),
            quantity: 1,
            description: None,
        }
    }
}

/// Tagged identifier for every draft field that the schema knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Whatsapp,
    Email,
    Company,
    Region,
    Timezone,
    CustomBrand,
    Categories,
    Currency,
    BudgetFrom,
    BudgetTo,
    Notes,
    Date,
    TimeSlot,
    ScheduleTimezone,
    Consent,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::Name,
        Field::Whatsapp,
        Field::Email,
        Field::Company,
        Field::Region,
        Field::Timezone,
        Field::CustomBrand,
        Field::Categories,
        Field::Currency,
        Field::BudgetFrom,
        Field::BudgetTo,
        Field::Notes,
        Field::Date,
        Field::TimeSlot,
        Field::ScheduleTimezone,
        Field::Consent,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Whatsapp => "whatsapp",
            Field::Email => "email",
            Field::Company => "company",
            Field::Region => "region",
            Field::Timezone => "timezone",
            Field::CustomBrand => "customBrand",
            Field::Categories => "categories",
            Field::Currency => "currency",
            Field::BudgetFrom => "budgetFrom",
            Field::BudgetTo => "budgetTo",
            Field::Notes => "notes",
            Field::Date => "date",
            Field::TimeSlot => "timeSlot",
            Field::ScheduleTimezone => "scheduleTimezone",
            Field::Consent => "consent",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A transient message for the host to show, e.g. as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

impl Notice {
    pub fn info(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            destructive: false,
        }
    }

    pub fn destructive(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            destructive: true,
        }
    }
}

/// A finished recording, ready for transcription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl AudioClip {
    pub fn file_name(&self) -> &'static str {
        let base = self.mime_type.split(';').next().unwrap_or_default();
        match base {
            "audio/mp4" => "notes.mp4",
            "audio/ogg" => "notes.ogg",
            _ => "notes.webm",
        }
    }
}

/// Template parameters handed to the email provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEmail {
    pub summary_html: String,
    #[serde(rename = "submittedAt")]
    pub submitted_at: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub region: String,
    pub timezone: String,
}

/// A single send call against the email provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRequest {
    pub service_id: String,
    pub template_id: String,
    #[serde(rename = "user_id")]
    pub public_key: String,
    pub template_params: SummaryEmail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_draft_is_empty() {
        let draft = Draft::default();
        assert!(draft.categories.is_empty());
        assert_eq!(draft.budget_from, 0.0);
        assert_eq!(draft.budget_to, 0.0);
        assert!(!draft.consent);
        assert!(draft.date.is_none());
    }

    #[test]
    fn test_line_items_can_be_added_and_removed() {
        let mut draft = Draft::default();
        let first = draft.add_line_item();
        let second = draft.add_line_item();
        assert_eq!((first, second), (0, 1));
        assert_eq!(draft.categories[0].quantity, 1);

        draft.categories[1].name = "Carhartt".to_string();
        let removed = draft.remove_line_item(1).unwrap();
        assert_eq!(removed.name, "Carhartt");
        assert!(draft.remove_line_item(5).is_none());
        assert_eq!(draft.categories.len(), 1);
    }

    #[test]
    fn test_append_notes_joins_with_single_space() {
        let mut draft = Draft::default();
        draft.append_notes("first");
        assert_eq!(draft.notes.as_deref(), Some("first"));
        draft.append_notes("second");
        assert_eq!(draft.notes.as_deref(), Some("first second"));

        draft.notes = Some(String::new());
        draft.append_notes("only");
        assert_eq!(draft.notes.as_deref(), Some("only"));
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("brands"), None);
    }

    #[test]
    fn test_email_request_serializes_public_key_as_user_id() {
        let request = EmailRequest {
            service_id: "svc".to_string(),
            template_id: "tpl".to_string(),
            public_key: "pk".to_string(),
            template_params: SummaryEmail {
                summary_html: "<table></table>".to_string(),
                submitted_at: "18/10/2026, 2:35:07 pm".to_string(),
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                whatsapp: "+911234567890".to_string(),
                region: "Asia Pacific".to_string(),
                timezone: "GMT+05:30 (India)".to_string(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["user_id"], "pk");
        assert_eq!(json["template_params"]["submittedAt"], "18/10/2026, 2:35:07 pm");
        assert!(json.get("public_key").is_none());
    }

    #[test]
    fn test_clip_file_name_follows_mime_type() {
        let clip = AudioClip {
            bytes: vec![1],
            mime_type: "audio/webm;codecs=opus".to_string(),
        };
        assert_eq!(clip.file_name(), "notes.webm");

        let clip = AudioClip {
            bytes: vec![1],
            mime_type: "audio/mp4".to_string(),
        };
        assert_eq!(clip.file_name(), "notes.mp4");
    }
}
