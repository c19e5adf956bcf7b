use crate::domain::model::{Draft, EmailRequest, SummaryEmail};
use crate::domain::ports::{EmailDelivery, SummarySender};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Asia/Kolkata has no DST, so a fixed offset is exact.
const IST_OFFSET_MINUTES: i64 = 5 * 60 + 30;

const LABEL_CELL: &str = "padding:12px;border:1px solid #eee;background:#fafafa;";
const VALUE_CELL: &str = "padding:12px;border:1px solid #eee;";
const ITEM_CELL: &str = "padding:8px;border:1px solid #eee;";
const HEADER_CELL: &str = "padding:8px;border:1px solid #eee;background:#f5f5f5;text-align:left;";

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        escape_html(value)
    }
}

/// `18/10/2026, 2:35:07 pm`, as the en-IN locale renders India time.
pub fn format_submitted_at(at: DateTime<Utc>) -> String {
    let local = at.naive_utc() + Duration::minutes(IST_OFFSET_MINUTES);
    local.format("%-d/%-m/%Y, %-I:%M:%S %P").to_string()
}

fn row(label: &str, value: &str) -> String {
    format!(
        "\n    <tr>\n      <td style=\"{}\">{}</td>\n      <td style=\"{}\">{}</td>\n    </tr>",
        LABEL_CELL, label, VALUE_CELL, value
    )
}

fn category_rows(draft: &Draft) -> String {
    if draft.categories.is_empty() {
        return "\n            <tr><td colspan=\"7\" style=\"padding:10px;border:1px solid #eee;\">No categories provided.</td></tr>"
            .to_string();
    }

    draft
        .categories
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let cells = [
                (i + 1).to_string(),
                escape_html(&item.name),
                escape_html(&item.grade),
                or_dash(&item.size),
                or_dash(&item.color),
                item.quantity.to_string(),
                or_dash(item.description.as_deref().unwrap_or_default()),
            ];
            let tds: String = cells
                .iter()
                .map(|c| format!("\n      <td style=\"{}\">{}</td>", ITEM_CELL, c))
                .collect();
            format!("\n    <tr>{}\n    </tr>", tds)
        })
        .collect()
}

fn budget_line(draft: &Draft) -> String {
    let mut parts = Vec::new();
    if !draft.currency.is_empty() {
        parts.push(format!("Currency: <b>{}</b>", escape_html(&draft.currency)));
    }
    parts.push(format!("From: <b>{}</b>", draft.budget_from));
    parts.push(format!("To: <b>{}</b>", draft.budget_to));
    parts.join(" &nbsp; ")
}

/// Renders the draft as the HTML fragment embedded in the notification email.
/// Every free-text value is escaped.
pub fn build_summary_html(draft: &Draft) -> String {
    let headers: String = ["#", "Category", "Grade", "Size", "Color", "Qty", "Description"]
        .iter()
        .map(|h| format!("\n              <th style=\"{}\">{}</th>", HEADER_CELL, h))
        .collect();

    let date = draft
        .date
        .map(|d| d.format("%-d %b %Y").to_string())
        .unwrap_or_else(|| "-".to_string());
    let schedule = format!(
        "Date: <b>{}</b> &nbsp; | &nbsp; Slot: <b>{}</b> &nbsp; | &nbsp; TZ: <b>{}</b>",
        date,
        or_dash(&draft.time_slot),
        or_dash(&draft.schedule_timezone)
    );
    let consent = if draft.consent {
        "✅ Granted"
    } else {
        "❌ Not granted"
    };

    let mut html = String::from(
        "\n  <table role=\"presentation\" cellpadding=\"0\" cellspacing=\"0\" width=\"100%\" style=\"font-family:Inter,Arial,sans-serif;font-size:14px;color:#111;line-height:1.5;\">",
    );
    html.push_str(&row("Name", &escape_html(&draft.name)));
    html.push_str(&row("Email", &escape_html(&draft.email)));
    html.push_str(&row("WhatsApp", &escape_html(&draft.whatsapp)));
    html.push_str(&row(
        "Company / Type",
        &or_dash(draft.company.as_deref().unwrap_or_default()),
    ));
    html.push_str(&row(
        "Region / TZ",
        &format!(
            "{} &nbsp; | &nbsp; {}",
            escape_html(&draft.region),
            escape_html(&draft.timezone)
        ),
    ));
    if let Some(brand) = draft.custom_brand.as_deref().filter(|b| !b.is_empty()) {
        html.push_str(&row("Custom Brand", &escape_html(brand)));
    }
    html.push_str(&row("Budget", &budget_line(draft)));
    html.push_str(&format!(
        "\n    <tr>\n      <td colspan=\"2\" style=\"padding:0;border:none;\">\n        <h3 style=\"margin:16px 0 8px;\">Categories</h3>\n        <table cellpadding=\"0\" cellspacing=\"0\" width=\"100%\" style=\"border-collapse:collapse;\">\n          <thead>\n            <tr>{}\n            </tr>\n          </thead>\n          <tbody>{}\n          </tbody>\n        </table>\n      </td>\n    </tr>",
        headers,
        category_rows(draft)
    ));
    html.push_str(&row("Schedule", &schedule));
    html.push_str(&format!(
        "\n    <tr>\n      <td style=\"{}\">Notes</td>\n      <td style=\"{}white-space:pre-wrap;\">{}</td>\n    </tr>",
        LABEL_CELL,
        VALUE_CELL,
        or_dash(draft.notes.as_deref().unwrap_or_default())
    ));
    html.push_str(&row("Consent", consent));
    html.push_str("\n  </table>\n");
    html
}

impl SummaryEmail {
    pub fn from_draft(draft: &Draft, submitted_at: DateTime<Utc>) -> Self {
        Self {
            summary_html: build_summary_html(draft),
            submitted_at: format_submitted_at(submitted_at),
            name: draft.name.clone(),
            email: draft.email.clone(),
            whatsapp: draft.whatsapp.clone(),
            region: draft.region.clone(),
            timezone: draft.timezone.clone(),
        }
    }
}

/// The three identifiers the email provider needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCredentials {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
}

/// Builds the summary and hands it to the delivery client exactly once.
pub struct EmailSender<D: EmailDelivery> {
    delivery: D,
    credentials: EmailCredentials,
}

impl<D: EmailDelivery> EmailSender<D> {
    pub fn new(delivery: D, credentials: EmailCredentials) -> Self {
        Self {
            delivery,
            credentials,
        }
    }

    pub fn request_for(&self, draft: &Draft, submitted_at: DateTime<Utc>) -> Result<EmailRequest> {
        let service_id = validate_required_field("email.service_id", &self.credentials.service_id)?;
        let template_id =
            validate_required_field("email.template_id", &self.credentials.template_id)?;
        let public_key = validate_required_field("email.public_key", &self.credentials.public_key)?;

        Ok(EmailRequest {
            service_id: service_id.to_string(),
            template_id: template_id.to_string(),
            public_key: public_key.to_string(),
            template_params: SummaryEmail::from_draft(draft, submitted_at),
        })
    }
}

#[async_trait]
impl<D: EmailDelivery> SummarySender for EmailSender<D> {
    async fn send_summary(&self, draft: &Draft) -> Result<()> {
        let request = self.request_for(draft, Utc::now())?;
        tracing::debug!(
            "Sending handpick summary ({} bytes of HTML, {} line items)",
            request.template_params.summary_html.len(),
            draft.categories.len()
        );
        self.delivery.send(&request).await?;
        tracing::info!("Handpick summary delivered for {}", draft.email);
        Ok(())
    }
}
