use crate::core::budget;
use crate::core::schema::{self, ValidationReport};
use crate::core::steps::{StepKind, StepPlan};
use crate::domain::model::{Draft, Field, Notice};
use crate::domain::ports::{Clock, Navigator, SummarySender, SystemClock};
use crate::utils::error::WizardError;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_RETURN_URL: &str = "https://www.riaajvintage.com/";
pub const THANK_YOU_TITLE: &str = "Thank You!";
pub const THANK_YOU_MESSAGE: &str = "Your handpick request has been submitted successfully. \
We appreciate your interest and will contact you soon!";
pub const RETURN_HOME_LABEL: &str = "Return to Home";

#[derive(Debug, Clone)]
pub struct WizardOptions {
    pub plan: StepPlan,
    /// Pause between a successful send and the thank-you screen, so the
    /// success notice can be seen.
    pub success_delay: Duration,
    pub return_url: String,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            plan: StepPlan::default(),
            success_delay: Duration::from_millis(1500),
            return_url: DEFAULT_RETURN_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen<'a> {
    Step {
        position: usize,
        total: usize,
        kind: StepKind,
    },
    ThankYou {
        title: &'static str,
        message: &'static str,
        return_label: &'static str,
        return_url: &'a str,
    },
}

/// Holds `is_submitting` up for the lifetime of one send, and lowers it even
/// when the `submit` future is dropped part way.
struct SubmittingFlag<'a>(&'a mut bool);

impl<'a> SubmittingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for SubmittingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Owns the draft and moves through the configured steps.
pub struct Wizard<S: SummarySender> {
    draft: Draft,
    position: usize,
    is_submitting: bool,
    completed: bool,
    budget_error: Option<String>,
    sender: S,
    clock: Arc<dyn Clock>,
    options: WizardOptions,
}

impl<S: SummarySender> Wizard<S> {
    pub fn new(sender: S, options: WizardOptions) -> Self {
        Self::with_clock(sender, options, Arc::new(SystemClock))
    }

    pub fn with_clock(sender: S, options: WizardOptions, clock: Arc<dyn Clock>) -> Self {
        Self {
            draft: Draft::default(),
            position: 1,
            is_submitting: false,
            completed: false,
            budget_error: None,
            sender,
            clock,
            options,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn notes_mut(&mut self) -> &mut Option<String> {
        &mut self.draft.notes
    }

    pub fn current_step(&self) -> usize {
        self.position
    }

    pub fn total_steps(&self) -> usize {
        self.options.plan.len()
    }

    pub fn current_kind(&self) -> Option<StepKind> {
        self.options.plan.get(self.position).map(|s| s.kind)
    }

    pub fn is_final_step(&self) -> bool {
        self.position >= self.total_steps()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn progress_percent(&self) -> f64 {
        self.position as f64 / self.total_steps() as f64 * 100.0
    }

    pub fn screen(&self) -> Screen<'_> {
        match self.current_kind() {
            Some(kind) if !self.completed => Screen::Step {
                position: self.position,
                total: self.total_steps(),
                kind,
            },
            _ => Screen::ThankYou {
                title: THANK_YOU_TITLE,
                message: THANK_YOU_MESSAGE,
                return_label: RETURN_HOME_LABEL,
                return_url: &self.options.return_url,
            },
        }
    }

    /// Errors for the current step's fields, for inline display.
    pub fn step_errors(&self) -> ValidationReport {
        schema::validate_fields(&self.draft, self.current_fields(), self.clock.now())
    }

    fn current_fields(&self) -> &[Field] {
        self.options.plan.fields_for(self.position)
    }

    pub fn budget_error(&self) -> Option<&str> {
        self.budget_error.as_deref()
    }

    pub fn set_currency(&mut self, code: &str) -> Option<&str> {
        self.draft.currency = code.to_string();
        self.revalidate_budget()
    }

    pub fn set_budget_from(&mut self, amount: f64) -> Option<&str> {
        self.draft.budget_from = amount;
        self.revalidate_budget()
    }

    pub fn set_budget_to(&mut self, amount: f64) -> Option<&str> {
        self.draft.budget_to = amount;
        self.revalidate_budget()
    }

    fn revalidate_budget(&mut self) -> Option<&str> {
        self.budget_error = budget::validate_budget(
            self.draft.budget_from,
            self.draft.budget_to,
            &self.draft.currency,
        );
        self.budget_error.as_deref()
    }

    /// False on the budget step while the draft's budget fails the rule,
    /// including edits made through `draft_mut`.
    pub fn can_advance(&self) -> bool {
        self.current_kind() != Some(StepKind::Budget)
            || budget::validate_budget(
                self.draft.budget_from,
                self.draft.budget_to,
                &self.draft.currency,
            )
            .is_none()
    }

    /// Validates the current step's fields and moves forward. A no-op on the
    /// final step, where only `submit` applies.
    pub fn advance(&mut self) -> Result<usize, WizardError> {
        if self.completed || self.is_final_step() {
            return Ok(self.position);
        }

        let report = self.step_errors();
        if !report.is_empty() {
            tracing::debug!("Step {} blocked: {}", self.position, report);
            return Err(WizardError::Validation(report));
        }

        if self.current_kind() == Some(StepKind::Budget) {
            if let Some(message) = self.revalidate_budget() {
                return Err(WizardError::BudgetBlocked(message.to_string()));
            }
        }

        self.position += 1;
        tracing::debug!("Advanced to step {}", self.position);
        Ok(self.position)
    }

    /// Moves back one step without validating. A no-op on step 1.
    pub fn retreat(&mut self) -> usize {
        if self.position > 1 && !self.completed {
            self.position -= 1;
        }
        self.position
    }

    /// Sends the draft. On failure the draft and position are kept so the
    /// user can retry.
    pub async fn submit(&mut self) -> Result<Notice, WizardError> {
        if self.completed {
            return Err(WizardError::AlreadySubmitted);
        }
        if !self.is_final_step() {
            return Err(WizardError::NotOnFinalStep);
        }

        let report = schema::validate_all(&self.draft, self.clock.now());
        if !report.is_empty() {
            tracing::debug!("Submission blocked: {}", report);
            return Err(WizardError::Validation(report));
        }
        if let Some(message) = self.revalidate_budget() {
            return Err(WizardError::BudgetBlocked(message.to_string()));
        }

        let _submitting = SubmittingFlag::raise(&mut self.is_submitting);
        match self.sender.send_summary(&self.draft).await {
            Ok(()) => {
                tracing::info!("Handpick request submitted");
                tokio::time::sleep(self.options.success_delay).await;
                self.completed = true;
                Ok(Notice::info(
                    "Form Submitted Successfully!",
                    "We'll be in touch soon to confirm your handpick selection.",
                ))
            }
            Err(e) => {
                tracing::error!("Submission failed: {} (category: {:?})", e, e.category());
                Err(WizardError::Submission(e))
            }
        }
    }

    /// Sends the top-level page to the configured return URL.
    pub fn return_home(&self, navigator: &dyn Navigator) {
        tracing::debug!("Redirecting to {}", self.options.return_url);
        navigator.redirect_top(&self.options.return_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LineItem;
    use crate::domain::ports::FixedClock;
    use crate::utils::error::{ErrorCategory, IntakeError, Result};
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct FakeSender {
        fail: Arc<AtomicBool>,
        hang: Arc<AtomicBool>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SummarySender for FakeSender {
        async fn send_summary(&self, _draft: &Draft) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.hang.load(Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            if self.fail.load(Ordering::SeqCst) {
                Err(IntakeError::RemoteError {
                    service: "emailjs".to_string(),
                    status: 502,
                    body: "bad gateway".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        visited: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn redirect_top(&self, url: &str) {
            self.visited.lock().unwrap().push(url.to_string());
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn wizard(sender: FakeSender) -> Wizard<FakeSender> {
        let options = WizardOptions {
            success_delay: Duration::from_millis(10),
            ..Default::default()
        };
        Wizard::with_clock(sender, options, Arc::new(FixedClock(now())))
    }

    fn fill_contact(w: &mut Wizard<FakeSender>) {
        let d = w.draft_mut();
        d.name = "Asha Rao".to_string();
        d.whatsapp = "+911234567890".to_string();
        d.email = "asha@example.com".to_string();
        d.region = "Asia Pacific".to_string();
        d.timezone = "GMT+05:30 (India)".to_string();
    }

    fn fill_products(w: &mut Wizard<FakeSender>) {
        w.draft_mut().categories.push(LineItem {
            name: "Carhartt".to_string(),
            grade: "A Grade".to_string(),
            size: "L".to_string(),
            color: "Brown".to_string(),
            quantity: 1,
            description: None,
        });
    }

    fn fill_budget(w: &mut Wizard<FakeSender>) {
        w.set_currency("USD");
        w.set_budget_from(400.0);
        w.set_budget_to(500.0);
    }

    fn fill_schedule(w: &mut Wizard<FakeSender>) {
        let d = w.draft_mut();
        d.date = NaiveDate::from_ymd_opt(2026, 10, 21);
        d.time_slot = "11:00".to_string();
        d.schedule_timezone = "GMT+05:30 (India)".to_string();
    }

    fn walk_to_review(w: &mut Wizard<FakeSender>) {
        fill_contact(w);
        fill_products(w);
        fill_budget(w);
        fill_schedule(w);
        for _ in 0..5 {
            w.advance().unwrap();
        }
        assert_eq!(w.current_step(), 6);
    }

    #[test]
    fn test_welcome_step_always_advances() {
        let mut w = wizard(FakeSender::default());
        assert_eq!(w.advance().unwrap(), 2);
        assert_eq!(w.current_kind(), Some(StepKind::Contact));
    }

    #[test]
    fn test_retreat_from_first_step_is_noop() {
        let mut w = wizard(FakeSender::default());
        assert_eq!(w.retreat(), 1);
        w.advance().unwrap();
        assert_eq!(w.retreat(), 1);
    }

    #[test]
    fn test_contact_step_blocks_until_fields_pass() {
        let mut w = wizard(FakeSender::default());
        w.advance().unwrap();

        let err = w.advance().unwrap_err();
        match &err {
            WizardError::Validation(report) => {
                assert_eq!(report.len(), 5);
                assert!(report.get(Field::Email).is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.notice().title, "Validation Error");
        assert_eq!(w.current_step(), 2);

        fill_contact(&mut w);
        assert_eq!(w.advance().unwrap(), 3);
    }

    #[test]
    fn test_product_step_needs_a_line_item() {
        let mut w = wizard(FakeSender::default());
        fill_contact(&mut w);
        w.advance().unwrap();
        w.advance().unwrap();

        assert!(matches!(w.advance(), Err(WizardError::Validation(_))));
        fill_products(&mut w);
        assert_eq!(w.advance().unwrap(), 4);
    }

    #[test]
    fn test_budget_error_disables_advance() {
        let mut w = wizard(FakeSender::default());
        fill_contact(&mut w);
        fill_products(&mut w);
        for _ in 0..3 {
            w.advance().unwrap();
        }
        assert_eq!(w.current_kind(), Some(StepKind::Budget));

        w.set_currency("USD");
        w.set_budget_from(100.0);
        assert!(w.set_budget_to(100.0).is_some());
        assert!(!w.can_advance());
        let err = w.advance().unwrap_err();
        assert!(matches!(err, WizardError::BudgetBlocked(_)));
        assert_eq!(err.category(), ErrorCategory::Business);

        w.set_budget_from(400.0);
        assert!(w.set_budget_to(500.0).is_none());
        assert!(w.can_advance());
        assert_eq!(w.advance().unwrap(), 5);
    }

    #[test]
    fn test_untouched_budget_fields_still_block() {
        let mut w = wizard(FakeSender::default());
        fill_contact(&mut w);
        fill_products(&mut w);
        w.draft_mut().currency = "EUR".to_string();
        for _ in 0..3 {
            w.advance().unwrap();
        }
        assert!(matches!(w.advance(), Err(WizardError::BudgetBlocked(_))));
        assert_eq!(w.current_step(), 4);
    }

    #[test]
    fn test_advance_on_final_step_is_noop() {
        let mut w = wizard(FakeSender::default());
        walk_to_review(&mut w);
        assert_eq!(w.advance().unwrap(), 6);
        assert_eq!(w.progress_percent(), 100.0);
    }

    #[test]
    fn test_can_advance_reads_budget_edited_through_draft() {
        let mut w = wizard(FakeSender::default());
        fill_contact(&mut w);
        fill_products(&mut w);
        w.advance().unwrap();
        w.advance().unwrap();
        w.advance().unwrap();
        assert_eq!(w.current_kind(), Some(StepKind::Budget));

        w.draft_mut().currency = "USD".to_string();
        assert!(!w.can_advance());
        assert!(matches!(w.advance(), Err(WizardError::BudgetBlocked(_))));

        let d = w.draft_mut();
        d.budget_from = 400.0;
        d.budget_to = 500.0;
        assert!(w.can_advance());
        assert_eq!(w.advance().unwrap(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_submit_clears_submitting_flag() {
        let sender = FakeSender::default();
        let hang = sender.hang.clone();
        let calls = sender.calls.clone();
        let mut w = wizard(sender);
        walk_to_review(&mut w);
        w.draft_mut().consent = true;

        hang.store(true, Ordering::SeqCst);
        let attempt = tokio::time::timeout(Duration::from_secs(5), w.submit()).await;
        assert!(attempt.is_err());
        assert!(!w.is_submitting());
        assert!(!w.is_completed());

        hang.store(false, Ordering::SeqCst);
        assert!(w.submit().await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_submit_requires_final_step() {
        let mut w = wizard(FakeSender::default());
        assert!(matches!(w.submit().await, Err(WizardError::NotOnFinalStep)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_success_shows_thank_you() {
        let sender = FakeSender::default();
        let calls = sender.calls.clone();
        let mut w = wizard(sender);
        walk_to_review(&mut w);

        assert!(matches!(w.submit().await, Err(WizardError::Validation(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        w.draft_mut().consent = true;
        let notice = w.submit().await.unwrap();
        assert_eq!(notice.title, "Form Submitted Successfully!");
        assert!(w.is_completed());
        assert!(!w.is_submitting());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            w.screen(),
            Screen::ThankYou {
                title: "Thank You!",
                message: THANK_YOU_MESSAGE,
                return_label: "Return to Home",
                return_url: DEFAULT_RETURN_URL
            }
        );

        assert!(matches!(w.submit().await, Err(WizardError::AlreadySubmitted)));

        let navigator = RecordingNavigator::default();
        w.return_home(&navigator);
        assert_eq!(
            *navigator.visited.lock().unwrap(),
            vec![DEFAULT_RETURN_URL.to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_draft_for_retry() {
        let sender = FakeSender::default();
        sender.fail.store(true, Ordering::SeqCst);
        let fail = sender.fail.clone();
        let mut w = wizard(sender);
        walk_to_review(&mut w);
        w.draft_mut().consent = true;
        let before = w.draft().clone();

        let err = w.submit().await.unwrap_err();
        assert_eq!(err.notice().title, "Submission Failed");
        assert_eq!(err.category(), ErrorCategory::Transport);
        assert!(!w.is_submitting());
        assert!(!w.is_completed());
        assert_eq!(w.draft(), &before);
        assert_eq!(w.current_step(), 6);

        fail.store(false, Ordering::SeqCst);
        assert!(w.submit().await.is_ok());
    }

    #[test]
    fn test_contact_late_plan_validates_contact_at_step_four() {
        let options = WizardOptions {
            plan: StepPlan::contact_late(),
            ..Default::default()
        };
        let mut w = Wizard::with_clock(FakeSender::default(), options, Arc::new(FixedClock(now())));
        fill_products(&mut w);
        fill_budget(&mut w);
        for _ in 0..3 {
            w.advance().unwrap();
        }
        assert_eq!(w.current_kind(), Some(StepKind::Contact));
        assert!(matches!(w.advance(), Err(WizardError::Validation(_))));
    }
}
