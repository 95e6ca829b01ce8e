//! KYC wizard screen: one page per step with Previous/Next/Submit buttons

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::form_field::{FieldForm, FormField};
use super::ViewAction;
use crate::kyc::{FieldKind, KycField, KycStep, KycStepper};
use crate::notifications::NotificationEvent;
use crate::submission::{SubmissionError, SubmissionReceipt};

mod steps;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardButton {
    Previous,
    Next,
    Submit,
}

impl WizardButton {
    /// Buttons under the fields of `step`, left to right
    pub fn for_step(step: KycStep) -> Vec<WizardButton> {
        let mut buttons = Vec::with_capacity(2);
        if !step.is_first() {
            buttons.push(WizardButton::Previous);
        }
        buttons.push(if step.is_last() {
            WizardButton::Submit
        } else {
            WizardButton::Next
        });
        buttons
    }

    pub fn label(self, step: KycStep, submitting: bool) -> &'static str {
        match self {
            WizardButton::Previous => "Previous",
            WizardButton::Next => step.next_label().unwrap_or("Next"),
            WizardButton::Submit if submitting => "Submitting...",
            WizardButton::Submit => "Submit KYC Application",
        }
    }
}

fn placeholder(field: KycField) -> String {
    match field.kind() {
        FieldKind::Select(_) => format!("Select {}", field.label()),
        FieldKind::LongText => field.hint().unwrap_or_default().to_string(),
        _ => String::new(),
    }
}

pub struct KycWizard {
    stepper: KycStepper,
    form: FieldForm<KycField>,
    buttons: Vec<WizardButton>,
    /// Index of the first field drawn; follows focus
    scroll: usize,
}

impl Default for KycWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl KycWizard {
    pub fn new() -> Self {
        Self::with_stepper(KycStepper::new())
    }

    pub fn with_stepper(stepper: KycStepper) -> Self {
        let mut wizard = Self {
            stepper,
            form: FieldForm::new(Vec::new()),
            buttons: Vec::new(),
            scroll: 0,
        };
        wizard.rebuild();
        wizard
    }

    pub fn stepper(&self) -> &KycStepper {
        &self.stepper
    }

    pub fn step(&self) -> KycStep {
        self.stepper.step()
    }

    pub fn buttons(&self) -> &[WizardButton] {
        &self.buttons
    }

    pub fn focused_field(&self) -> Option<KycField> {
        self.form.focused_key()
    }

    pub fn focused_button(&self) -> Option<WizardButton> {
        self.form
            .focused_button()
            .and_then(|i| self.buttons.get(i).copied())
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Recreate the widgets for the current step from the stored form.
    /// Focus and scroll go back to the top.
    fn rebuild(&mut self) {
        let step = self.stepper.step();
        let form = self.stepper.form();
        let fields = KycField::for_step(step)
            .into_iter()
            .map(|field| {
                let widget =
                    FormField::for_kind(field.kind(), &form.get(field), &placeholder(field));
                (field, widget)
            })
            .collect();
        self.buttons = WizardButton::for_step(step);
        self.form = FieldForm::with_buttons(fields, self.buttons.len());
        self.scroll = 0;
    }

    pub fn next_step(&mut self) -> Option<KycStep> {
        let step = self.stepper.advance()?;
        self.rebuild();
        Some(step)
    }

    pub fn prev_step(&mut self) -> Option<KycStep> {
        let step = self.stepper.retreat()?;
        self.rebuild();
        Some(step)
    }

    fn submit(&mut self) -> ViewAction {
        match self.stepper.begin_submission() {
            Ok(form) => ViewAction::SubmitKyc(form),
            Err(e) => {
                tracing::debug!(error = %e, "KYC submit ignored");
                ViewAction::None
            }
        }
    }

    pub fn complete_submission(
        &mut self,
        outcome: Result<SubmissionReceipt, SubmissionError>,
    ) -> NotificationEvent {
        self.stepper.complete_submission(outcome)
    }

    fn press(&mut self, button: WizardButton) -> ViewAction {
        match button {
            WizardButton::Previous => {
                self.prev_step();
                ViewAction::None
            }
            WizardButton::Next => {
                self.next_step();
                ViewAction::None
            }
            WizardButton::Submit => self.submit(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => {
                    self.next_step();
                }
                KeyCode::Char('p') => {
                    self.prev_step();
                }
                KeyCode::Char('s') => return self.submit(),
                _ => {}
            }
            return ViewAction::None;
        }

        match key.code {
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Enter if self.focused_button().is_some() => {
                if let Some(button) = self.focused_button() {
                    return self.press(button);
                }
            }
            KeyCode::Enter
                if !self
                    .form
                    .focused_field_mut()
                    .is_some_and(|(_, f)| f.is_multiline()) =>
            {
                self.form.next_field();
            }
            code => {
                let Some((field, widget)) = self.form.focused_field_mut() else {
                    return ViewAction::None;
                };
                if widget.handle_key(code) {
                    if let Err(e) = self.stepper.update_field(field, widget.field_value()) {
                        tracing::warn!(field = %field, error = %e, "Field update rejected");
                    }
                }
            }
        }
        ViewAction::None
    }
}
