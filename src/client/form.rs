//! State machine driving the multi-step registration form.
//!
//! [`transition`] is a pure function from the current state and an event to
//! the next state plus the effects the view layer has to perform. The
//! [`FormController`] wraps it behind a single dispatcher.

use serde::{Deserialize, Serialize};

use crate::client::draft::{FieldEdit, RegistrationDraft};
use crate::client::submission::{SubmissionError, SubmissionReceipt};
use crate::client::summary::{SummaryItem, build_summary};
use crate::client::validation::{FieldError, FieldWarning, Step, validate_step};

/// Lifecycle of the form relative to the server.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Editing,
    /// A submission is in flight; navigation and resubmission are ignored.
    Submitting,
    Completed,
    /// The last submission failed; the data is kept for a manual retry.
    Failed(SubmissionError),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormState {
    pub step: Step,
    pub draft: RegistrationDraft,
    pub errors: Vec<FieldError>,
    pub warnings: Vec<FieldWarning>,
    pub summary: Vec<SummaryItem>,
    pub status: FormStatus,
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    Next,
    Previous,
    Submit,
    Edit(FieldEdit),
    SubmissionSucceeded(SubmissionReceipt),
    SubmissionFailed(SubmissionError),
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

/// Work requested from the view layer after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    ShowStep(Step),
    ShowErrors(Vec<FieldError>),
    ShowWarnings(Vec<FieldWarning>),
    ShowSummary(Vec<SummaryItem>),
    /// Send the registration; the result comes back as a submission event.
    Send(Box<RegistrationDraft>),
    ShowMessage { kind: MessageKind, text: String },
    Redirect(String),
    ResetForm,
}

/// Computes the next state and the effects of `event`.
pub fn transition(mut state: FormState, event: FormEvent) -> (FormState, Vec<Effect>) {
    let mut effects = Vec::new();

    if state.is_submitting() {
        match event {
            FormEvent::SubmissionSucceeded(receipt) => {
                let step = Step::default();
                state = FormState {
                    status: FormStatus::Completed,
                    ..FormState::default()
                };
                effects.push(Effect::ResetForm);
                effects.push(Effect::ShowStep(step));
                effects.push(Effect::ShowMessage {
                    kind: MessageKind::Success,
                    text: receipt.user_message().to_string(),
                });
                if let Some(url) = receipt.redirect {
                    effects.push(Effect::Redirect(url));
                }
            }
            FormEvent::SubmissionFailed(error) => {
                state.step = Step::Consent;
                effects.push(Effect::ShowMessage {
                    kind: MessageKind::Error,
                    text: error.user_message().to_string(),
                });
                state.status = FormStatus::Failed(error);
            }
            // Only one submission may be in flight.
            _ => {}
        }
        return (state, effects);
    }

    match event {
        FormEvent::Next => {
            let report = validate_step(state.step, &state.draft);
            state.warnings = report.warnings;
            if !state.warnings.is_empty() {
                effects.push(Effect::ShowWarnings(state.warnings.clone()));
            }
            if !report.errors.is_empty() {
                state.errors = report.errors;
                effects.push(Effect::ShowErrors(state.errors.clone()));
            } else {
                state.errors.clear();
                if let Some(next) = state.step.next() {
                    state.step = next;
                    effects.push(Effect::ShowStep(next));
                    if next == Step::Consent {
                        state.summary = build_summary(&state.draft);
                        effects.push(Effect::ShowSummary(state.summary.clone()));
                    }
                }
            }
            state.status = FormStatus::Editing;
        }
        FormEvent::Previous => {
            if let Some(previous) = state.step.previous() {
                state.step = previous;
                state.errors.clear();
                state.warnings.clear();
                state.status = FormStatus::Editing;
                effects.push(Effect::ShowStep(previous));
            }
        }
        FormEvent::Submit => {
            if state.step != Step::Consent {
                return (state, effects);
            }
            let report = validate_step(Step::Consent, &state.draft);
            if report.is_valid() {
                state.errors.clear();
                state.status = FormStatus::Submitting;
                effects.push(Effect::Send(Box::new(state.draft.clone())));
            } else {
                state.errors = report.errors;
                effects.push(Effect::ShowErrors(state.errors.clone()));
            }
        }
        FormEvent::Edit(edit) => {
            let field = edit.field();
            if state.draft.apply(edit) {
                let shown = state.errors.len();
                state.errors.retain(|error| error.field != field);
                state.warnings.retain(|warning| warning.field != field);
                if state.errors.len() != shown {
                    effects.push(Effect::ShowErrors(state.errors.clone()));
                }
                if state.status == FormStatus::Completed {
                    state.status = FormStatus::Editing;
                }
            }
        }
        // A late answer for a submission that is no longer tracked.
        FormEvent::SubmissionSucceeded(_) | FormEvent::SubmissionFailed(_) => {}
    }

    (state, effects)
}

/// Owns the form state and feeds events through [`transition`].
#[derive(Debug, Default)]
pub struct FormController {
    state: FormState,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single entry point for every event.
    pub fn dispatch(&mut self, event: FormEvent) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = transition(state, event);
        self.state = state;
        effects
    }

    pub fn next(&mut self) -> Vec<Effect> {
        self.dispatch(FormEvent::Next)
    }

    pub fn previous(&mut self) -> Vec<Effect> {
        self.dispatch(FormEvent::Previous)
    }

    pub fn submit(&mut self) -> Vec<Effect> {
        self.dispatch(FormEvent::Submit)
    }

    pub fn edit(&mut self, edit: FieldEdit) -> Vec<Effect> {
        self.dispatch(FormEvent::Edit(edit))
    }

    /// Reports the result of a [`Effect::Send`].
    pub fn complete(&mut self, result: Result<SubmissionReceipt, SubmissionError>) -> Vec<Effect> {
        match result {
            Ok(receipt) => self.dispatch(FormEvent::SubmissionSucceeded(receipt)),
            Err(error) => self.dispatch(FormEvent::SubmissionFailed(error)),
        }
    }

    pub fn get_state(&self) -> &FormState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::draft::Field;
    use crate::client::validation::ErrorKind;
    use crate::client::validation::tests::complete_draft;

    fn controller_at(step: Step, draft: RegistrationDraft) -> FormController {
        FormController {
            state: FormState {
                step,
                draft,
                ..FormState::default()
            },
        }
    }

    #[test]
    fn next_is_blocked_by_errors() {
        let mut controller = FormController::new();
        let effects = controller.next();

        let state = controller.get_state();
        assert_eq!(state.step, Step::Personal);
        assert!(!state.errors.is_empty());
        assert!(matches!(effects.as_slice(), [Effect::ShowErrors(errors)] if errors == &state.errors));
    }

    #[test]
    fn next_walks_through_steps_and_builds_summary() {
        let mut controller = controller_at(Step::Personal, complete_draft());

        assert_eq!(controller.next(), vec![Effect::ShowStep(Step::Expertise)]);
        assert_eq!(controller.next(), vec![Effect::ShowStep(Step::Documents)]);
        let effects = controller.next();
        assert_eq!(effects[0], Effect::ShowStep(Step::Consent));
        assert!(matches!(&effects[1], Effect::ShowSummary(items) if !items.is_empty()));
        assert!(!controller.get_state().summary.is_empty());

        // Already on the last step.
        assert!(controller.next().is_empty());
        assert_eq!(controller.get_state().step, Step::Consent);
    }

    #[test]
    fn previous_never_validates() {
        let mut controller = controller_at(Step::Documents, RegistrationDraft::default());
        assert_eq!(controller.previous(), vec![Effect::ShowStep(Step::Expertise)]);
        assert_eq!(controller.previous(), vec![Effect::ShowStep(Step::Personal)]);
        assert!(controller.previous().is_empty());
        assert_eq!(controller.get_state().step, Step::Personal);
    }

    #[test]
    fn submit_requires_consent() {
        let draft = RegistrationDraft {
            rgpd_consent: false,
            ..complete_draft()
        };
        let mut controller = controller_at(Step::Consent, draft);

        let effects = controller.submit();

        let state = controller.get_state();
        assert_eq!(state.status, FormStatus::Editing);
        assert_eq!(state.errors.len(), 1);
        assert_eq!(state.errors[0].kind, ErrorKind::ConsentRequired);
        assert!(!effects.iter().any(|e| matches!(e, Effect::Send(_))));
    }

    #[test]
    fn submit_is_ignored_before_last_step() {
        let mut controller = controller_at(Step::Documents, complete_draft());
        assert!(controller.submit().is_empty());
        assert_eq!(controller.get_state().status, FormStatus::Editing);
    }

    #[test]
    fn only_one_submission_in_flight() {
        let mut controller = controller_at(Step::Consent, complete_draft());

        let effects = controller.submit();
        assert!(matches!(effects.as_slice(), [Effect::Send(_)]));
        assert!(controller.get_state().is_submitting());

        assert!(controller.submit().is_empty());
        assert!(controller.previous().is_empty());
        assert_eq!(controller.get_state().step, Step::Consent);
    }

    #[test]
    fn success_resets_the_form() {
        let mut controller = controller_at(Step::Consent, complete_draft());
        controller.submit();

        let effects = controller.complete(Ok(SubmissionReceipt {
            message: Some("Merci".to_string()),
            redirect: Some("/merci".to_string()),
        }));

        let state = controller.get_state();
        assert_eq!(state.status, FormStatus::Completed);
        assert_eq!(state.step, Step::Personal);
        assert_eq!(state.draft, RegistrationDraft::default());
        assert_eq!(effects[0], Effect::ResetForm);
        assert!(effects.contains(&Effect::Redirect("/merci".to_string())));
    }

    #[test]
    fn failure_keeps_data_for_retry() {
        let mut controller = controller_at(Step::Consent, complete_draft());
        controller.submit();

        let effects = controller.complete(Err(SubmissionError::Timeout));

        let state = controller.get_state();
        assert_eq!(state.status, FormStatus::Failed(SubmissionError::Timeout));
        assert_eq!(state.step, Step::Consent);
        assert_eq!(state.draft, complete_draft());
        assert_eq!(
            effects,
            vec![Effect::ShowMessage {
                kind: MessageKind::Error,
                text: SubmissionError::Timeout.user_message().to_string(),
            }]
        );

        // Manual retry.
        assert!(matches!(controller.submit().as_slice(), [Effect::Send(_)]));
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut controller = FormController::new();
        assert!(controller.complete(Err(SubmissionError::Network)).is_empty());
        assert_eq!(controller.get_state().status, FormStatus::Editing);
    }

    #[test]
    fn editing_clears_errors_of_that_field() {
        let mut controller = FormController::new();
        controller.next();
        assert!(
            controller
                .get_state()
                .errors
                .iter()
                .any(|e| e.field == Field::FirstName)
        );

        controller.edit(FieldEdit::Text(Field::FirstName, "Alice".to_string()));

        let errors = &controller.get_state().errors;
        assert!(!errors.iter().any(|e| e.field == Field::FirstName));
        assert!(errors.iter().any(|e| e.field == Field::LastName));
    }
}
