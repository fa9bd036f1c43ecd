pub(super) use super::reduce;
pub(super) use super::WizardEffect;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::actions::WizardAction;
pub(super) use crate::answers::AnswerStore;
pub(super) use crate::answers::ChoiceField;
pub(super) use crate::answers::FieldId;
pub(super) use crate::answers::FieldUpdate;
pub(super) use crate::answers::MultiField;
pub(super) use crate::answers::TextField;
pub(super) use crate::state::SubmissionPhase;
pub(super) use crate::state::UiTheme;
pub(super) use crate::state::WizardState;
pub(super) use crate::state::WizardView;
pub(super) use crate::steps::last_step_index;
pub(super) use crate::steps::ControlSpec;
pub(super) use crate::submission::SubmissionResult;

mod editing;
mod submission;

fn state() -> WizardState {
    WizardState::new(UiTheme::Classic)
}

fn user(state: &mut WizardState, action: UserAction) -> Vec<WizardEffect> {
    reduce(state, WizardAction::User(action))
}

fn run_runtime(state: &mut WizardState, action: RuntimeAction) {
    let effects = reduce(state, WizardAction::Runtime(action));
    assert!(effects.is_empty());
}

fn choice(field: ChoiceField, token: &str) -> UserAction {
    UserAction::UpdateField(FieldUpdate::Choice(field, token.to_string()))
}

fn at_last_step() -> WizardState {
    let mut state = state();
    state.position = last_step_index();
    state
}

/// Submits from the last step and returns the allocated attempt.
fn start_submission(state: &mut WizardState) -> u64 {
    let effects = user(state, UserAction::Submit);
    match effects.first() {
        Some(WizardEffect::StartSubmission { attempt, .. }) => *attempt,
        other => panic!("expected StartSubmission, got {other:?}"),
    }
}

fn resolved(state: &mut WizardState, result: SubmissionResult) {
    let attempt = start_submission(state);
    run_runtime(
        state,
        RuntimeAction::SubmissionResolved { attempt, result },
    );
}

fn focus_field(state: &mut WizardState, field: FieldId) {
    let index = state
        .visible_controls()
        .iter()
        .position(|control| control.field() == field)
        .unwrap_or_else(|| panic!("{} is not visible", field.path()));
    state.interaction.focused_control = index;
    state.interaction.option_cursor = 0;
}
