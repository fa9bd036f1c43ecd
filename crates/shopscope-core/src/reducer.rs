use tracing::debug;
use tracing::info;
use tracing::warn;

use super::actions::RuntimeAction;
use super::actions::UserAction;
use super::actions::WizardAction;
use super::answers::AnswerStore;
use super::answers::FieldUpdate;
use super::state::SubmissionPhase;
use super::state::WizardState;
use super::steps::last_step_index;
use super::steps::ControlKind;
use super::steps::TextInputKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEffect {
    RequestFrame,
    /// Presentation hint emitted on every step change.
    ScrollToTop,
    /// Run the submission pipeline once for `attempt` against this snapshot.
    StartSubmission {
        attempt: u64,
        answers: AnswerStore,
    },
    CopyToClipboard(String),
    ExportDocument(String),
}

pub fn reduce(state: &mut WizardState, action: WizardAction) -> Vec<WizardEffect> {
    match action {
        WizardAction::User(user) => reduce_user(state, user),
        WizardAction::Runtime(runtime) => {
            reduce_runtime(state, runtime);
            Vec::new()
        }
    }
}

fn reduce_user(state: &mut WizardState, action: UserAction) -> Vec<WizardEffect> {
    match action {
        UserAction::Advance => {
            if state.result.is_some() || state.position >= last_step_index() {
                return Vec::new();
            }
            state.position += 1;
            reset_focus(state);
            debug!(step = state.position, "advanced");
            vec![WizardEffect::ScrollToTop, WizardEffect::RequestFrame]
        }
        UserAction::Retreat => {
            if state.result.is_some() || state.position == 0 {
                return Vec::new();
            }
            state.position -= 1;
            reset_focus(state);
            debug!(step = state.position, "retreated");
            vec![WizardEffect::ScrollToTop, WizardEffect::RequestFrame]
        }
        UserAction::Submit => {
            if state.result.is_some() || !state.is_last_step() {
                return Vec::new();
            }
            if let SubmissionPhase::Submitting { attempt } = state.phase {
                debug!(attempt, "submit ignored while a call is in flight");
                return Vec::new();
            }
            let attempt = state.next_attempt;
            state.next_attempt = state.next_attempt.saturating_add(1);
            state.phase = SubmissionPhase::Submitting { attempt };
            state.interaction.editing = false;
            info!(attempt, "submitting questionnaire");
            vec![
                WizardEffect::StartSubmission {
                    attempt,
                    answers: state.answers.clone(),
                },
                WizardEffect::RequestFrame,
            ]
        }
        UserAction::Reset => {
            if state.result.take().is_none() {
                return Vec::new();
            }
            state.position = 0;
            reset_focus(state);
            state.interaction.result_scroll = 0;
            state.interaction.notice = None;
            info!("returned to the form");
            vec![WizardEffect::ScrollToTop, WizardEffect::RequestFrame]
        }
        UserAction::UpdateField(update) => {
            if state.result.is_some() {
                return Vec::new();
            }
            apply_update(state, update);
            vec![WizardEffect::RequestFrame]
        }
        UserAction::FocusNextControl => {
            let count = state.visible_controls().len();
            if count == 0 {
                return Vec::new();
            }
            state.interaction.focused_control = (state.focused_index() + 1) % count;
            state.interaction.option_cursor = 0;
            state.interaction.editing = false;
            vec![WizardEffect::RequestFrame]
        }
        UserAction::FocusPrevControl => {
            let count = state.visible_controls().len();
            if count == 0 {
                return Vec::new();
            }
            let current = state.focused_index();
            state.interaction.focused_control = if current == 0 { count - 1 } else { current - 1 };
            state.interaction.option_cursor = 0;
            state.interaction.editing = false;
            vec![WizardEffect::RequestFrame]
        }
        UserAction::OptionNext => {
            let Some(control) = state.focused_control() else {
                return Vec::new();
            };
            let len = control.options().len();
            if len == 0 {
                return Vec::new();
            }
            state.interaction.option_cursor = (state.interaction.option_cursor + 1) % len;
            vec![WizardEffect::RequestFrame]
        }
        UserAction::OptionPrev => {
            let Some(control) = state.focused_control() else {
                return Vec::new();
            };
            let len = control.options().len();
            if len == 0 {
                return Vec::new();
            }
            let cursor = state.interaction.option_cursor.min(len - 1);
            state.interaction.option_cursor = if cursor == 0 { len - 1 } else { cursor - 1 };
            vec![WizardEffect::RequestFrame]
        }
        UserAction::ActivateOption => {
            if state.result.is_some() {
                return Vec::new();
            }
            let Some(control) = state.focused_control() else {
                return Vec::new();
            };
            let Some(option) = control.options().get(state.interaction.option_cursor) else {
                return Vec::new();
            };
            let update = match control.kind {
                ControlKind::Radio { field, .. } => {
                    FieldUpdate::Choice(field, option.value.to_string())
                }
                ControlKind::Checkbox { field, .. } => state.answers.toggled(field, option.value),
                ControlKind::Text { .. } => return Vec::new(),
            };
            apply_update(state, update);
            vec![WizardEffect::RequestFrame]
        }
        UserAction::BeginEdit => {
            let is_text = state
                .focused_control()
                .is_some_and(|control| matches!(control.kind, ControlKind::Text { .. }));
            if !is_text || state.result.is_some() {
                return Vec::new();
            }
            state.interaction.editing = true;
            vec![WizardEffect::RequestFrame]
        }
        UserAction::EndEdit => {
            if !state.interaction.editing {
                return Vec::new();
            }
            state.interaction.editing = false;
            vec![WizardEffect::RequestFrame]
        }
        UserAction::TextInput(ch) => edit_text(state, |text, input| {
            if accepts_char(input, ch) {
                text.push(ch);
            }
        }),
        UserAction::TextBackspace => edit_text(state, |text, _| {
            text.pop();
        }),
        UserAction::TextPaste(pasted) => edit_text(state, |text, input| {
            text.extend(pasted.chars().filter(|ch| accepts_char(input, *ch)));
        }),
        UserAction::ScrollResult(delta) => {
            if state.result.is_none() {
                return Vec::new();
            }
            state.interaction.result_scroll =
                state.interaction.result_scroll.saturating_add_signed(delta);
            vec![WizardEffect::RequestFrame]
        }
        UserAction::CopyResult => match &state.result {
            Some(result) => vec![
                WizardEffect::CopyToClipboard(result.text().to_string()),
                WizardEffect::RequestFrame,
            ],
            None => Vec::new(),
        },
        UserAction::ExportResult => match &state.result {
            Some(result) if !result.is_error() => vec![
                WizardEffect::ExportDocument(result.text().to_string()),
                WizardEffect::RequestFrame,
            ],
            _ => Vec::new(),
        },
        UserAction::CycleTheme => {
            state.customization.theme = state.customization.theme.next();
            vec![WizardEffect::RequestFrame]
        }
        UserAction::DismissNotice => {
            if state.interaction.notice.take().is_none() {
                return Vec::new();
            }
            vec![WizardEffect::RequestFrame]
        }
    }
}

fn reduce_runtime(state: &mut WizardState, action: RuntimeAction) {
    match action {
        RuntimeAction::SubmissionResolved { attempt, result } => {
            if state.phase != (SubmissionPhase::Submitting { attempt }) {
                warn!(attempt, "dropping resolution for an attempt that is not in flight");
                return;
            }
            info!(attempt, failed = result.is_error(), "submission resolved");
            state.phase = SubmissionPhase::Idle;
            state.result = Some(result);
            state.interaction.result_scroll = 0;
        }
        RuntimeAction::SetTheme(theme) => {
            state.customization.theme = theme;
        }
        RuntimeAction::SetNotice(notice) => {
            state.interaction.notice = notice;
        }
    }
}

fn reset_focus(state: &mut WizardState) {
    state.interaction.focused_control = 0;
    state.interaction.option_cursor = 0;
    state.interaction.editing = false;
}

fn apply_update(state: &mut WizardState, update: FieldUpdate) {
    debug!(field = %update.field().path(), "field updated");
    state.answers = state.answers.with_update(update);
}

fn edit_text<F>(state: &mut WizardState, edit: F) -> Vec<WizardEffect>
where
    F: FnOnce(&mut String, TextInputKind),
{
    if !state.interaction.editing || state.result.is_some() {
        return Vec::new();
    }
    let Some(control) = state.focused_control() else {
        return Vec::new();
    };
    let ControlKind::Text { field, input, .. } = control.kind else {
        return Vec::new();
    };
    let mut text = state.answers.text(field).to_string();
    edit(&mut text, input);
    apply_update(state, FieldUpdate::Text(field, text));
    vec![WizardEffect::RequestFrame]
}

fn accepts_char(input: TextInputKind, ch: char) -> bool {
    match input {
        TextInputKind::Line => !ch.is_control(),
        TextInputKind::Multiline => ch == '\n' || !ch.is_control(),
        TextInputKind::Number => ch.is_ascii_digit(),
        TextInputKind::Date => ch.is_ascii_digit() || ch == '-',
    }
}

#[cfg(test)]
mod tests;
