use super::answers::AnswerStore;
use super::steps::last_step_index;
use super::steps::step;
use super::steps::ControlSpec;
use super::steps::StepDescriptor;
use super::steps::STEPS;
use super::submission::SubmissionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTheme {
    Classic,
    Ocean,
    Forest,
}

impl UiTheme {
    pub fn label(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Ocean => "ocean",
            Self::Forest => "forest",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Classic => Self::Ocean,
            Self::Ocean => Self::Forest,
            Self::Forest => Self::Classic,
        }
    }

    pub fn from_label(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "classic" => Some(Self::Classic),
            "ocean" => Some(Self::Ocean),
            "forest" => Some(Self::Forest),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    /// One outbound call is in flight for `attempt`.
    Submitting { attempt: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardView {
    Form,
    Result,
}

#[derive(Debug, Clone, Default)]
pub struct WizardInteraction {
    /// Index into the visible controls of the current step.
    pub focused_control: usize,
    /// Highlighted option inside the focused radio/checkbox control.
    pub option_cursor: usize,
    /// True while keystrokes go into the focused text control.
    pub editing: bool,
    pub result_scroll: u16,
    pub notice: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WizardCustomization {
    pub theme: UiTheme,
}

/// Everything one questionnaire session owns.
#[derive(Debug, Clone)]
pub struct WizardState {
    pub position: usize,
    pub answers: AnswerStore,
    pub phase: SubmissionPhase,
    pub result: Option<SubmissionResult>,
    pub interaction: WizardInteraction,
    pub customization: WizardCustomization,
    pub next_attempt: u64,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(UiTheme::Classic)
    }
}

impl WizardState {
    pub fn new(theme: UiTheme) -> Self {
        Self {
            position: 0,
            answers: AnswerStore::new(),
            phase: SubmissionPhase::Idle,
            result: None,
            interaction: WizardInteraction::default(),
            customization: WizardCustomization { theme },
            next_attempt: 1,
        }
    }

    pub fn current_step(&self) -> &'static StepDescriptor {
        step(self.position).unwrap_or(&STEPS[0])
    }

    pub fn is_last_step(&self) -> bool {
        self.position == last_step_index()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Submitting { .. })
    }

    pub fn view(&self) -> WizardView {
        if self.result.is_some() {
            WizardView::Result
        } else {
            WizardView::Form
        }
    }

    pub fn visible_controls(&self) -> Vec<&'static ControlSpec> {
        self.current_step().visible_controls(&self.answers)
    }

    /// The focused control, clamped to what is visible right now. Visibility
    /// can shrink after an answer changes, so the stored index may overshoot.
    pub fn focused_control(&self) -> Option<&'static ControlSpec> {
        let visible = self.visible_controls();
        let last = visible.len().checked_sub(1)?;
        visible
            .get(self.interaction.focused_control.min(last))
            .copied()
    }

    pub fn focused_index(&self) -> usize {
        let count = self.visible_controls().len();
        self.interaction
            .focused_control
            .min(count.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::answers::ChoiceField;
    use crate::answers::FieldId;
    use crate::answers::FieldUpdate;

    #[test]
    fn new_state_starts_on_first_step_without_result() {
        let state = WizardState::default();
        assert_eq!(state.position, 0);
        assert_eq!(state.view(), WizardView::Form);
        assert_eq!(state.phase, SubmissionPhase::Idle);
        assert!(!state.is_last_step());
    }

    #[test]
    fn focused_control_clamps_when_visibility_shrinks() {
        let mut state = WizardState::default();
        state.position = 1;
        state.answers = state.answers.with_update(FieldUpdate::Choice(
            ChoiceField::UploadMethod,
            "developer".to_string(),
        ));
        state.interaction.focused_control = 4;
        assert_eq!(
            state.focused_control().map(ControlSpec::field),
            Some(FieldId::Choice(ChoiceField::CategoryStructure))
        );

        state.answers = state.answers.with_update(FieldUpdate::Choice(
            ChoiceField::UploadMethod,
            "client".to_string(),
        ));
        assert_eq!(state.focused_index(), 3);
        assert_eq!(
            state.focused_control().map(ControlSpec::field),
            Some(FieldId::Choice(ChoiceField::CategoryStructure))
        );
    }

    #[test]
    fn theme_labels_round_trip() {
        for theme in [UiTheme::Classic, UiTheme::Ocean, UiTheme::Forest] {
            assert_eq!(UiTheme::from_label(theme.label()), Some(theme));
        }
        assert_eq!(UiTheme::from_label("neon"), None);
    }
}
