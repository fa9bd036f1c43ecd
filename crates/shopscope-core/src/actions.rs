use super::answers::FieldUpdate;
use super::state::UiTheme;
use super::submission::SubmissionResult;

#[derive(Debug, Clone)]
pub enum WizardAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

#[derive(Debug, Clone)]
pub enum UserAction {
    Advance,
    Retreat,
    Submit,
    Reset,
    UpdateField(FieldUpdate),
    FocusNextControl,
    FocusPrevControl,
    OptionNext,
    OptionPrev,
    /// Selects the highlighted radio option or toggles the highlighted checkbox.
    ActivateOption,
    BeginEdit,
    EndEdit,
    TextInput(char),
    TextBackspace,
    TextPaste(String),
    ScrollResult(i16),
    CopyResult,
    ExportResult,
    CycleTheme,
    DismissNotice,
}

#[derive(Debug, Clone)]
pub enum RuntimeAction {
    SubmissionResolved {
        attempt: u64,
        result: SubmissionResult,
    },
    SetTheme(UiTheme),
    SetNotice(Option<String>),
}
