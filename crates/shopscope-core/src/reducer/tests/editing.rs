use super::*;
use pretty_assertions::assert_eq;

#[test]
fn activate_selects_the_highlighted_radio_option() {
    let mut state = state();
    focus_field(&mut state, FieldId::Choice(ChoiceField::HasBranding));
    user(&mut state, UserAction::OptionNext);
    user(&mut state, UserAction::OptionNext);

    let effects = user(&mut state, UserAction::ActivateOption);

    assert_eq!(effects, vec![WizardEffect::RequestFrame]);
    assert_eq!(state.answers.choice(ChoiceField::HasBranding), "no");
}

#[test]
fn option_cursor_wraps_both_ways() {
    let mut state = state();
    focus_field(&mut state, FieldId::Choice(ChoiceField::WebsiteStatus));

    user(&mut state, UserAction::OptionPrev);
    assert_eq!(state.interaction.option_cursor, 1);
    user(&mut state, UserAction::OptionNext);
    assert_eq!(state.interaction.option_cursor, 0);
}

#[test]
fn activate_toggles_checkbox_tokens_in_selection_order() {
    let mut state = state();
    state.position = 2;
    focus_field(&mut state, FieldId::Multi(MultiField::OnlineMethods));

    // PayPal, then Stripe.
    user(&mut state, UserAction::OptionNext);
    user(&mut state, UserAction::ActivateOption);
    user(&mut state, UserAction::OptionPrev);
    user(&mut state, UserAction::ActivateOption);
    assert_eq!(
        state.answers.multi(MultiField::OnlineMethods).to_vec(),
        vec!["PayPal".to_string(), "Stripe".to_string()]
    );

    user(&mut state, UserAction::OptionNext);
    user(&mut state, UserAction::ActivateOption);
    assert_eq!(
        state.answers.multi(MultiField::OnlineMethods).to_vec(),
        vec!["Stripe".to_string()]
    );
}

#[test]
fn activate_on_text_control_is_a_no_op() {
    let mut state = state();
    focus_field(&mut state, FieldId::Text(TextField::Deadline));

    assert!(user(&mut state, UserAction::ActivateOption).is_empty());
}

#[test]
fn typing_requires_edit_mode() {
    let mut state = state();
    focus_field(&mut state, FieldId::Text(TextField::DesignReferences));

    assert!(user(&mut state, UserAction::TextInput('x')).is_empty());
    assert_eq!(state.answers.text(TextField::DesignReferences), "");

    user(&mut state, UserAction::BeginEdit);
    user(&mut state, UserAction::TextInput('x'));
    user(&mut state, UserAction::TextInput('y'));
    user(&mut state, UserAction::TextBackspace);
    assert_eq!(state.answers.text(TextField::DesignReferences), "x");

    user(&mut state, UserAction::EndEdit);
    assert!(!state.interaction.editing);
}

#[test]
fn begin_edit_needs_a_text_control() {
    let mut state = state();
    focus_field(&mut state, FieldId::Choice(ChoiceField::HasBranding));

    assert!(user(&mut state, UserAction::BeginEdit).is_empty());
    assert!(!state.interaction.editing);
}

#[test]
fn number_input_keeps_digits_only() {
    let mut state = state();
    state.position = 1;
    focus_field(&mut state, FieldId::Text(TextField::CategoryCount));
    user(&mut state, UserAction::BeginEdit);

    for ch in "1a2 ".chars() {
        user(&mut state, UserAction::TextInput(ch));
    }
    user(&mut state, UserAction::TextPaste("3x4".to_string()));

    assert_eq!(state.answers.text(TextField::CategoryCount), "1234");
}

#[test]
fn date_input_accepts_iso_characters() {
    let mut state = state();
    focus_field(&mut state, FieldId::Text(TextField::Deadline));
    user(&mut state, UserAction::BeginEdit);

    user(&mut state, UserAction::TextPaste("2026-11-30!".to_string()));

    assert_eq!(state.answers.text(TextField::Deadline), "2026-11-30");
}

#[test]
fn multiline_input_keeps_newlines() {
    let mut state = state();
    focus_field(&mut state, FieldId::Text(TextField::DesignReferences));
    user(&mut state, UserAction::BeginEdit);

    user(&mut state, UserAction::TextPaste("apple.com\nnike.com".to_string()));

    assert_eq!(
        state.answers.text(TextField::DesignReferences),
        "apple.com\nnike.com"
    );
}

#[test]
fn submit_leaves_edit_mode() {
    let mut state = at_last_step();
    state.interaction.editing = true;

    start_submission(&mut state);

    assert!(!state.interaction.editing);
}
